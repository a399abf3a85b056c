use std::net::SocketAddr;

use clap::Subcommand;

use crate::storage::StudentId;
use crate::types::Course;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "List all student records")]
    List,
    #[command(
        about = "Add a new student",
        long_about = "Insert a new student record. The database assigns its id."
    )]
    Add {
        #[arg(long, value_name = "NAME", help = "Student name")]
        name: String,
        #[arg(long, value_enum, ignore_case = true, value_name = "COURSE", help = "Course")]
        course: Course,
        #[arg(long, value_name = "MOBILE", help = "Mobile number")]
        mobile: String,
    },
    #[command(
        about = "Search students by name",
        long_about = "Print every student whose name matches exactly."
    )]
    Search {
        #[arg(long, value_name = "NAME", help = "Exact name to look for")]
        name: String,
    },
    #[command(
        about = "Edit a student record",
        long_about = "Select the record with the given id and overwrite its name, course and mobile number. Fields left out keep their current value."
    )]
    Edit {
        #[arg(long, value_name = "ID", help = "Id of the record to edit")]
        id: StudentId,
        #[arg(long, value_name = "NAME", help = "New student name")]
        name: Option<String>,
        #[arg(long, value_enum, ignore_case = true, value_name = "COURSE", help = "New course")]
        course: Option<Course>,
        #[arg(long, value_name = "MOBILE", help = "New mobile number")]
        mobile: Option<String>,
    },
    #[command(
        about = "Delete a student record",
        long_about = "Select the record with the given id and delete it permanently. Requires --yes."
    )]
    Delete {
        #[arg(long, value_name = "ID", help = "Id of the record to delete")]
        id: StudentId,
        #[arg(long, default_value_t = false, help = "Confirm the deletion")]
        yes: bool,
    },
    #[command(about = "Show information about this application")]
    About,
    #[command(
        about = "Serve the student records over a JSON REST API",
        long_about = "Run an HTTP server exposing list, search, add, edit and delete routes until Ctrl-C."
    )]
    Serve {
        #[arg(
            long,
            env = "SMS_API_LISTEN",
            value_name = "ADDR",
            default_value = "127.0.0.1:8084",
            help = "REST API listen address (host:port)"
        )]
        listen: SocketAddr,
    },
}
