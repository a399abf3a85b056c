use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Manage student records stored in a local SQLite database",
    long_about = "Add, search, edit and delete student records (name, course, mobile). Every mutating command prints the refreshed table. Use `serve` to expose the same actions over a JSON REST API.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long,
        env = "SMS_DATA_DIR",
        default_value = ".sms/",
        value_name = "DIR",
        help = "Directory holding the student database"
    )]
    pub data_dir: String,

    #[arg(
        long = "db-name",
        env = "SMS_DB_NAME",
        default_value = "database.db",
        value_name = "NAME",
        help = "File name of the student database inside the data directory"
    )]
    pub db_name: String,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before running"
    )]
    pub reset: bool,

    #[arg(
        long = "log-file",
        env = "SMS_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    if dotenvy::from_filename(&dotenv_path).is_ok() {
        log::debug!("Loaded env from {}", dotenv_path);
    }
    Cli::parse()
}
