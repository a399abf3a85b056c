use std::process::{Command, Output};

use tempfile::TempDir;

pub fn base_cmd(data_dir: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sms"));
    command
        .env("DOTENV_PATH", data_dir.path().join(".env"))
        .env_remove("SMS_DB_NAME")
        .env_remove("SMS_LOG_FILE")
        .arg("--data-dir")
        .arg(data_dir.path());
    command
}

pub fn run(data_dir: &TempDir, args: &[&str]) -> Output {
    base_cmd(data_dir)
        .args(args)
        .output()
        .expect("run sms binary")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Pull the id column out of the first table row whose name cell is `name`.
pub fn id_of(table: &str, name: &str) -> Option<i64> {
    table.lines().find_map(|line| {
        let cells: Vec<&str> = line
            .split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();
        match cells.as_slice() {
            [id, n, ..] if *n == name => id.parse().ok(),
            _ => None,
        }
    })
}
