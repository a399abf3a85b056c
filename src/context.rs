use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::ops::Deref;
use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::configuration::Configuration;

pub const DEFAULT_API_LISTEN: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8084));

pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        let api_listen = match &cli.cmd {
            Some(Command::Serve { listen }) => *listen,
            _ => DEFAULT_API_LISTEN,
        };
        let cfg = Configuration {
            data_dir: PathBuf::from(&cli.data_dir),
            db_name: cli.db_name.clone(),
            log_file: cli.log_file.as_ref().map(PathBuf::from),
            reset: cli.reset,
            api_listen,
        };
        Self { config: cfg }
    }
}

impl Deref for Context {
    type Target = Configuration;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}
