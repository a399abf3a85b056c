use std::net::SocketAddr;
use std::path::PathBuf;

use crate::storage::StoreConfig;

#[derive(Clone, Debug)]
pub struct Configuration {
    pub data_dir: PathBuf,
    pub db_name: String,
    pub log_file: Option<PathBuf>,
    pub reset: bool,
    pub api_listen: SocketAddr,
}

impl Configuration {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_name)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.db_path())
    }
}
