pub mod completions;
pub mod config;
pub mod exec;
pub mod shell;
pub mod status;
pub mod theme;
pub mod visitors;

use crate::config::Config;
use crate::site::Site;
use crate::storage::{FileStore, MemoryStore};

/// Site backed by the durable file store in the configured data dir
pub fn open_site(config: &Config) -> Site {
    let data_dir = config.data_dir();
    log::debug!("Using data directory: {}", data_dir.display());
    Site::new(
        config.clone(),
        Box::new(FileStore::in_dir(&data_dir)),
        Box::new(MemoryStore::new()),
    )
}
