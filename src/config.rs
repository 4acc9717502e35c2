//! Command line and environment configuration. Only the storage location and
//! the logging setup are configurable; everything else is fixed.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".record-keeper";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "records.sqlite";
/// Log file name stored next to the database.
const LOG_FILE_NAME: &str = "record-keeper.log";

#[derive(Debug, Parser)]
#[command(name = "record-keeper")]
#[command(about = "Keep a searchable list of items in a local SQLite file")]
pub struct Config {
    /// SQLite file holding the items
    #[arg(long, env = "RECORD_KEEPER_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// File receiving diagnostic logs
    #[arg(long, env = "RECORD_KEEPER_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `record_keeper=trace`
    #[arg(
        long,
        env = "RECORD_KEEPER_LOG",
        value_name = "FILTER",
        default_value = "info"
    )]
    pub log_level: String,
}

impl Config {
    /// Database path, falling back to `~/.record-keeper/records.sqlite`.
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.db {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(DB_FILE_NAME)),
        }
    }

    /// Log file path, falling back to `~/.record-keeper/record-keeper.log`.
    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(LOG_FILE_NAME)),
        }
    }
}

/// Resolve the application data directory inside the user's home.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
