use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DB_DIR_ENV: &str = "AVLDB_DB_DIR";
pub const LOG_DIR_ENV: &str = "AVLDB_LOG_DIR";

const DEFAULT_DB_DIR: &str = "./DB";
const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_LOG_FILE: &str = "tree.log";

/// Where tree files and the log file live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub db_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_dir: PathBuf::from(DEFAULT_DB_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_file: DEFAULT_LOG_FILE.to_owned(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `AVLDB_DB_DIR` / `AVLDB_LOG_DIR` when set.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var_os(name))
    }

    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup(DB_DIR_ENV).filter(|v| !v.is_empty()) {
            config.db_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(LOG_DIR_ENV).filter(|v| !v.is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn log_path(&self) -> io::Result<PathBuf> {
        validate_dir(&self.log_dir, &self.log_file)
    }
}

/// Creates `dir` (with parents) if missing and returns `dir/file_name`.
pub fn validate_dir(dir: &Path, file_name: &str) -> io::Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        log::debug!("Created directory {}.", dir.display());
    }
    Ok(dir.join(file_name))
}
