//! Data-directory resolution.
//!
//! The database lives at `$XDG_DATA_HOME/5am/5am.db` when `XDG_DATA_HOME`
//! is set and non-empty, otherwise `~/.local/share/5am/5am.db`.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "5am";
const DB_FILE: &str = "5am.db";

/// Resolve the data directory from an explicit environment value and home
/// directory. Split out from [`data_dir`] so the precedence rules are
/// testable without touching the process environment.
pub fn data_dir_from(xdg_data_home: Option<&str>, home: Option<&Path>) -> io::Result<PathBuf> {
    let root = match xdg_data_home {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => home
            .map(|h| h.join(".local").join("share"))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?,
    };
    Ok(root.join(APP_DIR))
}

/// Returns the data directory for the current environment, creating it if
/// needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let xdg = env::var("XDG_DATA_HOME").ok();
    let home = dirs::home_dir();
    let dir = data_dir_from(xdg.as_deref(), home.as_deref())?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the default database path, creating the data directory.
pub fn database_path() -> io::Result<PathBuf> {
    Ok(data_dir()?.join(DB_FILE))
}
