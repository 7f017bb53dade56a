//! # Configuration
//!
//! Optional settings with a clear override hierarchy:
//! defaults → config file → CLI flags.
//!
//! Config lives at `~/.config/5am/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Runtime toggles (pane visibility etc.) are not here — those persist in
//! the database's settings table.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Dashboard sparkline window, in days.
pub const DEFAULT_HISTORY_DAYS: u32 = 14;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FiveamConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Overrides the XDG-derived database path.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DashboardConfig {
    pub days: Option<u32>,
}

/// Concrete values after collapsing the hierarchy. A `None` database path
/// means "derive it from `XDG_DATA_HOME`".
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub db_path: Option<PathBuf>,
    pub history_days: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Returns the path to `~/.config/5am/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("5am").join("config.toml"))
}

/// Load the config file.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FiveamConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FiveamConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("could not determine config directory, using defaults");
            return Ok(FiveamConfig::default());
        }
    };

    if !path.exists() {
        info!("no config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FiveamConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: FiveamConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# 5am configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → CLI flags.

# [database]
# path = "/path/to/5am.db"   # Default: $XDG_DATA_HOME/5am/5am.db

# [dashboard]
# days = 14                  # Sparkline window, in days
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("failed to create config directory: {e}");
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("failed to write default config: {e}");
    }
}

/// Collapse the hierarchy: defaults → config file → CLI flags.
pub fn resolve(config: &FiveamConfig, cli_db: Option<&Path>) -> ResolvedConfig {
    let db_path = cli_db
        .map(Path::to_path_buf)
        .or_else(|| config.database.path.clone());
    ResolvedConfig {
        db_path,
        history_days: config.dashboard.days.unwrap_or(DEFAULT_HISTORY_DAYS).max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&FiveamConfig::default(), None);
        assert_eq!(resolved.db_path, None);
        assert_eq!(resolved.history_days, DEFAULT_HISTORY_DAYS);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = FiveamConfig {
            database: DatabaseConfig {
                path: Some(PathBuf::from("/data/todos.db")),
            },
            dashboard: DashboardConfig { days: Some(30) },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.db_path, Some(PathBuf::from("/data/todos.db")));
        assert_eq!(resolved.history_days, 30);
    }

    #[test]
    fn test_resolve_cli_db_wins() {
        let config = FiveamConfig {
            database: DatabaseConfig {
                path: Some(PathBuf::from("/config/wins/not.db")),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some(Path::new("/cli/wins.db")));
        assert_eq!(resolved.db_path, Some(PathBuf::from("/cli/wins.db")));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: FiveamConfig = toml::from_str(
            r#"
[dashboard]
days = 7
"#,
        )
        .unwrap();
        assert_eq!(config.dashboard.days, Some(7));
        assert!(config.database.path.is_none());
    }

    #[test]
    fn test_zero_days_clamps_to_one() {
        let config = FiveamConfig {
            dashboard: DashboardConfig { days: Some(0) },
            ..Default::default()
        };
        assert_eq!(resolve(&config, None).history_days, 1);
    }
}
