//! Log file setup
//!
//! The TUI owns the terminal, so events go to a plain-text file in the data
//! directory instead of stderr. `RUST_LOG` overrides the configured level.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Path of the log file for a data directory
pub fn log_path(data_dir: &Path, config: &LoggingConfig) -> PathBuf {
    data_dir.join(&config.file)
}

/// Install the global subscriber. Call once, after the data dir exists.
pub fn init(data_dir: &Path, config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(data_dir, config))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path() {
        let config = LoggingConfig::default();
        assert_eq!(
            log_path(Path::new("/data"), &config),
            PathBuf::from("/data/worktrip.log")
        );
    }
}
