//! Logging setup for the terminal front-end.
//!
//! The alternate screen owns stdout, so log records go to `./jobdesk.log`.
//! `JOBDESK_LOG` picks the level (default `info`).

use std::fs::File;
use std::path::Path;

use jobdesk_logging::parse_level;
use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

pub const LOG_FILENAME: &str = "jobdesk.log";
pub const LOG_LEVEL_ENV: &str = "JOBDESK_LOG";

pub fn level_from_env() -> LevelFilter {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|name| parse_level(&name))
        .unwrap_or(LevelFilter::Info)
}

/// Installs the file logger under `dir`. Without a writable log file the app
/// runs silently.
pub fn initialize(dir: &Path, level: LevelFilter) {
    let path = dir.join(LOG_FILENAME);
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, build_config(), file);
        }
        Err(err) => eprintln!("Warning: Could not create log file at {:?}: {}", path, err),
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
