//! Runtime configuration: optional `jobdesk.ron` in the working directory,
//! then environment overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jobdesk_client::{ClientSettings, DEFAULT_API_URL};
use jobdesk_logging::{desk_info, desk_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "jobdesk.ron";
pub const API_URL_ENV: &str = "JOBDESK_API_URL";
pub const POLL_SECS_ENV: &str = "JOBDESK_POLL_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    /// Seconds between background refreshes; 0 turns polling off.
    pub poll_secs: u64,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    /// Relative paths resolve against the working directory.
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            poll_secs: 5,
            connect_timeout_secs: Some(10),
            request_timeout_secs: None,
            export_dir: PathBuf::from("exports"),
        }
    }
}

impl AppConfig {
    /// Loads `dir/jobdesk.ron` if present and applies environment overrides.
    pub fn load(dir: &Path) -> Self {
        Self::from_file(&dir.join(CONFIG_FILENAME))
            .with_overrides(|name| std::env::var(name).ok())
    }

    fn from_file(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                desk_warn!("Failed to read config {:?}: {}", path, err);
                return Self::default();
            }
        };
        match ron::from_str(&content) {
            Ok(config) => {
                desk_info!("Loaded config from {:?}", path);
                config
            }
            Err(err) => {
                desk_warn!("Ignoring malformed config {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(POLL_SECS_ENV) {
            match raw.trim().parse() {
                Ok(secs) => self.poll_secs = secs,
                Err(_) => desk_warn!("Ignoring {POLL_SECS_ENV}={raw:?}: not a number"),
            }
        }
        self
    }

    pub fn poll_interval(&self) -> Option<Duration> {
        (self.poll_secs > 0).then(|| Duration::from_secs(self.poll_secs))
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_url.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..ClientSettings::default()
        }
    }

    pub fn export_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.export_dir)
    }
}
