use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// GitHub "latest release" endpoint for ICARUS Terminal
pub const LATEST_RELEASE_URL: &str =
    "https://api.github.com/repos/iaincollins/icarus/releases/latest";

/// Where the Artifact Retriever writes by default
pub const DEFAULT_DOWNLOAD_FILE_NAME: &str = "ICARUS Update.exe";

/// Updater settings stored in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    pub feed_url: String,
    /// Upper bound on the whole feed request
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Executable whose version resource is inspected; the running binary when unset
    pub executable: Option<PathBuf>,
    pub download_file_name: String,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            feed_url: LATEST_RELEASE_URL.into(),
            timeout_secs: 5,
            user_agent: concat!("ICARUS-Terminal-Updater/", env!("CARGO_PKG_VERSION")).into(),
            executable: None,
            download_file_name: DEFAULT_DOWNLOAD_FILE_NAME.into(),
        }
    }
}

impl UpdaterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("ICARUS Terminal").join("updater.json")
}

pub fn load_config() -> UpdaterConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &std::path::Path) -> UpdaterConfig {
    let Ok(data) = fs::read_to_string(path) else {
        return UpdaterConfig::default();
    };
    match serde_json::from_str(&data) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable updater config");
            UpdaterConfig::default()
        }
    }
}
