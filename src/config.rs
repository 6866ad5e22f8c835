//! Process configuration, read once at startup from the environment.

use crate::models::STORAGE_KEY;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8080;

/// Endpoint of the optional remote log service. Its presence decides the
/// controller's capability for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub remote: Option<RemoteConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any string lookup. Unset or unparsable values
    /// fall back to defaults; an empty `MISOGI_REMOTE_URL` counts as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("MISOGI_DATA_PATH")
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_path);
        let remote = lookup("MISOGI_REMOTE_URL")
            .filter(|raw| !raw.is_empty())
            .map(|base_url| RemoteConfig {
                base_url,
                auth_token: lookup("MISOGI_AUTH_TOKEN").filter(|raw| !raw.is_empty()),
            });
        Self {
            port,
            data_path,
            remote,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data").join(format!("{STORAGE_KEY}.json"))
}
