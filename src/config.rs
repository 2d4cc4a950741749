//! # Configuration Module
//!
//! OAuth application settings, API endpoints and data directory handling.
//!
//! ## Data Storage
//!
//! Moodfacts keeps its credential store in the platform-standard data
//! directory unless `--data-dir` says otherwise:
//! - Linux: `~/.local/share/moodfacts/`
//! - macOS: `~/Library/Application Support/moodfacts/`
//! - Windows: `%APPDATA%\moodfacts\`
//!
//! ## Overrides
//!
//! Every [`Config`] field may be overridden from a JSON file. Missing fields
//! keep their defaults, so a file containing only `{"client_id": "..."}`
//! is valid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CLIENT_ID: &str = "821c2e004b094b928bdf7d4ab553e034";
/// Must match the redirect URI registered with the streaming service.
pub const DEFAULT_REDIRECT_URI: &str = "https://aaes250.github.io/test-app/";
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";
pub const DEFAULT_RESPONSE_TYPE: &str = "token";
pub const DEFAULT_STORAGE_KEY: &str = "spotify_token";
pub const DEFAULT_RECENTLY_PLAYED_LIMIT: u32 = 20;

const CONFIG_FILE_NAME: &str = "config.json";
const STORAGE_FILE_NAME: &str = "storage.db";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub client_id: String,
    pub redirect_uri: String,
    pub auth_endpoint: String,
    pub api_base: String,
    pub scopes: Vec<String>,
    pub response_type: String,
    /// Key the credential is stored under.
    pub storage_key: String,
    pub recently_played_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            scopes: vec!["user-read-recently-played".to_string()],
            response_type: DEFAULT_RESPONSE_TYPE.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            recently_played_limit: DEFAULT_RECENTLY_PLAYED_LIMIT,
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, `<data_dir>/config.json`
    /// is used when present and the defaults otherwise.
    pub fn load(path: Option<&Path>, data_dir: &Path) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = data_dir.join(CONFIG_FILE_NAME);
                if !default_path.exists() {
                    log::debug!("No config file at {}, using defaults", default_path.display());
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Storage origin derived from the redirect URI (`scheme://host[:port]`).
    ///
    /// Falls back to the raw redirect URI when it is not an absolute URL.
    #[must_use]
    pub fn origin(&self) -> String {
        match url::Url::parse(&self.redirect_uri) {
            Ok(url) => url.origin().ascii_serialization(),
            Err(err) => {
                log::warn!("Redirect URI `{}' is not a URL ({err}); using it as origin", self.redirect_uri);
                self.redirect_uri.clone()
            }
        }
    }
}

/// Returns the data directory, creating it if needed.
///
/// `override_dir` wins over the platform data directory.
pub fn get_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!(
                "Could not determine system data directory. Pass --data-dir explicitly."
            ))?
            .join("moodfacts"),
    };

    fs::create_dir_all(&dir).with_context(|| format!(
        "Failed to create data directory at {}. Please check file permissions.",
        dir.display()
    ))?;

    Ok(dir)
}

/// Path of the persistent storage database inside `data_dir`.
#[must_use]
pub fn storage_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STORAGE_FILE_NAME)
}
