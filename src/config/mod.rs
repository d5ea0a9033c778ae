//! Configuration management.
//!
//! Configuration is explicit: nothing is read from the environment. A config
//! can be built in code or loaded from a TOML file:
//!
//! ```toml
//! base_url = "https://zenodo.org/api/records"
//! user_agent = "my-tool/1.0"
//! connect_timeout_secs = 10
//!
//! [downloads]
//! destination_dir = "./zenodo-files"
//! timeout_secs = 60
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ZenodoError};
use crate::utils::DEFAULT_USER_AGENT;

/// Records endpoint of the public Zenodo instance
pub const ZENODO_RECORDS_URL: &str = "https://zenodo.org/api/records";

/// Records endpoint of the Zenodo sandbox
pub const SANDBOX_RECORDS_URL: &str = "https://sandbox.zenodo.org/api/records";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Records search endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Connect timeout for the HTTP transport
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Download settings
    #[serde(default)]
    pub downloads: DownloadConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout(),
            downloads: DownloadConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at the Zenodo sandbox
    pub fn sandbox() -> Self {
        Self::default().base_url(SANDBOX_RECORDS_URL)
    }

    /// Set the records endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the default download directory
    pub fn destination_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.downloads.destination_dir = Some(dir.into());
        self
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ZenodoError::Config(format!("Serialize error: {}", e)))?;

        std::fs::write(path, content).map_err(|source| ZenodoError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Download configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Default download directory (working directory when unset)
    #[serde(default)]
    pub destination_dir: Option<PathBuf>,

    /// Per-file request timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    ZENODO_RECORDS_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<ClientConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Toml))
        .build()
        .map_err(|e| ZenodoError::Config(e.to_string()))?;

    settings
        .try_deserialize()
        .map_err(|e| ZenodoError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, ZENODO_RECORDS_URL);
        assert_eq!(config.connect_timeout_secs, 10);
        assert!(config.downloads.destination_dir.is_none());
        assert!(config.downloads.timeout_secs.is_none());
    }

    #[test]
    fn test_sandbox_config() {
        assert_eq!(ClientConfig::sandbox().base_url, SANDBOX_RECORDS_URL);
    }

    #[test]
    fn test_load_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zenodo.toml");

        let toml_content = r#"
base_url = "http://localhost:5000/api/records"
user_agent = "tests/1.0"

[downloads]
destination_dir = "/tmp/zenodo"
timeout_secs = 30
"#;
        std::fs::write(&path, toml_content).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.base_url, "http://localhost:5000/api/records");
        assert_eq!(config.user_agent, "tests/1.0");
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(
            config.downloads.destination_dir,
            Some(PathBuf::from("/tmp/zenodo"))
        );
        assert_eq!(config.downloads.timeout_secs, Some(30));
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zenodo.toml");

        let config = ClientConfig::sandbox()
            .user_agent("saved/0.1")
            .destination_dir("files");
        config.save(&path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent() {
        let result = load_config(Path::new("/nonexistent/zenodo.toml"));
        assert!(matches!(result, Err(ZenodoError::Config(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(&path).is_err());
    }
}
