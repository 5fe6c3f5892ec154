use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub api_key: String,
    #[serde(rename = "apiURL", alias = "apiUrl")]
    pub api_url: String,
    pub takeout_path: String,
    pub timeout_seconds: Option<u64>,
}

impl Config {
    /// Load from an explicit file, `./config.json`, the user config dir, or
    /// the environment, in that order.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::candidate_paths().into_iter().find(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    println!("No config file found, trying ENV vars...");
                    Self::from_env()
                }
            },
        };
        config.validate()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SyncError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: lookup("IMMICH_API_KEY").unwrap_or_default(),
            api_url: lookup("IMMICH_API_URL").unwrap_or_default(),
            takeout_path: lookup("IMMICH_TAKEOUT_PATH").unwrap_or_default(),
            timeout_seconds: lookup("IMMICH_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()),
        }
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("takeout-sync").join(CONFIG_FILE_NAME));
        }
        paths
    }

    fn validate(mut self) -> Result<Self> {
        if self.api_key.trim().is_empty() {
            return Err(SyncError::MissingApiKey);
        }
        if self.api_url.trim().is_empty() {
            return Err(SyncError::MissingApiUrl);
        }
        if self.takeout_path.trim().is_empty() {
            println!("No takeout path set, using current directory");
            self.takeout_path = ".".into();
        }
        Ok(self)
    }

    pub fn takeout_root(&self) -> PathBuf {
        PathBuf::from(&self.takeout_path)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}
