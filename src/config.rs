use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::network::Network;
use crate::store::ThemeMode;

/// Fallback for the explorer API key
pub const API_KEY_ENV: &str = "TSCAN_API_KEY";
/// Fallback for the selected network
pub const NETWORK_ENV: &str = "TSCAN_NETWORK";

const MAX_RECENT_SEARCHES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub network_name: Option<String>,
    pub theme_mode: Option<String>,
    #[serde(default)]
    pub recent_searches: Vec<String>,
    /// Per-network base URL overrides, keyed by network id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub api_urls: BTreeMap<String, String>,
    /// Where this config is persisted. In-memory configs never touch disk.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Returns the config directory path (~/.config/tscan on Linux)
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("tscan"))
            .context("Could not determine config directory")
    }

    /// Returns the default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory for log files
    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("logs"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load config from disk, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                path: Some(path.to_path_buf()),
                ..Self::default()
            });
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {path:?}"))?;

        let mut config: Self = toml::from_str(&contents).context("Failed to parse config file")?;
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {dir:?}"))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {path:?}"))?;

        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Set the API key and persist
    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// Set the network and persist
    pub fn set_network(&mut self, network: Network) -> Result<()> {
        self.network_name = Some(network.id().to_string());
        self.save()
    }

    /// Set the theme mode and persist
    pub fn set_theme(&mut self, mode: ThemeMode) -> Result<()> {
        self.theme_mode = Some(mode.as_str().to_string());
        self.save()
    }

    /// Add a search to recent history (keeps last 10)
    pub fn add_recent_search(&mut self, query: String) -> Result<()> {
        self.recent_searches.retain(|s| s != &query);
        self.recent_searches.insert(0, query);
        self.recent_searches.truncate(MAX_RECENT_SEARCHES);
        self.save()
    }

    /// Remove a search from recent history
    pub fn remove_recent_search(&mut self, index: usize) -> Result<()> {
        if index < self.recent_searches.len() {
            self.recent_searches.remove(index);
            self.save()?;
        }
        Ok(())
    }

    /// Configured key, then the environment
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), std::env::var(API_KEY_ENV).ok().as_deref())
    }

    /// Persisted network, then the environment, then Ethereum
    pub fn network(&self) -> Network {
        let env = std::env::var(NETWORK_ENV).ok();
        resolve_network(self.network_name.as_deref(), env.as_deref())
    }

    /// Persisted theme mode, light when unset or unrecognized
    pub fn theme(&self) -> ThemeMode {
        self.theme_mode
            .as_deref()
            .and_then(ThemeMode::parse)
            .unwrap_or_default()
    }

    /// Base URL for a network, honoring overrides
    pub fn api_url(&self, network: Network) -> String {
        self.api_urls
            .get(network.id())
            .cloned()
            .unwrap_or_else(|| network.api_url().to_string())
    }
}

/// First non-blank key wins
pub fn resolve_api_key(configured: Option<&str>, env: Option<&str>) -> Option<String> {
    [configured, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|k| !k.is_empty())
        .map(str::to_string)
}

pub fn resolve_network(persisted: Option<&str>, env: Option<&str>) -> Network {
    Network::resolve(persisted.or(env))
}
