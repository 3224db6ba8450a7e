use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for repo-privatizer
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    /// GitHub API settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Exclusion list settings
    #[serde(default)]
    pub exclude: ExcludeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GitHub API configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Value sent in the `X-GitHub-Api-Version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Repositories requested per listing page
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Upper bound on listing pages fetched in one run
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Send the token on the listing call as well
    #[serde(default)]
    pub authenticate_listing: bool,
}

/// Exclusion list configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExcludeConfig {
    /// Path of the exclusion file (one full name per line)
    #[serde(default = "default_exclude_file")]
    pub file: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String, // "warn"
}

// Default value functions
fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_api_version() -> String {
    "2022-11-28".to_string()
}
fn default_per_page() -> u32 {
    100
}
fn default_max_pages() -> u32 {
    255
}
fn default_exclude_file() -> String {
    "./exclude.txt".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_version: default_api_version(),
            per_page: default_per_page(),
            max_pages: default_max_pages(),
            authenticate_listing: false,
        }
    }
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            file: default_exclude_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, else from the default location,
    /// falling back to built-in defaults when no file exists there.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            tracing::debug!("No configuration at {:?}, using defaults", config_path);
            let mut config = Self::default();
            config.expand_paths()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.expand_paths()?;

        Ok(config)
    }

    /// Get the default configuration file path (XDG compliant)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().context("Failed to get user config directory")?;

        Ok(config_dir.join("repo-privatizer").join("config.yml"))
    }

    /// Expand environment variables in configuration paths
    pub fn expand_paths(&mut self) -> Result<()> {
        self.exclude.file = shellexpand::full(&self.exclude.file)
            .context("Failed to expand exclude.file path")?
            .into_owned();

        Ok(())
    }

    /// Exclusion file location after expansion
    pub fn exclude_path(&self) -> PathBuf {
        PathBuf::from(&self.exclude.file)
    }
}
