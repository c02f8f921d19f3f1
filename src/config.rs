use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::ClientConfig;

/// Environment variable overriding `server.api_url`
pub const API_URL_ENV: &str = "WAGTAIL_API_URL";
/// Environment variable overriding `server.public_api_url`
pub const PUBLIC_API_URL_ENV: &str = "NEXT_PUBLIC_WAGTAIL_API_URL";

const DEFAULT_COMPONENTS: &[&str] = &["HomePage", "BasePage", "ArticlePage", "NotFoundPage"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub components: ComponentsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server-side API root
    pub api_url: Option<String>,
    /// Browser-reachable API root, used for password-protected pages
    pub public_api_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentsConfig {
    /// Component names rendered with the generic props view
    pub names: Vec<String>,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            names: DEFAULT_COMPONENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;

        let app_dir = home_dir.join(".config").join("headless-cms-tui");

        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir.join("config.toml"))
    }

    /// Load config from file (or defaults), then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            Self::from_toml(&contents)?
        } else {
            Self::default()
        };

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;
        Ok(())
    }

    /// Replace URLs from a lookup (the process environment in `load`)
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.is_empty()) {
            self.server.api_url = Some(url);
        }
        if let Some(url) = lookup(PUBLIC_API_URL_ENV).filter(|u| !u.is_empty()) {
            self.server.public_api_url = Some(url);
        }
        self
    }

    /// Set both API URLs and save. An empty public URL falls back to the API URL.
    pub fn set_urls(&mut self, api_url: String, public_api_url: Option<String>) -> Result<()> {
        self.server.public_api_url = public_api_url.filter(|u| !u.is_empty());
        self.server.api_url = Some(api_url);
        self.save()?;
        Ok(())
    }

    /// Build the client configuration, if an API URL is known
    pub fn client_config(&self) -> Result<Option<ClientConfig>> {
        let Some(api_url) = self.server.api_url.as_deref() else {
            return Ok(None);
        };
        let public_url = self.server.public_api_url.as_deref().unwrap_or(api_url);

        Ok(Some(ClientConfig::new(api_url, public_url)?))
    }
}

/// Simple URL validation
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    url::Url::parse(url).map_err(|e| format!("Invalid URL: {e}"))?;

    Ok(())
}
