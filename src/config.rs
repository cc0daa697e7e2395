//! Configuration management for CinemApp
//!
//! Handles config file loading/saving, API settings and the static
//! profile/login fixtures. Config is stored at ~/.config/cinemapp/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::tmdb::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
use crate::api::TmdbClient;
use crate::auth::{Account, LoginService, DEFAULT_DIRECTORY_URL};
use crate::models::{Profile, DEFAULT_IMAGE_BASE_URL};

/// Bundled TMDB v3 API key, used when nothing else is configured
const BUNDLED_TMDB_KEY: &str = "073d706a4419a033450d339b716b4ece";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: Option<String>,
    /// Response language (default en-US)
    pub language: Option<String>,
    /// TMDB API base URL
    pub api_base_url: Option<String>,
    /// Base URL that poster/backdrop/profile paths are joined onto
    pub image_base_url: Option<String>,
    /// Fallback user directory for the login screen
    pub user_directory_url: Option<String>,
    /// Profile shown on the profile screen
    #[serde(default)]
    pub profile: Profile,
    /// Fixture accounts accepted by the login screen
    #[serde(default = "default_accounts")]
    pub accounts: Vec<Account>,
}

fn default_accounts() -> Vec<Account> {
    let profile = Profile::default();
    vec![Account {
        email: profile.email,
        first_name: "Demo".to_string(),
    }]
}

impl Config {
    /// Get config file path (~/.config/cinemapp/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cinemapp").join("config.toml"))
    }

    /// Load config from the default file, or return defaults if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_else(Self::with_defaults)
    }

    /// Load config from an explicit path. Unlike [`Config::load`], failures are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load from `path` when given, otherwise the default location
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::load()),
        }
    }

    /// Defaults including the demo fixture account
    pub fn with_defaults() -> Self {
        Self {
            accounts: default_accounts(),
            ..Self::default()
        }
    }

    /// Get TMDB API key with fallback chain:
    /// 1. Environment variable TMDB_API_KEY
    /// 2. Key from config file
    /// 3. Bundled key
    pub fn tmdb_api_key(&self) -> String {
        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            if !key.trim().is_empty() {
                return key;
            }
        }

        self.tmdb_api_key
            .clone()
            .unwrap_or_else(|| BUNDLED_TMDB_KEY.to_string())
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn image_base_url(&self) -> &str {
        self.image_base_url.as_deref().unwrap_or(DEFAULT_IMAGE_BASE_URL)
    }

    pub fn user_directory_url(&self) -> &str {
        self.user_directory_url
            .as_deref()
            .unwrap_or(DEFAULT_DIRECTORY_URL)
    }

    /// Build the TMDB client described by this config
    pub fn tmdb_client(&self) -> TmdbClient {
        TmdbClient::with_base_url(self.tmdb_api_key(), self.api_base_url())
            .with_language(self.language())
    }

    /// Build the login checker described by this config
    pub fn login_service(&self) -> Arc<LoginService> {
        Arc::new(LoginService::new(
            self.accounts.clone(),
            Some(self.user_directory_url().to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.language(), "en-US");
        assert_eq!(config.api_base_url(), "https://api.themoviedb.org/3");
        assert_eq!(config.image_base_url(), "https://image.tmdb.org/t/p/w500");
    }

    #[test]
    fn test_with_defaults_has_demo_account() {
        let config = Config::with_defaults();
        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.accounts[0].email, config.profile.email);
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
            tmdb_api_key = "abc"
            language = "id-ID"

            [profile]
            name = "Rin"
            email = "rin@example.com"

            [[accounts]]
            email = "rin@example.com"
            first_name = "Rin"
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.tmdb_api_key.as_deref(), Some("abc"));
        assert_eq!(config.language(), "id-ID");
        assert_eq!(config.profile.name, "Rin");
        assert!(config.profile.photo_url.is_none());
        assert_eq!(config.accounts[0].first_name, "Rin");
    }

    #[test]
    fn test_missing_accounts_fall_back_to_demo() {
        let config: Config = toml::from_str("language = \"en-GB\"").unwrap();
        assert_eq!(config.accounts, default_accounts());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("cinemapp-config-{}.toml", std::process::id()));
        std::fs::write(&path, "language = \"fr-FR\"\n").unwrap();

        let config = Config::resolve(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.language(), "fr-FR");
    }

    #[test]
    fn test_load_from_missing_file_is_error() {
        assert!(Config::load_from(Path::new("/nonexistent/cinemapp.toml")).is_err());
    }
}
