//! Configuration management for feedbackdesk.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::fmt;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::form::AdminCredential;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "feedbackdesk";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "responses.db";

/// Environment variable prefix.
const ENV_PREFIX: &str = "FEEDBACKDESK_";

/// Admin password variable, taken verbatim rather than parsed as a scalar.
const ADMIN_PASSWORD_ENV: &str = "FEEDBACKDESK_ADMIN_PASSWORD";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FEEDBACKDESK_`)
/// 2. TOML config file at `~/.config/feedbackdesk/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Admin view configuration.
    pub admin: AdminConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/feedbackdesk/responses.db`
    pub database: Option<PathBuf>,
}

/// Admin view configuration.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Password required to view stored feedback.
    /// When unset, the admin view is closed.
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: Option<String>,
}

/// Accept any scalar for a secret and keep its textual form, so that
/// `password = 1234` in TOML is the password `"1234"`.
fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
        Flag(bool),
    }

    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
            Scalar::Text(text) => text,
            Scalar::Signed(n) => n.to_string(),
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }),
    )
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `FEEDBACKDESK_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("_"));

        // Env values are parsed as typed scalars; "0123" or "true" must stay text.
        if let Ok(password) = std::env::var(ADMIN_PASSWORD_ENV) {
            figment = figment.merge(Serialized::default("admin.password", password));
        }

        Self::from_figment(figment)
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.admin.password.as_deref() == Some("") {
            return Err(Error::ConfigValidation {
                message: "admin.password must not be empty; remove it to disable the admin view"
                    .to_string(),
            });
        }

        if let Some(path) = &self.storage.database {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "storage.database must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Build the admin credential guarding the View All action.
    #[must_use]
    pub fn admin_credential(&self) -> AdminCredential {
        AdminCredential::new(self.admin.password.as_deref())
    }

    /// A copy of this configuration with secrets masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut shown = self.clone();
        if shown.admin.password.is_some() {
            shown.admin.password = Some("********".to_string());
        }
        shown
    }
}
