//! Handles the configuration of the daemon.
//!
//! this module is responsible for parsing the Folio.toml file, and overlaying environment variables
//! and cli arguments on top of it.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use std::{path::PathBuf, str::FromStr};

pub static DEFAULT_CONFIG: &str = include_str!("../Folio.toml");

#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// General Server Settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Session token settings
    #[serde(default)]
    pub auth: AuthSettings,
    /// How series are kept in sync with their artworks
    #[serde(default)]
    pub series: SeriesSettings,
    /// Constants shown alongside the computed statistics
    #[serde(default)]
    pub stats: StatsSettings,
}

impl Settings {
    /// Load settings from the config file, environment variables, and CLI arguments.
    ///
    /// The environment variables are prefixed with `FOLIO_`, and use `__` to separate sections from
    /// keys, e.g. `FOLIO_SERVER__PORT`.
    ///
    /// # Arguments
    ///
    /// * `config` - path to the config file
    /// * `port` - overrides the configured port when set
    /// * `log_level` - overrides the configured log level when set
    ///
    /// # Errors
    ///
    /// This function will return an error if the config file is not found or if the config file is
    /// invalid.
    #[inline]
    pub fn init(
        config: PathBuf,
        port: Option<u16>,
        log_level: Option<log::LevelFilter>,
    ) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from(config))
            .add_source(
                Environment::with_prefix("FOLIO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Self = s.try_deserialize()?;

        if let Some(port) = port {
            settings.server.port = port;
        }

        if let Some(log_level) = log_level {
            settings.server.log_level = log_level;
        }

        Ok(settings)
    }

    /// Get the (default) path to the config file.
    /// If the config file does not exist at this path, it will be created with the default config.
    ///
    /// See [`crate::get_config_dir`] for more information about where this default path is located.
    ///
    /// # Errors
    ///
    /// This function will return an error if the system config directory (e.g., `~/.config` on linux) could not be found, or if the config file was missing and could not be created.
    #[inline]
    pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
        match crate::get_config_dir() {
            Ok(config_dir) => {
                // if the config directory does not exist, create it
                if !config_dir.exists() {
                    std::fs::create_dir_all(&config_dir)?;
                }
                let config_file = config_dir.join("Folio.toml");

                if !config_file.exists() {
                    std::fs::write(&config_file, DEFAULT_CONFIG)?;
                }

                Ok(config_file)
            }
            Err(e) => {
                log::error!("{e}");
                Err(std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))
            }
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ServerSettings {
    /// The port to listen on for HTTP requests.
    /// Default is 3000.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The address to bind to.
    /// Default is "127.0.0.1".
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// What level of logging to use.
    /// Default is "info".
    #[serde(default = "default_log_level")]
    #[serde(deserialize_with = "de_log_level")]
    pub log_level: log::LevelFilter,
}

fn de_log_level<'de, D>(deserializer: D) -> Result<log::LevelFilter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(log::LevelFilter::from_str(&s).unwrap_or_else(|_| default_log_level()))
}

const fn default_port() -> u16 {
    3000
}

fn default_bind_address() -> String {
    "127.0.0.1".to_owned()
}

const fn default_log_level() -> log::LevelFilter {
    log::LevelFilter::Info
}

impl Default for ServerSettings {
    #[inline]
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AuthSettings {
    /// The secret session tokens are signed with.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// How many hours a session token stays valid.
    /// Default is 24.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,
}

/// The token secret shipped in the default config, anyone can sign tokens with it.
pub const DEFAULT_TOKEN_SECRET: &str = "change-me";

fn default_token_secret() -> String {
    DEFAULT_TOKEN_SECRET.to_owned()
}

const fn default_token_ttl_hours() -> u64 {
    24
}

impl AuthSettings {
    /// Whether tokens are still signed with the secret everyone gets out of the box.
    #[must_use]
    #[inline]
    pub fn has_default_secret(&self) -> bool {
        self.token_secret.is_empty() || self.token_secret == DEFAULT_TOKEN_SECRET
    }
}

impl Default for AuthSettings {
    #[inline]
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

/// Which routine keeps series up to date when artworks change.
#[derive(Clone, Copy, Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Register new titles on create and patch images on edit, nothing on delete.
    Legacy,
    /// Recompute every affected series from its artworks.
    #[default]
    Reconcile,
}

#[derive(Clone, Copy, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct SeriesSettings {
    #[serde(default)]
    pub sync_mode: SyncMode,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct StatsSettings {
    #[serde(default = "default_years_active")]
    pub years_active: u64,
    #[serde(default)]
    pub awards_won: u64,
}

const fn default_years_active() -> u64 {
    6
}

impl Default for StatsSettings {
    #[inline]
    fn default() -> Self {
        Self {
            years_active: default_years_active(),
            awards_won: 0,
        }
    }
}
