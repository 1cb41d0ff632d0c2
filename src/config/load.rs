//! The main config loading module for dirpilot.
//!
//! Handles loading and deserializing settings from `dirpilot.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//! A missing file is not an error: dirpilot then runs on the internal defaults.

use crate::config::{General, Keys, Theme};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, path::PathBuf};

/// Raw configuration as read from the toml file
/// This struct is deserialized directly from the toml file and then converted into [Config].
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    theme: Theme,
    keys: Keys,
}

/// Main configuration struct for dirpilot
#[derive(Debug, Clone, Default)]
pub struct Config {
    general: General,
    theme: Theme,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general,
            theme: raw.theme,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path
    /// If the file does not exist or fails to parse, returns the default configuration.
    ///
    /// Called by entry point to load config at startup, before the terminal is taken over.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "config loaded");
                    config
                }
                Err(e) => {
                    eprintln!("Error parsing config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses a toml document. Missing sections and fields keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the DIRPILOT_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/dirpilot/dirpilot.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("DIRPILOT_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("dirpilot/dirpilot.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/dirpilot/dirpilot.toml");
        }
        PathBuf::from("dirpilot.toml")
    }
}
