// src/config.rs

//! Defines the configuration structures for the display shim.
//!
//! Configuration is read once into [`CONFIG`]: an optional JSON file named by
//! `DISPLAY_SHIM_CONFIG`, then the `DISPLAY_SHIM_BACKEND` and
//! `DISPLAY_SHIM_X_DISPLAY` environment variables on top. Every field has a
//! default, so an empty environment yields a working configuration.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{DisplayError, Result};

pub const CONFIG_PATH_ENV: &str = "DISPLAY_SHIM_CONFIG";
pub const BACKEND_ENV: &str = "DISPLAY_SHIM_BACKEND";
pub const X_DISPLAY_ENV: &str = "DISPLAY_SHIM_X_DISPLAY";

/// Global configuration, loaded on first access.
///
/// A bad backend name or config file is kept as the error message, so every
/// [`Config::global`] caller sees the same failure.
pub static CONFIG: Lazy<std::result::Result<Config, String>> = Lazy::new(|| {
    Config::from_env().map_err(|e| {
        warn!("{}", e);
        match e {
            DisplayError::Config(message) => message,
            other => other.to_string(),
        }
    })
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Which backend a `DisplayContext` should use.
    pub backend: BackendKind,
    /// X11 connection settings. Ignored by the null backend.
    pub x11: X11Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// X11 when compiled in, otherwise the null backend.
    #[default]
    Auto,
    X11,
    Null,
}

impl std::str::FromStr for BackendKind {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "" => Ok(BackendKind::Auto),
            "x11" => Ok(BackendKind::X11),
            "null" | "none" => Ok(BackendKind::Null),
            other => Err(DisplayError::Config(format!(
                "invalid backend '{}': must be one of auto, x11, null",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct X11Config {
    /// Display to target instead of `$DISPLAY`, e.g. `":1"`.
    pub display_name: Option<String>,
    /// Retry with the default display when the named one cannot be opened.
    pub fallback_to_default: bool,
}

impl Default for X11Config {
    fn default() -> Self {
        X11Config {
            display_name: None,
            fallback_to_default: true,
        }
    }
}

impl Config {
    /// The process-wide configuration from [`CONFIG`].
    pub fn global() -> Result<&'static Config> {
        CONFIG
            .as_ref()
            .map_err(|message| DisplayError::Config(message.clone()))
    }

    /// Reads the JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| DisplayError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| DisplayError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DisplayError::Config(e.to_string()))
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) => {
                info!("Loading display configuration from {}", path);
                Self::load(Path::new(&path))?
            }
            None => Config::default(),
        };

        if let Some(backend) = lookup(BACKEND_ENV) {
            config.backend = backend.parse()?;
            debug!("Backend overridden by {}: {:?}", BACKEND_ENV, config.backend);
        }
        if let Some(name) = lookup(X_DISPLAY_ENV).filter(|n| !n.is_empty()) {
            debug!("X display overridden by {}: {}", X_DISPLAY_ENV, name);
            config.x11.display_name = Some(name);
        }

        Ok(config)
    }
}
