//! Server configuration.
//!
//! Values come from an optional YAML file named by `BOOKING_CALENDAR_CONFIG`,
//! then individual environment variables override single keys.
//!
//! ```yaml
//! bind_address: "127.0.0.1:3000"
//! availability_file: "availability.yaml"
//! locale: "pt-BR"
//! allowed_origin: "http://localhost:8080"
//! log_level: "info"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::CalendarLocale;

pub const CONFIG_FILE_ENV: &str = "BOOKING_CALENDAR_CONFIG";
pub const BIND_ENV: &str = "BOOKING_CALENDAR_BIND";
pub const LOCALE_ENV: &str = "BOOKING_CALENDAR_LOCALE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    /// Per-user availability; without it every user is unknown
    pub availability_file: Option<PathBuf>,
    pub locale: CalendarLocale,
    /// Origin allowed by CORS
    pub allowed_origin: String,
    /// Default tracing filter, `RUST_LOG` wins when set
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            availability_file: None,
            locale: CalendarLocale::default(),
            allowed_origin: "http://localhost:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the environment: config file first, then overrides
    pub fn load() -> Result<Self> {
        let get_prop = |key: &str| env::var(key).ok();
        let config = match get_prop(CONFIG_FILE_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.with_overrides(get_prop)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Apply single-key overrides looked up through `get_prop`
    pub fn with_overrides(mut self, get_prop: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(bind_address) = get_prop(BIND_ENV) {
            self.bind_address = bind_address;
        }
        if let Some(locale) = get_prop(LOCALE_ENV) {
            self.locale = locale.parse()?;
        }
        Ok(self)
    }
}
