// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::frankfurter::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const ADDIN_NAMESPACE: &str = "ECB.FX";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub addin: AddinConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddinConfig {
    pub namespace: String,
    pub require_api_key: bool,
    pub api_keys: Vec<String>,
}

impl Default for AddinConfig {
    fn default() -> Self {
        Self {
            namespace: ADDIN_NAMESPACE.to_string(),
            require_api_key: true,
            api_keys: Vec::new(),
        }
    }
}

/// Parameters of the `GET /rate-table` smoke-test route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub enabled: bool,
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            currency: "USD".to_string(),
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date"),
        }
    }
}

impl Config {
    /// Loads the TOML file, then applies `.env` layers and `FX_RELAY_*` overrides.
    ///
    /// Without an explicit path, a missing `config.toml` falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        load_dotenv_layers();
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup("FX_RELAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("FX_RELAY_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("invalid FX_RELAY_PORT: {port}"))?;
        }
        if let Some(origins) = lookup("FX_RELAY_ALLOWED_ORIGINS") {
            self.server.allowed_origins = split_list(&origins);
        }
        if let Some(url) = lookup("FX_RELAY_UPSTREAM_URL") {
            self.upstream.base_url = url;
        }
        if let Some(secs) = lookup("FX_RELAY_UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = secs
                .parse()
                .with_context(|| format!("invalid FX_RELAY_UPSTREAM_TIMEOUT_SECS: {secs}"))?;
        }
        if let Some(namespace) = lookup("FX_RELAY_NAMESPACE") {
            self.addin.namespace = namespace;
        }
        if let Some(keys) = lookup("FX_RELAY_API_KEYS") {
            self.addin.api_keys = split_list(&keys);
        }
        if let Some(flag) = lookup("FX_RELAY_REQUIRE_API_KEY") {
            self.addin.require_api_key = parse_bool("FX_RELAY_REQUIRE_API_KEY", &flag)?;
        }
        self.validate()
    }

    /// Rejects values that parse but leave the relay unusable.
    pub fn validate(&self) -> Result<()> {
        if self.upstream.timeout_secs == 0 {
            bail!("upstream.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn load_dotenv_layers() {
    for path in [".env", "../.env"] {
        let _ = dotenvy::from_path(path);
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
        _ => bail!("invalid {key}: {value}"),
    }
}
