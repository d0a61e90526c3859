//! Layered configuration for the service.
//!
//! Uses Figment to merge built-in defaults, `config.toml`, `config.<env>.toml`,
//! `HGNCDB_*` env vars (`__` separates nesting) and finally `REDIS_IP`, which
//! is mapped onto `store.host`.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Environment variable naming the store host. Required for the redis backend.
pub const STORE_HOST_VAR: &str = "REDIS_IP";

pub struct Config {
    figment: Figment,
    env_name: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment
            .merge(Env::prefixed("HGNCDB_").split("__"))
            .merge(Env::raw().only(&[STORE_HOST_VAR]).map(|_| "store.host".into()));

        let config = Self { figment, env_name };
        config.validate_for_env()?;
        Ok(config)
    }

    /// Wraps an already assembled figment, layered over the built-in defaults.
    pub fn from_figment(figment: Figment) -> Self {
        let figment = Figment::from(Serialized::defaults(Settings::default())).merge(figment);
        Self { figment, env_name: "test".to_string() }
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self.figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn env_name(&self) -> &str {
        &self.env_name
    }

    fn validate_for_env(&self) -> Result<()> {
        let settings = self.settings()?;
        match self.env_name.as_str() {
            "prod" | "production" => {
                if settings.store.backend != StoreBackend::Redis {
                    return Err(Error::InvalidConfig(
                        "production requires store.backend = \"redis\"".to_string(),
                    ));
                }
            }
            "dev" | "development" | "test" | "testing" => {}
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub upstream: UpstreamSettings,
    pub aggregation: AggregationSettings,
    pub chart: ChartSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.aggregation.default_start_year >= self.aggregation.default_end_year {
            return Err(Error::InvalidConfig(format!(
                "aggregation.default_start_year ({}) must be less than aggregation.default_end_year ({})",
                self.aggregation.default_start_year, self.aggregation.default_end_year
            )));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(Error::InvalidConfig("chart dimensions must be non-zero".to_string()));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(Error::InvalidConfig("upstream.timeout_secs must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    /// Unset until provided by `REDIS_IP` or a config file.
    pub host: Option<String>,
    pub port: u16,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { backend: StoreBackend::Redis, host: None, port: 6379 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            url: "https://ftp.ebi.ac.uk/pub/databases/genenames/hgnc/json/hgnc_complete_set.json"
                .to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationSettings {
    pub default_start_year: i64,
    pub default_end_year: i64,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self { default_start_year: 1986, default_end_year: 2023 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Directory for the transient render file; system temp dir when unset.
    pub scratch_dir: Option<String>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 2800,
            height: 600,
            title: "Genes Approved Each Year".to_string(),
            scratch_dir: None,
        }
    }
}

impl ChartSettings {
    pub fn scratch_path(&self) -> Option<PathBuf> {
        self.scratch_dir.as_deref().map(expand_path)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
