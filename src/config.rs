// ⚙️ Configuration - billionaires.toml with per-field defaults
// Looked up via explicit CLI path, BILLIONAIRES_CONFIG env var, or ./billionaires.toml

use crate::buckets::BucketScheme;
use crate::record::Field;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "BILLIONAIRES_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "billionaires.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
    /// Rows missing any of these fields are dropped at load time
    #[serde(default = "default_required")]
    pub required: Vec<Field>,
    #[serde(default)]
    pub columns: ColumnMap,
}

/// Source column header for each record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    #[serde(default = "default_name_column")]
    pub name: String,
    #[serde(default = "default_age_column")]
    pub age: String,
    #[serde(default = "default_net_worth_column")]
    pub net_worth: String,
    #[serde(default = "default_gender_column")]
    pub gender: String,
    #[serde(default = "default_country_column")]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub scheme: BucketScheme,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/billionaires.csv")
}

fn default_required() -> Vec<Field> {
    vec![Field::Name, Field::Age, Field::NetWorth]
}

fn default_name_column() -> String {
    "Name".to_string()
}

fn default_age_column() -> String {
    "Age".to_string()
}

fn default_net_worth_column() -> String {
    "NetWorth".to_string()
}

fn default_gender_column() -> String {
    "Gender".to_string()
}

fn default_country_column() -> String {
    "Country".to_string()
}

fn default_top_n() -> usize {
    10
}

fn default_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            path: default_dataset_path(),
            required: default_required(),
            columns: ColumnMap::default(),
        }
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            name: default_name_column(),
            age: default_age_column(),
            net_worth: default_net_worth_column(),
            gender: default_gender_column(),
            country: default_country_column(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            scheme: BucketScheme::default(),
            top_n: default_top_n(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { addr: default_addr() }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path, then the env var, then ./billionaires.toml, then defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }
        tracing::debug!("no config file found, using defaults");
        Ok(Config::default())
    }

    fn validate(&self) -> Result<()> {
        if self.dashboard.top_n == 0 {
            anyhow::bail!("dashboard.top_n must be positive");
        }
        Ok(())
    }
}
