use crate::models::error::{DomainError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub database_file: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

const fn default_page_size() -> usize { 20 }
const fn default_max_page_size() -> usize { 100 }
fn default_pool_size() -> usize {
    num_cpus::get_physical() + 7
}

impl Config {
    /// Configuration used when no config file could be loaded
    pub fn in_memory() -> Self {
        Self {
            database_file: ":memory:".to_string(),
            pool_size: 1,
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

pub fn setup_config(config_file: String) -> Result<Config> {
    let config_path = PathBuf::from(config_file);
    info!("Loading config from: {}", config_path.display());

    let config_str = fs::read_to_string(&config_path).map_err(|cause| {
        DomainError::ConfigRead {
            path: config_path.clone(),
            cause,
        }
    })?;

    let config: Config = serde_json::from_str(&config_str).map_err(|cause| {
        DomainError::ConfigParse {
            path: config_path,
            cause,
        }
    })?;

    validate_config(&config)?;

    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<()> {
    if config.database_file.trim().is_empty() {
        return Err(DomainError::ConfigInvalid(
            "database_file cannot be empty. Provide a valid path or use ':memory:'".to_string(),
        ));
    }
    if config.pool_size == 0 {
        return Err(DomainError::ConfigInvalid(
            "pool_size must be at least 1".to_string(),
        ));
    }
    if config.default_page_size == 0 {
        return Err(DomainError::ConfigInvalid(
            "default_page_size must be at least 1".to_string(),
        ));
    }
    if config.default_page_size > config.max_page_size {
        return Err(DomainError::ConfigInvalid(format!(
            "default_page_size ({}) cannot exceed max_page_size ({})",
            config.default_page_size, config.max_page_size
        )));
    }
    Ok(())
}
