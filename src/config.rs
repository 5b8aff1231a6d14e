use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: String,
    pub geocoding_base_url: String,
    pub gemini_api_key: Option<String>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            data_dir: get_env_or("DATA_DIR", "mvm-data"),
            geocoding_base_url: get_env_or(
                "GEOCODING_BASE_URL",
                "https://nominatim.openstreetmap.org",
            ),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
        }
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

pub fn init_config() -> Result<()> {
    CONFIG
        .set(Config::from_env())
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))
}

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}
