use serde::{Deserialize, Serialize};
use std::env;
use crate::errors::ConfigError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub database_url: String,
    pub api_key: String,
    pub port: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: Self::get_env("DATABASE_URL")?,
            api_key: Self::get_env("API_KEY")?,
            port: Self::get_env("PORT")?,
        })
    }

    fn get_env(key: &str) -> Result<String, ConfigError> {
        env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))
    }
}
