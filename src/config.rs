use std::env;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_key: String,
}

impl Config {
    /// Builds the configuration from the process environment. Call after
    /// `dotenvy::dotenv()` so a local `.env` file is already merged in.
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_vars(env::vars())
    }

    pub fn from_vars(
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Config, ConfigError> {
        let mut port = None;
        let mut api_key = None;
        for (key, value) in vars {
            match key.as_str() {
                "PORT" => port = Some(value),
                "NEWS_API_KEY" => api_key = Some(value),
                _ => {}
            }
        }

        let port = match port.filter(|p| !p.is_empty()) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "PORT",
                value: raw,
            })?,
            None => 8080,
        };

        let api_key = api_key
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingVar("NEWS_API_KEY"))?;

        Ok(Config { port, api_key })
    }
}
