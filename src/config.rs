use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_PORT: &str = "8092";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_KEY environment variable is required")]
    MissingApiKey,
    #[error("invalid PORT `{0}`")]
    InvalidPort(String),
}

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub port: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    // Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let api_key = get("API_KEY").ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: get("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get("MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port: get("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string()),
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let port: u16 = self
            .port
            .parse()
            .map_err(|_| ConfigError::InvalidPort(self.port.clone()))?;
        Ok(SocketAddr::from(([0, 0, 0, 0], port)))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("port", &self.port)
            .finish()
    }
}
