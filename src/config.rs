use std::path::PathBuf;

use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub telegram_bot_token: Option<String>,
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,

    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_telegram_api_url() -> String {
    DEFAULT_TELEGRAM_API_URL.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("site")
}

fn default_currency_symbol() -> String {
    "₽".to_string()
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = envy::from_iter::<_, Self>(vars)
            .map_err(|e| anyhow!("Invalid environment configuration: {}", e))?;

        config.telegram_bot_token = non_blank(config.telegram_bot_token);
        config.telegram_chat_id = non_blank(config.telegram_chat_id);
        config.telegram_api_url = config.telegram_api_url.trim_end_matches('/').to_string();

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
