use std::env;
use std::time::Duration;

use thiserror::Error;

/// The single pair this bot watches.
pub const PAIR: &str = "USDT/UAH";

/// Alert volume in USDT. Fixed for every user; /set_filters does not take a
/// volume argument.
pub const MAX_VOLUME: f64 = 100.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    Missing(&'static str),
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Process settings, read from the environment (a .env file is picked up
/// automatically). `WEBHOOK_URL` selects the webhook transport; without it
/// the bot long-polls.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub webhook_url: Option<String>,
    pub port: u16,
    pub scan_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| ConfigError::Missing("BOT_TOKEN"))?;

        let webhook_url = env::var("WEBHOOK_URL").ok().filter(|v| !v.is_empty());

        let port = match env::var("PORT") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT", v))?,
            Err(_) => 8080,
        };

        let scan_interval = match env::var("SCAN_INTERVAL_SECS") {
            Ok(v) => {
                let secs: u64 = v
                    .parse()
                    .map_err(|_| ConfigError::Invalid("SCAN_INTERVAL_SECS", v))?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(60),
        };

        Ok(Self {
            bot_token,
            webhook_url,
            port,
            scan_interval,
        })
    }
}
