use std::time::Duration;

use config::builder::{ConfigBuilder, DefaultState};
use config::{ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Process configuration, loaded once at startup and never mutated.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub bot_token: String,
    pub chat_id: String,
    pub telegram_base_url: String,
    pub telegram_timeout_secs: u64,
}

impl Config {
    /// Reads `BOT_TOKEN`, `CHAT_ID`, `SERVER__HOST`, `SERVER__PORT`,
    /// `TELEGRAM_BASE_URL` and `TELEGRAM_TIMEOUT_SECS` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_builder(
            config::Config::builder().add_source(Environment::default().separator("__")),
        )
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Config = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("telegram_base_url", "https://api.telegram.org")?
            .set_default("telegram_timeout_secs", 12)?
            .build()?
            .try_deserialize()?;

        config.check()
    }

    fn check(mut self) -> Result<Self, ConfigError> {
        self.bot_token = self.bot_token.trim().to_string();
        self.chat_id = self.chat_id.trim().to_string();

        if self.bot_token.is_empty() {
            return Err(ConfigError::Message("BOT_TOKEN missing".to_string()));
        }

        if self.chat_id.is_empty() {
            return Err(ConfigError::Message("CHAT_ID missing".to_string()));
        }

        if self.telegram_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "TELEGRAM_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(self)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn telegram_timeout(&self) -> Duration {
        Duration::from_secs(self.telegram_timeout_secs)
    }
}
