//! Bot config: Telegram connection, logging, polling. Loaded from env.

use anyhow::Result;
use std::env;

/// Runtime configuration; everything the poll loop needs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL; None means the public Bot API host
    pub telegram_api_url: Option<String>,
    /// LOG_FILE; None logs to stdout only
    pub log_file: Option<String>,
    /// POLL_TIMEOUT_SECS; long-poll timeout handed to getUpdates
    pub poll_timeout_secs: u64,
    /// SKIP_PENDING_UPDATES; drop updates queued before startup
    pub skip_pending_updates: bool,
}

impl Config {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    /// A missing token is an error here; emptiness is checked by [`validate`](Self::validate).
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL").ok();
        let log_file = env::var("LOG_FILE").ok();
        let poll_timeout_secs = env::var("POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);
        let skip_pending_updates = env::var("SKIP_PENDING_UPDATES")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            poll_timeout_secs,
            skip_pending_updates,
        })
    }

    /// Validate config: the token must be non-empty and the API URL, if set,
    /// must parse. Run before anything talks to the network.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty; the bot cannot start without a token");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("TELEGRAM_API_URL is set but not a valid URL: {}", url_str);
            }
        }
        Ok(())
    }
}
