//! Error taxonomy.
//!
//! Three fates, decided by variant: [`EbotError::Config`] is fatal at startup,
//! [`EbotError::Network`] is retried with backoff by the poll loop, and
//! [`EbotError::Handler`] is caught at the dispatch boundary, logged, and never
//! stops the bot.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EbotError {
    /// Bad or missing configuration. Never retried; the process exits.
    #[error("Config error: {0}")]
    Config(String),

    /// The transport failed (connect, timeout, undecodable body). Retryable.
    #[error("Network error: {0}")]
    Network(String),

    /// The platform answered with `ok: false`.
    #[error("Telegram API error {code}: {description}")]
    Api { code: i64, description: String },

    /// A handler action failed for one update.
    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

impl EbotError {
    /// True when the platform rejected the bot credential. The Bot API answers
    /// 401 for a malformed token and 404 for a well-formed unknown one.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, EbotError::Api { code: 401 | 404, .. })
    }
}

/// Errors raised by handler actions. Scoped to one update; the runner logs
/// them and moves on to the next update.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("Action failed: {0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, EbotError>;
