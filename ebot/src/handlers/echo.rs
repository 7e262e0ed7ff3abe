//! Echo handler: repeats received text back with a prefix.

use async_trait::async_trait;
use ebot_core::{Handler, HandlerError, OutboundMessage, Result, Update};

/// Prefix put in front of echoed text by [`EchoHandler::new`].
pub const DEFAULT_ECHO_PREFIX: &str = "You wrote: ";

/// Echoes any non-empty text message back to its chat. Broadest predicate in
/// the bot, so it belongs at the end of the registration list.
pub struct EchoHandler {
    prefix: String,
}

impl EchoHandler {
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_ECHO_PREFIX.to_string(),
        }
    }

    /// Echo with a custom prefix (e.g. "Echo: ").
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for EchoHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for EchoHandler {
    fn matches(&self, update: &Update) -> bool {
        update.has_text()
    }

    async fn handle(&self, update: &Update) -> Result<OutboundMessage> {
        // Guards direct invocation; under dispatch the predicate already ensured text.
        let text = update
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(HandlerError::NoText)?;
        Ok(OutboundMessage::reply_to(
            update,
            format!("{}{}", self.prefix, text),
        ))
    }
}
