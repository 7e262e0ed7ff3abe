//! Command handler: fixed reply for one slash command.

use async_trait::async_trait;
use ebot_core::{Handler, OutboundMessage, Result, Update};

/// Replies with a fixed text when the update's first word is the configured
/// command. Register before broader handlers; dispatch is first-match.
pub struct CommandHandler {
    command: String,
    reply: String,
}

impl CommandHandler {
    /// Creates a handler for `command` (e.g. "/help") answering with `reply`.
    pub fn new(command: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            reply: reply.into(),
        }
    }

    /// The usual /start greeting.
    pub fn start(reply: impl Into<String>) -> Self {
        Self::new("/start", reply)
    }
}

#[async_trait]
impl Handler for CommandHandler {
    fn matches(&self, update: &Update) -> bool {
        let Some(text) = update.text.as_deref() else {
            return false;
        };
        let Some(first) = text.split_whitespace().next() else {
            return false;
        };
        // In groups the command may carry the bot's handle: /start@some_bot
        first == self.command
            || first
                .split_once('@')
                .is_some_and(|(cmd, _)| cmd == self.command)
    }

    async fn handle(&self, update: &Update) -> Result<OutboundMessage> {
        Ok(OutboundMessage::reply_to(update, self.reply.clone()))
    }
}
