//! The send seam between handlers and the transport.
//!
//! `ebot-telegram`'s `ApiClient` implements [`Bot`] over HTTP; tests substitute
//! a recording mock so handler behavior can be asserted without a network.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::OutboundMessage;

/// Abstraction over "send a text message to a chat".
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Sends an [`OutboundMessage`] produced by a handler.
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        self.send_message(message.chat_id, &message.text).await
    }
}
