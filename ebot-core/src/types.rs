//! Core data types shared by every crate: users, chats, updates, outbound
//! messages, and the [`Handler`] trait the dispatcher routes through.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The account a message came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Platform-wide numeric user id.
    pub id: i64,
    /// Handle without the leading `@`, when the user has one.
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// The conversation an update belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Chat id; replies are addressed to this.
    pub id: i64,
    /// Kind of chat as reported by the platform ("private", "group", ...).
    pub chat_type: String,
}

/// One inbound event.
///
/// `id` increases monotonically over a bot's lifetime. The poll loop relies on
/// that for its offset bookkeeping, so batches are always handled in ascending
/// `id` order and a handler may see the same update again after a crash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub id: i64,
    pub chat: Chat,
    /// Sender; absent for channel posts and service events.
    pub from: Option<User>,
    /// Text payload; `None` for stickers, photos and other non-text messages.
    pub text: Option<String>,
    pub date: DateTime<Utc>,
}

impl Update {
    /// True when a non-empty text payload is present. Predicates that need text
    /// should gate on this so empty strings are treated like missing text.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// A reply produced by a handler: target chat plus text.
///
/// Transient by design. It is handed to [`Bot::send`](crate::bot::Bot::send)
/// and forgotten; nothing in the pipeline retains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
}

impl OutboundMessage {
    /// Builds a reply addressed to the chat the update came from.
    pub fn reply_to(update: &Update, text: impl Into<String>) -> Self {
        Self {
            chat_id: update.chat.id,
            text: text.into(),
        }
    }
}

/// A predicate/action pair.
///
/// The dispatcher walks handlers in registration order, calls [`matches`] on
/// each, and invokes [`handle`] on the first one that claims the update. Later
/// handlers never see a claimed update.
///
/// [`matches`]: Handler::matches
/// [`handle`]: Handler::handle
#[async_trait]
pub trait Handler: Send + Sync {
    /// Decides whether this handler wants the update. Must be cheap and free
    /// of side effects; it runs for every update until one handler claims it.
    fn matches(&self, update: &Update) -> bool;

    /// Produces the reply for a claimed update.
    ///
    /// Only called when [`matches`](Handler::matches) returned true. Delivery
    /// is at-least-once, so the same update can be handled again after a crash
    /// between poll and commit; implementations must tolerate re-processing.
    async fn handle(&self, update: &Update) -> Result<OutboundMessage>;
}

/// Conversion from a transport-specific update to the core [`Update`].
///
/// Returns `None` for events that carry no message payload; those still count
/// for offset bookkeeping, they just never reach the dispatcher.
pub trait ToCoreUpdate: Send + Sync {
    fn to_core(&self) -> Option<Update>;
}
