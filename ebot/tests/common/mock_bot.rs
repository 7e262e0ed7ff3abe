//! Mock implementations of [`ebot_core::Bot`] for integration tests.
//!
//! Records every `send_message` call so tests can assert on produced replies
//! in order without hitting the real Telegram API.

use async_trait::async_trait;
use ebot_core::{Bot, EbotError, OutboundMessage, Result};
use std::sync::Mutex;

/// Mock Bot that records each sent message in call order.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<OutboundMessage>>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies recorded so far, in send order.
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(OutboundMessage {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Mock Bot whose sends always fail; used to verify the batch loop survives
/// delivery errors.
pub struct FailingBot;

#[async_trait]
impl Bot for FailingBot {
    async fn send_message(&self, _chat_id: i64, _text: &str) -> Result<()> {
        Err(EbotError::Network("simulated send failure".to_string()))
    }
}
