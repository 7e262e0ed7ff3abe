//! # ebot-telegram
//!
//! Telegram transport: wire types, a reqwest Bot API client, and the long-poll
//! [`UpdateSource`] that owns the offset cursor. Speaks exactly the three
//! methods the bot needs (`getMe`, `getUpdates`, `sendMessage`); the rest of
//! the Bot API is out of scope.

mod adapters;
mod client;
mod source;
mod types;

pub use client::{mask_token, ApiClient, DEFAULT_API_URL};
pub use source::UpdateSource;
pub use types::{ApiResponse, TelegramChat, TelegramMessage, TelegramUpdate, TelegramUser};
