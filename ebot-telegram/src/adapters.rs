//! Adapters from Telegram wire types to ebot_core types.
//! Depends only on the wire structs and ebot_core type definitions.

use chrono::{DateTime, Utc};
use ebot_core::{Chat, ToCoreUpdate, Update, User};

use crate::types::{TelegramChat, TelegramUpdate, TelegramUser};

impl ToCoreUpdate for TelegramUpdate {
    /// Maps a wire update onto the core [`Update`]. Entries without a message
    /// payload yield `None`; they only matter for offset bookkeeping.
    fn to_core(&self) -> Option<Update> {
        let message = self.message.as_ref()?;
        Some(Update {
            id: self.update_id,
            chat: to_core_chat(&message.chat),
            from: message.from.as_ref().map(to_core_user),
            text: message.text.clone(),
            date: DateTime::<Utc>::from_timestamp(message.date, 0).unwrap_or_else(Utc::now),
        })
    }
}

fn to_core_chat(chat: &TelegramChat) -> Chat {
    Chat {
        id: chat.id,
        chat_type: chat.chat_type.clone(),
    }
}

fn to_core_user(user: &TelegramUser) -> User {
    User {
        id: user.id,
        username: user.username.clone(),
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
    }
}
