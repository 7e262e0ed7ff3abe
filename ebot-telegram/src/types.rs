//! Wire types for the slice of the Telegram Bot API this bot speaks.
//!
//! Field names follow the Bot API JSON. Only the fields the bot actually reads
//! are declared; serde ignores the rest of each payload.

use serde::{Deserialize, Serialize};

/// Envelope every Bot API method wraps its answer in.
///
/// `ok: true` carries `result`; `ok: false` carries `error_code` and
/// `description` instead.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

/// One entry of a `getUpdates` answer.
///
/// `message` is absent for update kinds the bot does not subscribe to; such
/// entries still count for offset bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    pub from: Option<TelegramUser>,
    pub chat: TelegramChat,
    /// Unix timestamp (seconds).
    pub date: i64,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: String,
    pub title: Option<String>,
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: getUpdates payloads parse with and without a message, extra fields ignored.**
    #[test]
    fn test_update_deserializes() {
        let json = r#"{
            "update_id": 857,
            "message": {
                "message_id": 1,
                "from": {"id": 7, "is_bot": false, "first_name": "Test", "language_code": "en"},
                "chat": {"id": 100, "type": "private"},
                "date": 1724300000,
                "text": "hi"
            }
        }"#;
        let update: TelegramUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 857);
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 100);
        assert_eq!(message.text.as_deref(), Some("hi"));

        let bare: TelegramUpdate =
            serde_json::from_str(r#"{"update_id": 858, "edited_message": {}}"#).unwrap();
        assert_eq!(bare.update_id, 858);
        assert!(bare.message.is_none());
    }

    /// **Test: the error envelope parses ok=false with code and description.**
    #[test]
    fn test_error_envelope_deserializes() {
        let json = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        let envelope: ApiResponse<Vec<TelegramUpdate>> = serde_json::from_str(json).unwrap();
        assert!(!envelope.ok);
        assert_eq!(envelope.error_code, Some(401));
        assert_eq!(envelope.description.as_deref(), Some("Unauthorized"));
        assert!(envelope.result.is_none());
    }
}
