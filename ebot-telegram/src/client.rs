//! Telegram Bot API client over reqwest.
//!
//! POSTs JSON to `{base}/bot{token}/{method}` and unwraps the `ApiResponse`
//! envelope. The token is a path segment of every request URL, so transport
//! errors are sanitized before they can carry URL text into a log line.

use std::time::Duration;

use async_trait::async_trait;
use ebot_core::{Bot, EbotError, Result};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::instrument;

use crate::types::{ApiResponse, TelegramMessage, TelegramUpdate, TelegramUser};

/// Public Bot API host, used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Whole-request timeout for short calls (getMe, sendMessage).
const CALL_TIMEOUT: Duration = Duration::from_secs(30);
/// Extra wait granted on top of the long-poll timeout before a getUpdates
/// request is abandoned client-side.
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Masks a bot token for logs: keeps a short prefix and suffix, hides the rest.
/// Tokens of 10 bytes or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 10 {
        return "***".to_string();
    }
    format!("{}***{}", &token[..6], &token[len - 4..])
}

/// Telegram Bot API client. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
    token: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &mask_token(&self.token))
            .finish()
    }
}

impl ApiClient {
    /// Creates a client for `token`. `api_url` overrides the public host; pass
    /// `None` outside of tests and local Bot API servers.
    pub fn new(token: impl Into<String>, api_url: Option<&str>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(EbotError::Config("bot token is empty".to_string()));
        }

        let base = api_url.unwrap_or(DEFAULT_API_URL);
        let base_url = reqwest::Url::parse(base)
            .map_err(|e| EbotError::Config(format!("invalid API URL {}: {}", base, e)))?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| EbotError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.token,
            method
        )
    }

    /// Strips the request URL (which embeds the token) out of a transport error.
    fn sanitize(&self, err: reqwest::Error) -> String {
        err.without_url().to_string().replace(&self.token, "***")
    }

    /// POSTs `body` to `method` and unwraps the response envelope.
    async fn call<T>(&self, method: &str, body: &serde_json::Value, timeout: Duration) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.method_url(method))
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| EbotError::Network(self.sanitize(e)))?;

        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
            EbotError::Network(format!(
                "{} returned undecodable body (HTTP {}): {}",
                method,
                status,
                self.sanitize(e)
            ))
        })?;

        if !envelope.ok {
            return Err(EbotError::Api {
                code: envelope.error_code.unwrap_or_else(|| status.as_u16() as i64),
                description: envelope
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }

        envelope
            .result
            .ok_or_else(|| EbotError::Network(format!("{} answered ok without a result", method)))
    }

    /// Identifies the bot account. Called once at startup to prove the token
    /// before the first poll.
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<TelegramUser> {
        self.call("getMe", &json!({}), CALL_TIMEOUT).await
    }

    /// Long-polls for updates with ids at or above `offset`.
    ///
    /// The request parks server-side for up to `timeout_secs`; an empty list on
    /// expiry is a normal answer, not an error. Subscribes to message updates
    /// only.
    #[instrument(skip(self))]
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<TelegramUpdate>> {
        let body = json!({
            "offset": offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        let timeout = Duration::from_secs(timeout_secs) + POLL_GRACE;
        self.call("getUpdates", &body, timeout).await
    }

    /// Sends a text message to a chat, returning the created message.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<TelegramMessage> {
        let body = json!({
            "chat_id": chat_id,
            "text": text,
        });
        self.call("sendMessage", &body, CALL_TIMEOUT).await
    }
}

#[async_trait]
impl Bot for ApiClient {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        ApiClient::send_message(self, chat_id, text).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: ApiClient::new rejects an empty token and an unparsable URL.**
    #[test]
    fn test_new_validates_inputs() {
        assert!(matches!(
            ApiClient::new("", None),
            Err(EbotError::Config(_))
        ));
        assert!(matches!(
            ApiClient::new("  ", None),
            Err(EbotError::Config(_))
        ));
        assert!(matches!(
            ApiClient::new("123456789:AAabcdef", Some("not a url")),
            Err(EbotError::Config(_))
        ));
        assert!(ApiClient::new("123456789:AAabcdef", None).is_ok());
    }

    /// **Test: Debug output masks the token.**
    #[test]
    fn test_debug_masks_token() {
        let client = ApiClient::new("123456789:AAabcdefghij", None).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("123456***ghij"));
        assert!(!debug.contains("AAabcdefghij"));
    }
}
