use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

pub mod commands;
pub mod polling;
pub mod types;
pub mod webhook;

use crate::scanner::Notifier;
use types::{ApiResponse, InlineKeyboardMarkup, Message, Update};

const API_BASE: &str = "https://api.telegram.org";

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("telegram api error: {0}")]
    Api(String),
}

/// Thin reqwest client for the Bot API. Cloning shares the underlying
/// connection pool.
#[derive(Clone)]
pub struct BotClient {
    http: reqwest::Client,
    token: String,
}

impl BotClient {
    pub fn new(token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{API_BASE}/bot{}/{}", self.token, method)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &serde_json::Value,
    ) -> Result<T, TelegramError> {
        let response: ApiResponse<T> = self
            .http
            .post(self.url(method))
            .json(payload)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(TelegramError::Api(
                response
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        response
            .result
            .ok_or_else(|| TelegramError::Api("missing result".to_string()))
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message, TelegramError> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });
        if let Some(markup) = reply_markup {
            payload["reply_markup"] = serde_json::to_value(markup)?;
        }
        self.call("sendMessage", &payload).await
    }

    /// Long-poll for updates after `offset`. Blocks up to `timeout_secs` on
    /// the Telegram side when there is nothing to deliver.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let payload = json!({
            "offset": offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        self.call("getUpdates", &payload).await
    }

    pub async fn set_webhook(&self, url: &str) -> Result<bool, TelegramError> {
        self.call("setWebhook", &json!({ "url": url })).await
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool, TelegramError> {
        self.call(
            "deleteWebhook",
            &json!({ "drop_pending_updates": drop_pending_updates }),
        )
        .await
    }
}

#[async_trait]
impl Notifier for BotClient {
    async fn notify(
        &self,
        chat_id: i64,
        text: &str,
        button_label: &str,
        button_url: &str,
    ) -> Result<(), TelegramError> {
        let markup = InlineKeyboardMarkup::url_button(button_label, button_url);
        self.send_message(chat_id, text, Some(&markup)).await?;
        Ok(())
    }
}
