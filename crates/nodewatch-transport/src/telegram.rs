//! Telegram Bot API sink.

use std::time::Duration;

use nodewatch_core::config::NotifyConfig;
use nodewatch_core::errors::NotificationError;
use nodewatch_core::traits::INotificationSink;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http_client::HttpClientConfig;

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends alerts with `sendMessage` using Markdown formatting.
pub struct TelegramSink {
    http: HttpClientConfig,
    client: reqwest::Client,
    bot_token: String,
}

impl std::fmt::Debug for TelegramSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSink")
            .field("base_url", &self.http.base_url)
            .field("bot_token", &"<redacted>")
            .finish()
    }
}

impl TelegramSink {
    pub fn new(http: HttpClientConfig, bot_token: impl Into<String>) -> Result<Self, NotificationError> {
        let client = http
            .build()
            .map_err(|reason| NotificationError::Unreachable { reason })?;
        Ok(Self {
            http,
            client,
            bot_token: bot_token.into(),
        })
    }

    /// Build from the `[notify]` section. `None` when no bot token is configured.
    pub fn from_config(config: &NotifyConfig, timeout: Duration) -> Option<Result<Self, NotificationError>> {
        let token = config.bot_token.as_deref().filter(|t| !t.trim().is_empty())?;
        Some(Self::new(HttpClientConfig::new(&config.api_base_url, timeout), token))
    }

    fn endpoint(&self) -> String {
        self.http.url(&format!("/bot{}/sendMessage", self.bot_token))
    }
}

/// Map a `sendMessage` reply to delivery success or a rejection.
fn interpret_reply(status: u16, body: &str) -> Result<(), NotificationError> {
    let parsed: Option<SendMessageResponse> = serde_json::from_str(body).ok();
    let success = (200..300).contains(&status);
    match parsed {
        Some(reply) if success && reply.ok => Ok(()),
        Some(reply) => Err(NotificationError::Rejected {
            status,
            description: reply.description.unwrap_or_else(|| "ok=false".to_string()),
        }),
        None if success => Err(NotificationError::Rejected {
            status,
            description: "undecodable reply".to_string(),
        }),
        None => Err(NotificationError::Rejected {
            status,
            description: body.chars().take(200).collect(),
        }),
    }
}

impl INotificationSink for TelegramSink {
    async fn notify(&self, destination: &str, text: &str) -> Result<(), NotificationError> {
        let request = SendMessageRequest {
            chat_id: destination,
            text,
            parse_mode: "Markdown",
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            // Drop the URL: it embeds the bot token.
            .map_err(|e| NotificationError::Unreachable {
                reason: e.without_url().to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| NotificationError::Unreachable {
            reason: e.without_url().to_string(),
        })?;
        interpret_reply(status, &body)?;
        debug!(destination, "telegram: message accepted");
        Ok(())
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
