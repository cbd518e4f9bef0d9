use serde::{Deserialize, Serialize};

use super::defaults;

/// Notification channel configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Opaque destination identifier (a chat id for Telegram).
    pub destination: String,
    /// Bot token. When unset, alerts are only written to the log.
    pub bot_token: Option<String>,
    /// Telegram Bot API base URL.
    pub api_base_url: String,
}

impl std::fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("destination", &self.destination)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            destination: String::new(),
            bot_token: None,
            api_base_url: defaults::DEFAULT_TELEGRAM_API_URL.to_string(),
        }
    }
}
