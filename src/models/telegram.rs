use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: String,
    pub text: String,
    pub parse_mode: ParseMode,
}

/// Error body returned by the Bot API; only the description is logged.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramResponse {
    #[serde(default)]
    pub description: Option<String>,
}
