use serde::{Deserialize, Serialize};

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn message_or_unknown(&self) -> String {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn from_slice_lossy(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}
