use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";

/// Common part of every API response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Error marker some endpoints attach on auth failures (e.g. "TokenExpiredError")
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiEnvelope {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_SUCCESS)
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}
