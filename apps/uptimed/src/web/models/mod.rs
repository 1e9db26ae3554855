use serde::{Deserialize, Serialize};

use crate::formatter::FormatterSetting;

pub mod integration_models;

#[derive(Debug, Serialize)]
pub struct TickAccepted {
    pub status: &'static str,
}

impl Default for TickAccepted {
    fn default() -> Self {
        TickAccepted { status: "accepted" }
    }
}

#[derive(Debug, Deserialize)]
pub struct FormatMessageRequest {
    pub message: String,
    #[serde(default)]
    pub settings: Vec<FormatterSetting>,
    #[serde(default)]
    pub return_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormattedMessage {
    pub event_name: String,
    pub message: String,
    pub status: String,
    pub username: String,
}
