//! Panel activity models (audit trail, assistant queue)

use serde::{Deserialize, Serialize};

use super::role::Role;
use super::toggle::ToggleValue;

/// One accepted toggle change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: u64,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub role: Role,
    pub action: String,
    pub key: String,
    pub previous: ToggleValue,
    pub value: ToggleValue,
}

/// One free-text request sent to the language model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRecord {
    pub id: u64,
    pub timestamp: i64,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Intent extraction request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRequest {
    pub text: String,
}

/// Intent extraction response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentReply {
    pub model: String,
    pub reply: String,
}
