use crate::backend::TodoMethod;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Inbound relay body. `data` is kept exactly as sent: an absent key is
/// `None`, while an explicit `null` is `Some(Value::Null)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayRequest {
    #[serde(default)]
    pub method: TodoMethod,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
