use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response wrapper used by every backend content endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiEnvelope {
    pub fn ok(data: Value) -> Self {
        Self { success: true, data: Some(data), message: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, data: None, message: Some(message.into()) }
    }

    /// Unwrap the payload, turning `success: false` into an error carrying
    /// the backend's message.
    pub fn into_data(self) -> Result<Option<Value>> {
        if !self.success {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "backend request failed".to_string());
            return Err(anyhow!(message));
        }
        Ok(self.data.filter(|d| !d.is_null()))
    }

    /// Accept either a full envelope or a bare payload (as saved from the
    /// admin console or exported by hand).
    pub fn from_json(value: Value) -> Self {
        let looks_wrapped = value
            .as_object()
            .map(|o| o.contains_key("success") && (o.contains_key("data") || o.contains_key("message")))
            .unwrap_or(false);
        if looks_wrapped {
            if let Ok(envelope) = serde_json::from_value::<ApiEnvelope>(value.clone()) {
                return envelope;
            }
        }
        Self::ok(value)
    }
}
