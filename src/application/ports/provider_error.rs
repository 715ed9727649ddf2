use std::fmt;

use serde_json::Value;

/// Diagnostic detail captured from a failed call to an external provider.
///
/// `payload` is the provider's JSON error body when it sent one, otherwise the
/// raw body text or the transport error message.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderError {
    pub status: Option<u16>,
    pub payload: Value,
}

impl ProviderError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            payload: Value::String(message.into()),
        }
    }

    pub fn http(status: u16, body: &str) -> Self {
        let payload = serde_json::from_str::<Value>(body)
            .ok()
            .filter(|v| v.is_object() || v.is_array())
            .unwrap_or_else(|| Value::String(body.trim().to_string()));
        Self {
            status: Some(status),
            payload,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status {
            write!(f, "status {}: ", status)?;
        }
        match &self.payload {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}
