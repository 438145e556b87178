//! Wire messages for the method channel.
//!
//! Requests and responses are single JSON objects:
//!
//! ```text
//! -> {"method":"isActiveNetworkMetered"}
//! <- {"status":"success","result":false}
//! <- {"status":"error","code":"platform_error","message":"..."}
//! <- {"status":"not_implemented","method":"isActiveNetworkFast"}
//! ```

use serde::{Deserialize, Serialize};

/// Error code for probe failures.
pub const PLATFORM_ERROR: &str = "platform_error";

/// Error code for requests that could not be decoded.
pub const INVALID_REQUEST: &str = "invalid_request";

/// An incoming method call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Method name, matched exactly
    pub method: String,

    /// Call arguments; ignored by every supported method
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub arguments: serde_json::Value,
}

impl MethodCall {
    /// Creates a call without arguments.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: serde_json::Value::Null,
        }
    }
}

/// The outcome of a method call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    /// The call succeeded.
    Success {
        /// Method-specific payload
        result: serde_json::Value,
    },
    /// The call reached a supported method but failed.
    Error {
        /// Machine-readable error code
        code: String,
        /// Human-readable description
        message: String,
    },
    /// The method is not part of the channel.
    NotImplemented {
        /// The requested method name
        method: String,
    },
}

impl MethodResponse {
    /// Creates a success response.
    #[must_use]
    pub fn success(result: impl Into<serde_json::Value>) -> Self {
        Self::Success {
            result: result.into(),
        }
    }

    /// Creates an error response.
    #[must_use]
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Returns true for [`Self::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Serializes to a single JSON line without the trailing newline.
    #[must_use]
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!("Failed to encode response: {e}");
            format!(
                r#"{{"status":"error","code":"{PLATFORM_ERROR}","message":"response encoding failed"}}"#
            )
        })
    }
}
