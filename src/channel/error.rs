//! Error types for the method channel.

use thiserror::Error;

/// Error type for requests that never reach the advisor.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The method name is not part of the channel's vocabulary.
    #[error("Method not implemented: {method}")]
    NotImplemented {
        /// The requested method name
        method: String,
    },

    /// The request could not be decoded.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_implemented_names_the_method() {
        let error = ChannelError::NotImplemented {
            method: "isActiveNetworkFast".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Method not implemented: isActiveNetworkFast"
        );
    }

    #[test]
    fn invalid_request_wraps_decode_error() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ChannelError::from(decode);
        assert!(error.to_string().starts_with("Invalid request:"));
    }
}
