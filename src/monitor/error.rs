//! Error types for change listeners.

use thiserror::Error;

/// Error type for platform change listeners.
///
/// Represents failures in platform-specific notification APIs.
/// These errors are recoverable by falling back to polling.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// The listener stopped unexpectedly.
    ///
    /// This can happen when the underlying event source terminates
    /// without explicit shutdown request.
    #[error("Listener stopped unexpectedly")]
    Stopped,
}
