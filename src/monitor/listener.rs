//! Change listener trait for platform connectivity notifications.
//!
//! This module provides the [`ChangeListener`] trait that abstracts
//! platform-specific "the network may have changed" signals, and
//! [`PollOnlyListener`] for platforms (or configurations) without one.

use super::ListenerError;
use tokio_stream::Stream;

/// Trait for platform-specific connectivity change notifications.
///
/// Implementations wrap platform APIs like Windows `NotifyIpInterfaceChange`
/// and expose them as an async stream of wake-up signals. The signal carries
/// no payload; the consumer re-probes to learn the new state.
///
/// # One-time Semantics
///
/// `into_stream` consumes `self`. Dropping the returned stream must release
/// any OS registration held by the listener.
///
/// # Stream Items
///
/// - `Ok(())` - Something changed; re-probe
/// - `Err(ListenerError)` - The listener failed; degrade to polling
pub trait ChangeListener: Send {
    /// The stream type returned by `into_stream`.
    type Stream: Stream<Item = Result<(), ListenerError>> + Send + Unpin + 'static;

    /// Converts this listener into a notification stream.
    fn into_stream(self) -> Self::Stream;
}

/// Listener that never fires, leaving the poll interval as the only trigger.
#[derive(Debug, Clone, Copy, Default)]
pub struct PollOnlyListener;

impl ChangeListener for PollOnlyListener {
    type Stream = tokio_stream::Pending<Result<(), ListenerError>>;

    fn into_stream(self) -> Self::Stream {
        tokio_stream::pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_stream::StreamExt;

    #[tokio::test(start_paused = true)]
    async fn poll_only_listener_never_yields() {
        let mut stream = PollOnlyListener.into_stream();

        let next = tokio::time::timeout(Duration::from_secs(3600), stream.next()).await;

        assert!(next.is_err(), "pending stream must not yield");
    }
}
