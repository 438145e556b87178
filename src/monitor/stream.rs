//! Classification stream implementation.
//!
//! This module provides [`ClassificationStream`], a stream that combines
//! platform change notifications with periodic polling and yields a new
//! [`NetworkClassification`] on every transition.

use crate::monitor::ListenerError;
use crate::network::{ConnectivityProbe, NetworkClassification, ProbeError};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tokio_stream::Stream;

/// Internal state of the stream.
#[derive(Debug)]
enum StreamState<S> {
    /// Listener events + polling.
    Hybrid {
        /// The platform notification stream.
        listener: S,
    },
    /// Listener has failed or ended; polling is the sole trigger.
    PollingOnly,
}

/// What triggered the current poll iteration.
#[derive(Debug)]
enum PollTrigger {
    /// Listener notification received
    ListenerEvent,
    /// Listener ended or errored - degrade
    ListenerDegraded,
    /// Polling interval elapsed
    Interval,
    /// Nothing ready yet
    Pending,
}

impl PollTrigger {
    /// Returns a human-readable label for logging.
    const fn label(&self) -> &'static str {
        match self {
            Self::ListenerEvent => "listener event",
            Self::ListenerDegraded => "listener degradation",
            Self::Interval => "polling interval",
            Self::Pending => "pending",
        }
    }
}

/// A stream of network classification transitions.
///
/// Returned by [`crate::advisor::NetworkAdvisor::watch`]. The first successful
/// probe sets the baseline and is not emitted; each later probe whose result
/// differs from the last emitted (or baseline) classification is yielded.
/// Every observed transition is yielded in probe order, without coalescing.
///
/// Probe failures are logged and skipped. If the listener fails or ends, the
/// stream degrades to polling-only mode permanently. The stream never
/// terminates on its own.
#[derive(Debug)]
pub struct ClassificationStream<P, S> {
    probe: P,
    interval: Interval,
    state: StreamState<S>,
    /// Last classification seen, for change detection.
    last: Option<NetworkClassification>,
}

impl<P, S> ClassificationStream<P, S>
where
    P: ConnectivityProbe,
    S: Stream<Item = Result<(), ListenerError>> + Unpin,
{
    pub(crate) fn new(probe: P, listener: S, poll_interval: Duration) -> Self {
        let mut interval = interval(poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            probe,
            interval,
            state: StreamState::Hybrid { listener },
            last: None,
        }
    }

    /// Returns true if currently in polling-only mode.
    #[must_use]
    pub const fn is_polling_only(&self) -> bool {
        matches!(self.state, StreamState::PollingOnly)
    }

    /// Returns the most recent classification observed, if any.
    #[must_use]
    pub const fn last(&self) -> Option<NetworkClassification> {
        self.last
    }

    /// Probes once and returns the new classification if it changed.
    fn probe_transition(&mut self) -> Result<Option<NetworkClassification>, ProbeError> {
        let current = NetworkClassification::from(self.probe.probe()?);

        Ok(match self.last.replace(current) {
            Some(previous) if previous != current => Some(current),
            _ => None,
        })
    }

    fn degrade_to_polling(&mut self) {
        tracing::warn!("Change listener unavailable, continuing with polling only");
        self.state = StreamState::PollingOnly;
    }
}

impl<P, S> Stream for ClassificationStream<P, S>
where
    P: ConnectivityProbe + Unpin,
    S: Stream<Item = Result<(), ListenerError>> + Unpin,
{
    type Item = NetworkClassification;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            let trigger = match &mut self.state {
                StreamState::Hybrid { listener } => match Pin::new(listener).poll_next(cx) {
                    Poll::Ready(Some(Ok(()))) => PollTrigger::ListenerEvent,
                    Poll::Ready(Some(Err(e))) => {
                        tracing::debug!("Change listener failed: {e}");
                        PollTrigger::ListenerDegraded
                    }
                    Poll::Ready(None) => PollTrigger::ListenerDegraded,
                    Poll::Pending => {
                        if Pin::new(&mut self.interval).poll_tick(cx).is_ready() {
                            PollTrigger::Interval
                        } else {
                            PollTrigger::Pending
                        }
                    }
                },
                StreamState::PollingOnly => {
                    if Pin::new(&mut self.interval).poll_tick(cx).is_ready() {
                        PollTrigger::Interval
                    } else {
                        PollTrigger::Pending
                    }
                }
            };

            match trigger {
                PollTrigger::Pending => return Poll::Pending,
                PollTrigger::ListenerDegraded => self.degrade_to_polling(),
                PollTrigger::ListenerEvent | PollTrigger::Interval => {
                    tracing::trace!("Probe triggered by {}", trigger.label());

                    match self.probe_transition() {
                        Ok(Some(classification)) => {
                            tracing::debug!(
                                "Network transition to {classification} (via {})",
                                trigger.label()
                            );
                            return Poll::Ready(Some(classification));
                        }
                        Ok(None) => {}
                        Err(e) => tracing::warn!("Probe failed during watch: {e}"),
                    }
                }
            }
        }
    }
}
