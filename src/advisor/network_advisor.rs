//! Network advisor over an injected connectivity probe.

use super::{AdvisorError, Subscription};
use crate::config::defaults;
use crate::monitor::{ChangeListener, ClassificationStream};
use crate::network::{ConnectivityProbe, NetworkClassification};
use std::sync::Arc;
use std::time::Duration;

/// Lower bound applied to the watch poll interval.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Reports the current network classification to a calling application.
///
/// Each query asks the probe exactly once and caches nothing, so two
/// queries never disagree because of stale state. Change watching layers a
/// listener and a safety-net poll interval on top of the same probe.
///
/// # Type Parameters
///
/// * `P` - The [`ConnectivityProbe`] implementation (platform or test double)
///
/// # Example
///
/// ```no_run
/// use net_advisor::advisor::NetworkAdvisor;
/// use net_advisor::network::platform::PlatformProbe;
///
/// let advisor = NetworkAdvisor::new(PlatformProbe::default());
/// match advisor.query_metered_status() {
///     Ok(status) if status.allows_costly_transfer() => println!("go ahead"),
///     Ok(status) => println!("hold off: {status}"),
///     Err(e) => println!("unknown, treating as metered: {e}"),
/// }
/// ```
#[derive(Debug)]
pub struct NetworkAdvisor<P> {
    probe: Arc<P>,
    poll_interval: Duration,
}

impl<P> Clone for NetworkAdvisor<P> {
    fn clone(&self) -> Self {
        Self {
            probe: Arc::clone(&self.probe),
            poll_interval: self.poll_interval,
        }
    }
}

impl<P> NetworkAdvisor<P>
where
    P: ConnectivityProbe + 'static,
{
    /// Creates an advisor owning `probe`, with the default poll interval.
    #[must_use]
    pub fn new(probe: P) -> Self {
        Self::from_shared(Arc::new(probe))
    }

    /// Creates an advisor over a probe shared with other owners.
    #[must_use]
    pub const fn from_shared(probe: Arc<P>) -> Self {
        Self {
            probe,
            poll_interval: defaults::poll_interval(),
        }
    }

    /// Sets the safety-net poll interval used by [`Self::watch`] and [`Self::subscribe`].
    ///
    /// Values below one millisecond are raised to one millisecond.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Returns the configured poll interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the underlying probe.
    #[must_use]
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Reads the current network classification.
    ///
    /// Invokes the probe exactly once; no retries, no caching.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::ProbeUnavailable`] if the platform could not be asked.
    pub fn query_metered_status(&self) -> Result<NetworkClassification, AdvisorError> {
        let report = self.probe.probe()?;
        let classification = NetworkClassification::from_report(&report);

        tracing::debug!("Queried network status: {classification}");
        Ok(classification)
    }

    /// Same as [`Self::query_metered_status`], run on the blocking thread pool.
    ///
    /// For callers on an async context that must not stall while a slow
    /// platform call (e.g. spawning `nmcli`) completes.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::ProbeUnavailable`] if the platform could not be
    /// asked or the background task failed.
    pub async fn query_metered_status_async(&self) -> Result<NetworkClassification, AdvisorError> {
        let advisor = self.clone();
        tokio::task::spawn_blocking(move || advisor.query_metered_status())
            .await
            .map_err(|e| AdvisorError::from_join(&e))?
    }

    /// Converts a listener into a stream of classification transitions.
    ///
    /// See [`ClassificationStream`] for baseline and degradation semantics.
    #[must_use]
    pub fn watch<L>(&self, listener: L) -> ClassificationStream<Arc<P>, L::Stream>
    where
        L: ChangeListener,
    {
        ClassificationStream::new(
            Arc::clone(&self.probe),
            listener.into_stream(),
            self.poll_interval,
        )
    }

    /// Delivers every classification transition to `on_change` until cancelled.
    ///
    /// Spawns a task on the current tokio runtime; must be called from
    /// within one. The returned [`Subscription`] cancels on drop.
    #[must_use = "dropping the subscription cancels it"]
    pub fn subscribe<L, F>(&self, listener: L, on_change: F) -> Subscription
    where
        L: ChangeListener,
        F: FnMut(NetworkClassification) + Send + 'static,
    {
        Subscription::spawn(self.watch(listener), on_change)
    }
}
