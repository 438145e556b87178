//! Callback subscription to classification transitions.

use crate::network::NetworkClassification;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tokio_stream::{Stream, StreamExt};

/// Handle to an active change subscription.
///
/// Two states: subscribed until [`Subscription::cancel`] (or drop), then
/// unsubscribed for good. Cancelling stops the delivery task, which drops
/// the listener stream and releases any OS registration it holds.
///
/// # Delivery Guarantee
///
/// The delivery lock is held while the callback runs, so once `cancel`
/// returns no callback is running and none will start. A callback may
/// cancel (or drop) its own subscription: the current invocation finishes
/// and nothing is delivered after it.
#[derive(Debug)]
pub struct Subscription {
    active: Arc<AtomicBool>,
    delivery: Arc<Mutex<()>>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub(crate) fn spawn<S, F>(stream: S, mut on_change: F) -> Self
    where
        S: Stream<Item = NetworkClassification> + Send + Unpin + 'static,
        F: FnMut(NetworkClassification) + Send + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let delivery = Arc::new(Mutex::new(()));
        let task_active = Arc::clone(&active);
        let task_delivery = Arc::clone(&delivery);

        let task = tokio::spawn(async move {
            let mut stream = stream;
            while let Some(classification) = stream.next().await {
                let _guard = task_delivery
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                if !task_active.load(Ordering::SeqCst) {
                    break;
                }
                on_change(classification);
            }
            tracing::debug!("Subscription delivery task finished");
        });

        Self {
            active,
            delivery,
            task: Some(task),
        }
    }

    /// Returns true until the subscription is cancelled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stops delivery. Calling it again has no effect.
    pub fn cancel(&mut self) {
        self.active.store(false, Ordering::SeqCst);

        let Some(task) = self.task.take() else {
            return;
        };

        // From inside the callback the delivery lock is already held by
        // this task; the cleared flag stops the next delivery instead.
        if tokio::task::try_id() != Some(task.id()) {
            drop(self.delivery.lock().unwrap_or_else(PoisonError::into_inner));
        }

        task.abort();
        tracing::debug!("Subscription cancelled");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
