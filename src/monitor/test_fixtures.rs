//! Shared listener test doubles.

use crate::monitor::{ChangeListener, ListenerError};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};
use tokio_stream::Stream;

/// Mock listener stream with scripted events.
///
/// - Queued `Some(result)` entries are returned as `Poll::Ready`
/// - A queued `None` ends the stream
/// - An empty queue stays pending without registering a waker; the
///   poll interval is what wakes the consumer in tests
pub struct MockListenerStream {
    events: Mutex<VecDeque<Option<Result<(), ListenerError>>>>,
}

impl Stream for MockListenerStream {
    type Item = Result<(), ListenerError>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.events.lock().unwrap().pop_front() {
            Some(Some(result)) => Poll::Ready(Some(result)),
            Some(None) => Poll::Ready(None),
            None => Poll::Pending,
        }
    }
}

/// Mock listener producing a [`MockListenerStream`].
pub struct MockListener {
    events: Vec<Option<Result<(), ListenerError>>>,
}

impl MockListener {
    /// Listener with specific events. Use `None` to signal stream end.
    pub fn new(events: Vec<Option<Result<(), ListenerError>>>) -> Self {
        Self { events }
    }

    /// Listener that fires `count` change signals back to back.
    pub fn firing(count: usize) -> Self {
        Self::new((0..count).map(|_| Some(Ok(()))).collect())
    }

    /// Listener that fails immediately.
    pub fn failing() -> Self {
        Self::new(vec![Some(Err(ListenerError::Stopped))])
    }

    /// Listener that never fires.
    pub fn pending() -> Self {
        Self::new(vec![])
    }
}

impl ChangeListener for MockListener {
    type Stream = MockListenerStream;

    fn into_stream(self) -> Self::Stream {
        MockListenerStream {
            events: Mutex::new(self.events.into()),
        }
    }
}
