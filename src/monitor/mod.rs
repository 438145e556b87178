//! Monitor layer for detecting connectivity transitions.
//!
//! This module provides types and functions for:
//! - Platform change notifications ([`ChangeListener`], [`platform`])
//! - Polling without notifications ([`PollOnlyListener`])
//! - Error handling ([`ListenerError`])
//! - Streams of classification transitions ([`ClassificationStream`])

mod error;
mod listener;
pub mod platform;
mod stream;

#[cfg(test)]
pub(crate) mod test_fixtures;


pub use error::ListenerError;
pub use listener::{ChangeListener, PollOnlyListener};
pub use stream::ClassificationStream;
