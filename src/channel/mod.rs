//! Method-channel call boundary.
//!
//! This module provides:
//! - [`NetworkChannel`]: dispatches named method calls to a [`NetworkAdvisor`]
//! - [`Method`]: the closed set of supported method names
//! - [`MethodCall`] / [`MethodResponse`]: the JSON wire messages
//! - [`ChannelError`]: request-level failures
//!
//! [`NetworkAdvisor`]: crate::advisor::NetworkAdvisor

mod error;
mod handler;
mod message;
mod method;

#[cfg(test)]
#[path = "handler_tests.rs"]
mod handler_tests;

pub use error::ChannelError;
pub use handler::NetworkChannel;
pub use message::{INVALID_REQUEST, MethodCall, MethodResponse, PLATFORM_ERROR};
pub use method::{CHANNEL_NAME, Method};
