//! Advisor layer answering "may costly network work proceed right now?".
//!
//! This module provides:
//! - [`NetworkAdvisor`]: one-shot queries and change watching over an injected probe
//! - [`Subscription`]: callback delivery of transitions with idempotent cancellation
//! - [`AdvisorError`]: typed query failures

mod error;
mod network_advisor;
mod subscription;


pub use error::AdvisorError;
pub use network_advisor::NetworkAdvisor;
pub use subscription::Subscription;
