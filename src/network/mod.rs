//! Network layer for probing and representing connectivity state.
//!
//! This module provides types and traits for:
//! - Classifying the active network ([`NetworkClassification`], [`Transport`])
//! - Raw probe readings ([`ProbeReport`], [`ActiveNetwork`])
//! - Asking the platform ([`ConnectivityProbe`])
//! - Platform-specific implementations ([`platform`])

mod classification;
pub mod platform;
mod probe;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use classification::{ActiveNetwork, NetworkClassification, ProbeReport, Transport};
pub use probe::{ConnectivityProbe, ProbeError};
