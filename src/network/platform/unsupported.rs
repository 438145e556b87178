//! Fallback probe for targets without a connectivity backend.

use crate::network::{ConnectivityProbe, ProbeError, ProbeReport};

/// Probe that always fails with [`ProbeError::ServiceMissing`].
///
/// Keeps the advisor usable on every target: callers see an explicit
/// failure instead of a fabricated reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedProbe;

impl UnsupportedProbe {
    /// Creates the fallback probe.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ConnectivityProbe for UnsupportedProbe {
    fn probe(&self) -> Result<ProbeReport, ProbeError> {
        Err(ProbeError::ServiceMissing {
            service: format!("connectivity probe for {}", std::env::consts::OS),
        })
    }
}
