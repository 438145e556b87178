//! Error types for the advisor layer.

use crate::network::ProbeError;
use thiserror::Error;

/// Error type for advisor queries.
///
/// Probe failures are surfaced as-is; the advisor never substitutes a
/// default classification, so callers choose their own fail-safe policy.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The platform connectivity service could not be asked.
    #[error("Connectivity probe unavailable: {0}")]
    ProbeUnavailable(#[from] ProbeError),
}

impl AdvisorError {
    /// Wraps a background task failure as an unavailable probe.
    pub(crate) fn from_join(error: &tokio::task::JoinError) -> Self {
        Self::ProbeUnavailable(ProbeError::Platform {
            message: format!("probe task failed: {error}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn probe_unavailable_displays_with_context() {
        let error = AdvisorError::ProbeUnavailable(ProbeError::PermissionDenied {
            context: "ACCESS_NETWORK_STATE".to_string(),
        });

        assert!(error.to_string().contains("probe unavailable"));
        assert!(error.to_string().contains("ACCESS_NETWORK_STATE"));
    }

    #[test]
    fn probe_unavailable_preserves_source_chain() {
        let error: AdvisorError = ProbeError::Platform {
            message: "inner error".to_string(),
        }
        .into();

        let source = error.source();
        assert!(source.is_some());
        assert!(source.unwrap().to_string().contains("inner error"));
    }
}
