//! Connectivity probe trait and error types.

use super::ProbeReport;
use thiserror::Error;

/// Error type for connectivity probe operations.
///
/// Describes why the platform could not be asked without dictating
/// recovery strategy. Callers decide how to handle each variant.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// Permission denied to read connectivity information.
    #[error("Permission denied: {context}")]
    PermissionDenied {
        /// Additional context about what permission was denied.
        context: String,
    },

    /// The platform service backing the probe is not present.
    #[error("Connectivity service not available: {service}")]
    ServiceMissing {
        /// Name of the missing service or data source.
        service: String,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

impl ProbeError {
    /// Maps an I/O error reading `source` into the matching variant.
    #[must_use]
    pub fn from_io(source: &str, error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::ServiceMissing {
                service: source.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                context: format!("reading {source}"),
            },
            _ => Self::Platform {
                message: format!("reading {source}: {error}"),
            },
        }
    }
}

/// Trait for asking the platform about the active network.
///
/// # Design
///
/// - The advisor owns an implementation as an injected dependency
/// - Enables substituting a test double for platform APIs
/// - Platform-specific implementations live in [`super::platform`]
///
/// # Example
///
/// ```
/// use net_advisor::network::{ConnectivityProbe, ProbeError, ProbeReport, Transport};
///
/// struct AlwaysWifi;
///
/// impl ConnectivityProbe for AlwaysWifi {
///     fn probe(&self) -> Result<ProbeReport, ProbeError> {
///         Ok(ProbeReport::online(Transport::Wifi, Some(false)))
///     }
/// }
///
/// assert!(AlwaysWifi.probe().unwrap().active.is_some());
/// ```
pub trait ConnectivityProbe: Send + Sync {
    /// Reads the current active network once.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the platform service cannot be reached:
    /// missing service, insufficient permissions, or other platform failures.
    ///
    /// # Implementation Notes
    ///
    /// - No retries; one platform call per invocation
    /// - Return `metered: None` rather than guessing when the platform is silent
    fn probe(&self) -> Result<ProbeReport, ProbeError>;
}

impl<P: ConnectivityProbe + ?Sized> ConnectivityProbe for std::sync::Arc<P> {
    fn probe(&self) -> Result<ProbeReport, ProbeError> {
        (**self).probe()
    }
}

impl<P: ConnectivityProbe + ?Sized> ConnectivityProbe for Box<P> {
    fn probe(&self) -> Result<ProbeReport, ProbeError> {
        (**self).probe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::test_fixtures::MockProbe;
    use crate::network::Transport;
    use std::sync::Arc;

    #[test]
    fn mock_probe_returns_predefined_reports_in_order() {
        let probe = MockProbe::returning_reports(vec![
            ProbeReport::online(Transport::Wifi, Some(false)),
            ProbeReport::offline(),
        ]);

        assert!(probe.probe().unwrap().active.is_some());
        assert!(probe.probe().unwrap().active.is_none());
        assert_eq!(probe.call_count(), 2);
    }

    #[test]
    fn mock_probe_can_return_errors() {
        let probe = MockProbe::new(vec![Err(ProbeError::Platform {
            message: "test error".to_string(),
        })]);

        let error = probe.probe().unwrap_err();
        assert!(error.to_string().contains("test error"));
    }

    #[test]
    fn arc_probe_delegates() {
        let probe = Arc::new(MockProbe::returning_reports(vec![ProbeReport::offline()]));
        let shared: Arc<dyn ConnectivityProbe> = probe.clone();

        assert_eq!(shared.probe().unwrap(), ProbeReport::offline());
        assert_eq!(probe.call_count(), 1);
    }

    #[test]
    fn from_io_maps_not_found_to_service_missing() {
        let io = std::io::Error::from(std::io::ErrorKind::NotFound);
        let error = ProbeError::from_io("/proc/net/route", &io);

        assert!(matches!(error, ProbeError::ServiceMissing { .. }));
        assert!(error.to_string().contains("/proc/net/route"));
    }

    #[test]
    fn from_io_maps_permission_denied() {
        let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let error = ProbeError::from_io("/proc/net/route", &io);

        assert!(matches!(error, ProbeError::PermissionDenied { .. }));
    }

    #[test]
    fn from_io_maps_other_errors_to_platform() {
        let io = std::io::Error::other("boom");
        let error = ProbeError::from_io("/proc/net/route", &io);

        assert!(matches!(error, ProbeError::Platform { .. }));
        assert!(error.to_string().contains("boom"));
    }
}
