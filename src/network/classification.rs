//! Core network types for connectivity classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Link technology carrying the active network.
///
/// Used for logging and for callers that want finer-grained policy than
/// the metered flag alone. Platforms that cannot tell report [`Transport::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// Wireless LAN (Wi-Fi).
    Wifi,
    /// Mobile broadband (WWAN, PPP or raw-IP modem).
    Cellular,
    /// Wired Ethernet.
    Ethernet,
    /// Tunnel interface (`WireGuard`, OpenVPN tun, etc.).
    Vpn,
    /// Unrecognized or undeterminable link type.
    Unknown,
}

impl Transport {
    /// Returns true for transports that are usually billed per byte.
    #[must_use]
    pub const fn is_typically_metered(self) -> bool {
        matches!(self, Self::Cellular)
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wifi => write!(f, "wifi"),
            Self::Cellular => write!(f, "cellular"),
            Self::Ethernet => write!(f, "ethernet"),
            Self::Vpn => write!(f, "vpn"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// The active network as reported by a platform probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveNetwork {
    /// Link technology of the active network.
    pub transport: Transport,
    /// Metered flag, `None` when the platform could not determine it.
    pub metered: Option<bool>,
}

impl ActiveNetwork {
    /// Creates a new active network reading.
    #[must_use]
    pub const fn new(transport: Transport, metered: Option<bool>) -> Self {
        Self { transport, metered }
    }
}

/// Raw reading returned by a [`super::ConnectivityProbe`].
///
/// `active` is `None` when the device has no active network at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeReport {
    /// The network the OS currently routes general traffic through.
    pub active: Option<ActiveNetwork>,
}

impl ProbeReport {
    /// A report for a device with no active network.
    #[must_use]
    pub const fn offline() -> Self {
        Self { active: None }
    }

    /// A report for a device with an active network.
    #[must_use]
    pub const fn online(transport: Transport, metered: Option<bool>) -> Self {
        Self {
            active: Some(ActiveNetwork::new(transport, metered)),
        }
    }
}

/// Immutable snapshot of the current network classification.
///
/// # Invariant
///
/// A disconnected classification is always metered. Fields are private and
/// the two constructors are the only way to build a value, so the invariant
/// cannot be broken by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NetworkClassification {
    connected: bool,
    metered: bool,
    transport: Transport,
}

impl NetworkClassification {
    /// Classification of a connected network.
    ///
    /// An undetermined metered flag (`None`) is reported as metered.
    #[must_use]
    pub const fn connected(transport: Transport, metered: Option<bool>) -> Self {
        let metered = match metered {
            Some(value) => value,
            None => true,
        };
        Self {
            connected: true,
            metered,
            transport,
        }
    }

    /// Classification when there is no active network.
    #[must_use]
    pub const fn disconnected() -> Self {
        Self {
            connected: false,
            metered: true,
            transport: Transport::Unknown,
        }
    }

    /// Maps a raw probe reading into a classification.
    #[must_use]
    pub const fn from_report(report: &ProbeReport) -> Self {
        match report.active {
            Some(active) => Self::connected(active.transport, active.metered),
            None => Self::disconnected(),
        }
    }

    /// Returns true if there is an active network.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Returns true if the active network is metered (or absent).
    #[must_use]
    pub const fn is_metered(&self) -> bool {
        self.metered
    }

    /// Returns the link technology of the active network.
    #[must_use]
    pub const fn transport(&self) -> Transport {
        self.transport
    }

    /// Returns true if network-costly work may proceed right now.
    #[must_use]
    pub const fn allows_costly_transfer(&self) -> bool {
        self.connected && !self.metered
    }
}

impl From<ProbeReport> for NetworkClassification {
    fn from(report: ProbeReport) -> Self {
        Self::from_report(&report)
    }
}

impl fmt::Display for NetworkClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.connected {
            write!(
                f,
                "connected via {} ({})",
                self.transport,
                if self.metered { "metered" } else { "unmetered" }
            )
        } else {
            write!(f, "disconnected")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod transport {
        use super::*;

        #[test]
        fn display_uses_lowercase_names() {
            assert_eq!(Transport::Wifi.to_string(), "wifi");
            assert_eq!(Transport::Cellular.to_string(), "cellular");
            assert_eq!(Transport::Ethernet.to_string(), "ethernet");
            assert_eq!(Transport::Vpn.to_string(), "vpn");
            assert_eq!(Transport::Unknown.to_string(), "unknown");
        }

        #[test]
        fn only_cellular_is_typically_metered() {
            assert!(Transport::Cellular.is_typically_metered());
            assert!(!Transport::Wifi.is_typically_metered());
            assert!(!Transport::Ethernet.is_typically_metered());
        }

        #[test]
        fn serializes_as_snake_case() {
            let json = serde_json::to_string(&Transport::Cellular).unwrap();
            assert_eq!(json, "\"cellular\"");
        }
    }

    mod classification {
        use super::*;

        #[test]
        fn disconnected_is_always_metered() {
            let c = NetworkClassification::disconnected();

            assert!(!c.is_connected());
            assert!(c.is_metered());
            assert_eq!(c.transport(), Transport::Unknown);
        }

        #[test]
        fn offline_report_maps_to_disconnected() {
            let c = NetworkClassification::from_report(&ProbeReport::offline());
            assert_eq!(c, NetworkClassification::disconnected());
        }

        #[test]
        fn unmetered_wifi_allows_costly_transfer() {
            let c = NetworkClassification::from(ProbeReport::online(Transport::Wifi, Some(false)));

            assert!(c.is_connected());
            assert!(!c.is_metered());
            assert!(c.allows_costly_transfer());
        }

        #[test]
        fn unknown_metered_flag_is_treated_as_metered() {
            let c = NetworkClassification::connected(Transport::Ethernet, None);

            assert!(c.is_connected());
            assert!(c.is_metered());
            assert!(!c.allows_costly_transfer());
        }

        #[test]
        fn display_describes_state() {
            let online = NetworkClassification::connected(Transport::Cellular, Some(true));
            assert_eq!(online.to_string(), "connected via cellular (metered)");
            assert_eq!(
                NetworkClassification::disconnected().to_string(),
                "disconnected"
            );
        }

        #[test]
        fn serializes_all_fields() {
            let c = NetworkClassification::connected(Transport::Wifi, Some(false));
            let value = serde_json::to_value(c).unwrap();

            assert_eq!(
                value,
                serde_json::json!({"connected": true, "metered": false, "transport": "wifi"})
            );
        }
    }
}
