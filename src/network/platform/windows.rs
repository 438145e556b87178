//! Windows connectivity probe using `Windows.Networking.Connectivity`.

use crate::network::{ConnectivityProbe, ProbeError, ProbeReport, Transport};
use windows::Networking::Connectivity::{
    ConnectionProfile, NetworkConnectivityLevel, NetworkCostType, NetworkInformation,
};

/// Windows implementation of [`ConnectivityProbe`].
///
/// Reads the internet connection profile and its connection cost. This is
/// the same data source the system uses for its own "metered connection"
/// setting.
///
/// # Example
///
/// ```no_run
/// use net_advisor::network::ConnectivityProbe;
/// use net_advisor::network::platform::WindowsProbe;
///
/// let report = WindowsProbe::new().probe().expect("probe failed");
/// println!("{report:?}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowsProbe {
    _private: (),
}

impl WindowsProbe {
    /// Creates a new Windows probe.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl ConnectivityProbe for WindowsProbe {
    fn probe(&self) -> Result<ProbeReport, ProbeError> {
        // A null profile means no internet connection; windows-rs surfaces it
        // as an error carrying a success HRESULT.
        let profile = match NetworkInformation::GetInternetConnectionProfile() {
            Ok(profile) => profile,
            Err(e) if e.code().is_ok() => return Ok(ProbeReport::offline()),
            Err(e) => return Err(e.into()),
        };

        if profile.GetNetworkConnectivityLevel()? == NetworkConnectivityLevel::None {
            return Ok(ProbeReport::offline());
        }

        let transport = profile_transport(&profile)?;
        let metered = profile_metered(&profile)?;

        tracing::debug!(%transport, ?metered, "Internet connection profile resolved");
        Ok(ProbeReport::online(transport, metered))
    }
}

/// Derives the transport from the profile's WLAN/WWAN flags.
#[cfg(not(tarpaulin_include))]
fn profile_transport(profile: &ConnectionProfile) -> Result<Transport, ProbeError> {
    if profile.IsWlanConnectionProfile()? {
        Ok(Transport::Wifi)
    } else if profile.IsWwanConnectionProfile()? {
        Ok(Transport::Cellular)
    } else {
        // Wired and tunnel profiles are indistinguishable here.
        Ok(Transport::Ethernet)
    }
}

/// Reads the connection cost of `profile` as a metered flag.
#[cfg(not(tarpaulin_include))]
fn profile_metered(profile: &ConnectionProfile) -> Result<Option<bool>, ProbeError> {
    let cost = profile.GetConnectionCost()?;
    Ok(metered_from_cost(
        cost.Roaming()?,
        cost.OverDataLimit()?,
        cost.NetworkCostType()?,
    ))
}

/// Maps connection cost to a metered flag.
///
/// Roaming or an exceeded data limit is metered whatever the plan says.
/// An unknown cost type leaves the flag undetermined.
pub(crate) fn metered_from_cost(
    roaming: bool,
    over_limit: bool,
    cost: NetworkCostType,
) -> Option<bool> {
    if roaming || over_limit {
        Some(true)
    } else if cost == NetworkCostType::Unrestricted {
        Some(false)
    } else if cost == NetworkCostType::Fixed || cost == NetworkCostType::Variable {
        Some(true)
    } else {
        None
    }
}
