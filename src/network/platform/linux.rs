//! Linux connectivity probe using procfs, sysfs and NetworkManager.

use crate::network::{ConnectivityProbe, ProbeError, ProbeReport, Transport};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Route flag: route is usable.
const RTF_UP: u32 = 0x0001;

/// Route flag: reject route (unreachable).
const RTF_REJECT: u32 = 0x0200;

/// `ARPHRD_ETHER` from `if_arp.h`.
const ARPHRD_ETHER: u32 = 1;

/// `ARPHRD_PPP` from `if_arp.h`.
const ARPHRD_PPP: u32 = 512;

/// `ARPHRD_RAWIP` from `if_arp.h` (QMI/MBIM modems).
const ARPHRD_RAWIP: u32 = 519;

/// `ARPHRD_NONE` from `if_arp.h` (tun devices, `WireGuard`).
const ARPHRD_NONE: u32 = 65534;

/// Interface name prefixes used by tunnel drivers.
const TUNNEL_PREFIXES: [&str; 3] = ["tun", "tap", "wg"];

/// Where the metered flag comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeteredSource {
    /// Ask NetworkManager via the given `nmcli` executable.
    NetworkManager {
        /// Path or bare name of the `nmcli` binary.
        nmcli: PathBuf,
    },
    /// Never ask; only the transport heuristic applies.
    Disabled,
}

impl Default for MeteredSource {
    fn default() -> Self {
        Self::NetworkManager {
            nmcli: PathBuf::from("nmcli"),
        }
    }
}

/// A default route candidate read from the kernel routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultRoute {
    pub(crate) iface: String,
    pub(crate) metric: u32,
}

/// Linux implementation of [`ConnectivityProbe`].
///
/// The active network is the interface carrying the lowest-metric default
/// route. The kernel has no notion of metered links, so the flag comes from
/// NetworkManager when available; cellular links are assumed metered.
///
/// # Example
///
/// ```no_run
/// use net_advisor::network::ConnectivityProbe;
/// use net_advisor::network::platform::LinuxProbe;
///
/// let report = LinuxProbe::new().probe().expect("probe failed");
/// println!("{report:?}");
/// ```
#[derive(Debug, Clone)]
pub struct LinuxProbe {
    proc_root: PathBuf,
    sys_root: PathBuf,
    metered_source: MeteredSource,
}

impl Default for LinuxProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl LinuxProbe {
    /// Creates a probe reading the live `/proc` and `/sys` trees.
    #[must_use]
    pub fn new() -> Self {
        Self::with_roots("/proc", "/sys")
    }

    /// Creates a probe reading procfs and sysfs from custom roots.
    #[must_use]
    pub fn with_roots(proc_root: impl Into<PathBuf>, sys_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
            sys_root: sys_root.into(),
            metered_source: MeteredSource::default(),
        }
    }

    /// Sets where the metered flag is read from.
    #[must_use]
    pub fn with_metered_source(mut self, source: MeteredSource) -> Self {
        self.metered_source = source;
        self
    }

    /// Returns the configured metered flag source.
    #[must_use]
    pub const fn metered_source(&self) -> &MeteredSource {
        &self.metered_source
    }

    /// Reads usable default routes, IPv4 first, IPv6 when IPv4 has none.
    ///
    /// Routes on links whose operstate is `down` are dropped before the
    /// IPv6 fallback is considered.
    fn default_routes(&self) -> Result<Vec<DefaultRoute>, ProbeError> {
        let v4_path = self.proc_root.join("net/route");
        let v4 = fs::read_to_string(&v4_path)
            .map_err(|e| ProbeError::from_io(&v4_path.display().to_string(), &e))?;

        let mut routes = self.usable(parse_ipv4_default_routes(&v4));
        if routes.is_empty() {
            let v6_path = self.proc_root.join("net/ipv6_route");
            match fs::read_to_string(&v6_path) {
                Ok(v6) => routes = self.usable(parse_ipv6_default_routes(&v6)),
                // IPv6 disabled at boot
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(ProbeError::from_io(&v6_path.display().to_string(), &e)),
            }
        }

        routes.sort_by_key(|r| r.metric);
        Ok(routes)
    }

    fn usable(&self, routes: Vec<DefaultRoute>) -> Vec<DefaultRoute> {
        routes
            .into_iter()
            .filter(|r| !self.is_link_down(&r.iface))
            .collect()
    }

    fn interface_dir(&self, iface: &str) -> PathBuf {
        self.sys_root.join("class/net").join(iface)
    }

    fn is_link_down(&self, iface: &str) -> bool {
        fs::read_to_string(self.interface_dir(iface).join("operstate"))
            .is_ok_and(|state| state.trim() == "down")
    }

    fn metered_flag(&self, iface: &str) -> Option<bool> {
        match &self.metered_source {
            MeteredSource::NetworkManager { nmcli } => query_network_manager(nmcli, iface),
            MeteredSource::Disabled => None,
        }
    }
}

impl ConnectivityProbe for LinuxProbe {
    fn probe(&self) -> Result<ProbeReport, ProbeError> {
        let routes = self.default_routes()?;

        let Some(route) = routes.first() else {
            tracing::debug!("No usable default route, reporting offline");
            return Ok(ProbeReport::offline());
        };

        let transport = classify_transport(&self.interface_dir(&route.iface), &route.iface);
        let metered = self
            .metered_flag(&route.iface)
            .or_else(|| transport.is_typically_metered().then_some(true));

        tracing::debug!(
            iface = %route.iface,
            %transport,
            ?metered,
            "Active network resolved"
        );
        Ok(ProbeReport::online(transport, metered))
    }
}

/// Parses `/proc/net/route` and returns usable default routes.
pub(crate) fn parse_ipv4_default_routes(content: &str) -> Vec<DefaultRoute> {
    content
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            // Iface Destination Gateway Flags RefCnt Use Metric Mask ...
            if fields.len() < 8 {
                return None;
            }
            let flags = u32::from_str_radix(fields[3], 16).ok()?;
            let is_default = fields[1] == "00000000" && fields[7] == "00000000";
            if !is_default || flags & RTF_UP == 0 || flags & RTF_REJECT != 0 {
                return None;
            }
            usable_route(fields[0], fields[6].parse().ok()?)
        })
        .collect()
}

/// Parses `/proc/net/ipv6_route` and returns usable default routes.
pub(crate) fn parse_ipv6_default_routes(content: &str) -> Vec<DefaultRoute> {
    content
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            // dest dest_plen src src_plen nexthop metric refcnt use flags iface
            if fields.len() < 10 {
                return None;
            }
            let is_default = fields[0].bytes().all(|b| b == b'0') && fields[1] == "00";
            let flags = u32::from_str_radix(fields[8], 16).ok()?;
            if !is_default || flags & RTF_UP == 0 || flags & RTF_REJECT != 0 {
                return None;
            }
            usable_route(fields[9], u32::from_str_radix(fields[5], 16).ok()?)
        })
        .collect()
}

fn usable_route(iface: &str, metric: u32) -> Option<DefaultRoute> {
    (iface != "lo").then(|| DefaultRoute {
        iface: iface.to_string(),
        metric,
    })
}

/// Classifies an interface from its sysfs directory.
pub(crate) fn classify_transport(dir: &Path, iface: &str) -> Transport {
    if dir.join("wireless").exists() || dir.join("phy80211").exists() {
        return Transport::Wifi;
    }

    match read_devtype(dir).as_deref() {
        Some("wlan") => return Transport::Wifi,
        Some("wwan") => return Transport::Cellular,
        Some("wireguard") => return Transport::Vpn,
        _ => {}
    }

    if TUNNEL_PREFIXES.iter().any(|p| iface.starts_with(p)) {
        return Transport::Vpn;
    }

    let link_type = fs::read_to_string(dir.join("type"))
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok());

    match link_type {
        Some(ARPHRD_ETHER) => Transport::Ethernet,
        Some(ARPHRD_PPP | ARPHRD_RAWIP) => Transport::Cellular,
        Some(ARPHRD_NONE) => Transport::Vpn,
        _ => Transport::Unknown,
    }
}

fn read_devtype(dir: &Path) -> Option<String> {
    let uevent = fs::read_to_string(dir.join("uevent")).ok()?;
    uevent
        .lines()
        .find_map(|line| line.strip_prefix("DEVTYPE="))
        .map(|v| v.trim().to_string())
}

/// Asks NetworkManager for the metered flag of `iface`.
///
/// Any failure (no `nmcli`, unmanaged device) yields `None`.
#[cfg(not(tarpaulin_include))]
fn query_network_manager(nmcli: &Path, iface: &str) -> Option<bool> {
    let output = Command::new(nmcli)
        .args(["-g", "GENERAL.METERED", "device", "show", iface])
        .env("LC_ALL", "C")
        .output();

    match output {
        Ok(out) if out.status.success() => {
            parse_nmcli_metered(&String::from_utf8_lossy(&out.stdout))
        }
        Ok(out) => {
            tracing::debug!(
                iface,
                status = %out.status,
                "nmcli could not report metered flag"
            );
            None
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::trace!("nmcli not installed, metered flag unavailable");
            None
        }
        Err(e) => {
            tracing::debug!("Failed to run nmcli: {e}");
            None
        }
    }
}

/// Parses `GENERAL.METERED` output: `yes`, `no`, `yes (guessed)`, `no (guessed)`, `unknown`.
pub(crate) fn parse_nmcli_metered(output: &str) -> Option<bool> {
    let value = output.trim().to_ascii_lowercase();
    if value.starts_with("yes") {
        Some(true)
    } else if value.starts_with("no") {
        Some(false)
    } else {
        None
    }
}
