//! Platform-specific connectivity probe implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`ConnectivityProbe`](super::ConnectivityProbe) trait.
//!
//! # Platform Support
//!
//! - **Linux**: Default route from procfs, link type from sysfs, metered flag
//!   from NetworkManager (`nmcli`).
//! - **Windows**: Internet connection profile via `Windows.Networking.Connectivity`.
//! - **Other**: [`UnsupportedProbe`], which always reports the service as missing.

#[cfg(target_os = "linux")]
mod linux;


#[cfg(windows)]
mod windows;

#[cfg(all(windows, test))]
mod windows_tests;

#[cfg(not(any(target_os = "linux", windows)))]
mod unsupported;

#[cfg(target_os = "linux")]
pub use linux::{LinuxProbe, MeteredSource};

#[cfg(windows)]
pub use windows::WindowsProbe;

#[cfg(not(any(target_os = "linux", windows)))]
pub use unsupported::UnsupportedProbe;

// Re-export platform-specific probe as PlatformProbe for convenience
#[cfg(target_os = "linux")]
pub use linux::LinuxProbe as PlatformProbe;

#[cfg(windows)]
pub use windows::WindowsProbe as PlatformProbe;

#[cfg(not(any(target_os = "linux", windows)))]
pub use unsupported::UnsupportedProbe as PlatformProbe;
