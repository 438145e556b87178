//! Platform-specific connectivity change listeners.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`ChangeListener`](super::ChangeListener) trait.
//!
//! # Platform Support
//!
//! - **Windows**: Uses `NotifyIpInterfaceChange` via the `windows` crate.
//! - **Linux**: Planned for future (netlink); use
//!   [`PollOnlyListener`](super::PollOnlyListener) meanwhile.

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::{WindowsChangeListener, WindowsChangeStream};

// Re-export platform-specific listener as PlatformListener for convenience
#[cfg(windows)]
pub use windows::WindowsChangeListener as PlatformListener;
