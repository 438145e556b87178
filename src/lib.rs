//! net-advisor: Network Reachability & Metering Advisory Service
//!
//! A library for telling a calling application whether its active network
//! connection is metered, and for notifying it when that changes.

pub mod advisor;
pub mod channel;
pub mod config;
pub mod monitor;
pub mod network;
