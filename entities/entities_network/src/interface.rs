//! Interface Module
//!
//! Provides the observable state of the network interface: the link status
//! ordinal and the IPv4 configuration snapshot.

use std::net::Ipv4Addr;

/// Operational state of the interface, as reported by `status()`
///
/// The ordinals are part of the runtime contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LinkStatus {
    /// Interface administratively down
    Down = 1,
    /// Interface up, no carrier
    NoCarrier = 2,
    /// Interface up and link running
    Running = 3,
}

impl LinkStatus {
    /// Derive the status from administrative and carrier state
    ///
    /// # Arguments
    ///
    /// * `up` - Whether the interface is administratively up
    /// * `running` - Whether the link reports carrier
    pub fn from_flags(up: bool, running: bool) -> Self {
        match (up, running) {
            (false, _) => LinkStatus::Down,
            (true, false) => LinkStatus::NoCarrier,
            (true, true) => LinkStatus::Running,
        }
    }

    /// Get the 1..3 ordinal
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// IPv4 configuration snapshot
///
/// Read from the native stack on every query, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Config {
    /// Unicast address
    pub address: Ipv4Addr,
    /// Netmask
    pub netmask: Ipv4Addr,
    /// Default gateway, `0.0.0.0` when there is none
    pub gateway: Ipv4Addr,
}

impl Ipv4Config {
    /// Broadcast value reported by `ifconfig()`; broadcast is not modeled
    pub const BROADCAST_PLACEHOLDER: &'static str = "0.0.0.0";

    /// Render the `(addr, netmask, gw, broadcast)` tuple in dotted-decimal text
    pub fn to_dotted(&self) -> (String, String, String, String) {
        (
            self.address.to_string(),
            self.netmask.to_string(),
            self.gateway.to_string(),
            Self::BROADCAST_PLACEHOLDER.to_string(),
        )
    }
}
