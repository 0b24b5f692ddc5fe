//! Native Interface Module
//!
//! The boundary between the interface handle and the OS. Everything the handle
//! knows about the interface is read through [`NativeInterface`] on every call;
//! nothing is cached on this side.

use entities_network::{Ipv4Config, MacAddress, NetError};

/// Operations the native stack provides for one network interface
#[cfg_attr(test, mockall::automock)]
pub trait NativeInterface: Send + Sync {
    /// Interface name as known to the native stack
    fn name(&self) -> String;

    /// Administrative state
    fn is_up(&self) -> Result<bool, NetError>;

    /// Bring the interface administratively up or down
    fn set_up(&self, up: bool) -> Result<(), NetError>;

    /// Link carrier state
    fn is_running(&self) -> Result<bool, NetError>;

    /// Live IPv4 configuration, `None` while no address is assigned
    fn ipv4_config(&self) -> Result<Option<Ipv4Config>, NetError>;

    /// Current link-layer address
    fn link_address(&self) -> Result<MacAddress, NetError>;

    /// Write a new link-layer address as an Ethernet address
    fn set_link_address(&self, mac: &MacAddress) -> Result<(), NetError>;
}
