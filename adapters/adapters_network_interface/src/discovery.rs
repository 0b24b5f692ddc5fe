//! Discovery Module
//!
//! Finds the one interface the handle binds to. Discovery runs once, when the
//! network service is constructed.

use std::path::PathBuf;

use entities_network::NetError;
use log::debug;
use nix::net::if_::if_nameindex;

use crate::linux::LinuxInterface;

/// Route table read by default
pub const DEFAULT_ROUTE_TABLE: &str = "/proc/net/route";

/// Discovery configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Interface to bind to; `None` picks the first non-loopback interface
    pub interface: Option<String>,
    /// Route table used for the default gateway
    pub route_table: PathBuf,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            interface: None,
            route_table: PathBuf::from(DEFAULT_ROUTE_TABLE),
        }
    }
}

impl DiscoveryConfig {
    /// Bind to a named interface
    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        self.interface = Some(name.into());
        self
    }

    /// Read the default gateway from another route table
    pub fn with_route_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.route_table = path.into();
        self
    }
}

/// An interface seen during enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Interface name
    pub name: String,
    /// Whether the interface is a loopback
    pub loopback: bool,
}

/// Pick the interface to bind to
///
/// A configured name must be present. Otherwise the first non-loopback
/// interface wins, then the first loopback.
///
/// # Returns
///
/// * `Ok(&Candidate)` - Selected interface
/// * `Err(NetError::NoSuchDevice)` - Nothing suitable
pub fn select_interface<'a>(
    candidates: &'a [Candidate],
    configured: Option<&str>,
) -> Result<&'a Candidate, NetError> {
    let found = match configured {
        Some(name) => candidates.iter().find(|c| c.name == name),
        None => candidates
            .iter()
            .find(|c| !c.loopback)
            .or_else(|| candidates.iter().find(|c| c.loopback)),
    };
    found.ok_or(NetError::NoSuchDevice)
}

/// Enumerate the interfaces known to the native stack
pub fn list_interfaces(config: &DiscoveryConfig) -> Result<Vec<Candidate>, NetError> {
    let interfaces = if_nameindex().map_err(|errno| NetError::Os(errno as i32))?;
    let mut candidates = Vec::new();
    for iface in interfaces.iter() {
        let name = iface.name().to_string_lossy().into_owned();
        let native = match LinuxInterface::open(&name, &config.route_table) {
            Ok(native) => native,
            // Removed between enumeration and open.
            Err(NetError::NoSuchDevice) => continue,
            Err(err) => return Err(err),
        };
        candidates.push(Candidate {
            loopback: native.is_loopback()?,
            name,
        });
    }
    Ok(candidates)
}

/// Discover and open the interface described by `config`
///
/// # Returns
///
/// * `Ok(LinuxInterface)` - Opened interface
/// * `Err(NetError::NoSuchDevice)` - No interface exists, or the configured
///   one is absent
pub fn discover(config: &DiscoveryConfig) -> Result<LinuxInterface, NetError> {
    let candidates = list_interfaces(config)?;
    let chosen = select_interface(&candidates, config.interface.as_deref())?;
    debug!("discovered interface {} (loopback: {})", chosen.name, chosen.loopback);
    LinuxInterface::open(&chosen.name, &config.route_table)
}
