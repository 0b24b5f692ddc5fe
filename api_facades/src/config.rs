//! Configuration Module
//!
//! Provides [`NetConfig`], the settings the network service is started with,
//! loadable from the process environment.

use std::env;
use std::path::PathBuf;

use adapters_network_interface::discovery::{DiscoveryConfig, DEFAULT_ROUTE_TABLE};
use entities_network::NetError;

/// Interface to bind to
pub const ENV_INTERFACE: &str = "NETSHIM_INTERFACE";
/// Default receive timeout for new sockets, in milliseconds
pub const ENV_SOCKET_TIMEOUT_MS: &str = "NETSHIM_SOCKET_TIMEOUT_MS";
/// Route table path
pub const ENV_ROUTE_TABLE: &str = "NETSHIM_ROUTE_TABLE";

/// Network service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetConfig {
    /// Interface name; `None` picks the first non-loopback interface
    pub interface: Option<String>,
    /// Receive timeout applied to every new socket; `None` keeps the stack default
    pub socket_timeout_ms: Option<u32>,
    /// Kernel route table used for the default gateway
    pub route_table: PathBuf,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            interface: None,
            socket_timeout_ms: None,
            route_table: PathBuf::from(DEFAULT_ROUTE_TABLE),
        }
    }
}

impl NetConfig {
    /// Load from `NETSHIM_*` environment variables, defaulting what is unset
    ///
    /// # Returns
    ///
    /// * `Ok(NetConfig)` - Loaded configuration
    /// * `Err(NetError::InvalidArgument)` - Timeout is not a millisecond count
    pub fn from_env() -> Result<Self, NetError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();
        if let Some(name) = present(ENV_INTERFACE) {
            config.interface = Some(name.trim().to_string());
        }
        if let Some(raw) = present(ENV_SOCKET_TIMEOUT_MS) {
            let millis = raw.trim().parse::<u32>().map_err(|_| {
                NetError::InvalidArgument(format!(
                    "{}={:?} is not a millisecond count",
                    ENV_SOCKET_TIMEOUT_MS, raw
                ))
            })?;
            config.socket_timeout_ms = Some(millis);
        }
        if let Some(path) = present(ENV_ROUTE_TABLE) {
            config.route_table = PathBuf::from(path);
        }
        Ok(config)
    }

    /// Bind to a named interface
    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        self.interface = Some(name.into());
        self
    }

    /// Apply a receive timeout to every new socket
    pub fn with_socket_timeout_ms(mut self, millis: u32) -> Self {
        self.socket_timeout_ms = Some(millis);
        self
    }

    /// Read the default gateway from another route table
    pub fn with_route_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.route_table = path.into();
        self
    }

    /// Discovery settings for the interface handle
    pub fn discovery(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            interface: self.interface.clone(),
            route_table: self.route_table.clone(),
        }
    }
}
