//! Network Service Module
//!
//! [`NetworkService`] is constructed once at startup and passed to whatever
//! needs the interface or the socket provider. It owns the single
//! [`InterfaceHandle`] and the provider registry.

use std::sync::Arc;

use adapters_network_interface::{ConfigValue, InterfaceHandle};
use adapters_socket::{NativeSocketProvider, NetworkProvider};
use entities_network::{NetError, SocketDomain, SocketType};
use log::debug;

use crate::config::NetConfig;
use crate::config_call::ConfigCall;
use crate::registry::ProviderRegistry;
use crate::socket_object::SocketObject;

/// Process-wide network service
///
/// Create exactly one per process. Construction discovers the interface and
/// registers the native socket provider as the default.
#[derive(Debug)]
pub struct NetworkService {
    config: NetConfig,
    interface: Arc<InterfaceHandle>,
    registry: ProviderRegistry,
}

impl NetworkService {
    /// Discover the interface and register the native provider
    ///
    /// # Returns
    ///
    /// * `Ok(NetworkService)` - Ready service
    /// * `Err(NetError::NoSuchDevice)` - No interface exists
    pub fn start(config: NetConfig) -> Result<Self, NetError> {
        let interface = InterfaceHandle::discover(&config.discovery())?;
        let provider = Arc::new(NativeSocketProvider::new());
        let service = Self::with_parts(config, Arc::new(interface), provider);
        debug!("network service started on {}", service.interface.name());
        Ok(service)
    }

    /// Start with configuration read from the environment
    pub fn from_env() -> Result<Self, NetError> {
        Self::start(NetConfig::from_env()?)
    }

    /// Assemble a service from already constructed parts
    pub fn with_parts(
        config: NetConfig,
        interface: Arc<InterfaceHandle>,
        provider: Arc<dyn NetworkProvider>,
    ) -> Self {
        let registry = ProviderRegistry::new(provider);
        Self {
            config,
            interface,
            registry,
        }
    }

    /// Configuration the service was started with
    pub fn config(&self) -> &NetConfig {
        &self.config
    }

    /// The interface handle
    pub fn interface(&self) -> &Arc<InterfaceHandle> {
        &self.interface
    }

    /// Resolve the NIC for a socket: the given one, else the service's interface
    pub fn nic(&self, nic: Option<Arc<InterfaceHandle>>) -> Arc<InterfaceHandle> {
        nic.unwrap_or_else(|| Arc::clone(&self.interface))
    }

    /// Provider registry
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Current default provider
    pub fn default_provider(&self) -> Arc<dyn NetworkProvider> {
        self.registry.default_provider()
    }

    /// Open a socket through the default provider
    ///
    /// The configured socket timeout, if any, is applied immediately.
    pub fn socket(
        &self,
        domain: SocketDomain,
        socket_type: SocketType,
    ) -> Result<SocketObject, NetError> {
        SocketObject::new(&self.registry, domain, socket_type, self.config.socket_timeout_ms)
    }

    /// Resolve a hostname through the default provider
    pub fn resolve_hostname(&self, name: &str) -> Result<[u8; 4], NetError> {
        self.registry.default_provider().resolve_hostname(name)
    }

    /// Run a `config(...)` call against the interface
    pub fn interface_config(&self, call: ConfigCall) -> Result<Option<ConfigValue>, NetError> {
        self.interface.config(call.build()?)
    }
}
