//! Socket Object Module
//!
//! [`SocketObject`] stands in for the runtime's generic socket object: it owns
//! one descriptor and routes every operation through the provider it was
//! created with. Dropping it closes the descriptor.

use std::sync::Arc;

use adapters_socket::{NetworkProvider, OptionValue};
use entities_network::{
    Ipv4Endpoint, NetError, PollEvents, SocketDescriptor, SocketDomain, SocketType,
};

use crate::registry::ProviderRegistry;

/// Generic socket object bound to a network provider
pub struct SocketObject {
    desc: SocketDescriptor,
    provider: Arc<dyn NetworkProvider>,
}

impl SocketObject {
    /// Create a socket through the registry's default provider
    ///
    /// # Arguments
    ///
    /// * `registry` - Consulted once for the default provider
    /// * `domain` - Address family
    /// * `socket_type` - Stream, datagram or raw
    /// * `timeout_ms` - Receive timeout to apply right away, if any
    pub fn new(
        registry: &ProviderRegistry,
        domain: SocketDomain,
        socket_type: SocketType,
        timeout_ms: Option<u32>,
    ) -> Result<Self, NetError> {
        Self::with_provider(registry.default_provider(), domain, socket_type, timeout_ms)
    }

    /// Create a socket through a specific provider
    pub fn with_provider(
        provider: Arc<dyn NetworkProvider>,
        domain: SocketDomain,
        socket_type: SocketType,
        timeout_ms: Option<u32>,
    ) -> Result<Self, NetError> {
        let desc = provider.create(domain, socket_type)?;
        // From here on, drop closes the descriptor on any failure.
        let socket = Self { desc, provider };
        if let Some(millis) = timeout_ms {
            socket.set_timeout(millis)?;
        }
        Ok(socket)
    }

    /// Descriptor currently held
    pub fn descriptor(&self) -> &SocketDescriptor {
        &self.desc
    }

    /// Provider this socket routes through
    pub fn provider(&self) -> &Arc<dyn NetworkProvider> {
        &self.provider
    }

    /// Whether the descriptor is still open
    pub fn is_open(&self) -> bool {
        self.desc.is_open()
    }

    /// Close the descriptor; idempotent
    pub fn close(&mut self) {
        self.provider.close(&mut self.desc);
    }

    /// Bind to a packed 4-byte address and port
    pub fn bind(&self, addr: &[u8], port: u16) -> Result<(), NetError> {
        let endpoint = Ipv4Endpoint::from_packed(addr, port)?;
        self.provider.bind(&self.desc, &endpoint)
    }

    /// Start accepting connections
    pub fn listen(&self, backlog: i32) -> Result<(), NetError> {
        self.provider.listen(&self.desc, backlog)
    }

    /// Accept a connection as a new socket object on the same provider
    pub fn accept(&self) -> Result<(SocketObject, Ipv4Endpoint), NetError> {
        let (desc, peer) = self.provider.accept(&self.desc)?;
        let accepted = SocketObject {
            desc,
            provider: Arc::clone(&self.provider),
        };
        Ok((accepted, peer))
    }

    /// Connect to a packed 4-byte address and port
    pub fn connect(&self, addr: &[u8], port: u16) -> Result<(), NetError> {
        let endpoint = Ipv4Endpoint::from_packed(addr, port)?;
        self.provider.connect(&self.desc, &endpoint)
    }

    /// Send bytes, returning the count actually sent
    pub fn send(&self, data: &[u8]) -> Result<usize, NetError> {
        self.provider.send(&self.desc, data)
    }

    /// Receive up to `max_len` bytes
    pub fn recv(&self, max_len: usize) -> Result<Vec<u8>, NetError> {
        self.provider.recv(&self.desc, max_len)
    }

    /// Send a datagram to a packed 4-byte address and port
    pub fn send_to(&self, data: &[u8], addr: &[u8], port: u16) -> Result<usize, NetError> {
        let endpoint = Ipv4Endpoint::from_packed(addr, port)?;
        self.provider.send_to(&self.desc, data, &endpoint)
    }

    /// Receive one datagram and its sender
    pub fn recv_from(&self, max_len: usize) -> Result<(Vec<u8>, Ipv4Endpoint), NetError> {
        self.provider.recv_from(&self.desc, max_len)
    }

    /// Set a socket option
    pub fn set_socket_option(
        &self,
        level: i32,
        option: i32,
        value: &OptionValue,
    ) -> Result<(), NetError> {
        self.provider.set_socket_option(&self.desc, level, option, value)
    }

    /// Apply a receive timeout in milliseconds
    pub fn set_timeout(&self, millis: u32) -> Result<(), NetError> {
        self.provider.set_timeout(&self.desc, millis)
    }

    /// Zero-timeout readiness check with a runtime event mask
    pub fn poll(&self, requested: PollEvents) -> Result<PollEvents, NetError> {
        self.provider.poll(&self.desc, requested)
    }

    /// Locally bound endpoint
    pub fn local_endpoint(&self) -> Result<Ipv4Endpoint, NetError> {
        self.provider.local_endpoint(&self.desc)
    }
}

impl Drop for SocketObject {
    fn drop(&mut self) {
        if self.desc.is_open() {
            self.close();
        }
    }
}

impl std::fmt::Debug for SocketObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketObject").field("desc", &self.desc).finish()
    }
}
