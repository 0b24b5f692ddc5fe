//! Provider Module
//!
//! Defines [`NetworkProvider`], the operation table a generic socket object
//! delegates every network call to, and [`NativeSocketProvider`], its
//! implementation on the host BSD socket API.

use entities_network::{
    Ipv4Endpoint, NetError, PollEvents, SocketDescriptor, SocketDomain, SocketType,
};

use crate::{poll, resolve, socket, tcp, udp};

pub use crate::socket::OptionValue;

/// Socket operation table
///
/// Implementations translate each call into a single native stack call and
/// return native failures unchanged. Any future transport implements the same
/// trait and is selected at socket-creation time.
pub trait NetworkProvider: Send + Sync {
    /// Resolve a hostname to its first IPv4 address
    fn resolve_hostname(&self, name: &str) -> Result<[u8; 4], NetError>;

    /// Open a native socket
    fn create(&self, domain: SocketDomain, socket_type: SocketType)
        -> Result<SocketDescriptor, NetError>;

    /// Close the descriptor if open and reset it to `-1`; idempotent
    fn close(&self, desc: &mut SocketDescriptor);

    /// Bind to a local endpoint
    fn bind(&self, desc: &SocketDescriptor, endpoint: &Ipv4Endpoint) -> Result<(), NetError>;

    /// Start accepting connections
    fn listen(&self, desc: &SocketDescriptor, backlog: i32) -> Result<(), NetError>;

    /// Accept a connection, returning a new descriptor and the peer
    fn accept(&self, desc: &SocketDescriptor) -> Result<(SocketDescriptor, Ipv4Endpoint), NetError>;

    /// Connect to a remote endpoint
    fn connect(&self, desc: &SocketDescriptor, endpoint: &Ipv4Endpoint) -> Result<(), NetError>;

    /// Send on a connected descriptor, returning the count actually sent
    fn send(&self, desc: &SocketDescriptor, data: &[u8]) -> Result<usize, NetError>;

    /// Receive up to `max_len` bytes from a connected descriptor
    fn recv(&self, desc: &SocketDescriptor, max_len: usize) -> Result<Vec<u8>, NetError>;

    /// Send a datagram to `endpoint`
    fn send_to(
        &self,
        desc: &SocketDescriptor,
        data: &[u8],
        endpoint: &Ipv4Endpoint,
    ) -> Result<usize, NetError>;

    /// Receive one datagram and its sender
    fn recv_from(
        &self,
        desc: &SocketDescriptor,
        max_len: usize,
    ) -> Result<(Vec<u8>, Ipv4Endpoint), NetError>;

    /// Pass an option through to the native option-setting call
    fn set_socket_option(
        &self,
        desc: &SocketDescriptor,
        level: i32,
        option: i32,
        value: &OptionValue,
    ) -> Result<(), NetError>;

    /// Apply a receive timeout in milliseconds
    fn set_timeout(&self, desc: &SocketDescriptor, millis: u32) -> Result<(), NetError>;

    /// Zero-timeout readiness check
    fn poll(&self, desc: &SocketDescriptor, requested: PollEvents) -> Result<PollEvents, NetError>;

    /// Locally bound endpoint
    fn local_endpoint(&self, desc: &SocketDescriptor) -> Result<Ipv4Endpoint, NetError>;
}

/// Provider backed by the host's native socket API
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSocketProvider;

impl NativeSocketProvider {
    /// Create a new native provider
    pub fn new() -> Self {
        Self
    }
}

impl NetworkProvider for NativeSocketProvider {
    fn resolve_hostname(&self, name: &str) -> Result<[u8; 4], NetError> {
        resolve::resolve_hostname(name)
    }

    fn create(
        &self,
        domain: SocketDomain,
        socket_type: SocketType,
    ) -> Result<SocketDescriptor, NetError> {
        socket::create(domain, socket_type)
    }

    fn close(&self, desc: &mut SocketDescriptor) {
        socket::close(desc)
    }

    fn bind(&self, desc: &SocketDescriptor, endpoint: &Ipv4Endpoint) -> Result<(), NetError> {
        socket::bind(desc, endpoint)
    }

    fn listen(&self, desc: &SocketDescriptor, backlog: i32) -> Result<(), NetError> {
        tcp::listen(desc, backlog)
    }

    fn accept(
        &self,
        desc: &SocketDescriptor,
    ) -> Result<(SocketDescriptor, Ipv4Endpoint), NetError> {
        tcp::accept(desc)
    }

    fn connect(&self, desc: &SocketDescriptor, endpoint: &Ipv4Endpoint) -> Result<(), NetError> {
        socket::connect(desc, endpoint)
    }

    fn send(&self, desc: &SocketDescriptor, data: &[u8]) -> Result<usize, NetError> {
        tcp::send(desc, data)
    }

    fn recv(&self, desc: &SocketDescriptor, max_len: usize) -> Result<Vec<u8>, NetError> {
        tcp::recv(desc, max_len)
    }

    fn send_to(
        &self,
        desc: &SocketDescriptor,
        data: &[u8],
        endpoint: &Ipv4Endpoint,
    ) -> Result<usize, NetError> {
        udp::send_to(desc, data, endpoint)
    }

    fn recv_from(
        &self,
        desc: &SocketDescriptor,
        max_len: usize,
    ) -> Result<(Vec<u8>, Ipv4Endpoint), NetError> {
        udp::recv_from(desc, max_len)
    }

    fn set_socket_option(
        &self,
        desc: &SocketDescriptor,
        level: i32,
        option: i32,
        value: &OptionValue,
    ) -> Result<(), NetError> {
        socket::set_option(desc, level, option, value)
    }

    fn set_timeout(&self, desc: &SocketDescriptor, millis: u32) -> Result<(), NetError> {
        socket::set_timeout(desc, millis)
    }

    fn poll(&self, desc: &SocketDescriptor, requested: PollEvents) -> Result<PollEvents, NetError> {
        poll::poll(desc, requested)
    }

    fn local_endpoint(&self, desc: &SocketDescriptor) -> Result<Ipv4Endpoint, NetError> {
        socket::local_endpoint(desc)
    }
}
