//! Socket Address Module
//!
//! Marshals [`Ipv4Endpoint`] values into and out of the native `AF_INET` socket
//! address structure.

use entities_network::{Ipv4Endpoint, NetError};
use socket2::SockAddr;

/// Build the native socket address for an IPv4 endpoint
///
/// The result carries the `AF_INET` family tag, the port in network byte order
/// and the 4 address bytes in network byte order.
pub fn to_sockaddr(endpoint: &Ipv4Endpoint) -> SockAddr {
    SockAddr::from(endpoint.to_socket_addr())
}

/// Read an IPv4 endpoint back out of a native socket address
///
/// # Returns
///
/// * `Ok(Ipv4Endpoint)` - Address and host-order port
/// * `Err(NetError::Os(EAFNOSUPPORT))` - Address is not `AF_INET`
pub fn from_sockaddr(addr: &SockAddr) -> Result<Ipv4Endpoint, NetError> {
    addr.as_socket_ipv4()
        .map(Ipv4Endpoint::from)
        .ok_or(NetError::Os(libc::EAFNOSUPPORT))
}
