//! UDP Module
//!
//! Provides the datagram-oriented operations. The remote address is marshaled
//! on every call.

use entities_network::{Ipv4Endpoint, NetError, SocketDescriptor};
use log::trace;

use crate::sockaddr::{from_sockaddr, to_sockaddr};
use crate::socket::with_sockref;

/// Send a datagram to a remote endpoint
///
/// # Returns
///
/// * `Ok(usize)` - Bytes sent
/// * `Err(NetError::Os)` - Native error
pub fn send_to(
    desc: &SocketDescriptor,
    data: &[u8],
    endpoint: &Ipv4Endpoint,
) -> Result<usize, NetError> {
    let addr = to_sockaddr(endpoint);
    let sent = with_sockref(desc, |sock| sock.send_to(data, &addr))?;
    trace!("fd={} sent {} bytes to {}", desc.fd(), sent, endpoint);
    Ok(sent)
}

/// Receive one datagram of at most `max_len` bytes
///
/// Blocks until a datagram arrives or the receive timeout expires. Excess bytes
/// of a longer datagram are discarded by the native stack.
///
/// # Returns
///
/// * `Ok((Vec<u8>, Ipv4Endpoint))` - Payload and sender
/// * `Err(NetError::Os)` - Native error, `EAGAIN` on timeout
pub fn recv_from(
    desc: &SocketDescriptor,
    max_len: usize,
) -> Result<(Vec<u8>, Ipv4Endpoint), NetError> {
    let mut buf = Vec::with_capacity(max_len);
    let (n, addr) = with_sockref(desc, |sock| {
        sock.recv_from(&mut buf.spare_capacity_mut()[..max_len])
    })?;
    // The native call initialised the first `n` bytes.
    unsafe { buf.set_len(n) };
    let from = from_sockaddr(&addr)?;
    trace!("fd={} received {} bytes from {}", desc.fd(), n, from);
    Ok((buf, from))
}
