//! TCP Module
//!
//! Provides the stream-oriented operations: listen, accept, send and recv.
//! No address is exchanged on send/recv.

use std::os::fd::IntoRawFd;

use entities_network::{Ipv4Endpoint, NetError, SocketDescriptor};
use log::trace;

use crate::sockaddr::from_sockaddr;
use crate::socket::with_sockref;

/// Mark a bound descriptor as accepting connections
///
/// # Arguments
///
/// * `desc` - Bound stream descriptor
/// * `backlog` - Maximum number of pending connections
pub fn listen(desc: &SocketDescriptor, backlog: i32) -> Result<(), NetError> {
    with_sockref(desc, |sock| sock.listen(backlog))
}

/// Accept an incoming connection
///
/// Blocks until a peer connects or the receive timeout expires.
///
/// # Returns
///
/// * `Ok((SocketDescriptor, Ipv4Endpoint))` - New, independent descriptor and
///   the peer's address
/// * `Err(NetError::Os)` - Native error, `EAGAIN` on timeout
pub fn accept(desc: &SocketDescriptor) -> Result<(SocketDescriptor, Ipv4Endpoint), NetError> {
    let (socket, addr) = with_sockref(desc, |sock| sock.accept())?;
    // Dropping `socket` on the error path closes the accepted connection.
    let peer = from_sockaddr(&addr)?;
    let fd = socket.into_raw_fd();
    trace!("fd={} accepted fd={} from {}", desc.fd(), fd, peer);
    Ok((SocketDescriptor::open(fd, desc.domain, desc.socket_type), peer))
}

/// Send bytes on a connected descriptor
///
/// # Returns
///
/// * `Ok(usize)` - Bytes actually sent, possibly fewer than `data.len()`
pub fn send(desc: &SocketDescriptor, data: &[u8]) -> Result<usize, NetError> {
    let sent = with_sockref(desc, |sock| sock.send(data))?;
    trace!("fd={} sent {}/{} bytes", desc.fd(), sent, data.len());
    Ok(sent)
}

/// Receive up to `max_len` bytes from a connected descriptor
///
/// An empty result means the peer closed the connection.
pub fn recv(desc: &SocketDescriptor, max_len: usize) -> Result<Vec<u8>, NetError> {
    let mut buf = Vec::with_capacity(max_len);
    let n = with_sockref(desc, |sock| sock.recv(&mut buf.spare_capacity_mut()[..max_len]))?;
    // The native call initialised the first `n` bytes.
    unsafe { buf.set_len(n) };
    trace!("fd={} received {} bytes", desc.fd(), n);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::socket::{bind, close, connect, create, local_endpoint, set_timeout};
    use entities_network::{SocketDomain, SocketType};
    use std::thread;

    fn stream() -> SocketDescriptor {
        create(SocketDomain::Inet, SocketType::Stream).unwrap()
    }

    fn listener() -> (SocketDescriptor, Ipv4Endpoint) {
        let desc = stream();
        bind(&desc, &Ipv4Endpoint::localhost(0)).unwrap();
        listen(&desc, 1).unwrap();
        let addr = local_endpoint(&desc).unwrap();
        (desc, addr)
    }

    #[test]
    fn test_accept_returns_peer() {
        let (mut server, addr) = listener();

        let client = thread::spawn(move || {
            let mut desc = stream();
            connect(&desc, &addr).unwrap();
            let local = local_endpoint(&desc).unwrap();
            close(&mut desc);
            local
        });

        let (mut conn, peer) = accept(&server).unwrap();
        let client_local = client.join().unwrap();

        assert!(conn.is_open());
        assert_ne!(conn.fd(), server.fd());
        assert_eq!(peer.addr, [127, 0, 0, 1]);
        assert_eq!(peer.port, client_local.port);

        close(&mut conn);
        close(&mut server);
    }

    #[test]
    fn test_send_recv() {
        let (mut server, addr) = listener();

        let client = thread::spawn(move || {
            let mut desc = stream();
            connect(&desc, &addr).unwrap();
            let sent = send(&desc, b"Hello, Socket!").unwrap();
            let reply = recv(&desc, 64).unwrap();
            close(&mut desc);
            (sent, reply)
        });

        let (mut conn, _) = accept(&server).unwrap();
        let mut received = Vec::new();
        while received.len() < 14 {
            let chunk = recv(&conn, 64).unwrap();
            if chunk.is_empty() {
                break;
            }
            received.extend_from_slice(&chunk);
        }
        assert_eq!(received, b"Hello, Socket!");
        send(&conn, b"ack").unwrap();

        let (sent, reply) = client.join().unwrap();
        assert_eq!(sent, 14);
        assert_eq!(reply, b"ack");

        close(&mut conn);
        close(&mut server);
    }

    #[test]
    fn test_accept_times_out() {
        let (mut server, _) = listener();
        set_timeout(&server, 50).unwrap();
        let err = accept(&server).unwrap_err();
        assert!(err.is_timeout(), "unexpected error: {:?}", err);
        close(&mut server);
    }

    #[test]
    fn test_connect_refused() {
        // Bind then close to get a port nobody listens on.
        let mut vacant = stream();
        bind(&vacant, &Ipv4Endpoint::localhost(0)).unwrap();
        let addr = local_endpoint(&vacant).unwrap();
        close(&mut vacant);

        let mut desc = stream();
        assert_eq!(connect(&desc, &addr), Err(NetError::Os(libc::ECONNREFUSED)));
        close(&mut desc);
    }

    #[test]
    fn test_listen_on_datagram_forwards_native_error() {
        let mut desc = create(SocketDomain::Inet, SocketType::Datagram).unwrap();
        assert_eq!(listen(&desc, 1), Err(NetError::Os(libc::EOPNOTSUPP)));
        close(&mut desc);
    }
}
