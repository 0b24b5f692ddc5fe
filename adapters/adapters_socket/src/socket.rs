//! Socket Module
//!
//! Provides descriptor-level operations shared by stream and datagram sockets:
//! creation, close, bind, connect, socket options and the receive timeout.
//!
//! Descriptors are borrowed for the duration of a single call through
//! [`with_sockref`]; ownership stays with the caller's [`SocketDescriptor`].

use std::os::fd::{BorrowedFd, IntoRawFd, RawFd};
use std::time::Duration;
use std::{io, mem};

use entities_network::{Ipv4Endpoint, NetError, SocketDescriptor, SocketDomain, SocketType};
use log::trace;
use socket2::{Domain, Protocol, SockRef, Socket, Type};

use crate::sockaddr::{from_sockaddr, to_sockaddr};

/// Value passed to the native option-setting call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Marshaled as a native `int`
    Int(i32),
    /// Passed through as-is
    Bytes(Vec<u8>),
}

/// Run `f` against a borrowed view of an open descriptor
///
/// # Returns
///
/// * `Ok(T)` - Result of `f`
/// * `Err(NetError::BadDescriptor)` - Descriptor is closed
/// * `Err(NetError::Os)` - `f` failed in the native stack
pub(crate) fn with_sockref<T, F>(desc: &SocketDescriptor, f: F) -> Result<T, NetError>
where
    F: FnOnce(SockRef<'_>) -> io::Result<T>,
{
    let fd = desc.raw()?;
    // The caller keeps the descriptor open for the duration of the call.
    let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
    f(SockRef::from(&borrowed)).map_err(NetError::from)
}

fn native_domain(domain: SocketDomain) -> Domain {
    match domain {
        SocketDomain::Inet => Domain::IPV4,
        SocketDomain::Other(value) => Domain::from(value),
    }
}

fn native_type(socket_type: SocketType) -> Type {
    match socket_type {
        SocketType::Stream => Type::STREAM,
        SocketType::Datagram => Type::DGRAM,
        SocketType::Raw => Type::RAW,
    }
}

/// Transport protocol for a socket type: UDP for datagrams, TCP otherwise
pub fn transport_protocol(socket_type: SocketType) -> Protocol {
    if socket_type.is_datagram() {
        Protocol::UDP
    } else {
        Protocol::TCP
    }
}

/// Open a native socket
///
/// # Arguments
///
/// * `domain` - Address family
/// * `socket_type` - Socket type; selects UDP for datagrams, TCP otherwise
///
/// # Returns
///
/// * `Ok(SocketDescriptor)` - Open, blocking descriptor
/// * `Err(NetError::Os)` - Native error
pub fn create(domain: SocketDomain, socket_type: SocketType) -> Result<SocketDescriptor, NetError> {
    let socket = Socket::new(
        native_domain(domain),
        native_type(socket_type),
        Some(transport_protocol(socket_type)),
    )?;
    let fd: RawFd = socket.into_raw_fd();
    trace!("opened socket fd={} domain={:?} type={:?}", fd, domain, socket_type);
    Ok(SocketDescriptor::open(fd, domain, socket_type))
}

/// Close a descriptor if open, then reset it to `-1`
///
/// Closing an already closed descriptor is a no-op.
pub fn close(desc: &mut SocketDescriptor) {
    let fd = desc.take();
    if fd >= 0 {
        // The descriptor is gone either way; there is no failure path to report.
        let _ = nix::unistd::close(fd);
        trace!("closed socket fd={}", fd);
    }
}

/// Bind a descriptor to a local IPv4 endpoint
pub fn bind(desc: &SocketDescriptor, endpoint: &Ipv4Endpoint) -> Result<(), NetError> {
    let addr = to_sockaddr(endpoint);
    with_sockref(desc, |sock| sock.bind(&addr))
}

/// Connect a descriptor to a remote IPv4 endpoint
pub fn connect(desc: &SocketDescriptor, endpoint: &Ipv4Endpoint) -> Result<(), NetError> {
    let addr = to_sockaddr(endpoint);
    with_sockref(desc, |sock| sock.connect(&addr))
}

/// Read the locally bound endpoint (`getsockname`)
pub fn local_endpoint(desc: &SocketDescriptor) -> Result<Ipv4Endpoint, NetError> {
    let addr = with_sockref(desc, |sock| sock.local_addr())?;
    from_sockaddr(&addr)
}

/// Set a socket option
///
/// # Arguments
///
/// * `desc` - Open descriptor
/// * `level` - Native option level, e.g. `SOL_SOCKET`
/// * `option` - Native option name
/// * `value` - Integer or raw byte value
pub fn set_option(
    desc: &SocketDescriptor,
    level: i32,
    option: i32,
    value: &OptionValue,
) -> Result<(), NetError> {
    let fd = desc.raw()?;
    let rc = match value {
        OptionValue::Int(val) => {
            let val = *val as libc::c_int;
            unsafe {
                libc::setsockopt(
                    fd,
                    level,
                    option,
                    &val as *const _ as *const libc::c_void,
                    mem::size_of::<libc::c_int>() as libc::socklen_t,
                )
            }
        }
        OptionValue::Bytes(bytes) => unsafe {
            libc::setsockopt(
                fd,
                level,
                option,
                bytes.as_ptr() as *const libc::c_void,
                bytes.len() as libc::socklen_t,
            )
        },
    };
    if rc == 0 {
        Ok(())
    } else {
        Err(NetError::last_os_error())
    }
}

/// Convert milliseconds into the native receive-timeout representation
pub fn timeout_to_timeval(millis: u32) -> libc::timeval {
    libc::timeval {
        tv_sec: (millis / 1000) as libc::time_t,
        tv_usec: ((millis % 1000) * 1000) as libc::suseconds_t,
    }
}

/// Apply a receive timeout to a descriptor
///
/// Governs how long accept, recv and recv-from block before failing with
/// `EAGAIN`. Zero clears the timeout.
pub fn set_timeout(desc: &SocketDescriptor, millis: u32) -> Result<(), NetError> {
    let tv = timeout_to_timeval(millis);
    let timeout = if millis == 0 {
        None
    } else {
        Some(Duration::new(tv.tv_sec as u64, tv.tv_usec as u32 * 1000))
    };
    with_sockref(desc, |sock| sock.set_read_timeout(timeout))?;
    trace!("fd={} receive timeout {}ms", desc.fd(), millis);
    Ok(())
}
