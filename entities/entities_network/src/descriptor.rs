//! Descriptor Module
//!
//! Provides the socket descriptor record held by the runtime's socket object,
//! and the socket domain/type enums in the runtime's numbering.

use crate::error::NetError;

/// Runtime value of `AF_INET`
pub const RUNTIME_AF_INET: i32 = 2;
/// Runtime value of `SOCK_STREAM`
pub const RUNTIME_SOCK_STREAM: i32 = 1;
/// Runtime value of `SOCK_DGRAM`
pub const RUNTIME_SOCK_DGRAM: i32 = 2;
/// Runtime value of `SOCK_RAW`
pub const RUNTIME_SOCK_RAW: i32 = 3;

/// Socket address family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketDomain {
    /// IPv4
    Inet,
    /// Any other family, passed to the native stack untranslated
    Other(i32),
}

impl SocketDomain {
    /// Translate from the runtime numbering
    pub fn from_runtime(value: i32) -> Self {
        match value {
            RUNTIME_AF_INET => SocketDomain::Inet,
            other => SocketDomain::Other(other),
        }
    }

    /// Translate to the runtime numbering
    pub fn to_runtime(self) -> i32 {
        match self {
            SocketDomain::Inet => RUNTIME_AF_INET,
            SocketDomain::Other(value) => value,
        }
    }
}

/// Socket type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketType {
    /// Connection-oriented byte stream (TCP)
    Stream,
    /// Connectionless datagrams (UDP)
    Datagram,
    /// Raw socket
    Raw,
}

impl SocketType {
    /// Translate from the runtime numbering
    ///
    /// # Returns
    ///
    /// * `Ok(SocketType)` - Known socket type
    /// * `Err(NetError::InvalidArgument)` - Unknown value
    pub fn from_runtime(value: i32) -> Result<Self, NetError> {
        match value {
            RUNTIME_SOCK_STREAM => Ok(SocketType::Stream),
            RUNTIME_SOCK_DGRAM => Ok(SocketType::Datagram),
            RUNTIME_SOCK_RAW => Ok(SocketType::Raw),
            other => Err(NetError::InvalidArgument(format!("unknown socket type {}", other))),
        }
    }

    /// Translate to the runtime numbering
    pub fn to_runtime(self) -> i32 {
        match self {
            SocketType::Stream => RUNTIME_SOCK_STREAM,
            SocketType::Datagram => RUNTIME_SOCK_DGRAM,
            SocketType::Raw => RUNTIME_SOCK_RAW,
        }
    }

    /// Check whether the transport is UDP
    pub fn is_datagram(self) -> bool {
        matches!(self, SocketType::Datagram)
    }
}

/// Socket descriptor
///
/// Owned by the runtime's socket object. The native descriptor is `-1` while
/// unopened and after close; domain and type are fixed for the descriptor's
/// lifetime. Not `Clone`: once closed, no other handle to the old native
/// descriptor survives.
///
/// ```compile_fail
/// use entities_network::{SocketDescriptor, SocketDomain, SocketType};
///
/// let owner = SocketDescriptor::open(3, SocketDomain::Inet, SocketType::Stream);
/// let stale = owner;
/// assert!(owner.is_open());
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct SocketDescriptor {
    fd: i32,
    /// Address family requested at creation
    pub domain: SocketDomain,
    /// Socket type requested at creation
    pub socket_type: SocketType,
}

impl SocketDescriptor {
    /// Closed/unopened sentinel
    pub const CLOSED: i32 = -1;

    /// Create an unopened descriptor
    pub fn closed(domain: SocketDomain, socket_type: SocketType) -> Self {
        Self {
            fd: Self::CLOSED,
            domain,
            socket_type,
        }
    }

    /// Create a descriptor for an already open native socket
    pub fn open(fd: i32, domain: SocketDomain, socket_type: SocketType) -> Self {
        Self {
            fd,
            domain,
            socket_type,
        }
    }

    /// Native descriptor, [`SocketDescriptor::CLOSED`] when not open
    pub fn fd(&self) -> i32 {
        self.fd
    }

    /// Check whether the descriptor refers to an open native socket
    pub fn is_open(&self) -> bool {
        self.fd >= 0
    }

    /// Get the native descriptor, failing on a closed one
    ///
    /// # Returns
    ///
    /// * `Ok(fd)` - Open descriptor
    /// * `Err(NetError::BadDescriptor)` - Descriptor is `-1`
    pub fn raw(&self) -> Result<i32, NetError> {
        if self.is_open() {
            Ok(self.fd)
        } else {
            Err(NetError::BadDescriptor)
        }
    }

    /// Reset to the closed sentinel, returning the previous value
    pub fn take(&mut self) -> i32 {
        std::mem::replace(&mut self.fd, Self::CLOSED)
    }
}
