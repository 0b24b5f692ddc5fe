//! Error Module
//!
//! Provides the error taxonomy shared by the interface handle and the socket
//! protocol adapter. Every variant maps to a stable OS-style numeric code through
//! [`NetError::errno`], which is what the embedding runtime raises.

use std::fmt;
use std::io;

/// Coarse classification of a [`NetError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The network interface is absent
    Device,
    /// Malformed key, wrong-sized buffer or conflicting call forms
    Argument,
    /// Hostname lookup failed
    Resolution,
    /// Failure reported by a native socket call, timeouts included
    Io,
}

/// Network error
///
/// Native failures keep the native errno unchanged in [`NetError::Os`]; the other
/// variants are raised by this layer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetError {
    /// No network interface exists (ENODEV)
    NoSuchDevice,
    /// Invalid argument (EINVAL)
    InvalidArgument(String),
    /// Unknown configuration parameter (EINVAL)
    UnknownParameter(String),
    /// Query and assignment forms supplied in the same call (EINVAL)
    ConflictingArguments,
    /// Hostname could not be resolved (EAI_NONAME)
    HostNotFound,
    /// Operation on a closed descriptor (EBADF)
    BadDescriptor,
    /// Native error code, forwarded verbatim
    Os(i32),
}

impl NetError {
    /// Get the numeric error code surfaced to the runtime
    ///
    /// # Returns
    ///
    /// The OS-style code for this error. Native errors return their own errno.
    /// Every code is positive except [`NetError::HostNotFound`], which carries
    /// the resolver's `EAI_NONAME` (negative on glibc and musl).
    pub fn errno(&self) -> i32 {
        match self {
            NetError::NoSuchDevice => libc::ENODEV,
            NetError::InvalidArgument(_) => libc::EINVAL,
            NetError::UnknownParameter(_) => libc::EINVAL,
            NetError::ConflictingArguments => libc::EINVAL,
            NetError::HostNotFound => libc::EAI_NONAME,
            NetError::BadDescriptor => libc::EBADF,
            NetError::Os(code) => *code,
        }
    }

    /// Get the taxonomy category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            NetError::NoSuchDevice => ErrorCategory::Device,
            NetError::InvalidArgument(_)
            | NetError::UnknownParameter(_)
            | NetError::ConflictingArguments => ErrorCategory::Argument,
            NetError::HostNotFound => ErrorCategory::Resolution,
            NetError::BadDescriptor | NetError::Os(_) => ErrorCategory::Io,
        }
    }

    /// Check whether a blocking call gave up waiting
    ///
    /// Receive timeouts come back from the native stack as "would block".
    pub fn is_timeout(&self) -> bool {
        match self {
            NetError::Os(code) => {
                *code == libc::EAGAIN || *code == libc::EWOULDBLOCK || *code == libc::ETIMEDOUT
            }
            _ => false,
        }
    }

    /// Build an error from the calling thread's last native errno
    pub fn last_os_error() -> Self {
        NetError::from(io::Error::last_os_error())
    }
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::NoSuchDevice => write!(f, "no such network device"),
            NetError::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
            NetError::UnknownParameter(name) => write!(f, "unknown config param: {}", name),
            NetError::ConflictingArguments => {
                write!(f, "can't query and set config params in the same call")
            }
            NetError::HostNotFound => write!(f, "host not found"),
            NetError::BadDescriptor => write!(f, "socket is closed"),
            NetError::Os(code) => write!(f, "{}", io::Error::from_raw_os_error(*code)),
        }
    }
}

impl std::error::Error for NetError {}

impl From<io::Error> for NetError {
    fn from(err: io::Error) -> Self {
        use std::io::ErrorKind;
        if let Some(code) = err.raw_os_error() {
            return NetError::Os(code);
        }
        match err.kind() {
            ErrorKind::WouldBlock => NetError::Os(libc::EWOULDBLOCK),
            ErrorKind::TimedOut => NetError::Os(libc::ETIMEDOUT),
            ErrorKind::InvalidInput => NetError::InvalidArgument(err.to_string()),
            ErrorKind::NotConnected => NetError::Os(libc::ENOTCONN),
            _ => NetError::Os(libc::EIO),
        }
    }
}
