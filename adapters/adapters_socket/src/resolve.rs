//! Resolve Module
//!
//! Single-shot forward lookup through the native resolver, restricted to IPv4
//! stream results. No caching, no retries.

use std::ffi::CString;
use std::{mem, ptr};

use entities_network::NetError;
use log::trace;

/// Resolve a hostname to its first IPv4 address
///
/// Blocks until the native resolver answers or gives up.
///
/// # Returns
///
/// * `Ok([u8; 4])` - First resolved address, network byte order
/// * `Err(NetError::HostNotFound)` - Any resolution failure
pub fn resolve_hostname(name: &str) -> Result<[u8; 4], NetError> {
    let host = CString::new(name).map_err(|_| NetError::HostNotFound)?;

    let mut hints: libc::addrinfo = unsafe { mem::zeroed() };
    hints.ai_family = libc::AF_INET;
    hints.ai_socktype = libc::SOCK_STREAM;

    let mut res: *mut libc::addrinfo = ptr::null_mut();
    let rc = unsafe { libc::getaddrinfo(host.as_ptr(), ptr::null(), &hints, &mut res) };
    if rc != 0 || res.is_null() {
        return Err(NetError::HostNotFound);
    }

    let mut found = None;
    let mut cur = res;
    while !cur.is_null() {
        let ai = unsafe { &*cur };
        if ai.ai_family == libc::AF_INET && !ai.ai_addr.is_null() {
            let sin = unsafe { &*(ai.ai_addr as *const libc::sockaddr_in) };
            found = Some(sin.sin_addr.s_addr.to_ne_bytes());
            break;
        }
        cur = ai.ai_next;
    }
    unsafe { libc::freeaddrinfo(res) };

    let addr = found.ok_or(NetError::HostNotFound)?;
    trace!("resolved {:?} -> {:?}", name, addr);
    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_numeric() {
        assert_eq!(resolve_hostname("127.0.0.1").unwrap(), [127, 0, 0, 1]);
        assert_eq!(resolve_hostname("10.20.30.40").unwrap(), [10, 20, 30, 40]);
    }

    #[test]
    fn test_resolve_localhost() {
        assert_eq!(resolve_hostname("localhost").unwrap()[0], 127);
    }

    #[test]
    fn test_resolve_invalid_name() {
        assert_eq!(resolve_hostname("example.invalid"), Err(NetError::HostNotFound));
    }

    #[test]
    fn test_resolve_interior_nul() {
        assert_eq!(resolve_hostname("local\0host"), Err(NetError::HostNotFound));
    }
}
