//! Poll Module
//!
//! Zero-timeout readiness check. This is the only non-blocking primitive; the
//! embedding runtime calls it in a loop to multiplex many sockets cooperatively.

use entities_network::{NetError, PollEvents, SocketDescriptor};
use log::trace;

/// Translate a runtime interest mask into native `poll` event flags
pub fn to_native(events: PollEvents) -> libc::c_short {
    let mut native = 0;
    if events.contains(PollEvents::READABLE) {
        native |= libc::POLLIN;
    }
    if events.contains(PollEvents::WRITABLE) {
        native |= libc::POLLOUT;
    }
    native
}

/// Translate native `poll` result flags into the runtime mask
///
/// Error and hang-up bits pass through regardless of the requested interest.
pub fn from_native(revents: libc::c_short, requested: PollEvents) -> PollEvents {
    let mut ready = PollEvents::empty();
    if revents & libc::POLLIN != 0 {
        ready |= PollEvents::READABLE;
    }
    if revents & libc::POLLOUT != 0 {
        ready |= PollEvents::WRITABLE;
    }
    if revents & libc::POLLERR != 0 {
        ready |= PollEvents::ERROR;
    }
    if revents & libc::POLLHUP != 0 {
        ready |= PollEvents::HANGUP;
    }
    ready & (requested | PollEvents::ALWAYS)
}

/// Check descriptor readiness without blocking
///
/// # Arguments
///
/// * `desc` - Open descriptor
/// * `requested` - Readable/writable interest
///
/// # Returns
///
/// * `Ok(PollEvents)` - Ready subset of `requested`, plus error/hang-up
/// * `Err(NetError::BadDescriptor)` - Descriptor is closed or not a valid fd
pub fn poll(desc: &SocketDescriptor, requested: PollEvents) -> Result<PollEvents, NetError> {
    let fd = desc.raw()?;
    let mut poll_fd = libc::pollfd {
        fd,
        events: to_native(requested),
        revents: 0,
    };
    let rc = unsafe { libc::poll(&mut poll_fd, 1, 0) };
    if rc < 0 {
        return Err(NetError::last_os_error());
    }
    if poll_fd.revents & libc::POLLNVAL != 0 {
        return Err(NetError::BadDescriptor);
    }
    let ready = from_native(poll_fd.revents, requested);
    trace!("fd={} poll {:?} -> {:?}", fd, requested, ready);
    Ok(ready)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_native() {
        assert_eq!(to_native(PollEvents::READABLE), libc::POLLIN);
        assert_eq!(to_native(PollEvents::WRITABLE), libc::POLLOUT);
        assert_eq!(
            to_native(PollEvents::READABLE | PollEvents::WRITABLE),
            libc::POLLIN | libc::POLLOUT
        );
        assert_eq!(to_native(PollEvents::empty()), 0);
    }

    #[test]
    fn test_from_native_masks_unrequested() {
        let ready = from_native(libc::POLLIN | libc::POLLOUT, PollEvents::WRITABLE);
        assert_eq!(ready, PollEvents::WRITABLE);
    }

    #[test]
    fn test_from_native_always_reports_error_and_hangup() {
        let ready = from_native(libc::POLLERR | libc::POLLHUP, PollEvents::READABLE);
        assert_eq!(ready, PollEvents::ERROR | PollEvents::HANGUP);
    }

    #[test]
    fn test_poll_closed_descriptor() {
        use entities_network::{SocketDomain, SocketType};
        let desc = SocketDescriptor::closed(SocketDomain::Inet, SocketType::Stream);
        assert_eq!(poll(&desc, PollEvents::READABLE), Err(NetError::BadDescriptor));
    }
}
