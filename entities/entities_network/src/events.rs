//! Events Module
//!
//! Readiness bitmask exchanged with the runtime's poll/ioctl hook.

use bitflags::bitflags;

bitflags! {
    /// Poll readiness bits in the runtime's stream numbering
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PollEvents: u32 {
        /// Data available to read
        const READABLE = 0x0001;
        /// Send buffer has room
        const WRITABLE = 0x0004;
        /// Error pending on the socket
        const ERROR = 0x0008;
        /// Peer hung up
        const HANGUP = 0x0010;
    }
}

impl PollEvents {
    /// Bits reported whether requested or not
    pub const ALWAYS: PollEvents = PollEvents::ERROR.union(PollEvents::HANGUP);

    /// Interest mask built from the runtime's raw integer, unknown bits dropped
    pub fn from_runtime(mask: u32) -> Self {
        PollEvents::from_bits_truncate(mask)
    }
}
