//! Adapters Layer: Socket Protocol Adapter
//!
//! Translates the embedding runtime's generic socket operations into calls on the
//! native BSD socket API. Every operation is a direct, synchronous translation to
//! one native call; native failures come back as [`NetError::Os`] with the errno
//! unchanged.
//!
//! ## Overview
//!
//! The `adapters_socket` crate provides:
//! - **Provider trait**: [`NetworkProvider`], the full operation table a generic
//!   socket object delegates to
//! - **Native provider**: [`NativeSocketProvider`], the implementation on top of
//!   `socket2`, `libc` and `nix`
//! - **Stream operations**: listen, accept, send, recv
//! - **Datagram operations**: send-to, recv-from
//! - **Readiness**: a zero-timeout poll translating the runtime's event bits
//! - **Resolution**: single-shot IPv4 hostname lookup
//!
//! Descriptors are plain integers owned by the caller. This crate never keeps a
//! socket object alive between calls; each call borrows the descriptor for its
//! own duration.
//!
//! ## Modules
//!
//! - **[`provider`](provider/index.html)**: `NetworkProvider` and `NativeSocketProvider`
//! - **[`socket`](socket/index.html)**: create, close, bind, connect, options, timeouts
//! - **[`sockaddr`](sockaddr/index.html)**: IPv4 endpoint marshaling
//! - **[`tcp`](tcp/index.html)**: stream operations
//! - **[`udp`](udp/index.html)**: datagram operations
//! - **[`poll`](poll/index.html)**: readiness polling
//! - **[`resolve`](resolve/index.html)**: hostname resolution
//!
//! ## See Also
//!
//! - [`entities_network`](../entities_network/index.html): descriptors, endpoints, errors
//! - [`api_facades`](../api_facades/index.html): provider registry and socket object

pub mod poll;
pub mod provider;
pub mod resolve;
pub mod sockaddr;
pub mod socket;
pub mod tcp;
pub mod udp;

pub use entities_network::NetError;
pub use provider::{NativeSocketProvider, NetworkProvider, OptionValue};
