//! Entities Layer: Network
//!
//! Provides the plain data types shared by the network interface handle and the
//! socket protocol adapter. Nothing in this crate performs I/O.
//!
//! ## Overview
//!
//! The `entities_network` crate is the innermost layer of the network shim. It
//! models the values that cross the boundary between the embedding runtime and
//! the native networking stack:
//! - **Addresses**: packed big-endian IPv4 addresses with a host-order port, and
//!   6-byte link-layer (MAC) addresses
//! - **Interface state**: the 1..3 link status ordinal and the IPv4
//!   configuration snapshot returned by `ifconfig`
//! - **Descriptors**: the integer socket handle (`-1` = closed) together with the
//!   domain and type requested at creation
//! - **Poll events**: the runtime's readable/writable bitmask
//! - **Errors**: the error taxonomy and its stable numeric codes
//!
//! ## Modules
//!
//! - **[`address`](address/index.html)**: `Ipv4Endpoint` and `MacAddress`
//! - **[`interface`](interface/index.html)**: `LinkStatus` and `Ipv4Config`
//! - **[`descriptor`](descriptor/index.html)**: `SocketDescriptor`, `SocketDomain`, `SocketType`
//! - **[`events`](events/index.html)**: `PollEvents`
//! - **[`error`](error/index.html)**: `NetError` and `ErrorCategory`
//!
//! ## See Also
//!
//! - [`adapters_socket`](../adapters_socket/index.html): socket protocol adapter
//! - [`adapters_network_interface`](../adapters_network_interface/index.html): interface handle

pub mod address;
pub mod descriptor;
pub mod error;
pub mod events;
pub mod interface;

pub use address::{Ipv4Endpoint, MacAddress};
pub use descriptor::{SocketDescriptor, SocketDomain, SocketType};
pub use error::{ErrorCategory, NetError};
pub use events::PollEvents;
pub use interface::{Ipv4Config, LinkStatus};
