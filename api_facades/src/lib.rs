//! API Facades Layer
//!
//! Provides the surface the embedding runtime binds against: the network
//! service holding the one interface handle, the provider registry that
//! generic sockets route through, and the socket object itself.
//!
//! ## Overview
//!
//! - **[`NetworkService`]**: constructed once at startup, then passed to
//!   whatever needs the interface or the default provider
//! - **[`ProviderRegistry`]**: the default [`NetworkProvider`], consulted when a
//!   socket is created
//! - **[`SocketObject`]**: owns a descriptor, delegates every operation, closes
//!   on drop
//! - **[`NetConfig`]**: settings, loadable from `NETSHIM_*` environment variables
//! - **[`ConfigCall`]**: positional/keyword assembly for `config(...)`
//!
//! All facades call into the inner layers; nothing here talks to the native
//! stack directly.
//!
//! [`NetworkProvider`]: adapters_socket::NetworkProvider

pub mod config;
pub mod config_call;
pub mod registry;
pub mod service;
pub mod socket_object;

pub use config::NetConfig;
pub use config_call::ConfigCall;
pub use registry::ProviderRegistry;
pub use service::NetworkService;
pub use socket_object::SocketObject;
