//! Adapters Layer: Network Interface Handle
//!
//! Exposes the device's single network interface to the embedding runtime:
//! activation, link status, IPv4 configuration readout and link-layer address
//! get/set.
//!
//! ## Overview
//!
//! The `adapters_network_interface` crate provides:
//! - **Interface handle**: [`InterfaceHandle`], the runtime-facing object with
//!   `activate`, `status`, `ifconfig` and `config`
//! - **Native boundary**: [`NativeInterface`], the trait the handle reads all
//!   state through
//! - **Linux backend**: [`LinuxInterface`], interface ioctls on a control socket
//! - **Discovery**: picking the interface once at startup
//! - **Route table**: default gateway lookup
//!
//! ## Modules
//!
//! - **[`handle`](handle/index.html)**: `InterfaceHandle`, `ConfigRequest`, `ConfigValue`
//! - **[`native`](native/index.html)**: `NativeInterface`
//! - **[`linux`](linux/index.html)**: `LinuxInterface`
//! - **[`discovery`](discovery/index.html)**: `DiscoveryConfig` and interface selection
//! - **[`route`](route/index.html)**: `/proc/net/route` parsing
//!
//! ## See Also
//!
//! - [`entities_network`](../entities_network/index.html): link status, IPv4 config, MAC address
//! - [`api_facades`](../api_facades/index.html): network service owning the handle

pub mod discovery;
pub mod handle;
pub mod linux;
pub mod native;
pub mod route;

pub use discovery::DiscoveryConfig;
pub use handle::{ConfigRequest, ConfigValue, IfconfigTuple, InterfaceHandle};
pub use linux::LinuxInterface;
pub use native::NativeInterface;
