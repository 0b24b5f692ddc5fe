//! Address Module
//!
//! Provides the two address shapes exchanged with the embedding runtime: a packed
//! IPv4 address with a port, and a 6-byte link-layer address.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

use crate::error::NetError;

/// IPv4 endpoint
///
/// The address is kept as 4 bytes in network (big-endian) order, exactly as the
/// runtime packs it; the port is in host order. Conversion to the native
/// `sockaddr_in` layout happens in the socket adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Endpoint {
    /// Packed address, most significant octet first
    pub addr: [u8; 4],
    /// Port in host byte order
    pub port: u16,
}

impl Ipv4Endpoint {
    /// Create an endpoint from a packed address and a port
    pub const fn new(addr: [u8; 4], port: u16) -> Self {
        Self { addr, port }
    }

    /// Endpoint on the wildcard address `0.0.0.0`
    pub const fn any(port: u16) -> Self {
        Self::new([0, 0, 0, 0], port)
    }

    /// Endpoint on the loopback address `127.0.0.1`
    pub const fn localhost(port: u16) -> Self {
        Self::new([127, 0, 0, 1], port)
    }

    /// Create an endpoint from a runtime byte buffer
    ///
    /// # Arguments
    ///
    /// * `packed` - Address bytes, must be exactly 4 long
    /// * `port` - Port in host byte order
    ///
    /// # Returns
    ///
    /// * `Ok(Ipv4Endpoint)` - Parsed endpoint
    /// * `Err(NetError::InvalidArgument)` - Buffer is not 4 bytes
    pub fn from_packed(packed: &[u8], port: u16) -> Result<Self, NetError> {
        let addr: [u8; 4] = packed.try_into().map_err(|_| {
            NetError::InvalidArgument(format!("IPv4 address must be 4 bytes, got {}", packed.len()))
        })?;
        Ok(Self::new(addr, port))
    }

    /// Get the address as a standard library type
    pub fn ip(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.addr)
    }

    /// Get the endpoint as a standard library socket address
    pub fn to_socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.ip(), self.port)
    }
}

impl From<SocketAddrV4> for Ipv4Endpoint {
    fn from(addr: SocketAddrV4) -> Self {
        Self::new(addr.ip().octets(), addr.port())
    }
}

impl fmt::Display for Ipv4Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip(), self.port)
    }
}

/// Link-layer (Ethernet) address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Length of a link-layer address in bytes
    pub const LEN: usize = 6;

    /// Get the raw address bytes
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Get the address bytes as a slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for MacAddress {
    type Error = NetError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let octets: [u8; 6] = bytes.try_into().map_err(|_| {
            NetError::InvalidArgument(format!("MAC address must be 6 bytes, got {}", bytes.len()))
        })?;
        Ok(MacAddress(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_packed() {
        let ep = Ipv4Endpoint::from_packed(&[192, 168, 1, 20], 5000).unwrap();
        assert_eq!(ep.addr, [192, 168, 1, 20]);
        assert_eq!(ep.port, 5000);
        assert_eq!(ep.ip(), Ipv4Addr::new(192, 168, 1, 20));
    }

    #[test]
    fn test_endpoint_from_packed_wrong_length() {
        let result = Ipv4Endpoint::from_packed(&[127, 0, 0], 80);
        assert!(matches!(result, Err(NetError::InvalidArgument(_))));
        let result = Ipv4Endpoint::from_packed(&[0; 16], 80);
        assert!(matches!(result, Err(NetError::InvalidArgument(_))));
    }

    #[test]
    fn test_endpoint_std_conversion() {
        let std_addr = SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 7), 65535);
        let ep = Ipv4Endpoint::from(std_addr);
        assert_eq!(ep.addr, [10, 0, 0, 7]);
        assert_eq!(ep.to_socket_addr(), std_addr);
    }

    #[test]
    fn test_endpoint_display() {
        assert_eq!(Ipv4Endpoint::any(0).to_string(), "0.0.0.0:0");
        assert_eq!(Ipv4Endpoint::localhost(8080).to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_mac_from_slice() {
        let mac = MacAddress::try_from(&[0x02, 0x00, 0x5e, 0x10, 0x20, 0x30][..]).unwrap();
        assert_eq!(mac.octets(), [0x02, 0x00, 0x5e, 0x10, 0x20, 0x30]);
        assert_eq!(mac.as_bytes().len(), MacAddress::LEN);
    }

    #[test]
    fn test_mac_wrong_length() {
        for len in [0usize, 1, 5, 7, 16] {
            let bytes = vec![0xaa; len];
            let result = MacAddress::try_from(bytes.as_slice());
            assert!(matches!(result, Err(NetError::InvalidArgument(_))), "len {}", len);
        }
    }

    #[test]
    fn test_mac_display() {
        let mac = MacAddress([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
        assert_eq!(mac.to_string(), "de:ad:be:ef:00:01");
    }
}
