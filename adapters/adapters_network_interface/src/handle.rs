//! Interface Handle Module
//!
//! [`InterfaceHandle`] is the runtime-facing object for the device's single
//! network interface. It stores nothing but the native interface; every state
//! it reports is read from the native stack on demand.
//!
//! Administrative state has one user-driven transition path (down <-> up).
//! Link state is driven by the native stack and only observed here.

use std::fmt;

use entities_network::{LinkStatus, MacAddress, NetError};
use log::debug;

use crate::discovery::{self, DiscoveryConfig};
use crate::native::NativeInterface;

/// Key of the link-layer address parameter
pub const MAC_KEY: &str = "mac";

/// Value exchanged through `config(...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Integer
    Int(i64),
    /// Text
    Str(String),
    /// Boolean
    Bool(bool),
}

/// A `config(...)` call in one of its two forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigRequest {
    /// `config(key)`
    Query(String),
    /// `config(key=value, ...)`
    Assign(Vec<(String, ConfigValue)>),
}

/// Tuple returned by the query form of `ifconfig()`
pub type IfconfigTuple = (String, String, String, String);

/// Handle to the device's network interface
pub struct InterfaceHandle {
    native: Box<dyn NativeInterface>,
}

impl InterfaceHandle {
    /// Wrap a native interface
    pub fn new(native: Box<dyn NativeInterface>) -> Self {
        Self { native }
    }

    /// Discover the native interface and wrap it
    ///
    /// # Returns
    ///
    /// * `Ok(InterfaceHandle)` - Handle bound to the discovered interface
    /// * `Err(NetError::NoSuchDevice)` - No interface exists
    pub fn discover(config: &DiscoveryConfig) -> Result<Self, NetError> {
        let native = discovery::discover(config)?;
        Ok(Self::new(Box::new(native)))
    }

    /// Name of the underlying interface
    pub fn name(&self) -> String {
        self.native.name()
    }

    /// Administrative state, the no-argument form of `activate`
    pub fn active(&self) -> Result<bool, NetError> {
        self.native.is_up()
    }

    /// Bring the interface up or down
    ///
    /// Requesting the current state issues no native call.
    pub fn set_active(&self, up: bool) -> Result<(), NetError> {
        if self.native.is_up()? == up {
            return Ok(());
        }
        self.native.set_up(up)?;
        let state = if up { "activated" } else { "deactivated" };
        debug!("interface {} {}", self.native.name(), state);
        Ok(())
    }

    /// `activate([bool])`
    ///
    /// # Returns
    ///
    /// * `Ok(Some(bool))` - Query form: current administrative state
    /// * `Ok(None)` - Assignment form applied
    pub fn activate(&self, up: Option<bool>) -> Result<Option<bool>, NetError> {
        match up {
            None => self.active().map(Some),
            Some(up) => self.set_active(up).map(|_| None),
        }
    }

    /// Link status ordinal, `1` whenever the interface is down
    pub fn status(&self) -> Result<LinkStatus, NetError> {
        let up = self.native.is_up()?;
        let running = up && self.native.is_running()?;
        Ok(LinkStatus::from_flags(up, running))
    }

    /// Query form of `ifconfig()`
    ///
    /// # Returns
    ///
    /// * `Ok(Some((addr, netmask, gw, broadcast)))` - Dotted-decimal text; the
    ///   broadcast is always `0.0.0.0`
    /// * `Ok(None)` - No IPv4 address assigned yet
    pub fn ifconfig(&self) -> Result<Option<IfconfigTuple>, NetError> {
        Ok(self.native.ipv4_config()?.map(|cfg| cfg.to_dotted()))
    }

    /// Setter form of `ifconfig(...)`; accepted and ignored
    ///
    /// Static and DHCP configuration belong to the native stack.
    pub fn set_ifconfig(&self, _settings: &IfconfigTuple) -> Result<(), NetError> {
        debug!("ifconfig setter ignored for {}", self.native.name());
        Ok(())
    }

    /// Current link-layer address
    pub fn mac(&self) -> Result<MacAddress, NetError> {
        self.native.link_address()
    }

    /// Write a new link-layer address
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Address written
    /// * `Err(NetError::InvalidArgument)` - `bytes` is not exactly 6 long;
    ///   nothing is written
    /// * `Err(NetError::Os)` - Native stack refused the write
    pub fn set_mac(&self, bytes: &[u8]) -> Result<(), NetError> {
        let mac = MacAddress::try_from(bytes)?;
        self.write_mac(&mac)
    }

    fn write_mac(&self, mac: &MacAddress) -> Result<(), NetError> {
        self.native.set_link_address(mac)?;
        debug!("interface {} link address set to {}", self.native.name(), mac);
        Ok(())
    }

    /// Generic `config(...)` accessor
    ///
    /// Assignments are validated as a whole before any is applied, so a
    /// rejected call leaves the interface unchanged.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(value))` - Query form
    /// * `Ok(None)` - Assignment form applied
    /// * `Err(NetError::UnknownParameter)` - Key other than `mac`
    /// * `Err(NetError::InvalidArgument)` - Bad value for `mac`
    pub fn config(&self, request: ConfigRequest) -> Result<Option<ConfigValue>, NetError> {
        match request {
            ConfigRequest::Query(key) => {
                if key != MAC_KEY {
                    return Err(NetError::UnknownParameter(key));
                }
                Ok(Some(ConfigValue::Bytes(self.mac()?.as_bytes().to_vec())))
            }
            ConfigRequest::Assign(assignments) => {
                let mut macs = Vec::with_capacity(assignments.len());
                for (key, value) in assignments {
                    if key != MAC_KEY {
                        return Err(NetError::UnknownParameter(key));
                    }
                    match value {
                        ConfigValue::Bytes(bytes) => {
                            macs.push(MacAddress::try_from(bytes.as_slice())?)
                        }
                        other => {
                            return Err(NetError::InvalidArgument(format!(
                                "mac must be bytes, got {:?}",
                                other
                            )))
                        }
                    }
                }
                for mac in &macs {
                    self.write_mac(mac)?;
                }
                Ok(None)
            }
        }
    }
}

impl fmt::Display for InterfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.native.is_up() {
            Ok(true) => "UP",
            _ => "DOWN",
        };
        write!(f, "<ETH {} {}>", self.native.name(), state)
    }
}

impl fmt::Debug for InterfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceHandle")
            .field("name", &self.native.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::MockNativeInterface;
    use entities_network::Ipv4Config;
    use mockall::predicate::eq;
    use std::net::Ipv4Addr;

    fn mock() -> MockNativeInterface {
        let mut native = MockNativeInterface::new();
        native.expect_name().return_const("eth0".to_string());
        native
    }

    fn handle(native: MockNativeInterface) -> InterfaceHandle {
        InterfaceHandle::new(Box::new(native))
    }

    #[test]
    fn test_activate_query() {
        let mut native = mock();
        native.expect_is_up().returning(|| Ok(true));
        assert_eq!(handle(native).activate(None).unwrap(), Some(true));
    }

    #[test]
    fn test_activate_is_idempotent() {
        let mut native = mock();
        native.expect_is_up().returning(|| Ok(true));
        native.expect_set_up().never();
        assert_eq!(handle(native).activate(Some(true)).unwrap(), None);
    }

    #[test]
    fn test_activate_transitions() {
        let mut native = mock();
        native.expect_is_up().returning(|| Ok(false));
        native.expect_set_up().with(eq(true)).times(1).returning(|_| Ok(()));
        handle(native).set_active(true).unwrap();
    }

    #[test]
    fn test_activate_forwards_native_refusal() {
        let mut native = mock();
        native.expect_is_up().returning(|| Ok(true));
        native.expect_set_up().returning(|_| Err(NetError::Os(libc::EPERM)));
        assert_eq!(handle(native).set_active(false), Err(NetError::Os(libc::EPERM)));
    }

    #[test]
    fn test_status_down_skips_carrier() {
        let mut native = mock();
        native.expect_is_up().returning(|| Ok(false));
        native.expect_is_running().never();
        assert_eq!(handle(native).status().unwrap(), LinkStatus::Down);
    }

    #[test]
    fn test_status_up() {
        let mut native = mock();
        native.expect_is_up().returning(|| Ok(true));
        native.expect_is_running().times(1).returning(|| Ok(false));
        assert_eq!(handle(native).status().unwrap().ordinal(), 2);

        let mut native = mock();
        native.expect_is_up().returning(|| Ok(true));
        native.expect_is_running().returning(|| Ok(true));
        assert_eq!(handle(native).status().unwrap().ordinal(), 3);
    }

    #[test]
    fn test_ifconfig_query() {
        let mut native = mock();
        native.expect_ipv4_config().returning(|| {
            Ok(Some(Ipv4Config {
                address: Ipv4Addr::new(192, 168, 1, 50),
                netmask: Ipv4Addr::new(255, 255, 255, 0),
                gateway: Ipv4Addr::new(192, 168, 1, 1),
            }))
        });
        let tuple = handle(native).ifconfig().unwrap().unwrap();
        assert_eq!(
            tuple,
            (
                "192.168.1.50".to_string(),
                "255.255.255.0".to_string(),
                "192.168.1.1".to_string(),
                "0.0.0.0".to_string()
            )
        );
    }

    #[test]
    fn test_ifconfig_unconfigured() {
        let mut native = mock();
        native.expect_ipv4_config().returning(|| Ok(None));
        assert_eq!(handle(native).ifconfig().unwrap(), None);
    }

    #[test]
    fn test_ifconfig_setter_is_noop() {
        let mut native = mock();
        native.expect_ipv4_config().never();
        let settings = (
            "10.0.0.2".to_string(),
            "255.0.0.0".to_string(),
            "10.0.0.1".to_string(),
            "8.8.8.8".to_string(),
        );
        assert_eq!(handle(native).set_ifconfig(&settings), Ok(()));
    }

    #[test]
    fn test_config_query_mac() {
        let mut native = mock();
        native
            .expect_link_address()
            .returning(|| Ok(MacAddress([2, 0, 0, 0, 0, 1])));
        let value = handle(native).config(ConfigRequest::Query("mac".into())).unwrap();
        assert_eq!(value, Some(ConfigValue::Bytes(vec![2, 0, 0, 0, 0, 1])));
    }

    #[test]
    fn test_config_set_mac() {
        let mac = MacAddress([0x02, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let mut native = mock();
        native
            .expect_set_link_address()
            .with(eq(mac))
            .times(1)
            .returning(|_| Ok(()));
        let value = ConfigValue::Bytes(mac.octets().to_vec());
        let request = ConfigRequest::Assign(vec![("mac".into(), value)]);
        assert_eq!(handle(native).config(request).unwrap(), None);
    }

    #[test]
    fn test_config_rejects_wrong_length_without_writing() {
        let mut native = mock();
        native.expect_set_link_address().never();
        let h = handle(native);
        for len in [0usize, 5, 7] {
            let value = ConfigValue::Bytes(vec![1; len]);
            let request = ConfigRequest::Assign(vec![("mac".into(), value)]);
            assert!(matches!(h.config(request), Err(NetError::InvalidArgument(_))));
        }
        assert!(matches!(h.set_mac(&[1, 2, 3]), Err(NetError::InvalidArgument(_))));
    }

    #[test]
    fn test_config_rejects_non_bytes_mac() {
        let mut native = mock();
        native.expect_set_link_address().never();
        let request = ConfigRequest::Assign(vec![("mac".into(), ConfigValue::Int(7))]);
        assert!(matches!(handle(native).config(request), Err(NetError::InvalidArgument(_))));
    }

    #[test]
    fn test_config_unknown_key() {
        let mut native = mock();
        native.expect_set_link_address().never();
        let h = handle(native);
        assert_eq!(
            h.config(ConfigRequest::Query("essid".into())),
            Err(NetError::UnknownParameter("essid".into()))
        );
        let request = ConfigRequest::Assign(vec![
            ("mac".into(), ConfigValue::Bytes(vec![2, 0, 0, 0, 0, 9])),
            ("channel".into(), ConfigValue::Int(6)),
        ]);
        assert_eq!(h.config(request), Err(NetError::UnknownParameter("channel".into())));
    }

    #[test]
    fn test_display() {
        let mut native = mock();
        native.expect_is_up().returning(|| Ok(true));
        assert_eq!(handle(native).to_string(), "<ETH eth0 UP>");

        let mut native = mock();
        native.expect_is_up().returning(|| Ok(false));
        assert_eq!(handle(native).to_string(), "<ETH eth0 DOWN>");
    }
}
