//! Linux Interface Module
//!
//! [`NativeInterface`] implementation on the Linux interface ioctls
//! (`SIOCGIFFLAGS`, `SIOCSIFFLAGS`, `SIOCGIFADDR`, `SIOCGIFNETMASK`,
//! `SIOCGIFHWADDR`, `SIOCSIFHWADDR`) issued on a private control socket.

use std::net::Ipv4Addr;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
use std::path::PathBuf;
use std::{mem, ptr};

use entities_network::{Ipv4Config, MacAddress, NetError};
use nix::errno::Errno;
use nix::net::if_::InterfaceFlags;

use crate::native::NativeInterface;
use crate::route;

#[repr(C)]
#[derive(Clone, Copy)]
union IfReqData {
    addr: libc::sockaddr,
    flags: libc::c_short,
    pad: [u8; 24],
}

/// `struct ifreq`
#[repr(C)]
struct IfReq {
    name: [libc::c_char; libc::IFNAMSIZ],
    data: IfReqData,
}

impl IfReq {
    fn new(name: &str) -> Self {
        let mut req: IfReq = unsafe { mem::zeroed() };
        for (dst, src) in req.name.iter_mut().zip(name.as_bytes()) {
            *dst = *src as libc::c_char;
        }
        req
    }
}

/// Map an ioctl errno; a vanished interface is a device error
fn ioctl_error(errno: Errno) -> NetError {
    match errno {
        Errno::ENODEV | Errno::ENXIO => NetError::NoSuchDevice,
        other => NetError::Os(other as i32),
    }
}

/// One Linux network interface
#[derive(Debug)]
pub struct LinuxInterface {
    name: String,
    control: OwnedFd,
    route_table: PathBuf,
}

impl LinuxInterface {
    /// Open an existing interface by name
    ///
    /// # Arguments
    ///
    /// * `name` - Interface name, shorter than `IFNAMSIZ`
    /// * `route_table` - Route table used to read the default gateway
    ///
    /// # Returns
    ///
    /// * `Ok(LinuxInterface)` - Interface exists
    /// * `Err(NetError::NoSuchDevice)` - No interface with that name
    /// * `Err(NetError::InvalidArgument)` - Name cannot be an interface name
    pub fn open(name: &str, route_table: impl Into<PathBuf>) -> Result<Self, NetError> {
        if name.is_empty() || name.len() >= libc::IFNAMSIZ || name.contains('\0') {
            return Err(NetError::InvalidArgument(format!("bad interface name {:?}", name)));
        }
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM | libc::SOCK_CLOEXEC, 0) };
        if fd < 0 {
            return Err(NetError::last_os_error());
        }
        let control = unsafe { OwnedFd::from_raw_fd(fd) };
        let iface = Self {
            name: name.to_string(),
            control,
            route_table: route_table.into(),
        };
        iface.flags()?;
        Ok(iface)
    }

    fn ioctl(&self, request: libc::c_ulong, req: &mut IfReq) -> Result<(), NetError> {
        let rc = unsafe { libc::ioctl(self.control.as_raw_fd(), request as _, req as *mut IfReq) };
        if rc < 0 {
            Err(ioctl_error(Errno::last()))
        } else {
            Ok(())
        }
    }

    /// Current interface flags
    pub fn flags(&self) -> Result<InterfaceFlags, NetError> {
        let mut req = IfReq::new(&self.name);
        self.ioctl(libc::SIOCGIFFLAGS as _, &mut req)?;
        let raw = unsafe { req.data.flags };
        Ok(InterfaceFlags::from_bits_truncate(raw as u16 as libc::c_int))
    }

    /// Check whether this is a loopback interface
    pub fn is_loopback(&self) -> Result<bool, NetError> {
        Ok(self.flags()?.contains(InterfaceFlags::IFF_LOOPBACK))
    }

    fn read_inet(&self, request: libc::c_ulong) -> Result<Ipv4Addr, NetError> {
        let mut req = IfReq::new(&self.name);
        self.ioctl(request, &mut req)?;
        let sin: libc::sockaddr_in =
            unsafe { ptr::read_unaligned(ptr::addr_of!(req.data) as *const libc::sockaddr_in) };
        Ok(Ipv4Addr::from(sin.sin_addr.s_addr.to_ne_bytes()))
    }
}

impl NativeInterface for LinuxInterface {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_up(&self) -> Result<bool, NetError> {
        Ok(self.flags()?.contains(InterfaceFlags::IFF_UP))
    }

    fn set_up(&self, up: bool) -> Result<(), NetError> {
        let mut flags = self.flags()?;
        flags.set(InterfaceFlags::IFF_UP, up);
        let mut req = IfReq::new(&self.name);
        req.data.flags = flags.bits() as libc::c_short;
        self.ioctl(libc::SIOCSIFFLAGS as _, &mut req)?;
        Ok(())
    }

    fn is_running(&self) -> Result<bool, NetError> {
        Ok(self.flags()?.contains(InterfaceFlags::IFF_RUNNING))
    }

    fn ipv4_config(&self) -> Result<Option<Ipv4Config>, NetError> {
        let address = match self.read_inet(libc::SIOCGIFADDR as _) {
            Ok(addr) => addr,
            Err(NetError::Os(code)) if code == libc::EADDRNOTAVAIL => return Ok(None),
            Err(err) => return Err(err),
        };
        let netmask = self.read_inet(libc::SIOCGIFNETMASK as _)?;
        let gateway = route::default_gateway(&self.route_table, &self.name)?
            .unwrap_or(Ipv4Addr::UNSPECIFIED);
        Ok(Some(Ipv4Config {
            address,
            netmask,
            gateway,
        }))
    }

    fn link_address(&self) -> Result<MacAddress, NetError> {
        let mut req = IfReq::new(&self.name);
        self.ioctl(libc::SIOCGIFHWADDR as _, &mut req)?;
        let sa = unsafe { req.data.addr };
        let mut octets = [0u8; MacAddress::LEN];
        for (dst, src) in octets.iter_mut().zip(sa.sa_data.iter()) {
            *dst = *src as u8;
        }
        Ok(MacAddress(octets))
    }

    fn set_link_address(&self, mac: &MacAddress) -> Result<(), NetError> {
        let mut sa: libc::sockaddr = unsafe { mem::zeroed() };
        sa.sa_family = libc::ARPHRD_ETHER as libc::sa_family_t;
        for (dst, src) in sa.sa_data.iter_mut().zip(mac.octets()) {
            *dst = src as libc::c_char;
        }
        let mut req = IfReq::new(&self.name);
        req.data.addr = sa;
        self.ioctl(libc::SIOCSIFHWADDR as _, &mut req)?;
        Ok(())
    }
}
