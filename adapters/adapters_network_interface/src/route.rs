//! Route Table Module
//!
//! Reads the default gateway of an interface from the kernel route table
//! (`/proc/net/route` format).
//!
//! Each data row is whitespace separated:
//! `Iface Destination Gateway Flags RefCnt Use Metric Mask MTU Window IRTT`,
//! with addresses printed as 8 hex digits of the in-memory network-order value.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::Ipv4Addr;
use std::path::Path;

use entities_network::NetError;

/// Route uses a gateway
const RTF_GATEWAY: u32 = 0x0002;

/// Decode an address field of the route table
pub fn parse_hex_addr(field: &str) -> Option<Ipv4Addr> {
    let value = u32::from_str_radix(field, 16).ok()?;
    Some(Ipv4Addr::from(value.to_ne_bytes()))
}

/// Find the default gateway of `iface` in route table text
///
/// The first row with destination `0.0.0.0`, mask `0.0.0.0` and the gateway
/// flag set wins. Malformed rows are skipped.
pub fn parse_default_gateway<R: BufRead>(reader: R, iface: &str) -> Option<Ipv4Addr> {
    for line in reader.lines().skip(1).map_while(Result::ok) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 8 || fields[0] != iface {
            continue;
        }
        let (Some(dest), Some(gateway), Ok(flags), Some(mask)) = (
            parse_hex_addr(fields[1]),
            parse_hex_addr(fields[2]),
            u32::from_str_radix(fields[3], 16),
            parse_hex_addr(fields[7]),
        ) else {
            continue;
        };
        if dest.is_unspecified() && mask.is_unspecified() && flags & RTF_GATEWAY != 0 {
            return Some(gateway);
        }
    }
    None
}

/// Read the default gateway of `iface` from the route table at `path`
///
/// # Returns
///
/// * `Ok(Some(addr))` - Default gateway
/// * `Ok(None)` - No default route, or no route table on this system
/// * `Err(NetError::Os)` - Route table exists but could not be read
pub fn default_gateway(path: &Path, iface: &str) -> Result<Option<Ipv4Addr>, NetError> {
    match File::open(path) {
        Ok(file) => Ok(parse_default_gateway(BufReader::new(file), iface)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(NetError::from(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const TABLE: &str = "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
eth0\t00000000\t0102A8C0\t0003\t0\t0\t100\t00000000\t0\t0\t0
eth0\t0002A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0
wlan0\t00000000\t0101A8C0\t0003\t0\t0\t600\t00000000\t0\t0\t0
";

    #[test]
    fn test_parse_hex_addr() {
        #[cfg(target_endian = "little")]
        assert_eq!(parse_hex_addr("0102A8C0"), Some(Ipv4Addr::new(192, 168, 2, 1)));
        assert_eq!(parse_hex_addr("00000000"), Some(Ipv4Addr::UNSPECIFIED));
        assert_eq!(parse_hex_addr("zz"), None);
    }

    #[test]
    fn test_default_gateway_per_interface() {
        let eth0 = parse_default_gateway(Cursor::new(TABLE), "eth0").unwrap();
        let wlan0 = parse_default_gateway(Cursor::new(TABLE), "wlan0").unwrap();
        assert_eq!(eth0, parse_hex_addr("0102A8C0").unwrap());
        assert_eq!(wlan0, parse_hex_addr("0101A8C0").unwrap());
        assert_ne!(eth0, wlan0);
    }

    #[test]
    fn test_no_default_route() {
        assert_eq!(parse_default_gateway(Cursor::new(TABLE), "lo"), None);

        let only_link = "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
eth0\t0002A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0
";
        assert_eq!(parse_default_gateway(Cursor::new(only_link), "eth0"), None);
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let table = "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
eth0\tnothex\t0102A8C0\t0003\t0\t0\t0\t00000000
eth0\t00000000
eth0\t00000000\t0A00000A\t0003\t0\t0\t0\t00000000\t0\t0\t0
";
        let gw = parse_default_gateway(Cursor::new(table), "eth0").unwrap();
        assert_eq!(gw, parse_hex_addr("0A00000A").unwrap());
    }

    #[test]
    fn test_default_gateway_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();
        let gw = default_gateway(file.path(), "eth0").unwrap();
        assert_eq!(gw, parse_hex_addr("0102A8C0"));
    }

    #[test]
    fn test_missing_route_table() {
        let dir = tempfile::tempdir().unwrap();
        let gw = default_gateway(&dir.path().join("route"), "eth0").unwrap();
        assert_eq!(gw, None);
    }
}
