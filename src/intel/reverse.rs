//! Reverse-lookup names and ASN directory query names.

use std::net::IpAddr;

use crate::config::IntelConfig;

const V4_REVERSE_ZONE: &str = "in-addr.arpa";
const V6_REVERSE_ZONE: &str = "ip6.arpa";

/// Replace an IPv4-mapped IPv6 address with the IPv4 address it carries.
pub fn unmap(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(addr),
        IpAddr::V4(_) => addr,
    }
}

/// `4` or `6`.
pub fn version(addr: IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 4,
        IpAddr::V6(_) => 6,
    }
}

/// The reverse-lookup domain name of `addr`, without a trailing dot.
///
/// `192.0.2.1` → `1.2.0.192.in-addr.arpa`; IPv6 addresses expand to 32
/// reversed nibbles under `ip6.arpa`.
pub fn reverse_pointer(addr: IpAddr) -> String {
    match addr {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{d}.{c}.{b}.{a}.{V4_REVERSE_ZONE}")
        }
        IpAddr::V6(v6) => {
            let mut labels: Vec<String> = Vec::with_capacity(33);
            for byte in v6.octets().iter().rev() {
                labels.push(format!("{:x}", byte & 0x0f));
                labels.push(format!("{:x}", byte >> 4));
            }
            labels.push(V6_REVERSE_ZONE.to_string());
            labels.join(".")
        }
    }
}

/// Reverse-lookup name with its zone swapped for the ASN origin zone.
pub fn origin_query_name(addr: IpAddr, zones: &IntelConfig) -> String {
    let pointer = reverse_pointer(addr);
    let (zone, origin_zone) = match addr {
        IpAddr::V4(_) => (V4_REVERSE_ZONE, &zones.origin_zone_v4),
        IpAddr::V6(_) => (V6_REVERSE_ZONE, &zones.origin_zone_v6),
    };
    let host_part = pointer.strip_suffix(zone).unwrap_or(&pointer);
    format!("{host_part}{origin_zone}")
}

/// Query name of the description record for `asn`.
pub fn asn_query_name(asn: u32, zones: &IntelConfig) -> String {
    format!("AS{asn}.{}", zones.asn_zone)
}
