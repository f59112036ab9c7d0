//! IP address classification (private/reserved vs public).
//!
//! # Responsibilities
//! - Parse IPv4/IPv6 literals
//! - Decide whether an address is globally routable
//! - Classify IPv4-mapped IPv6 addresses as their embedded IPv4
//!
//! # Design Decisions
//! - Unparsable input classifies as "not private" so downstream lookups
//!   proceed rather than being blocked (fail-open-to-public, kept for
//!   parity with the original service; see DESIGN.md)
//! - Carrier-grade NAT (100.64.0.0/10) and unique-local IPv6 (fc00::/7)
//!   are matched manually; the std accessors are not yet stable

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Returns whether `address` is a private/reserved IP literal.
///
/// Anything that does not parse as an IPv4 or IPv6 address is treated as
/// public.
pub fn is_private(address: &str) -> bool {
    match address.parse::<IpAddr>() {
        Ok(ip) => is_private_ip(&ip),
        Err(_) => false,
    }
}

/// Returns whether a parsed address falls in a private/reserved range.
pub fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_private_v4(v4),
        IpAddr::V6(v6) => is_private_v6(v6),
    }
}

fn is_private_v4(ip: &Ipv4Addr) -> bool {
    ip.is_private()              // 10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16
        || ip.is_loopback()      // 127.0.0.0/8
        || ip.is_link_local()    // 169.254.0.0/16
        || ip.is_broadcast()     // 255.255.255.255
        || ip.is_documentation() // 192.0.2.0/24, 198.51.100.0/24, 203.0.113.0/24
        || ip.is_unspecified()   // 0.0.0.0
        || is_shared_v4(ip)
}

/// Carrier-grade NAT range, 100.64.0.0/10 (RFC 6598).
fn is_shared_v4(ip: &Ipv4Addr) -> bool {
    let octets = ip.octets();
    octets[0] == 100 && (octets[1] & 0xc0) == 64
}

fn is_private_v6(ip: &Ipv6Addr) -> bool {
    if let Some(mapped) = ip.to_ipv4_mapped() {
        return is_private_v4(&mapped);
    }
    ip.is_loopback()             // ::1
        || ip.is_unspecified()   // ::
        || is_unique_local_v6(ip)
        || is_link_local_v6(ip)
}

/// Unique Local Address range, fc00::/7 (RFC 4193).
fn is_unique_local_v6(ip: &Ipv6Addr) -> bool {
    (ip.segments()[0] & 0xfe00) == 0xfc00
}

/// Link-local unicast range, fe80::/10.
fn is_link_local_v6(ip: &Ipv6Addr) -> bool {
    (ip.segments()[0] & 0xffc0) == 0xfe80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc1918_ranges_are_private() {
        assert!(is_private("10.0.0.1"));
        assert!(is_private("172.16.0.1"));
        assert!(is_private("172.31.255.255"));
        assert!(is_private("192.168.1.1"));
    }

    #[test]
    fn loopback_and_link_local_are_private() {
        assert!(is_private("127.0.0.1"));
        assert!(is_private("127.255.255.255"));
        assert!(is_private("169.254.1.1"));
    }

    #[test]
    fn carrier_grade_nat_is_private() {
        assert!(is_private("100.64.0.1"));
        assert!(is_private("100.127.255.255"));
        // Neighbours of the /10 are ordinary public space
        assert!(!is_private("100.63.255.255"));
        assert!(!is_private("100.128.0.0"));
    }

    #[test]
    fn public_addresses_are_not_private() {
        assert!(!is_private("8.8.8.8"));
        assert!(!is_private("1.1.1.1"));
        assert!(!is_private("140.82.112.4"));
        assert!(!is_private("2001:4860:4860::8888"));
        assert!(!is_private("2606:4700:4700::1111"));
    }

    #[test]
    fn ipv6_reserved_ranges_are_private() {
        assert!(is_private("::1"));
        assert!(is_private("::"));
        assert!(is_private("fc00::1"));
        assert!(is_private("fd00::1"));
        assert!(is_private("fe80::1"));
        assert!(is_private("fe80::1cd4:a0ff:fed4:aa2a"));
    }

    #[test]
    fn ipv4_mapped_ipv6_follows_the_embedded_address() {
        assert!(is_private("::ffff:192.168.1.1"));
        assert!(!is_private("::ffff:8.8.8.8"));
    }

    #[test]
    fn garbage_is_not_private() {
        assert!(!is_private(""));
        assert!(!is_private("not-an-ip"));
        assert!(!is_private("999.999.999.999"));
        assert!(!is_private("10.0.0.1/8"));
    }
}
