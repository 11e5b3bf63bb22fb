//! IPv4 / CIDR helpers
//!
//! The `is_valid_*` checks return booleans and are never consulted by the
//! generators. The address arithmetic helpers return `None` on malformed
//! input so callers can fall back to their defaults.

use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;

use crate::models::StaticIpConfig;

lazy_static! {
    static ref IPV4_REGEX: Regex = Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").unwrap();
    static ref CIDR_REGEX: Regex = Regex::new(r"^([\d.]+)/(\d{1,2})$").unwrap();
    static ref MAC_REGEX: Regex = Regex::new(r"^[0-9A-Fa-f]{2}(:[0-9A-Fa-f]{2}){5}$").unwrap();
}

/// Dotted-quad IPv4 address with every octet in range.
pub fn is_valid_ipv4(address: &str) -> bool {
    match IPV4_REGEX.captures(address) {
        Some(caps) => (1..=4).all(|i| {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u16>().ok())
                .map_or(false, |octet| octet <= 255)
        }),
        None => false,
    }
}

/// `a.b.c.d/nn` with a valid address and a prefix of at most 32.
pub fn is_valid_cidr(cidr: &str) -> bool {
    match CIDR_REGEX.captures(cidr) {
        Some(caps) => {
            let address = caps.get(1).map_or("", |m| m.as_str());
            let prefix = caps
                .get(2)
                .and_then(|m| m.as_str().parse::<u8>().ok())
                .unwrap_or(u8::MAX);
            is_valid_ipv4(address) && prefix <= 32
        }
        None => false,
    }
}

pub fn is_valid_mac(mac: &str) -> bool {
    MAC_REGEX.is_match(mac)
}

/// Convert a dotted netmask to its prefix length. Non-contiguous masks are
/// rejected.
pub fn mask_to_prefix(mask: &str) -> Option<u8> {
    if !is_valid_ipv4(mask) {
        return None;
    }
    let bits = u32::from(mask.parse::<Ipv4Addr>().ok()?);
    let prefix = bits.leading_ones();
    if bits.checked_shl(prefix).unwrap_or(0) != 0 {
        return None;
    }
    u8::try_from(prefix).ok()
}

/// Accept either a prefix length (`24`, `/24`) or a dotted netmask.
pub fn prefix_from_subnet(subnet: &str) -> Option<u8> {
    let subnet = subnet.trim().trim_start_matches('/');
    if subnet.contains('.') {
        return mask_to_prefix(subnet);
    }
    subnet.parse::<u8>().ok().filter(|p| *p <= 32)
}

/// Split `a.b.c.d/nn` into its parts.
pub fn split_cidr(cidr: &str) -> Option<(Ipv4Addr, u8)> {
    if !is_valid_cidr(cidr) {
        return None;
    }
    let (address, prefix) = cidr.split_once('/')?;
    Some((address.parse().ok()?, prefix.parse().ok()?))
}

fn network_bits(address: Ipv4Addr, prefix: u8) -> u32 {
    let mask = if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    };
    u32::from(address) & mask
}

/// Network of an interface address: `192.168.170.1/24` → `192.168.170.0/24`.
pub fn network_cidr(cidr: &str) -> Option<String> {
    let (address, prefix) = split_cidr(cidr)?;
    let network = Ipv4Addr::from(network_bits(address, prefix));
    Some(format!("{}/{}", network, prefix))
}

/// Address of host number `host` inside the network of `cidr`.
pub fn subnet_host(cidr: &str, host: u32) -> Option<Ipv4Addr> {
    let (address, prefix) = split_cidr(cidr)?;
    let size = if prefix == 0 {
        u32::MAX
    } else {
        (1u32 << (32 - u32::from(prefix))).saturating_sub(1)
    };
    if host > size {
        return None;
    }
    Some(Ipv4Addr::from(network_bits(address, prefix) + host))
}

/// Like [`subnet_host`], but only for assignable hosts: the network and
/// broadcast addresses are refused on subnets larger than a /31.
pub fn usable_host(cidr: &str, host: u32) -> Option<Ipv4Addr> {
    let (_, prefix) = split_cidr(cidr)?;
    if prefix < 31 {
        let broadcast = u32::MAX >> u32::from(prefix);
        if host == 0 || host >= broadcast {
            return None;
        }
    }
    subnet_host(cidr, host)
}

/// Address part of `a.b.c.d/nn`, or the input when it has no prefix.
pub fn strip_prefix(cidr: &str) -> &str {
    cidr.split_once('/').map_or(cidr, |(address, _)| address)
}

/// Whether a static WAN configuration is complete and well formed.
pub fn validate_ip_config(config: &StaticIpConfig) -> bool {
    is_valid_ipv4(&config.ip_address)
        && is_valid_ipv4(&config.gateway)
        && prefix_from_subnet(&config.subnet).is_some()
        && config
            .dns
            .as_ref()
            .map_or(true, |dns| dns.to_vec().iter().all(|d| is_valid_ipv4(d)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListValue;

    #[test]
    fn test_is_valid_ipv4() {
        assert!(is_valid_ipv4("192.168.1.1"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(!is_valid_ipv4("256.1.1.1"));
        assert!(!is_valid_ipv4("1.2.3"));
        assert!(!is_valid_ipv4("a.b.c.d"));
    }

    #[test]
    fn test_is_valid_cidr() {
        assert!(is_valid_cidr("10.0.0.0/8"));
        assert!(!is_valid_cidr("10.0.0.0/33"));
        assert!(!is_valid_cidr("10.0.0.0"));
    }

    #[test]
    fn test_mask_to_prefix() {
        assert_eq!(mask_to_prefix("255.255.255.0"), Some(24));
        assert_eq!(mask_to_prefix("255.255.255.255"), Some(32));
        assert_eq!(mask_to_prefix("0.0.0.0"), Some(0));
        assert_eq!(mask_to_prefix("255.0.255.0"), None);
        assert_eq!(prefix_from_subnet("/30"), Some(30));
        assert_eq!(prefix_from_subnet("255.255.0.0"), Some(16));
        assert_eq!(prefix_from_subnet("40"), None);
    }

    #[test]
    fn test_network_and_host() {
        assert_eq!(
            network_cidr("192.168.170.1/24").as_deref(),
            Some("192.168.170.0/24")
        );
        assert_eq!(
            subnet_host("192.168.170.1/24", 5),
            Some(Ipv4Addr::new(192, 168, 170, 5))
        );
        assert_eq!(subnet_host("10.0.0.1/30", 9), None);
    }

    #[test]
    fn test_usable_host_skips_broadcast() {
        assert_eq!(
            usable_host("192.168.170.1/24", 254),
            Some(Ipv4Addr::new(192, 168, 170, 254))
        );
        assert_eq!(usable_host("192.168.170.1/24", 255), None);
        assert_eq!(subnet_host("192.168.170.1/24", 255), Some(Ipv4Addr::new(192, 168, 170, 255)));
        assert_eq!(usable_host("10.0.0.1/24", 0), None);
        assert_eq!(usable_host("10.0.0.0/31", 1), Some(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn test_validate_ip_config() {
        let mut config = StaticIpConfig {
            ip_address: "203.0.113.10".to_string(),
            subnet: "255.255.255.0".to_string(),
            gateway: "203.0.113.1".to_string(),
            dns: Some(ListValue::from(vec!["1.1.1.1", "8.8.8.8"])),
        };
        assert!(validate_ip_config(&config));

        config.gateway = "gateway".to_string();
        assert!(!validate_ip_config(&config));
    }

    #[test]
    fn test_mac() {
        assert!(is_valid_mac("02:00:00:AA:bb:01"));
        assert!(!is_valid_mac("02-00-00-AA-bb-01"));
    }
}
