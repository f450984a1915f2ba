//! Public network detection for CIDR strings found in configuration.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

const ANYWHERE: &[&str] = &["*", "internet", "any", "0.0.0.0/0", "::/0"];

const PRIVATE_V4: &[(Ipv4Addr, u8)] = &[
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
    (Ipv4Addr::new(127, 0, 0, 0), 8),
    (Ipv4Addr::new(169, 254, 0, 0), 16),
    (Ipv4Addr::new(100, 64, 0, 0), 10),
];

const PRIVATE_V6: &[(Ipv6Addr, u8)] = &[
    (Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1), 128),
    (Ipv6Addr::new(0xfc00, 0, 0, 0, 0, 0, 0, 0), 7),
    (Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0), 10),
];

/// Whether `cidr` reaches beyond private address space.
///
/// Accepts `addr/prefix` or a bare address. Strings that are neither an
/// "anywhere" keyword nor a parseable network are not public.
pub fn is_public_cidr(cidr: &str) -> bool {
    let cidr = cidr.trim();
    if ANYWHERE.iter().any(|a| a.eq_ignore_ascii_case(cidr)) {
        return true;
    }
    match parse(cidr) {
        Some((IpAddr::V4(addr), prefix)) => !PRIVATE_V4
            .iter()
            .any(|&(net, bits)| prefix >= bits && mask_v4(addr, bits) == mask_v4(net, bits)),
        Some((IpAddr::V6(addr), prefix)) => !PRIVATE_V6
            .iter()
            .any(|&(net, bits)| prefix >= bits && mask_v6(addr, bits) == mask_v6(net, bits)),
        None => false,
    }
}

fn parse(cidr: &str) -> Option<(IpAddr, u8)> {
    let (addr, prefix) = match cidr.split_once('/') {
        Some((addr, prefix)) => (addr.parse::<IpAddr>().ok()?, Some(prefix.parse::<u8>().ok()?)),
        None => (cidr.parse::<IpAddr>().ok()?, None),
    };
    let max = if addr.is_ipv4() { 32 } else { 128 };
    let prefix = prefix.unwrap_or(max);
    (prefix <= max).then_some((addr, prefix))
}

fn mask_v4(addr: Ipv4Addr, bits: u8) -> u32 {
    let raw = u32::from(addr);
    match bits {
        0 => 0,
        b => raw & (u32::MAX << (32 - u32::from(b))),
    }
}

fn mask_v6(addr: Ipv6Addr, bits: u8) -> u128 {
    let raw = u128::from(addr);
    match bits {
        0 => 0,
        b => raw & (u128::MAX << (128 - u32::from(b))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn anywhere_keywords() {
        for c in ["*", "Internet", "any", "0.0.0.0/0", "::/0"] {
            assert!(is_public_cidr(c), "{c}");
        }
    }

    #[test]
    fn private_ranges_are_not_public() {
        for c in ["10.0.0.0/16", "172.16.4.0/24", "192.168.1.1", "127.0.0.1/32", "fd00::/8", "100.64.0.0/10"] {
            assert!(!is_public_cidr(c), "{c}");
        }
    }

    #[test]
    fn wider_than_private_block_is_public() {
        assert!(is_public_cidr("10.0.0.0/7"));
        assert!(is_public_cidr("172.0.0.0/8"));
        assert!(is_public_cidr("8.8.8.8"));
        assert!(is_public_cidr("2001:db8::/32"));
    }

    #[test]
    fn garbage_is_not_public() {
        assert!(!is_public_cidr("vpc-cidr"));
        assert!(!is_public_cidr("10.0.0.0/40"));
        assert!(!is_public_cidr(""));
    }

    proptest! {
        #[test]
        fn every_ten_slash_eight_host_is_private(b in any::<u8>(), c in any::<u8>(), d in any::<u8>(), prefix in 8u8..=32) {
            let cidr = format!("10.{b}.{c}.{d}/{prefix}");
            prop_assert!(!is_public_cidr(&cidr));
        }

        #[test]
        fn zero_prefix_is_always_public(a in any::<u8>(), b in any::<u8>()) {
            let cidr = format!("{a}.{b}.0.0/0");
            prop_assert!(is_public_cidr(&cidr));
        }
    }
}
