//! # Reserved Address Ranges
//!
//! Decides whether an address is private, i.e. not reachable from the public internet.
//!
//! The table of reserved blocks is parsed once, on first use, and is read-only afterwards.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use pnet::ipnetwork::IpNetwork;

const RESERVED_CIDRS: &[&str] = &[
    "127.0.0.0/8",    // IPv4 loopback
    "10.0.0.0/8",     // RFC1918
    "172.16.0.0/12",  // RFC1918
    "192.168.0.0/16", // RFC1918
    "169.254.0.0/16", // RFC3927 link-local
    "::1/128",        // IPv6 loopback
    "fe80::/10",      // IPv6 link-local
    "fc00::/7",       // IPv6 unique local addr
];

static RESERVED_RANGES: OnceLock<ReservedRanges> = OnceLock::new();

/// An immutable set of network blocks used purely for membership tests.
#[derive(Debug, Clone)]
pub struct ReservedRanges {
    blocks: Vec<IpNetwork>,
}

impl ReservedRanges {
    /// Parses every CIDR in `cidrs`.
    ///
    /// # Panics
    /// Panics on the first entry that is not a valid CIDR. The table is compiled into the
    /// binary, so a bad entry is a programming error and no partial table is ever returned.
    pub fn from_cidrs(cidrs: &[&str]) -> Self {
        let blocks: Vec<IpNetwork> = cidrs
            .iter()
            .map(|cidr| {
                cidr.parse::<IpNetwork>()
                    .unwrap_or_else(|e| panic!("parse error on {cidr:?}: {e}"))
            })
            .collect();
        Self { blocks }
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.blocks.iter().any(|block| block.contains(ip))
    }
}

/// The process-wide table of reserved blocks.
pub fn reserved_ranges() -> &'static ReservedRanges {
    RESERVED_RANGES.get_or_init(|| ReservedRanges::from_cidrs(RESERVED_CIDRS))
}

/// Returns `true` for loopback, link-local and private-use addresses.
pub fn is_private(ip: IpAddr) -> bool {
    if ip.is_loopback() || is_link_local_unicast(&ip) || is_link_local_multicast(&ip) {
        return true;
    }
    reserved_ranges().contains(ip)
}

fn is_link_local_unicast(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_link_local(),
        IpAddr::V6(v6) => v6.is_unicast_link_local(),
    }
}

fn is_link_local_multicast(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_v4_link_local_multicast(v4),
        IpAddr::V6(v6) => is_v6_link_local_multicast(v6),
    }
}

// 224.0.0.0/24
fn is_v4_link_local_multicast(ip: &Ipv4Addr) -> bool {
    let [a, b, c, _] = ip.octets();
    a == 224 && b == 0 && c == 0
}

// ff02::/16, any flags
fn is_v6_link_local_multicast(ip: &Ipv6Addr) -> bool {
    let octets = ip.octets();
    octets[0] == 0xff && octets[1] & 0x0f == 0x02
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
