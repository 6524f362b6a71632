use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InterfaceError {
    /// The operating system reported no network interfaces at all.
    #[error("no network interfaces found")]
    NoInterfaces,
}

/// Source of the host's network interfaces.
pub trait InterfaceRepository {
    fn get_network_interfaces(&self) -> Result<Vec<NetworkInterface>, InterfaceError>;
}

/// Reads interfaces straight from the operating system.
pub struct SystemInterfaces;

impl InterfaceRepository for SystemInterfaces {
    fn get_network_interfaces(&self) -> Result<Vec<NetworkInterface>, InterfaceError> {
        let interfaces: Vec<NetworkInterface> = datalink::interfaces();
        if interfaces.is_empty() {
            return Err(InterfaceError::NoInterfaces);
        }
        Ok(interfaces)
    }
}

/// Takes a snapshot of every IPv4 address bound to a local interface.
///
/// Addresses keep interface order, then the order each interface lists them in.
/// Interfaces without an IPv4 address contribute nothing.
pub fn enumerate_ipv4(repo: &impl InterfaceRepository) -> Result<Vec<Ipv4Addr>, InterfaceError> {
    let interfaces: Vec<NetworkInterface> = repo.get_network_interfaces()?;
    debug!("Identified {} network interface(s)", interfaces.len());
    Ok(ipv4_addresses(&interfaces))
}

pub fn ipv4_addresses(interfaces: &[NetworkInterface]) -> Vec<Ipv4Addr> {
    interfaces
        .iter()
        .flat_map(|interface| interface.ips.iter())
        .filter_map(|net| match net {
            IpNetwork::V4(v4) => Some(v4.ip()),
            IpNetwork::V6(_) => None,
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
