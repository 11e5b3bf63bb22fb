//! LAN composer
//!
//! Bridges, addressing and DHCP for every LAN network, followed by the
//! optional wireless, VPN server and tunnel blocks taken from
//! [`LanState`](crate::models::LanState).

use log::{debug, info, warn};

use crate::generator::format::{quote_value, Command};
use crate::generator::compose::INTERFACE_SECTIONS;
use crate::generator::merge::{hoist_sections, merge_router_configs};
use crate::generator::primitives::{
    interface_list_member, ip_address, ip_pool, AddressOptions, PoolOptions, INTERFACE_LIST,
};
use crate::generator::protocols::wan_links::WAN_LIST;
use crate::generator::protocols::{
    ikev2_server_wrapper, l2tp_server_wrapper, openvpn_server_wrapper, pptp_server_wrapper,
    sstp_server_wrapper, tunnel_wrapper, wireguard_server_wrapper, wireless_config,
};
use crate::models::{EthernetAssignment, LanNetwork, RouterConfig, StarState, VpnServerState};
use crate::utils::ip::{network_cidr, split_cidr, strip_prefix, subnet_host};

pub const BRIDGE: &str = "/interface bridge";
pub const BRIDGE_PORT: &str = "/interface bridge port";
pub const DHCP_SERVER: &str = "/ip dhcp-server";
pub const DHCP_SERVER_NETWORK: &str = "/ip dhcp-server network";
pub const IPV6_FIREWALL_FILTER: &str = "/ipv6 firewall filter";

/// Interface list every LAN bridge joins.
pub const LAN_LIST: &str = "LAN";
/// Network used when the state names none.
pub const DEFAULT_NETWORK: &str = "LAN";
pub const DEFAULT_LAN_ADDRESS: &str = "192.168.10.1/24";

/// Bridge serving the LAN network `network`, e.g. `LANBridge`.
pub fn bridge_name(network: &str) -> String {
    format!("{}Bridge", network)
}

fn default_network() -> LanNetwork {
    LanNetwork {
        name: DEFAULT_NETWORK.to_string(),
        address: DEFAULT_LAN_ADDRESS.to_string(),
        ..Default::default()
    }
}

fn interface_lists() -> RouterConfig {
    let mut config = RouterConfig::new();
    for list in [WAN_LIST, LAN_LIST] {
        config.push(INTERFACE_LIST, Command::add().arg("name", list));
    }
    config
}

/// Bridge, address, interface list membership and, unless disabled, a DHCP
/// server handing out the rest of the subnet.
pub fn lan_network(network: &LanNetwork) -> RouterConfig {
    let name = if network.name.is_empty() {
        DEFAULT_NETWORK
    } else {
        network.name.as_str()
    };
    let address = if split_cidr(&network.address).is_some() {
        network.address.as_str()
    } else {
        warn!(
            "invalid address '{}' for network {}, using {}",
            network.address, name, DEFAULT_LAN_ADDRESS
        );
        DEFAULT_LAN_ADDRESS
    };
    let bridge = bridge_name(name);
    let subnet = network_cidr(address).unwrap_or_else(|| address.to_string());
    let gateway = strip_prefix(address);

    let mut bridges = RouterConfig::new();
    bridges.push(
        BRIDGE,
        Command::add().quoted("name", &bridge).quoted("comment", name),
    );

    let network_address = strip_prefix(&subnet);
    let addr = ip_address(&AddressOptions {
        address,
        interface: &bridge,
        network: Some(network_address),
        ..Default::default()
    });
    let member = interface_list_member(LAN_LIST, &quote_value(&bridge));

    let mut dhcp = RouterConfig::new();
    if network.dhcp.unwrap_or(true) {
        let pool_name = format!("dhcp-{}", name);
        match dhcp_range(address) {
            Some(ranges) => {
                dhcp.merge(&ip_pool(&PoolOptions {
                    name: &pool_name,
                    ranges: &ranges,
                    ..Default::default()
                }));
                dhcp.push(
                    DHCP_SERVER,
                    Command::add()
                        .arg("address-pool", &pool_name)
                        .quoted("interface", &bridge)
                        .arg("name", &pool_name),
                );
                dhcp.push(
                    DHCP_SERVER_NETWORK,
                    Command::add()
                        .arg("address", &subnet)
                        .arg(
                            "dns-server",
                            network.dns_server.as_deref().unwrap_or(gateway),
                        )
                        .arg("gateway", gateway),
                );
            }
            None => warn!("subnet {} too small for DHCP on {}", subnet, name),
        }
    }

    merge_router_configs(&[&bridges, &addr, &member, &dhcp])
}

/// Hosts after the router address up to the last usable one.
fn dhcp_range(address: &str) -> Option<String> {
    let (router, prefix) = split_cidr(address)?;
    let size = (1u64 << (32 - u32::from(prefix))).saturating_sub(1);
    let last = subnet_host(address, u32::try_from(size).ok()?.checked_sub(1)?)?;
    let first = std::net::Ipv4Addr::from(u32::from(router).checked_add(1)?);
    if first > last {
        return None;
    }
    Some(format!("{}-{}", first, last))
}

/// Stateful IPv6 input/forward policy: allow established traffic and
/// ICMPv6, drop invalid packets and anything not coming from the LAN.
pub fn ipv6_firewall() -> RouterConfig {
    let rules = [
        Command::add()
            .arg("action", "accept")
            .arg("chain", "input")
            .arg("connection-state", "established,related,untracked"),
        Command::add()
            .arg("action", "drop")
            .arg("chain", "input")
            .arg("connection-state", "invalid"),
        Command::add()
            .arg("action", "accept")
            .arg("chain", "input")
            .arg("protocol", "icmpv6"),
        Command::add()
            .arg("action", "accept")
            .arg("chain", "input")
            .arg("dst-port", "546")
            .arg("protocol", "udp")
            .arg("src-address", "fe80::/10"),
        Command::add()
            .arg("action", "drop")
            .arg("chain", "input")
            .arg("in-interface-list", format!("!{}", LAN_LIST))
            .quoted("comment", "Drop IPv6 not from LAN"),
        Command::add()
            .arg("action", "accept")
            .arg("chain", "forward")
            .arg("connection-state", "established,related,untracked"),
        Command::add()
            .arg("action", "drop")
            .arg("chain", "forward")
            .arg("connection-state", "invalid"),
        Command::add()
            .arg("action", "accept")
            .arg("chain", "forward")
            .arg("protocol", "icmpv6"),
        Command::add()
            .arg("action", "drop")
            .arg("chain", "forward")
            .arg("in-interface-list", format!("!{}", LAN_LIST))
            .quoted("comment", "Drop IPv6 not from LAN"),
    ];

    let mut config = RouterConfig::new();
    for rule in rules {
        config.push(IPV6_FIREWALL_FILTER, rule);
    }
    config
}

pub fn ethernet_ports(assignments: &[EthernetAssignment]) -> RouterConfig {
    let mut config = RouterConfig::new();
    for port in assignments {
        let network = port.network.as_deref().unwrap_or(DEFAULT_NETWORK);
        config.push(
            BRIDGE_PORT,
            Command::add()
                .quoted("bridge", &bridge_name(network))
                .quoted("interface", &port.interface),
        );
    }
    config
}

/// Every VPN server present in the state, in a fixed protocol order.
pub fn vpn_servers(state: &VpnServerState) -> RouterConfig {
    let users = &state.users;
    let mut parts = Vec::new();
    if let Some(config) = &state.wireguard_server {
        parts.push(wireguard_server_wrapper(config, users));
    }
    if let Some(config) = &state.openvpn_server {
        parts.push(openvpn_server_wrapper(config, users));
    }
    if let Some(config) = &state.pptp_server {
        parts.push(pptp_server_wrapper(config, users));
    }
    if let Some(config) = &state.sstp_server {
        parts.push(sstp_server_wrapper(config, users));
    }
    if let Some(config) = &state.l2tp_server {
        parts.push(l2tp_server_wrapper(config, users));
    }
    if let Some(config) = &state.ikev2_server {
        parts.push(ikev2_server_wrapper(config, users));
    }
    debug!("{} VPN server(s) configured", parts.len());

    let refs: Vec<&RouterConfig> = parts.iter().collect();
    merge_router_configs(&refs)
}

/// LAN side of the router. Absent wireless, VPN and tunnel state is skipped.
pub fn lan_cg(state: &StarState) -> RouterConfig {
    let lan = &state.lan;
    let networks = if lan.networks.is_empty() {
        vec![default_network()]
    } else {
        lan.networks.clone()
    };
    info!("generating LAN configuration for {} network(s)", networks.len());

    let mut parts = vec![interface_lists()];
    parts.extend(networks.iter().map(lan_network));
    parts.push(ipv6_firewall());
    if let Some(ports) = &lan.interface {
        parts.push(ethernet_ports(ports));
    }
    if let Some(wireless) = &lan.wireless {
        parts.push(wireless_config(wireless));
    }
    if let Some(vpn) = &lan.vpn_server {
        parts.push(vpn_servers(vpn));
    }
    if let Some(tunnel) = lan.tunnel.as_ref().filter(|t| !t.is_empty()) {
        parts.push(tunnel_wrapper(tunnel));
    }

    let refs: Vec<&RouterConfig> = parts.iter().collect();
    hoist_sections(&merge_router_configs(&refs), &INTERFACE_SECTIONS).shortened()
}
