//! WireGuard server: interface, router address, static peers and one
//! generated peer per WireGuard user.

use log::warn;

use crate::generator::format::{quote_value, Command};
use crate::generator::merge::merge_router_configs;
use crate::generator::primitives::{
    address_list_entry, filter_rule, ip_address, AddressListOptions, AddressOptions,
    FilterOptions,
};
use crate::generator::protocols::ppp::VPN_ADDRESS_LIST;
use crate::generator::protocols::VpnServerBuilder;
use crate::models::{
    Credentials, RouterConfig, VpnType, WireguardPeerConfig, WireguardServerConfig,
};
use crate::utils::ip::{network_cidr, split_cidr, usable_host};

pub const WG_INTERFACE: &str = "/interface wireguard";
pub const WG_PEERS: &str = "/interface wireguard peers";

pub struct WireguardDefaults {
    pub name: &'static str,
    pub interface_address: &'static str,
    pub listen_port: u16,
    pub mtu: u16,
    pub client_dns: &'static str,
    pub client_keepalive: &'static str,
    /// Host number of the first generated peer inside the interface subnet.
    pub first_peer_host: u32,
}

pub const WIREGUARD_DEFAULTS: WireguardDefaults = WireguardDefaults {
    name: "wireguard-server",
    interface_address: "192.168.170.1/24",
    listen_port: 13231,
    mtu: 1420,
    client_dns: "1.1.1.1",
    client_keepalive: "25s",
    first_peer_host: 2,
};

fn interface_name(config: &WireguardServerConfig) -> &str {
    config
        .interface
        .name
        .as_deref()
        .unwrap_or(WIREGUARD_DEFAULTS.name)
}

/// Interface address, replaced by the default when it is not a valid CIDR.
fn interface_address(config: &WireguardServerConfig) -> &str {
    match config.interface.interface_address.as_deref() {
        Some(address) if split_cidr(address).is_some() => address,
        Some(address) => {
            warn!(
                "invalid WireGuard interface address '{}', using {}",
                address, WIREGUARD_DEFAULTS.interface_address
            );
            WIREGUARD_DEFAULTS.interface_address
        }
        None => WIREGUARD_DEFAULTS.interface_address,
    }
}

fn static_peer(interface: &str, peer: &WireguardPeerConfig) -> String {
    Command::add()
        .arg("interface", interface)
        .opt_quoted("name", peer.name.as_deref())
        .quoted("public-key", &peer.public_key)
        .opt_quoted("preshared-key", peer.preshared_key.as_deref())
        .opt_list("allowed-address", peer.allowed_address.as_ref())
        .opt("endpoint-address", peer.endpoint_address.as_deref())
        .opt("endpoint-port", peer.endpoint_port)
        .opt("persistent-keepalive", peer.persistent_keepalive.as_deref())
        .comment(peer.comment.as_deref())
        .build()
}

pub struct Wireguard;

impl VpnServerBuilder for Wireguard {
    type Config = WireguardServerConfig;

    const VPN_TYPE: VpnType = VpnType::Wireguard;

    fn server(config: &WireguardServerConfig) -> RouterConfig {
        let d = &WIREGUARD_DEFAULTS;
        let name = interface_name(config);
        let address = interface_address(config);
        let port = config.interface.listen_port.unwrap_or(d.listen_port);

        let mut interface = RouterConfig::new();
        interface.push(
            WG_INTERFACE,
            Command::add()
                .arg("name", name)
                .arg("listen-port", port)
                .arg("mtu", config.interface.mtu.unwrap_or(d.mtu))
                .opt_quoted("private-key", config.interface.private_key.as_deref())
                .comment(config.interface.comment.as_deref()),
        );

        let addr = ip_address(&AddressOptions {
            address,
            interface: name,
            ..Default::default()
        });

        let port = port.to_string();
        let firewall = filter_rule(&FilterOptions {
            chain: "input",
            action: "accept",
            protocol: Some("udp"),
            dst_port: Some(port.as_str()),
            comment: Some("Allow WireGuard"),
            ..Default::default()
        });

        let subnet = network_cidr(address).unwrap_or_else(|| address.to_string());
        let list = address_list_entry(&AddressListOptions {
            address: &subnet,
            list: VPN_ADDRESS_LIST,
            ..Default::default()
        });

        let mut peers = RouterConfig::new();
        for peer in &config.peers {
            peers.push(WG_PEERS, static_peer(name, peer));
        }

        merge_router_configs(&[&interface, &addr, &firewall, &list, &peers])
    }

    fn user_entries(users: &[&Credentials], config: &WireguardServerConfig) -> RouterConfig {
        let d = &WIREGUARD_DEFAULTS;
        let name = interface_name(config);
        let address = interface_address(config);
        let port = config.interface.listen_port.unwrap_or(d.listen_port);

        let mut peers = RouterConfig::new();
        for (index, user) in users.iter().enumerate() {
            let host = d.first_peer_host + u32::try_from(index).unwrap_or(u32::MAX);
            let peer_address = match usable_host(address, host) {
                Some(ip) => format!("{}/32", ip),
                None => {
                    warn!(
                        "WireGuard subnet {} exhausted at user '{}'",
                        address, user.username
                    );
                    continue;
                }
            };

            let mut command = Command::add()
                .arg("interface", name)
                .quoted("name", &user.username)
                .arg("allowed-address", &peer_address)
                .arg("client-address", &peer_address)
                .arg(
                    "client-dns",
                    config.client_dns.as_deref().unwrap_or(d.client_dns),
                )
                .arg(
                    "client-keepalive",
                    config
                        .client_keepalive
                        .as_deref()
                        .unwrap_or(d.client_keepalive),
                )
                .arg("private-key", "auto");
            if let Some(endpoint) = config.client_endpoint.as_deref() {
                command = command
                    .arg("client-endpoint", endpoint)
                    .arg("client-listen-port", port);
            }
            command = command.arg(
                "comment",
                quote_value(&format!("WireGuard user {}", user.username)),
            );
            peers.push(WG_PEERS, command);
        }
        peers
    }

    fn summary(config: &WireguardServerConfig) -> Vec<String> {
        vec![
            format!(
                "Interface: {} ({})",
                interface_name(config),
                interface_address(config)
            ),
            format!(
                "Listen port: {}",
                config
                    .interface
                    .listen_port
                    .unwrap_or(WIREGUARD_DEFAULTS.listen_port)
            ),
        ]
    }
}

pub fn wireguard_server(config: &WireguardServerConfig) -> RouterConfig {
    Wireguard::server(config).shortened()
}

pub fn wireguard_server_users(
    users: &[Credentials],
    config: &WireguardServerConfig,
) -> RouterConfig {
    Wireguard::users(users, config)
}

pub fn wireguard_server_wrapper(
    config: &WireguardServerConfig,
    users: &[Credentials],
) -> RouterConfig {
    Wireguard::wrapper(config, users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListValue, WireguardInterfaceConfig};

    #[test]
    fn test_default_interface() {
        let config = wireguard_server(&WireguardServerConfig::default());
        assert_eq!(
            config.lines(WG_INTERFACE),
            ["add name=wireguard-server listen-port=13231 mtu=1420"]
        );
        assert_eq!(
            config.lines("/ip address"),
            ["add address=192.168.170.1/24 interface=wireguard-server"]
        );
        assert!(!config.contains_section(WG_PEERS));
    }

    #[test]
    fn test_static_peers_in_server() {
        let config = wireguard_server(&WireguardServerConfig {
            peers: vec![WireguardPeerConfig {
                public_key: "abc=".to_string(),
                allowed_address: Some(ListValue::from(vec!["10.0.0.2/32", "10.1.0.0/24"])),
                persistent_keepalive: Some("25s".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        });
        assert_eq!(
            config.lines(WG_PEERS),
            ["add interface=wireguard-server public-key=abc= allowed-address=10.0.0.2/32,10.1.0.0/24 persistent-keepalive=25s"]
        );
    }

    #[test]
    fn test_peer_addresses_follow_index() {
        let users = vec![
            Credentials::new("alice", "x", &[VpnType::Wireguard]),
            Credentials::new("bob", "y", &[VpnType::OpenVPN]),
            Credentials::new("carol", "z", &[VpnType::Wireguard]),
        ];
        let server = WireguardServerConfig {
            interface: WireguardInterfaceConfig {
                interface_address: Some("10.20.0.1/24".to_string()),
                ..Default::default()
            },
            client_endpoint: Some("vpn.example.com".to_string()),
            ..Default::default()
        };
        let config = wireguard_server_users(&users, &server);
        let peers = config.lines(WG_PEERS);
        assert_eq!(peers.len(), 2);
        assert!(peers[0].contains("name=alice allowed-address=10.20.0.2/32"));
        assert!(peers[1].contains("name=carol allowed-address=10.20.0.3/32"));
        assert!(peers[0].contains("client-endpoint=vpn.example.com client-listen-port=13231"));
    }

    #[test]
    fn test_peers_stop_before_broadcast() {
        let users: Vec<Credentials> = (0..6)
            .map(|i| Credentials::new(&format!("user{}", i), "pw", &[VpnType::Wireguard]))
            .collect();
        let server = WireguardServerConfig {
            interface: WireguardInterfaceConfig {
                interface_address: Some("10.0.0.1/29".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = wireguard_server_users(&users, &server);
        let peers = config.lines(WG_PEERS);
        assert_eq!(peers.len(), 5);
        assert!(peers[4].contains("name=user4 allowed-address=10.0.0.6/32"));
        assert!(peers.iter().all(|p| !p.contains("10.0.0.7/32")));
    }

    #[test]
    fn test_invalid_address_falls_back() {
        let server = WireguardServerConfig {
            interface: WireguardInterfaceConfig {
                interface_address: Some("not-an-address".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = wireguard_server(&server);
        assert!(config.lines("/ip address")[0].contains("192.168.170.1/24"));
    }
}
