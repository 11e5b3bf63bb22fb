use crate::generator::format::Command;
use crate::generator::merge::merge_router_configs;
use crate::generator::primitives::{filter_rule, FilterOptions};
use crate::generator::protocols::ppp::{
    pool_and_profile, ppp_user_secrets, profile_name, PppDefaults,
};
use crate::generator::protocols::VpnServerBuilder;
use crate::models::{Credentials, ListValue, OpenVpnServerConfig, RouterConfig, VpnType};

pub const OVPN_SERVER: &str = "/interface ovpn-server server";

/// Factory values for the OpenVPN server.
pub struct OpenVpnDefaults {
    pub name: &'static str,
    pub port: u16,
    pub protocol: &'static str,
    pub mode: &'static str,
    pub certificate: &'static str,
    pub auth: &'static str,
    pub cipher: &'static str,
    pub tls_version: &'static str,
    pub netmask: u8,
    pub max_mtu: u16,
    pub keepalive_timeout: u32,
    pub ppp: PppDefaults,
}

pub const OPENVPN_DEFAULTS: OpenVpnDefaults = OpenVpnDefaults {
    name: "ovpn-server",
    port: 1194,
    protocol: "udp",
    mode: "ip",
    certificate: "server-cert",
    auth: "sha256",
    cipher: "aes256-cbc",
    tls_version: "only-1.2",
    netmask: 24,
    max_mtu: 1450,
    keepalive_timeout: 30,
    ppp: PppDefaults {
        profile_name: "ovpn-profile",
        pool_name: "ovpn-pool",
        pool_range: "192.168.60.5-192.168.60.250",
        local_address: "192.168.60.1",
        dns_server: "1.1.1.1",
    },
};

pub struct OpenVpn;

impl VpnServerBuilder for OpenVpn {
    type Config = OpenVpnServerConfig;

    const VPN_TYPE: VpnType = VpnType::OpenVPN;

    fn server(config: &OpenVpnServerConfig) -> RouterConfig {
        let d = &OPENVPN_DEFAULTS;
        let port = config.port.unwrap_or(d.port);
        let protocol = config.protocol.as_deref().unwrap_or(d.protocol);
        let default_auth = ListValue::from(d.auth);
        let default_cipher = ListValue::from(d.cipher);

        let base = pool_and_profile(&config.profile, &d.ppp);

        let mut server = RouterConfig::new();
        server.push(
            OVPN_SERVER,
            Command::add()
                .arg("name", config.name.as_deref().unwrap_or(d.name))
                .flag("disabled", !config.enabled.unwrap_or(true))
                .arg("port", port)
                .arg("protocol", protocol)
                .arg("mode", config.mode.as_deref().unwrap_or(d.mode))
                .arg("netmask", config.netmask.unwrap_or(d.netmask))
                .arg("default-profile", profile_name(&config.profile, &d.ppp))
                .arg(
                    "certificate",
                    config.certificate.as_deref().unwrap_or(d.certificate),
                )
                .list("auth", config.auth.as_ref().unwrap_or(&default_auth))
                .list("cipher", config.cipher.as_ref().unwrap_or(&default_cipher))
                .flag(
                    "require-client-certificate",
                    config.require_client_certificate.unwrap_or(false),
                )
                .arg(
                    "tls-version",
                    config.tls_version.as_deref().unwrap_or(d.tls_version),
                )
                .arg("max-mtu", config.max_mtu.unwrap_or(d.max_mtu))
                .arg(
                    "keepalive-timeout",
                    config.keepalive_timeout.unwrap_or(d.keepalive_timeout),
                ),
        );

        let port = port.to_string();
        let firewall = filter_rule(&FilterOptions {
            chain: "input",
            action: "accept",
            protocol: Some(protocol),
            dst_port: Some(port.as_str()),
            comment: Some("Allow OpenVPN"),
            ..Default::default()
        });

        merge_router_configs(&[&base, &server, &firewall])
    }

    fn user_entries(users: &[&Credentials], config: &OpenVpnServerConfig) -> RouterConfig {
        ppp_user_secrets(
            users,
            profile_name(&config.profile, &OPENVPN_DEFAULTS.ppp),
            Self::VPN_TYPE,
        )
    }

    fn summary(config: &OpenVpnServerConfig) -> Vec<String> {
        let d = &OPENVPN_DEFAULTS;
        vec![
            format!(
                "Port: {}/{}",
                config.port.unwrap_or(d.port),
                config.protocol.as_deref().unwrap_or(d.protocol)
            ),
            format!(
                "Pool: {}",
                config.profile.pool_name.as_deref().unwrap_or(d.ppp.pool_name)
            ),
        ]
    }
}

pub fn openvpn_server(config: &OpenVpnServerConfig) -> RouterConfig {
    OpenVpn::server(config).shortened()
}

pub fn openvpn_server_users(users: &[Credentials], config: &OpenVpnServerConfig) -> RouterConfig {
    OpenVpn::users(users, config)
}

pub fn openvpn_server_wrapper(config: &OpenVpnServerConfig, users: &[Credentials]) -> RouterConfig {
    OpenVpn::wrapper(config, users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::primitives::{IP_POOL, PPP_PROFILE, PPP_SECRET};

    #[test]
    fn test_default_server() {
        let config = openvpn_server(&OpenVpnServerConfig::default());
        assert_eq!(
            config.lines(OVPN_SERVER),
            ["add name=ovpn-server disabled=no port=1194 protocol=udp mode=ip netmask=24 default-profile=ovpn-profile certificate=server-cert auth=sha256 cipher=aes256-cbc require-client-certificate=no tls-version=only-1.2 max-mtu=1450 keepalive-timeout=30"]
        );
        let order: Vec<&str> = config.sections().collect();
        assert_eq!(&order[..3], &[IP_POOL, PPP_PROFILE, "/ip firewall address-list"]);
    }

    #[test]
    fn test_users_use_ovpn_service() {
        let users = vec![
            Credentials::new("a", "pa", &[VpnType::OpenVPN]),
            Credentials::new("b", "pb", &[VpnType::PPTP]),
        ];
        let config = openvpn_server_users(&users, &OpenVpnServerConfig::default());
        assert_eq!(
            config.lines(PPP_SECRET),
            ["add name=a password=pa profile=ovpn-profile service=ovpn"]
        );
    }

    #[test]
    fn test_wrapper_summary_first() {
        let users = vec![Credentials::new("a", "pa", &[VpnType::OpenVPN])];
        let config = openvpn_server_wrapper(&OpenVpnServerConfig::default(), &users);
        let first = config.sections().next();
        assert_eq!(first, Some(""));
        assert!(config.lines("").contains(&"# Users: 1".to_string()));
    }
}
