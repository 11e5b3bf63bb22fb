use crate::generator::format::Command;
use crate::generator::merge::merge_router_configs;
use crate::generator::primitives::{filter_rule, FilterOptions};
use crate::generator::protocols::ppp::{
    authentication, pool_and_profile, ppp_user_secrets, profile_name, PppDefaults,
};
use crate::generator::protocols::VpnServerBuilder;
use crate::models::{Credentials, RouterConfig, SstpServerConfig, VpnType};

pub const SSTP_SERVER: &str = "/interface sstp-server server";

pub struct SstpDefaults {
    pub port: u16,
    pub certificate: &'static str,
    pub tls_version: &'static str,
    pub ciphers: &'static str,
    pub keepalive_timeout: u32,
    pub max_mtu: u16,
    pub max_mru: u16,
    pub ppp: PppDefaults,
}

pub const SSTP_DEFAULTS: SstpDefaults = SstpDefaults {
    port: 443,
    certificate: "server-cert",
    tls_version: "only-1.2",
    ciphers: "aes256-sha",
    keepalive_timeout: 30,
    max_mtu: 1450,
    max_mru: 1450,
    ppp: PppDefaults {
        profile_name: "sstp-profile",
        pool_name: "sstp-pool",
        pool_range: "192.168.80.5-192.168.80.250",
        local_address: "192.168.80.1",
        dns_server: "1.1.1.1",
    },
};

pub struct Sstp;

impl VpnServerBuilder for Sstp {
    type Config = SstpServerConfig;

    const VPN_TYPE: VpnType = VpnType::SSTP;

    fn server(config: &SstpServerConfig) -> RouterConfig {
        let d = &SSTP_DEFAULTS;
        let port = config.port.unwrap_or(d.port);
        let base = pool_and_profile(&config.profile, &d.ppp);

        let mut server = RouterConfig::new();
        server.push(
            SSTP_SERVER,
            Command::set(None)
                .flag("enabled", config.enabled.unwrap_or(true))
                .arg("port", port)
                .arg(
                    "certificate",
                    config.certificate.as_deref().unwrap_or(d.certificate),
                )
                .arg("authentication", authentication(config.authentication.as_ref()))
                .arg("default-profile", profile_name(&config.profile, &d.ppp))
                .arg(
                    "tls-version",
                    config.tls_version.as_deref().unwrap_or(d.tls_version),
                )
                .flag("pfs", config.pfs.unwrap_or(false))
                .arg("ciphers", config.ciphers.as_deref().unwrap_or(d.ciphers))
                .flag("force-aes", config.force_aes.unwrap_or(false))
                .flag(
                    "verify-client-certificate",
                    config.verify_client_certificate.unwrap_or(false),
                )
                .arg(
                    "keepalive-timeout",
                    config.keepalive_timeout.unwrap_or(d.keepalive_timeout),
                )
                .arg("max-mru", config.max_mru.unwrap_or(d.max_mru))
                .arg("max-mtu", config.max_mtu.unwrap_or(d.max_mtu)),
        );

        let port = port.to_string();
        let firewall = filter_rule(&FilterOptions {
            chain: "input",
            action: "accept",
            protocol: Some("tcp"),
            dst_port: Some(port.as_str()),
            comment: Some("Allow SSTP"),
            ..Default::default()
        });

        merge_router_configs(&[&base, &server, &firewall])
    }

    fn user_entries(users: &[&Credentials], config: &SstpServerConfig) -> RouterConfig {
        ppp_user_secrets(
            users,
            profile_name(&config.profile, &SSTP_DEFAULTS.ppp),
            Self::VPN_TYPE,
        )
    }

    fn summary(config: &SstpServerConfig) -> Vec<String> {
        vec![
            format!("Port: {}/tcp", config.port.unwrap_or(SSTP_DEFAULTS.port)),
            format!(
                "Certificate: {}",
                config
                    .certificate
                    .as_deref()
                    .unwrap_or(SSTP_DEFAULTS.certificate)
            ),
        ]
    }
}

pub fn sstp_server(config: &SstpServerConfig) -> RouterConfig {
    Sstp::server(config).shortened()
}

pub fn sstp_server_users(users: &[Credentials], config: &SstpServerConfig) -> RouterConfig {
    Sstp::users(users, config)
}

pub fn sstp_server_wrapper(config: &SstpServerConfig, users: &[Credentials]) -> RouterConfig {
    Sstp::wrapper(config, users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::primitives::{FIREWALL_FILTER, PPP_SECRET};

    #[test]
    fn test_custom_port_reaches_firewall() {
        let config = sstp_server(&SstpServerConfig {
            port: Some(4443),
            ..Default::default()
        });
        assert!(config.lines(SSTP_SERVER)[0].contains(" port=4443 "));
        assert_eq!(
            config.lines(FIREWALL_FILTER),
            ["add action=accept chain=input protocol=tcp dst-port=4443 comment=\"Allow SSTP\""]
        );
    }

    #[test]
    fn test_users_in_order() {
        let users = vec![
            Credentials::new("z", "1", &[VpnType::SSTP]),
            Credentials::new("y", "2", &[VpnType::SSTP, VpnType::L2TP]),
        ];
        let config = sstp_server_users(&users, &SstpServerConfig::default());
        let lines = config.lines(PPP_SECRET);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("add name=z "));
        assert!(lines[1].starts_with("add name=y "));
    }
}
