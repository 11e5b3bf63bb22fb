use crate::generator::format::Command;
use crate::generator::merge::merge_router_configs;
use crate::generator::primitives::{filter_rule, FilterOptions};
use crate::generator::protocols::ppp::{
    authentication, pool_and_profile, ppp_user_secrets, profile_name, PppDefaults,
};
use crate::generator::protocols::VpnServerBuilder;
use crate::models::{Credentials, PptpServerConfig, RouterConfig, VpnType};

pub const PPTP_SERVER: &str = "/interface pptp-server server";

pub struct PptpDefaults {
    pub keepalive_timeout: u32,
    pub max_mtu: u16,
    pub max_mru: u16,
    pub mrru: &'static str,
    pub ppp: PppDefaults,
}

pub const PPTP_DEFAULTS: PptpDefaults = PptpDefaults {
    keepalive_timeout: 30,
    max_mtu: 1450,
    max_mru: 1450,
    mrru: "disabled",
    ppp: PppDefaults {
        profile_name: "pptp-profile",
        pool_name: "pptp-pool",
        pool_range: "192.168.70.5-192.168.70.250",
        local_address: "192.168.70.1",
        dns_server: "1.1.1.1",
    },
};

pub struct Pptp;

impl VpnServerBuilder for Pptp {
    type Config = PptpServerConfig;

    const VPN_TYPE: VpnType = VpnType::PPTP;

    fn server(config: &PptpServerConfig) -> RouterConfig {
        let d = &PPTP_DEFAULTS;
        let base = pool_and_profile(&config.profile, &d.ppp);

        let mut server = RouterConfig::new();
        server.push(
            PPTP_SERVER,
            Command::set(None)
                .flag("enabled", config.enabled.unwrap_or(true))
                .arg("authentication", authentication(config.authentication.as_ref()))
                .arg("default-profile", profile_name(&config.profile, &d.ppp))
                .arg(
                    "keepalive-timeout",
                    config.keepalive_timeout.unwrap_or(d.keepalive_timeout),
                )
                .arg("max-mru", config.max_mru.unwrap_or(d.max_mru))
                .arg("max-mtu", config.max_mtu.unwrap_or(d.max_mtu))
                .arg("mrru", config.mrru.as_deref().unwrap_or(d.mrru)),
        );

        let tcp = filter_rule(&FilterOptions {
            chain: "input",
            action: "accept",
            protocol: Some("tcp"),
            dst_port: Some("1723"),
            comment: Some("Allow PPTP"),
            ..Default::default()
        });
        let gre = filter_rule(&FilterOptions {
            chain: "input",
            action: "accept",
            protocol: Some("gre"),
            comment: Some("Allow PPTP GRE"),
            ..Default::default()
        });

        merge_router_configs(&[&base, &server, &tcp, &gre])
    }

    fn user_entries(users: &[&Credentials], config: &PptpServerConfig) -> RouterConfig {
        ppp_user_secrets(
            users,
            profile_name(&config.profile, &PPTP_DEFAULTS.ppp),
            Self::VPN_TYPE,
        )
    }

    fn summary(config: &PptpServerConfig) -> Vec<String> {
        vec![
            "Port: 1723/tcp".to_string(),
            format!(
                "Pool: {}",
                config
                    .profile
                    .pool_name
                    .as_deref()
                    .unwrap_or(PPTP_DEFAULTS.ppp.pool_name)
            ),
        ]
    }
}

pub fn pptp_server(config: &PptpServerConfig) -> RouterConfig {
    Pptp::server(config).shortened()
}

pub fn pptp_server_users(users: &[Credentials], config: &PptpServerConfig) -> RouterConfig {
    Pptp::users(users, config)
}

pub fn pptp_server_wrapper(config: &PptpServerConfig, users: &[Credentials]) -> RouterConfig {
    Pptp::wrapper(config, users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::primitives::FIREWALL_FILTER;
    use crate::models::PppAuthMethod;

    #[test]
    fn test_server_set_line() {
        let config = pptp_server(&PptpServerConfig {
            authentication: Some(vec![PppAuthMethod::Mschap2, PppAuthMethod::Mschap1]),
            ..Default::default()
        });
        assert_eq!(
            config.lines(PPTP_SERVER),
            ["set enabled=yes authentication=mschap2,mschap1 default-profile=pptp-profile keepalive-timeout=30 max-mru=1450 max-mtu=1450 mrru=disabled"]
        );
        assert_eq!(config.lines(FIREWALL_FILTER).len(), 2);
    }

    #[test]
    fn test_no_users_comment() {
        let users = vec![Credentials::new("a", "pa", &[VpnType::SSTP])];
        let config = pptp_server_users(&users, &PptpServerConfig::default());
        assert_eq!(config.len(), 1);
        assert_eq!(config.lines(""), ["# No PPTP users configured"]);
    }
}
