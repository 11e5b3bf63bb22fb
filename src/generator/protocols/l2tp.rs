use crate::generator::format::{quote_value, Command};
use crate::generator::merge::merge_router_configs;
use crate::generator::primitives::{filter_rule, FilterOptions};
use crate::generator::protocols::ppp::{
    authentication, pool_and_profile, ppp_user_secrets, profile_name, PppDefaults,
};
use crate::generator::protocols::VpnServerBuilder;
use crate::models::{Credentials, L2tpServerConfig, RouterConfig, VpnType};

pub const L2TP_SERVER: &str = "/interface l2tp-server server";

pub struct L2tpDefaults {
    pub use_ipsec: &'static str,
    pub ipsec_secret: &'static str,
    pub keepalive_timeout: u32,
    pub max_mtu: u16,
    pub max_mru: u16,
    pub ppp: PppDefaults,
}

pub const L2TP_DEFAULTS: L2tpDefaults = L2tpDefaults {
    use_ipsec: "required",
    ipsec_secret: "l2tp-ipsec-secret",
    keepalive_timeout: 30,
    max_mtu: 1450,
    max_mru: 1450,
    ppp: PppDefaults {
        profile_name: "l2tp-profile",
        pool_name: "l2tp-pool",
        pool_range: "192.168.90.5-192.168.90.250",
        local_address: "192.168.90.1",
        dns_server: "1.1.1.1",
    },
};

pub struct L2tp;

impl VpnServerBuilder for L2tp {
    type Config = L2tpServerConfig;

    const VPN_TYPE: VpnType = VpnType::L2TP;

    fn server(config: &L2tpServerConfig) -> RouterConfig {
        let d = &L2TP_DEFAULTS;
        let use_ipsec = config.use_ipsec.as_deref().unwrap_or(d.use_ipsec);
        let base = pool_and_profile(&config.profile, &d.ppp);

        let mut command = Command::set(None)
            .flag("enabled", config.enabled.unwrap_or(true))
            .arg("authentication", authentication(config.authentication.as_ref()))
            .arg("default-profile", profile_name(&config.profile, &d.ppp))
            .arg("use-ipsec", use_ipsec);
        if use_ipsec != "no" {
            command = command.arg(
                "ipsec-secret",
                quote_value(config.ipsec_secret.as_deref().unwrap_or(d.ipsec_secret)),
            );
        }
        command = command
            .flag(
                "one-session-per-host",
                config.one_session_per_host.unwrap_or(true),
            )
            .flag("allow-fast-path", config.allow_fast_path.unwrap_or(false))
            .arg(
                "keepalive-timeout",
                config.keepalive_timeout.unwrap_or(d.keepalive_timeout),
            )
            .arg("max-mru", config.max_mru.unwrap_or(d.max_mru))
            .arg("max-mtu", config.max_mtu.unwrap_or(d.max_mtu));

        let mut server = RouterConfig::new();
        server.push(L2TP_SERVER, command);

        let udp = filter_rule(&FilterOptions {
            chain: "input",
            action: "accept",
            protocol: Some("udp"),
            dst_port: Some("500,1701,4500"),
            comment: Some("Allow L2TP/IPsec"),
            ..Default::default()
        });
        let esp = filter_rule(&FilterOptions {
            chain: "input",
            action: "accept",
            protocol: Some("ipsec-esp"),
            comment: Some("Allow L2TP IPsec ESP"),
            ..Default::default()
        });

        merge_router_configs(&[&base, &server, &udp, &esp])
    }

    fn user_entries(users: &[&Credentials], config: &L2tpServerConfig) -> RouterConfig {
        ppp_user_secrets(
            users,
            profile_name(&config.profile, &L2TP_DEFAULTS.ppp),
            Self::VPN_TYPE,
        )
    }

    fn summary(config: &L2tpServerConfig) -> Vec<String> {
        vec![
            "Ports: 500,1701,4500/udp".to_string(),
            format!(
                "IPsec: {}",
                config
                    .use_ipsec
                    .as_deref()
                    .unwrap_or(L2TP_DEFAULTS.use_ipsec)
            ),
        ]
    }
}

pub fn l2tp_server(config: &L2tpServerConfig) -> RouterConfig {
    L2tp::server(config).shortened()
}

pub fn l2tp_server_users(users: &[Credentials], config: &L2tpServerConfig) -> RouterConfig {
    L2tp::users(users, config)
}

pub fn l2tp_server_wrapper(config: &L2tpServerConfig, users: &[Credentials]) -> RouterConfig {
    L2tp::wrapper(config, users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipsec_secret_default() {
        let config = l2tp_server(&L2tpServerConfig::default());
        let line = &config.lines(L2TP_SERVER)[0];
        assert!(line.contains("use-ipsec=required ipsec-secret=l2tp-ipsec-secret"));
        assert!(line.contains("one-session-per-host=yes"));
    }

    #[test]
    fn test_ipsec_disabled_drops_secret() {
        let config = l2tp_server(&L2tpServerConfig {
            use_ipsec: Some("no".to_string()),
            ipsec_secret: Some("ignored".to_string()),
            ..Default::default()
        });
        assert!(!config.lines(L2TP_SERVER)[0].contains("ipsec-secret"));
    }
}
