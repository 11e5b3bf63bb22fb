//! IKEv2 road-warrior server
//!
//! Sections are emitted in the order the device resolves references:
//! pool, profile, proposal, policy group, policy template, mode-config, peer.
//! The users builder adds one mode-config and one identity per user; the
//! identities land after the peer they reference.

use log::warn;

use crate::generator::format::{quote_value, Command};
use crate::generator::merge::merge_router_configs;
use crate::generator::primitives::{
    address_list_entry, filter_rule, ip_pool, AddressListOptions, FilterOptions, PoolOptions,
};
use crate::generator::protocols::ppp::VPN_ADDRESS_LIST;
use crate::generator::protocols::VpnServerBuilder;
use crate::models::{
    Credentials, Ikev2ModeConfig, Ikev2PeerConfig, Ikev2ProfileConfig, Ikev2ProposalConfig,
    Ikev2ServerConfig, ListValue, RouterConfig, VpnType,
};

pub const IPSEC_PROFILE: &str = "/ip ipsec profile";
pub const IPSEC_PROPOSAL: &str = "/ip ipsec proposal";
pub const IPSEC_POLICY_GROUP: &str = "/ip ipsec policy group";
pub const IPSEC_POLICY: &str = "/ip ipsec policy";
pub const IPSEC_MODE_CONFIG: &str = "/ip ipsec mode-config";
pub const IPSEC_PEER: &str = "/ip ipsec peer";
pub const IPSEC_IDENTITY: &str = "/ip ipsec identity";

pub struct Ikev2Defaults {
    pub pool_name: &'static str,
    pub pool_range: &'static str,
    pub client_subnet: &'static str,
    /// Host number of the first user inside `client_subnet`.
    pub first_user_host: u32,
    pub profile_name: &'static str,
    pub hash_algorithm: &'static str,
    pub enc_algorithm: &'static str,
    pub dh_group: &'static str,
    pub profile_lifetime: &'static str,
    pub dpd_interval: &'static str,
    pub proposal_name: &'static str,
    pub auth_algorithms: &'static str,
    pub enc_algorithms: &'static str,
    /// `none` is the documented recommendation for road-warrior clients.
    pub pfs_group: &'static str,
    pub proposal_lifetime: &'static str,
    pub policy_group: &'static str,
    pub mode_config_name: &'static str,
    pub split_include: &'static str,
    pub static_dns: &'static str,
    pub peer_name: &'static str,
    pub exchange_mode: &'static str,
    pub auth_method: &'static str,
    pub certificate: &'static str,
}

pub const IKEV2_DEFAULTS: Ikev2Defaults = Ikev2Defaults {
    pool_name: "ike2-pool",
    pool_range: "192.168.77.100-192.168.77.254",
    client_subnet: "192.168.77",
    first_user_host: 10,
    profile_name: "ike2",
    hash_algorithm: "sha256",
    enc_algorithm: "aes-256",
    dh_group: "modp2048",
    profile_lifetime: "1d",
    dpd_interval: "2m",
    proposal_name: "ike2",
    auth_algorithms: "sha256",
    enc_algorithms: "aes-256-cbc",
    pfs_group: "none",
    proposal_lifetime: "30m",
    policy_group: "ike2-policies",
    mode_config_name: "ike2-conf",
    split_include: "0.0.0.0/0",
    static_dns: "1.1.1.1",
    peer_name: "ike2",
    exchange_mode: "ike2",
    auth_method: "pre-shared-key",
    certificate: "server-cert",
};

struct Resolved<'a> {
    profile: Ikev2ProfileConfig,
    proposal: Ikev2ProposalConfig,
    mode_config: Ikev2ModeConfig,
    peer: Ikev2PeerConfig,
    pool_name: &'a str,
    policy_group: &'a str,
    client_subnet: &'a str,
}

impl<'a> Resolved<'a> {
    fn new(config: &'a Ikev2ServerConfig) -> Self {
        let d = &IKEV2_DEFAULTS;
        Resolved {
            profile: config.profile.clone().unwrap_or_default(),
            proposal: config.proposal.clone().unwrap_or_default(),
            mode_config: config.mode_config.clone().unwrap_or_default(),
            peer: config.peer.clone().unwrap_or_default(),
            pool_name: config.pool_name.as_deref().unwrap_or(d.pool_name),
            policy_group: config.policy_group.as_deref().unwrap_or(d.policy_group),
            client_subnet: config.client_subnet.as_deref().unwrap_or(d.client_subnet),
        }
    }

    fn profile_name(&self) -> &str {
        self.profile
            .name
            .as_deref()
            .unwrap_or(IKEV2_DEFAULTS.profile_name)
    }

    fn proposal_name(&self) -> &str {
        self.proposal
            .name
            .as_deref()
            .unwrap_or(IKEV2_DEFAULTS.proposal_name)
    }

    fn peer_name(&self) -> &str {
        self.peer.name.as_deref().unwrap_or(IKEV2_DEFAULTS.peer_name)
    }

    fn split_include(&self) -> ListValue {
        self.mode_config
            .split_include
            .clone()
            .unwrap_or_else(|| ListValue::from(IKEV2_DEFAULTS.split_include))
    }

    fn static_dns(&self) -> ListValue {
        self.mode_config
            .static_dns
            .clone()
            .unwrap_or_else(|| ListValue::from(IKEV2_DEFAULTS.static_dns))
    }
}

pub struct Ikev2;

impl VpnServerBuilder for Ikev2 {
    type Config = Ikev2ServerConfig;

    const VPN_TYPE: VpnType = VpnType::IKeV2;

    fn server(config: &Ikev2ServerConfig) -> RouterConfig {
        let d = &IKEV2_DEFAULTS;
        let r = Resolved::new(config);
        let client_network = format!("{}.0/24", r.client_subnet);

        let pool = ip_pool(&PoolOptions {
            name: r.pool_name,
            ranges: config.pool_range.as_deref().unwrap_or(d.pool_range),
            ..Default::default()
        });

        let default_enc = ListValue::from(d.enc_algorithm);
        let default_dh = ListValue::from(d.dh_group);
        let default_auth_algs = ListValue::from(d.auth_algorithms);
        let default_enc_algs = ListValue::from(d.enc_algorithms);

        let mut ipsec = RouterConfig::new();
        ipsec.push(
            IPSEC_PROFILE,
            Command::add()
                .arg("name", r.profile_name())
                .arg(
                    "hash-algorithm",
                    r.profile.hash_algorithm.as_deref().unwrap_or(d.hash_algorithm),
                )
                .list(
                    "enc-algorithm",
                    r.profile.enc_algorithm.as_ref().unwrap_or(&default_enc),
                )
                .list("dh-group", r.profile.dh_group.as_ref().unwrap_or(&default_dh))
                .arg(
                    "lifetime",
                    r.profile.lifetime.as_deref().unwrap_or(d.profile_lifetime),
                )
                .flag("nat-traversal", r.profile.nat_traversal.unwrap_or(true))
                .arg(
                    "dpd-interval",
                    r.profile.dpd_interval.as_deref().unwrap_or(d.dpd_interval),
                ),
        );
        ipsec.push(
            IPSEC_PROPOSAL,
            Command::add()
                .arg("name", r.proposal_name())
                .list(
                    "auth-algorithms",
                    r.proposal.auth_algorithms.as_ref().unwrap_or(&default_auth_algs),
                )
                .list(
                    "enc-algorithms",
                    r.proposal.enc_algorithms.as_ref().unwrap_or(&default_enc_algs),
                )
                .arg(
                    "pfs-group",
                    r.proposal.pfs_group.as_deref().unwrap_or(d.pfs_group),
                )
                .arg(
                    "lifetime",
                    r.proposal.lifetime.as_deref().unwrap_or(d.proposal_lifetime),
                ),
        );
        ipsec.push(
            IPSEC_POLICY_GROUP,
            Command::add().arg("name", r.policy_group),
        );
        ipsec.push(
            IPSEC_POLICY,
            Command::add()
                .arg(
                    "dst-address",
                    config
                        .policy_dst_address
                        .as_deref()
                        .unwrap_or(&client_network),
                )
                .arg("group", r.policy_group)
                .arg("proposal", r.proposal_name())
                .arg("src-address", "0.0.0.0/0")
                .flag("template", true),
        );
        ipsec.push(
            IPSEC_MODE_CONFIG,
            Command::add()
                .arg(
                    "name",
                    r.mode_config.name.as_deref().unwrap_or(d.mode_config_name),
                )
                .arg("address-pool", r.pool_name)
                .arg(
                    "address-prefix-length",
                    r.mode_config.address_prefix_length.unwrap_or(32),
                )
                .flag("responder", true)
                .list("split-include", &r.split_include())
                .list("static-dns", &r.static_dns())
                .flag("system-dns", r.mode_config.system_dns.unwrap_or(false)),
        );
        ipsec.push(
            IPSEC_PEER,
            Command::add()
                .arg("name", r.peer_name())
                .arg(
                    "exchange-mode",
                    r.peer.exchange_mode.as_deref().unwrap_or(d.exchange_mode),
                )
                .opt("local-address", r.peer.local_address.as_deref())
                .flag("passive", r.peer.passive.unwrap_or(true))
                .arg("profile", r.profile_name())
                .flag(
                    "send-initial-contact",
                    r.peer.send_initial_contact.unwrap_or(true),
                ),
        );

        let ike = filter_rule(&FilterOptions {
            chain: "input",
            action: "accept",
            protocol: Some("udp"),
            dst_port: Some("500,4500"),
            comment: Some("Allow IKEv2"),
            ..Default::default()
        });
        let esp = filter_rule(&FilterOptions {
            chain: "input",
            action: "accept",
            protocol: Some("ipsec-esp"),
            comment: Some("Allow IKEv2 ESP"),
            ..Default::default()
        });
        let list = address_list_entry(&AddressListOptions {
            address: &client_network,
            list: VPN_ADDRESS_LIST,
            ..Default::default()
        });

        merge_router_configs(&[&pool, &ipsec, &ike, &esp, &list])
    }

    fn user_entries(users: &[&Credentials], config: &Ikev2ServerConfig) -> RouterConfig {
        let d = &IKEV2_DEFAULTS;
        let r = Resolved::new(config);
        let auth_method = config.auth_method.as_deref().unwrap_or(d.auth_method);
        let split_include = r.split_include();
        let static_dns = r.static_dns();

        let mut entries = RouterConfig::new();
        for (index, user) in users.iter().enumerate() {
            let host = d.first_user_host + u32::try_from(index).unwrap_or(u32::MAX);
            if host > 254 {
                warn!(
                    "IKEv2 client subnet {} exhausted at user '{}'",
                    r.client_subnet, user.username
                );
                break;
            }
            let mode_config = quote_value(&format!("ike2-{}", user.username));

            entries.push(
                IPSEC_MODE_CONFIG,
                Command::add()
                    .arg("name", &mode_config)
                    .arg("address", format!("{}.{}", r.client_subnet, host))
                    .arg(
                        "address-prefix-length",
                        r.mode_config.address_prefix_length.unwrap_or(32),
                    )
                    .flag("responder", true)
                    .list("split-include", &split_include)
                    .list("static-dns", &static_dns)
                    .flag("system-dns", r.mode_config.system_dns.unwrap_or(false)),
            );

            let mut identity = Command::add().arg("auth-method", auth_method);
            identity = if auth_method == "digital-signature" {
                identity.arg(
                    "certificate",
                    config.certificate.as_deref().unwrap_or(d.certificate),
                )
            } else {
                identity.quoted("secret", &user.password)
            };
            entries.push(
                IPSEC_IDENTITY,
                identity
                    .arg("generate-policy", "port-strict")
                    .arg("mode-config", &mode_config)
                    .arg("peer", r.peer_name())
                    .arg("policy-template-group", r.policy_group)
                    .arg(
                        "remote-id",
                        quote_value(&format!("user-fqdn:{}", user.username)),
                    ),
            );
        }
        entries
    }

    fn summary(config: &Ikev2ServerConfig) -> Vec<String> {
        let r = Resolved::new(config);
        vec![
            format!("Pool: {}", r.pool_name),
            format!(
                "Client addresses: {}.{}+",
                r.client_subnet, IKEV2_DEFAULTS.first_user_host
            ),
            format!("Policy group: {}", r.policy_group),
        ]
    }
}

pub fn ikev2_server(config: &Ikev2ServerConfig) -> RouterConfig {
    Ikev2::server(config).shortened()
}

pub fn ikev2_server_users(users: &[Credentials], config: &Ikev2ServerConfig) -> RouterConfig {
    Ikev2::users(users, config)
}

pub fn ikev2_server_wrapper(config: &Ikev2ServerConfig, users: &[Credentials]) -> RouterConfig {
    Ikev2::wrapper(config, users)
}
