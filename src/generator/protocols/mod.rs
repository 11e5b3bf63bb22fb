//! Per-protocol generators
//!
//! The VPN servers share one shape, captured by [`VpnServerBuilder`]: a
//! server builder, a users builder that filters the shared credential list by
//! protocol tag, and a wrapper that merges both under a summary comment
//! block. Tunnels, wireless and WAN links are not user based and expose plain
//! functions instead.

pub mod ikev2;
pub mod l2tp;
pub mod openvpn;
pub mod ppp;
pub mod pptp;
pub mod sstp;
pub mod tunnels;
pub mod wan_links;
pub mod wireguard;
pub mod wireless;

use log::debug;

use crate::generator::merge::merge_router_configs;
use crate::models::{filter_users, Credentials, RouterConfig, VpnType};

pub use ikev2::{ikev2_server, ikev2_server_users, ikev2_server_wrapper, Ikev2};
pub use l2tp::{l2tp_server, l2tp_server_users, l2tp_server_wrapper, L2tp};
pub use openvpn::{openvpn_server, openvpn_server_users, openvpn_server_wrapper, OpenVpn};
pub use pptp::{pptp_server, pptp_server_users, pptp_server_wrapper, Pptp};
pub use sstp::{sstp_server, sstp_server_users, sstp_server_wrapper, Sstp};
pub use tunnels::{eoip_tunnel, gre_tunnel, ipip_tunnel, tunnel_wrapper, vxlan_interface};
pub use wan_links::{dhcp_client, lte_config, pppoe_client, static_ip, wan_link_wrapper};
pub use wireguard::{wireguard_server, wireguard_server_users, wireguard_server_wrapper, Wireguard};
pub use wireless::wireless_config;

/// Config returned by a users builder when no user carries the protocol tag:
/// a single explanatory comment and nothing else.
pub fn no_users_config(vpn_type: VpnType) -> RouterConfig {
    let mut config = RouterConfig::new();
    config.comment(format!("No {} users configured", vpn_type.display_name()));
    config
}

/// Capability shared by the VPN server modules.
pub trait VpnServerBuilder {
    type Config: Default;

    const VPN_TYPE: VpnType;

    /// Server side resources (pool, profiles, server settings, firewall).
    fn server(config: &Self::Config) -> RouterConfig;

    /// Per-user resources for `users`, which are the users already filtered
    /// by [`Self::VPN_TYPE`] and never empty.
    fn user_entries(users: &[&Credentials], config: &Self::Config) -> RouterConfig;

    /// Key parameters echoed in the summary comment block.
    fn summary(config: &Self::Config) -> Vec<String>;

    /// Filter the credential list and build per-user resources, or the
    /// explanatory comment when nobody matches.
    fn users(users: &[Credentials], config: &Self::Config) -> RouterConfig {
        let matching = filter_users(users, Self::VPN_TYPE);
        if matching.is_empty() {
            debug!("no {} users", Self::VPN_TYPE.display_name());
            return no_users_config(Self::VPN_TYPE);
        }
        Self::user_entries(&matching, config).shortened()
    }

    /// Server plus users under a summary comment block.
    fn wrapper(config: &Self::Config, users: &[Credentials]) -> RouterConfig {
        let name = Self::VPN_TYPE.display_name();
        let user_count = filter_users(users, Self::VPN_TYPE).len();
        debug!("building {} server with {} user(s)", name, user_count);

        let mut summary = RouterConfig::new();
        summary.comment(format!("{} Server", name));
        summary.comment(format!("Users: {}", user_count));
        for line in Self::summary(config) {
            summary.comment(line);
        }

        let server = Self::server(config);
        let user_config = Self::users(users, config);
        merge_router_configs(&[&summary, &server, &user_config]).shortened()
    }
}
