//! Pieces shared by the PPP based servers (OpenVPN, PPTP, SSTP, L2TP)

use crate::generator::format::format_list;
use crate::generator::primitives::{
    address_list_entry, ip_pool, ppp_profile, ppp_secret, AddressListOptions, PoolOptions,
    PppProfileOptions, PppSecretOptions,
};
use crate::generator::merge::merge_router_configs;
use crate::models::{
    Credentials, ListValue, PppAuthMethod, PppProfileSettings, RouterConfig, VpnType,
};
use crate::utils::ip::network_cidr;

/// Address list every VPN client subnet is added to.
pub const VPN_ADDRESS_LIST: &str = "VPN-LAN";

/// Default pool/profile values of one PPP based server.
#[derive(Debug, Clone, Copy)]
pub struct PppDefaults {
    pub profile_name: &'static str,
    pub pool_name: &'static str,
    pub pool_range: &'static str,
    pub local_address: &'static str,
    pub dns_server: &'static str,
}

/// Pool, profile and VPN address-list entry, with caller values winning over
/// `defaults`.
pub fn pool_and_profile(settings: &PppProfileSettings, defaults: &PppDefaults) -> RouterConfig {
    let pool_name = settings.pool_name.as_deref().unwrap_or(defaults.pool_name);
    let local_address = settings
        .local_address
        .as_deref()
        .unwrap_or(defaults.local_address);
    let default_dns = ListValue::from(defaults.dns_server);
    let dns = settings.dns_server.as_ref().unwrap_or(&default_dns);

    let pool = ip_pool(&PoolOptions {
        name: pool_name,
        ranges: settings.pool_range.as_deref().unwrap_or(defaults.pool_range),
        ..Default::default()
    });
    let profile = ppp_profile(&PppProfileOptions {
        name: profile_name(settings, defaults),
        local_address: Some(local_address),
        remote_address: Some(pool_name),
        dns_server: Some(dns),
        use_encryption: Some(settings.use_encryption.unwrap_or(true)),
        only_one: settings.only_one,
        ..Default::default()
    });

    let subnet = network_cidr(&format!("{}/24", local_address))
        .unwrap_or_else(|| format!("{}/24", local_address));
    let list = address_list_entry(&AddressListOptions {
        address: &subnet,
        list: VPN_ADDRESS_LIST,
        ..Default::default()
    });

    merge_router_configs(&[&pool, &profile, &list])
}

pub fn profile_name<'a>(settings: &'a PppProfileSettings, defaults: &PppDefaults) -> &'a str {
    settings
        .profile_name
        .as_deref()
        .unwrap_or(defaults.profile_name)
}

/// One `/ppp secret` per user, in input order, with the `service=` of
/// `vpn_type`.
pub fn ppp_user_secrets(users: &[&Credentials], profile: &str, vpn_type: VpnType) -> RouterConfig {
    let service = vpn_type.ppp_service().unwrap_or("any");
    let secrets: Vec<RouterConfig> = users
        .iter()
        .map(|user| {
            ppp_secret(&PppSecretOptions {
                name: &user.username,
                password: &user.password,
                profile,
                service,
                ..Default::default()
            })
        })
        .collect();
    let refs: Vec<&RouterConfig> = secrets.iter().collect();
    merge_router_configs(&refs)
}

/// `authentication=` value, defaulting to `mschap2`.
pub fn authentication(methods: Option<&Vec<PppAuthMethod>>) -> String {
    match methods {
        Some(methods) if !methods.is_empty() => {
            let names: Vec<&str> = methods.iter().map(|m| m.as_str()).collect();
            format_list(&names)
        }
        _ => PppAuthMethod::Mschap2.as_str().to_string(),
    }
}
