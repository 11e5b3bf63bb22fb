//! Uplink connection types: DHCP, PPPoE, static addressing and LTE

use log::{debug, warn};

use crate::generator::format::{quote_value, Command};
use crate::generator::merge::merge_router_configs;
use crate::generator::primitives::{
    interface_list_member, ip_address, static_route, AddressOptions, RouteOptions,
};
use crate::models::{
    DhcpClientConfig, LteAdvancedSettings, PppoeClientConfig, RouterConfig, StaticIpConfig,
    WanLinkConfig,
};
use crate::utils::ip::prefix_from_subnet;

pub const DHCP_CLIENT: &str = "/ip dhcp-client";
pub const PPPOE_CLIENT: &str = "/interface pppoe-client";
pub const LTE_APN: &str = "/interface lte apn";
pub const LTE: &str = "/interface lte";
pub const IP_DNS: &str = "/ip dns";

/// Interface list every uplink joins.
pub const WAN_LIST: &str = "WAN";

pub const DEFAULT_LTE_INTERFACE: &str = "lte1";
pub const DEFAULT_STATIC_PREFIX: u8 = 24;

/// Routing distance of the link at `index`: the first link is preferred.
pub fn link_distance(link: &WanLinkConfig, index: usize) -> u8 {
    link.weight
        .unwrap_or_else(|| u8::try_from(index + 1).unwrap_or(u8::MAX))
}

pub fn dhcp_client(
    interface: &str,
    config: &DhcpClientConfig,
    distance: u8,
    comment: Option<&str>,
) -> RouterConfig {
    let mut out = RouterConfig::new();
    out.push(
        DHCP_CLIENT,
        Command::add()
            .arg("interface", interface)
            .flag("add-default-route", config.add_default_route.unwrap_or(true))
            .arg(
                "default-route-distance",
                config.default_route_distance.unwrap_or(distance),
            )
            .flag("use-peer-dns", config.use_peer_dns.unwrap_or(false))
            .flag("use-peer-ntp", config.use_peer_ntp.unwrap_or(false))
            .comment(comment),
    );
    out.shortened()
}

/// Name of the PPPoE client interface created for a link.
pub fn pppoe_interface_name(link_name: &str) -> String {
    format!("pppoe-{}", link_name)
}

pub fn pppoe_client(
    link_name: &str,
    interface: &str,
    config: &PppoeClientConfig,
    distance: u8,
) -> RouterConfig {
    let mut out = RouterConfig::new();
    out.push(
        PPPOE_CLIENT,
        Command::add()
            .quoted("name", &pppoe_interface_name(link_name))
            .arg("interface", interface)
            .quoted("user", &config.username)
            .quoted("password", &config.password)
            .opt_quoted("service-name", config.service_name.as_deref())
            .opt_quoted("ac-name", config.ac_name.as_deref())
            .opt("max-mtu", config.mtu)
            .opt("max-mru", config.mru)
            .opt("keepalive-timeout", config.keepalive_timeout)
            .flag("add-default-route", config.add_default_route.unwrap_or(true))
            .arg("default-route-distance", distance)
            .flag("use-peer-dns", config.use_peer_dns.unwrap_or(false))
            .flag("disabled", false),
    );
    out.shortened()
}

/// Address, default route and optional DNS servers for a static uplink.
/// A malformed subnet falls back to a /24.
pub fn static_ip(
    interface: &str,
    config: &StaticIpConfig,
    distance: u8,
    comment: Option<&str>,
) -> RouterConfig {
    let prefix = prefix_from_subnet(&config.subnet).unwrap_or_else(|| {
        warn!(
            "invalid subnet '{}' for {}, using /{}",
            config.subnet, interface, DEFAULT_STATIC_PREFIX
        );
        DEFAULT_STATIC_PREFIX
    });
    let address = format!("{}/{}", config.ip_address, prefix);

    let addr = ip_address(&AddressOptions {
        address: &address,
        interface,
        comment,
        ..Default::default()
    });
    let route = static_route(&RouteOptions {
        dst_address: Some("0.0.0.0/0"),
        gateway: &config.gateway,
        distance: Some(distance),
        check_gateway: Some("ping"),
        comment,
        ..Default::default()
    });

    let mut dns = RouterConfig::new();
    if let Some(servers) = config.dns.as_ref().filter(|d| !d.is_empty()) {
        dns.push(IP_DNS, Command::set(None).list("servers", servers));
    }

    merge_router_configs(&[&addr, &route, &dns]).shortened()
}

pub fn lte_config(interface: &str, config: &LteAdvancedSettings, distance: u8) -> RouterConfig {
    let profile = config.profile_name.as_deref().unwrap_or("wan-lte");
    let auth = config.auth_method.as_deref().unwrap_or("none");

    let mut apn = Command::add()
        .quoted("name", profile)
        .quoted("apn", &config.apn)
        .arg("authentication", auth);
    if auth != "none" {
        apn = apn
            .opt_quoted("user", config.username.as_deref())
            .opt_quoted("password", config.password.as_deref());
    }
    apn = apn
        .arg("ip-type", config.ip_type.as_deref().unwrap_or("ipv4"))
        .flag("add-default-route", true)
        .arg("default-route-distance", distance)
        .flag("use-peer-dns", false);

    let selector = format!("[ find default-name={} ]", interface);
    let modem = Command::set(Some(selector.as_str()))
        .quoted("apn-profiles", profile)
        .flag("allow-roaming", config.allow_roaming.unwrap_or(false))
        .opt_list("network-mode", config.network_mode.as_ref())
        .opt_list("band", config.band.as_ref());

    let mut out = RouterConfig::new();
    out.push(LTE_APN, apn);
    out.push(LTE, modem);
    out.shortened()
}

/// Full configuration of one uplink: its connection, then WAN list
/// membership of the resulting interface. When several connection types are set, PPPoE wins over
/// static, static over LTE, LTE over DHCP; with none set the link uses a
/// DHCP client.
pub fn wan_link_wrapper(link: &WanLinkConfig, index: usize) -> RouterConfig {
    let distance = link_distance(link, index);
    let name = if link.name.is_empty() {
        format!("WAN{}", index + 1)
    } else {
        link.name.clone()
    };
    debug!("building WAN link '{}' (distance {})", name, distance);

    let mut summary = RouterConfig::new();
    summary.comment(format!("WAN link {}: {}", name, link.interface_name));

    let (connection, out_interface) = if let Some(pppoe) = &link.pppoe {
        (
            pppoe_client(&name, &link.interface_name, pppoe, distance),
            pppoe_interface_name(&name),
        )
    } else if let Some(static_config) = &link.static_ip {
        (
            static_ip(&link.interface_name, static_config, distance, Some(name.as_str())),
            link.interface_name.clone(),
        )
    } else if let Some(lte) = &link.lte {
        let interface = if link.interface_name.is_empty() {
            DEFAULT_LTE_INTERFACE
        } else {
            link.interface_name.as_str()
        };
        (lte_config(interface, lte, distance), interface.to_string())
    } else {
        let dhcp = link.dhcp_client.clone().unwrap_or_default();
        (
            dhcp_client(&link.interface_name, &dhcp, distance, Some(name.as_str())),
            link.interface_name.clone(),
        )
    };

    let member = interface_list_member(WAN_LIST, &quote_value(&out_interface));
    merge_router_configs(&[&summary, &connection, &member]).shortened()
}
