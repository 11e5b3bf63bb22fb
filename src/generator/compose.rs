//! System-wide settings and the top-level composer

use log::{debug, info};

use crate::generator::format::Command;
use crate::generator::lan::{lan_cg, BRIDGE};
use crate::generator::merge::{hoist_sections, merge_router_configs};
use crate::generator::primitives::{
    filter_rule, scheduler_with_script, FilterOptions, ScheduledScript, INTERFACE_LIST,
};
use crate::generator::protocols::tunnels::{EOIP, GRE, IPIP, VXLAN};
use crate::generator::protocols::wan_links::{IP_DNS, LTE, LTE_APN, PPPOE_CLIENT, WAN_LIST};
use crate::generator::protocols::wireguard::WG_INTERFACE;
use crate::generator::protocols::wireless::WIFI;
use crate::generator::wan::wan_cg;
use crate::models::{ExtraConfig, RouterConfig, ScheduleConfig, StarState};

pub const SYSTEM_IDENTITY: &str = "/system identity";
pub const SYSTEM_CLOCK: &str = "/system clock";
pub const NTP_CLIENT: &str = "/system ntp client";
pub const NTP_CLIENT_SERVERS: &str = "/system ntp client servers";
pub const IP_SERVICE: &str = "/ip service";

/// Sections that create interfaces or interface lists. Composers emit
/// them before anything that references an interface by name.
pub const INTERFACE_SECTIONS: [&str; 11] = [
    INTERFACE_LIST,
    BRIDGE,
    PPPOE_CLIENT,
    LTE_APN,
    LTE,
    WIFI,
    WG_INTERFACE,
    IPIP,
    EOIP,
    GRE,
    VXLAN,
];

pub const DEFAULT_SCHEDULE_INTERVAL: &str = "1d";
pub const AUTO_REBOOT_SCRIPT: &str = "auto-reboot";
pub const AUTO_UPDATE_SCRIPT: &str = "auto-update";

const REBOOT_SOURCE: &str = "/system reboot";
const UPDATE_SOURCE: &str = "/system package update check-for-updates once; :delay 5s; :if ([/system package update get status] = \"New version is available\") do={ /system package update install }";

fn scheduled(name: &str, source: &str, schedule: &ScheduleConfig) -> RouterConfig {
    scheduler_with_script(&ScheduledScript {
        name,
        source,
        start_time: Some(schedule.time.as_str()),
        interval: Some(
            schedule
                .interval
                .as_deref()
                .unwrap_or(DEFAULT_SCHEDULE_INTERVAL),
        ),
        ..Default::default()
    })
}

fn dns(extra: &ExtraConfig) -> RouterConfig {
    let mut config = RouterConfig::new();
    let servers = extra.dns_servers.as_ref().filter(|s| !s.is_empty());
    if servers.is_none() && extra.allow_remote_dns.is_none() {
        return config;
    }

    let allow_remote = extra.allow_remote_dns.unwrap_or(false);
    config.push(
        IP_DNS,
        Command::set(None)
            .opt_list("servers", servers)
            .flag("allow-remote-requests", allow_remote),
    );
    if allow_remote {
        // the resolver must not answer the internet
        for protocol in ["udp", "tcp"] {
            config.merge(&filter_rule(&FilterOptions {
                chain: "input",
                action: "drop",
                protocol: Some(protocol),
                dst_port: Some("53"),
                in_interface_list: Some(WAN_LIST),
                comment: Some("Drop DNS from WAN"),
                ..Default::default()
            }));
        }
    }
    config
}

/// Identity, clock, NTP, DNS, IP services and maintenance schedules.
pub fn extra_cg(state: &StarState) -> RouterConfig {
    let extra = &state.extra_config;
    let mut config = RouterConfig::new();

    if let Some(identity) = extra.router_identity.as_deref() {
        config.push(SYSTEM_IDENTITY, Command::set(None).quoted("name", identity));
    }
    if let Some(timezone) = extra.timezone.as_deref() {
        config.push(
            SYSTEM_CLOCK,
            Command::set(None)
                .flag("time-zone-autodetect", false)
                .quoted("time-zone-name", timezone),
        );
    }
    if let Some(ntp) = extra.ntp_servers.as_ref().filter(|s| !s.is_empty()) {
        config.push(NTP_CLIENT, Command::set(None).flag("enabled", true));
        for server in ntp.to_vec() {
            config.push(
                NTP_CLIENT_SERVERS,
                Command::add().arg("address", server),
            );
        }
    }

    config.merge(&dns(extra));

    for service in &extra.disabled_services {
        debug!("disabling IP service {}", service);
        config.push(
            IP_SERVICE,
            Command::set(Some(service.as_str())).flag("disabled", true),
        );
    }

    if let Some(schedule) = &extra.auto_reboot {
        config.merge(&scheduled(AUTO_REBOOT_SCRIPT, REBOOT_SOURCE, schedule));
    }
    if let Some(schedule) = &extra.auto_update {
        config.merge(&scheduled(AUTO_UPDATE_SCRIPT, UPDATE_SOURCE, schedule));
    }

    config.shortened()
}

/// The whole router. Interface declarations from every part come first,
/// then system settings, WAN and LAN in that order.
pub fn generate(state: &StarState) -> RouterConfig {
    info!(
        "generating configuration (mode {:?}, firmware {:?})",
        state.choose.mode, state.choose.firmware
    );
    let extra = extra_cg(state);
    let wan = wan_cg(state);
    let lan = lan_cg(state);
    let merged = merge_router_configs(&[&extra, &wan, &lan]);
    let config = hoist_sections(&merged, &INTERFACE_SECTIONS).shortened();
    debug!(
        "generated {} section(s), {} line(s)",
        config.len(),
        config.line_count()
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::lan::BRIDGE_PORT;
    use crate::generator::primitives::{
        FIREWALL_FILTER, FIREWALL_NAT, INTERFACE_LIST_MEMBER, SYSTEM_SCHEDULER, SYSTEM_SCRIPT,
    };
    use crate::models::{
        LanState, ListValue, PppoeClientConfig, WanLinkConfig, WanState, WirelessConfig,
    };

    #[test]
    fn test_empty_extra() {
        assert!(extra_cg(&StarState::default()).is_empty());
    }

    #[test]
    fn test_identity_and_ntp() {
        let state = StarState {
            extra_config: ExtraConfig {
                router_identity: Some("Home Router".to_string()),
                timezone: Some("Europe/Berlin".to_string()),
                ntp_servers: Some(ListValue::from(vec!["0.pool.ntp.org", "1.pool.ntp.org"])),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = extra_cg(&state);
        assert_eq!(config.lines(SYSTEM_IDENTITY), ["set name=\"Home Router\""]);
        assert_eq!(
            config.lines(SYSTEM_CLOCK),
            ["set time-zone-autodetect=no time-zone-name=Europe/Berlin"]
        );
        assert_eq!(config.lines(NTP_CLIENT), ["set enabled=yes"]);
        assert_eq!(config.lines(NTP_CLIENT_SERVERS).len(), 2);
    }

    #[test]
    fn test_remote_dns_is_firewalled() {
        let state = StarState {
            extra_config: ExtraConfig {
                dns_servers: Some(ListValue::from("1.1.1.1")),
                allow_remote_dns: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = extra_cg(&state);
        assert_eq!(
            config.lines(IP_DNS),
            ["set servers=1.1.1.1 allow-remote-requests=yes"]
        );
        assert_eq!(config.lines(FIREWALL_FILTER).len(), 2);
    }

    #[test]
    fn test_services_and_reboot() {
        let state = StarState {
            extra_config: ExtraConfig {
                disabled_services: vec!["telnet".to_string(), "ftp".to_string()],
                auto_reboot: Some(ScheduleConfig {
                    time: "03:00:00".to_string(),
                    interval: None,
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = extra_cg(&state);
        assert_eq!(
            config.lines(IP_SERVICE),
            ["set telnet disabled=yes", "set ftp disabled=yes"]
        );
        assert!(config.lines(SYSTEM_SCRIPT)[0].contains("source=\"/system reboot\""));
        assert!(config.lines(SYSTEM_SCHEDULER)[0]
            .contains("name=auto-reboot interval=1d on-event=\"/system script run auto-reboot\""));
    }

    #[test]
    fn test_interfaces_declared_before_use() {
        let state = StarState {
            wan: WanState {
                wan_link: vec![
                    WanLinkConfig {
                        name: "Cable".to_string(),
                        interface_name: "ether2".to_string(),
                        ..Default::default()
                    },
                    WanLinkConfig {
                        name: "Fiber".to_string(),
                        interface_name: "ether1".to_string(),
                        pppoe: Some(PppoeClientConfig {
                            username: "user@isp".to_string(),
                            password: "secret".to_string(),
                            ..Default::default()
                        }),
                        ..Default::default()
                    },
                ],
            },
            lan: LanState {
                wireless: Some(vec![WirelessConfig {
                    ssid: "Home".to_string(),
                    password: "password123".to_string(),
                    ..Default::default()
                }]),
                ..Default::default()
            },
            extra_config: ExtraConfig {
                router_identity: Some("edge".to_string()),
                allow_remote_dns: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };

        let config = generate(&state);
        let sections: Vec<&str> = config.sections().collect();
        let at = |name: &str| {
            sections
                .iter()
                .position(|s| *s == name)
                .unwrap_or_else(|| panic!("missing section {}", name))
        };

        let member = at(INTERFACE_LIST_MEMBER);
        assert!(at(INTERFACE_LIST) < member);
        assert!(at(BRIDGE) < member);
        assert!(at(PPPOE_CLIENT) < member);
        assert!(at(INTERFACE_LIST) < at(FIREWALL_NAT));
        assert!(at(INTERFACE_LIST) < at(FIREWALL_FILTER));
        assert!(at(WIFI) < at(BRIDGE_PORT));
        assert!(at(BRIDGE) < at(BRIDGE_PORT));
        assert!(config
            .lines(INTERFACE_LIST_MEMBER)
            .contains(&"add interface=pppoe-Fiber list=WAN".to_string()));
    }

    #[test]
    fn test_generate_is_shortened() {
        let config = generate(&StarState::default());
        assert_eq!(config, config.shortened());
        assert!(config.contains_section("/interface bridge"));
    }
}
