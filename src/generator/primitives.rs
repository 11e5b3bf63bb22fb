//! Single-resource generators
//!
//! Each function turns one options record into a [`RouterConfig`] holding the
//! command(s) for that resource. Options left as `None` are omitted from the
//! emitted line; nothing is validated.

use crate::generator::format::{quote_value, Command};
use crate::models::{ListValue, RouterConfig};

pub const IP_POOL: &str = "/ip pool";
pub const IP_ADDRESS: &str = "/ip address";
pub const IP_ROUTE: &str = "/ip route";
pub const IP_ARP: &str = "/ip arp";
pub const FIREWALL_NAT: &str = "/ip firewall nat";
pub const FIREWALL_FILTER: &str = "/ip firewall filter";
pub const FIREWALL_ADDRESS_LIST: &str = "/ip firewall address-list";
pub const INTERFACE_LIST: &str = "/interface list";
pub const INTERFACE_LIST_MEMBER: &str = "/interface list member";
pub const PPP_PROFILE: &str = "/ppp profile";
pub const PPP_SECRET: &str = "/ppp secret";
pub const SYSTEM_SCRIPT: &str = "/system script";
pub const SYSTEM_SCHEDULER: &str = "/system scheduler";

#[derive(Debug, Clone, Default)]
pub struct PoolOptions<'a> {
    pub name: &'a str,
    pub ranges: &'a str,
    pub next_pool: Option<&'a str>,
    pub comment: Option<&'a str>,
}

pub fn ip_pool(options: &PoolOptions) -> RouterConfig {
    let mut config = RouterConfig::new();
    config.push(
        IP_POOL,
        Command::add()
            .arg("name", options.name)
            .arg("ranges", options.ranges)
            .opt("next-pool", options.next_pool)
            .comment(options.comment),
    );
    config
}

#[derive(Debug, Clone, Default)]
pub struct AddressOptions<'a> {
    pub address: &'a str,
    pub interface: &'a str,
    pub network: Option<&'a str>,
    pub comment: Option<&'a str>,
}

pub fn ip_address(options: &AddressOptions) -> RouterConfig {
    let mut config = RouterConfig::new();
    config.push(
        IP_ADDRESS,
        Command::add()
            .arg("address", options.address)
            .arg("interface", options.interface)
            .opt("network", options.network)
            .comment(options.comment),
    );
    config
}

#[derive(Debug, Clone, Default)]
pub struct RouteOptions<'a> {
    pub dst_address: Option<&'a str>,
    pub gateway: &'a str,
    pub distance: Option<u8>,
    pub routing_table: Option<&'a str>,
    pub check_gateway: Option<&'a str>,
    pub scope: Option<u8>,
    pub target_scope: Option<u8>,
    pub comment: Option<&'a str>,
}

pub fn static_route(options: &RouteOptions) -> RouterConfig {
    let mut config = RouterConfig::new();
    config.push(
        IP_ROUTE,
        Command::add()
            .opt("dst-address", options.dst_address)
            .arg("gateway", options.gateway)
            .opt("distance", options.distance)
            .opt("routing-table", options.routing_table)
            .opt("check-gateway", options.check_gateway)
            .opt("scope", options.scope)
            .opt("target-scope", options.target_scope)
            .comment(options.comment),
    );
    config
}

#[derive(Debug, Clone, Default)]
pub struct ArpOptions<'a> {
    pub address: &'a str,
    pub mac_address: &'a str,
    pub interface: &'a str,
    pub comment: Option<&'a str>,
}

pub fn arp_entry(options: &ArpOptions) -> RouterConfig {
    let mut config = RouterConfig::new();
    config.push(
        IP_ARP,
        Command::add()
            .arg("address", options.address)
            .arg("interface", options.interface)
            .arg("mac-address", options.mac_address)
            .comment(options.comment),
    );
    config
}

#[derive(Debug, Clone, Default)]
pub struct NatOptions<'a> {
    pub chain: &'a str,
    pub action: &'a str,
    pub src_address: Option<&'a str>,
    pub dst_address: Option<&'a str>,
    pub protocol: Option<&'a str>,
    pub dst_port: Option<&'a str>,
    pub in_interface: Option<&'a str>,
    pub in_interface_list: Option<&'a str>,
    pub out_interface: Option<&'a str>,
    pub out_interface_list: Option<&'a str>,
    pub to_addresses: Option<&'a str>,
    pub to_ports: Option<&'a str>,
    pub comment: Option<&'a str>,
}

pub fn nat_rule(options: &NatOptions) -> RouterConfig {
    let mut config = RouterConfig::new();
    config.push(
        FIREWALL_NAT,
        Command::add()
            .arg("action", options.action)
            .arg("chain", options.chain)
            .opt("src-address", options.src_address)
            .opt("dst-address", options.dst_address)
            .opt("protocol", options.protocol)
            .opt("dst-port", options.dst_port)
            .opt("in-interface", options.in_interface)
            .opt("in-interface-list", options.in_interface_list)
            .opt("out-interface", options.out_interface)
            .opt("out-interface-list", options.out_interface_list)
            .opt("to-addresses", options.to_addresses)
            .opt("to-ports", options.to_ports)
            .comment(options.comment),
    );
    config
}

#[derive(Debug, Clone, Default)]
pub struct FilterOptions<'a> {
    pub chain: &'a str,
    pub action: &'a str,
    pub protocol: Option<&'a str>,
    pub dst_port: Option<&'a str>,
    pub src_address: Option<&'a str>,
    pub src_address_list: Option<&'a str>,
    pub in_interface_list: Option<&'a str>,
    pub connection_state: Option<&'a str>,
    pub comment: Option<&'a str>,
}

pub fn filter_rule(options: &FilterOptions) -> RouterConfig {
    let mut config = RouterConfig::new();
    config.push(
        FIREWALL_FILTER,
        Command::add()
            .arg("action", options.action)
            .arg("chain", options.chain)
            .opt("connection-state", options.connection_state)
            .opt("protocol", options.protocol)
            .opt("dst-port", options.dst_port)
            .opt("src-address", options.src_address)
            .opt("src-address-list", options.src_address_list)
            .opt("in-interface-list", options.in_interface_list)
            .comment(options.comment),
    );
    config
}

#[derive(Debug, Clone, Default)]
pub struct AddressListOptions<'a> {
    pub address: &'a str,
    pub list: &'a str,
    pub timeout: Option<&'a str>,
    pub comment: Option<&'a str>,
}

pub fn address_list_entry(options: &AddressListOptions) -> RouterConfig {
    let mut config = RouterConfig::new();
    config.push(
        FIREWALL_ADDRESS_LIST,
        Command::add()
            .arg("address", options.address)
            .arg("list", options.list)
            .opt("timeout", options.timeout)
            .comment(options.comment),
    );
    config
}

pub fn interface_list_member(list: &str, interface: &str) -> RouterConfig {
    let mut config = RouterConfig::new();
    config.push(
        INTERFACE_LIST_MEMBER,
        Command::add().arg("interface", interface).arg("list", list),
    );
    config
}

#[derive(Debug, Clone, Default)]
pub struct PppProfileOptions<'a> {
    pub name: &'a str,
    pub local_address: Option<&'a str>,
    pub remote_address: Option<&'a str>,
    pub dns_server: Option<&'a ListValue>,
    pub use_encryption: Option<bool>,
    pub only_one: Option<bool>,
    pub bridge: Option<&'a str>,
    pub interface_list: Option<&'a str>,
    pub comment: Option<&'a str>,
}

pub fn ppp_profile(options: &PppProfileOptions) -> RouterConfig {
    let mut config = RouterConfig::new();
    config.push(
        PPP_PROFILE,
        Command::add()
            .arg("name", options.name)
            .opt("local-address", options.local_address)
            .opt("remote-address", options.remote_address)
            .opt_list("dns-server", options.dns_server)
            .opt_flag("use-encryption", options.use_encryption)
            .opt_flag("only-one", options.only_one)
            .opt("bridge", options.bridge)
            .opt("interface-list", options.interface_list)
            .comment(options.comment),
    );
    config
}

#[derive(Debug, Clone, Default)]
pub struct PppSecretOptions<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub profile: &'a str,
    pub service: &'a str,
    pub remote_address: Option<&'a str>,
    pub comment: Option<&'a str>,
}

pub fn ppp_secret(options: &PppSecretOptions) -> RouterConfig {
    let mut config = RouterConfig::new();
    config.push(
        PPP_SECRET,
        Command::add()
            .quoted("name", options.name)
            .quoted("password", options.password)
            .arg("profile", options.profile)
            .arg("service", options.service)
            .opt("remote-address", options.remote_address)
            .comment(options.comment),
    );
    config
}

/// A `/system script` and the `/system scheduler` entry that runs it.
#[derive(Debug, Clone, Default)]
pub struct ScheduledScript<'a> {
    pub name: &'a str,
    pub source: &'a str,
    pub start_time: Option<&'a str>,
    pub start_date: Option<&'a str>,
    pub interval: Option<&'a str>,
    pub policy: Option<&'a str>,
    pub comment: Option<&'a str>,
}

const DEFAULT_SCRIPT_POLICY: &str = "ftp,reboot,read,write,policy,test,password,sniff,sensitive,romon";

pub fn scheduler_with_script(options: &ScheduledScript) -> RouterConfig {
    let policy = options.policy.unwrap_or(DEFAULT_SCRIPT_POLICY);
    let mut config = RouterConfig::new();

    config.push(
        SYSTEM_SCRIPT,
        Command::add()
            .arg("dont-require-permissions", "no")
            .arg("name", options.name)
            .arg("owner", "admin")
            .arg("policy", policy)
            .quoted("source", options.source)
            .comment(options.comment),
    );
    config.push(
        SYSTEM_SCHEDULER,
        Command::add()
            .arg("name", options.name)
            .opt("interval", options.interval)
            .arg("on-event", quote_value(&format!("/system script run {}", options.name)))
            .arg("policy", policy)
            .opt("start-date", options.start_date)
            .opt("start-time", options.start_time)
            .comment(options.comment),
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_pool_omits_absent_fields() {
        let config = ip_pool(&PoolOptions {
            name: "vpn-pool",
            ranges: "10.0.0.2-10.0.0.254",
            ..Default::default()
        });
        assert_eq!(
            config.lines(IP_POOL),
            ["add name=vpn-pool ranges=10.0.0.2-10.0.0.254"]
        );
    }

    #[test]
    fn test_static_route() {
        let config = static_route(&RouteOptions {
            dst_address: Some("0.0.0.0/0"),
            gateway: "192.0.2.1",
            distance: Some(2),
            comment: Some("WAN2 route"),
            ..Default::default()
        });
        assert_eq!(
            config.lines(IP_ROUTE),
            ["add dst-address=0.0.0.0/0 gateway=192.0.2.1 distance=2 comment=\"WAN2 route\""]
        );
    }

    #[test]
    fn test_nat_masquerade() {
        let config = nat_rule(&NatOptions {
            chain: "srcnat",
            action: "masquerade",
            out_interface_list: Some("WAN"),
            ..Default::default()
        });
        assert_eq!(
            config.lines(FIREWALL_NAT),
            ["add action=masquerade chain=srcnat out-interface-list=WAN"]
        );
    }

    #[test]
    fn test_arp_entry() {
        let config = arp_entry(&ArpOptions {
            address: "192.168.10.20",
            mac_address: "AA:BB:CC:DD:EE:FF",
            interface: "LANBridge",
            comment: None,
        });
        assert_eq!(
            config.lines(IP_ARP),
            ["add address=192.168.10.20 interface=LANBridge mac-address=AA:BB:CC:DD:EE:FF"]
        );
    }

    #[test]
    fn test_ppp_secret_quotes_credentials() {
        let config = ppp_secret(&PppSecretOptions {
            name: "john doe",
            password: "p@ss",
            profile: "pptp-profile",
            service: "pptp",
            ..Default::default()
        });
        assert_eq!(
            config.lines(PPP_SECRET),
            ["add name=\"john doe\" password=p@ss profile=pptp-profile service=pptp"]
        );
    }

    #[test]
    fn test_script_declared_before_scheduler() {
        let config = scheduler_with_script(&ScheduledScript {
            name: "reboot",
            source: "/system reboot",
            start_time: Some("04:00:00"),
            interval: Some("1d"),
            ..Default::default()
        });
        let order: Vec<&str> = config.sections().collect();
        assert_eq!(order, vec![SYSTEM_SCRIPT, SYSTEM_SCHEDULER]);
        assert!(config.lines(SYSTEM_SCRIPT)[0].contains("source=\"/system reboot\""));
        assert!(config.lines(SYSTEM_SCHEDULER)[0]
            .contains("on-event=\"/system script run reboot\""));
        assert!(config.lines(SYSTEM_SCHEDULER)[0].contains("start-time=04:00:00"));
    }
}
