use serde::{Deserialize, Serialize};

use super::common::ListValue;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DhcpClientConfig {
    pub use_peer_dns: Option<bool>,
    pub use_peer_ntp: Option<bool>,
    pub add_default_route: Option<bool>,
    pub default_route_distance: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PppoeClientConfig {
    pub username: String,
    pub password: String,
    pub service_name: Option<String>,
    pub ac_name: Option<String>,
    pub mtu: Option<u16>,
    pub mru: Option<u16>,
    pub keepalive_timeout: Option<u32>,
    pub use_peer_dns: Option<bool>,
    pub add_default_route: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StaticIpConfig {
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
    /// Prefix length (`24`) or dotted netmask (`255.255.255.0`).
    pub subnet: String,
    pub gateway: String,
    #[serde(rename = "DNS")]
    pub dns: Option<ListValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LteAdvancedSettings {
    #[serde(rename = "APN")]
    pub apn: String,
    pub profile_name: Option<String>,
    /// `none`, `pap` or `chap`.
    pub auth_method: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ip_type: Option<String>,
    pub allow_roaming: Option<bool>,
    pub network_mode: Option<ListValue>,
    pub band: Option<ListValue>,
}

/// One uplink of the router.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WanLinkConfig {
    pub name: String,
    /// Physical or logical interface carrying the link, e.g. `ether1`.
    pub interface_name: String,
    pub dhcp_client: Option<DhcpClientConfig>,
    #[serde(rename = "PPPoE")]
    pub pppoe: Option<PppoeClientConfig>,
    #[serde(rename = "StaticIP")]
    pub static_ip: Option<StaticIpConfig>,
    #[serde(rename = "LTE")]
    pub lte: Option<LteAdvancedSettings>,
    pub weight: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WanState {
    #[serde(rename = "WANLink")]
    pub wan_link: Vec<WanLinkConfig>,
}
