//! VPN server configuration records
//!
//! Every field is optional; the generators fill gaps from the per-protocol
//! defaults in [`crate::generator::protocols`].

use serde::{Deserialize, Serialize};

use super::common::{ListValue, PppAuthMethod, PppProfileSettings};
use super::credentials::Credentials;

/// A WireGuard interface on the router.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireguardInterfaceConfig {
    pub name: Option<String>,
    pub private_key: Option<String>,
    /// Router side address with prefix, e.g. `192.168.170.1/24`.
    pub interface_address: Option<String>,
    pub listen_port: Option<u16>,
    pub mtu: Option<u16>,
    pub comment: Option<String>,
}

/// A statically defined WireGuard peer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireguardPeerConfig {
    pub name: Option<String>,
    pub public_key: String,
    pub preshared_key: Option<String>,
    pub allowed_address: Option<ListValue>,
    pub endpoint_address: Option<String>,
    pub endpoint_port: Option<u16>,
    pub persistent_keepalive: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireguardServerConfig {
    pub interface: WireguardInterfaceConfig,
    pub peers: Vec<WireguardPeerConfig>,
    /// Public address clients use to reach the router.
    pub client_endpoint: Option<String>,
    pub client_dns: Option<String>,
    pub client_keepalive: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OpenVpnServerConfig {
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub port: Option<u16>,
    /// `tcp` or `udp`.
    pub protocol: Option<String>,
    /// `ip` or `ethernet`.
    pub mode: Option<String>,
    pub certificate: Option<String>,
    pub auth: Option<ListValue>,
    pub cipher: Option<ListValue>,
    pub require_client_certificate: Option<bool>,
    pub tls_version: Option<String>,
    pub netmask: Option<u8>,
    pub max_mtu: Option<u16>,
    pub keepalive_timeout: Option<u32>,
    pub profile: PppProfileSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PptpServerConfig {
    pub enabled: Option<bool>,
    pub authentication: Option<Vec<PppAuthMethod>>,
    pub keepalive_timeout: Option<u32>,
    pub max_mtu: Option<u16>,
    pub max_mru: Option<u16>,
    pub mrru: Option<String>,
    pub profile: PppProfileSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SstpServerConfig {
    pub enabled: Option<bool>,
    pub port: Option<u16>,
    pub certificate: Option<String>,
    pub authentication: Option<Vec<PppAuthMethod>>,
    pub tls_version: Option<String>,
    pub pfs: Option<bool>,
    pub ciphers: Option<String>,
    pub force_aes: Option<bool>,
    pub verify_client_certificate: Option<bool>,
    pub keepalive_timeout: Option<u32>,
    pub max_mtu: Option<u16>,
    pub max_mru: Option<u16>,
    pub profile: PppProfileSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct L2tpServerConfig {
    pub enabled: Option<bool>,
    /// `yes`, `no` or `required`.
    pub use_ipsec: Option<String>,
    pub ipsec_secret: Option<String>,
    pub authentication: Option<Vec<PppAuthMethod>>,
    pub one_session_per_host: Option<bool>,
    pub allow_fast_path: Option<bool>,
    pub keepalive_timeout: Option<u32>,
    pub max_mtu: Option<u16>,
    pub max_mru: Option<u16>,
    pub profile: PppProfileSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Ikev2ProfileConfig {
    pub name: Option<String>,
    pub hash_algorithm: Option<String>,
    pub enc_algorithm: Option<ListValue>,
    pub dh_group: Option<ListValue>,
    pub lifetime: Option<String>,
    pub nat_traversal: Option<bool>,
    pub dpd_interval: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Ikev2ProposalConfig {
    pub name: Option<String>,
    pub auth_algorithms: Option<ListValue>,
    pub enc_algorithms: Option<ListValue>,
    pub pfs_group: Option<String>,
    pub lifetime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Ikev2ModeConfig {
    pub name: Option<String>,
    pub address_prefix_length: Option<u8>,
    pub split_include: Option<ListValue>,
    pub static_dns: Option<ListValue>,
    pub system_dns: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Ikev2PeerConfig {
    pub name: Option<String>,
    pub exchange_mode: Option<String>,
    pub passive: Option<bool>,
    pub local_address: Option<String>,
    pub send_initial_contact: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Ikev2ServerConfig {
    pub pool_name: Option<String>,
    pub pool_range: Option<String>,
    /// First three octets of the per-user client addresses, e.g. `192.168.77`.
    pub client_subnet: Option<String>,
    pub profile: Option<Ikev2ProfileConfig>,
    pub proposal: Option<Ikev2ProposalConfig>,
    pub policy_group: Option<String>,
    pub policy_dst_address: Option<String>,
    pub mode_config: Option<Ikev2ModeConfig>,
    pub peer: Option<Ikev2PeerConfig>,
    /// `pre-shared-key` or `digital-signature`.
    pub auth_method: Option<String>,
    pub certificate: Option<String>,
}

/// VPN servers configured on the LAN side plus the shared user list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VpnServerState {
    pub users: Vec<Credentials>,
    pub wireguard_server: Option<WireguardServerConfig>,
    #[serde(rename = "OpenVpnServer")]
    pub openvpn_server: Option<OpenVpnServerConfig>,
    pub pptp_server: Option<PptpServerConfig>,
    pub sstp_server: Option<SstpServerConfig>,
    pub l2tp_server: Option<L2tpServerConfig>,
    pub ikev2_server: Option<Ikev2ServerConfig>,
}
