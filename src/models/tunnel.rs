use serde::{Deserialize, Serialize};

/// Fields common to the point-to-point tunnel types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TunnelEndpoints {
    pub name: String,
    pub local_address: Option<String>,
    pub remote_address: String,
    /// Address with prefix assigned to the tunnel interface itself.
    pub tunnel_address: Option<String>,
    pub ipsec_secret: Option<String>,
    /// Keepalive as `interval,retries`, e.g. `10s,10`.
    pub keepalive: Option<String>,
    pub mtu: Option<u16>,
    pub disabled: Option<bool>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IpipTunnelConfig {
    #[serde(flatten)]
    pub endpoints: TunnelEndpoints,
    pub dscp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EoipTunnelConfig {
    #[serde(flatten)]
    pub endpoints: TunnelEndpoints,
    pub tunnel_id: Option<u32>,
    pub mac_address: Option<String>,
    pub arp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GreTunnelConfig {
    #[serde(flatten)]
    pub endpoints: TunnelEndpoints,
    pub dscp: Option<String>,
}

/// A VXLAN remote tunnel endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VxlanVtep {
    pub remote_ip: String,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VxlanInterfaceConfig {
    pub name: String,
    pub vni: u32,
    pub port: Option<u16>,
    pub local_address: Option<String>,
    pub mtu: Option<u16>,
    pub tunnel_address: Option<String>,
    pub vteps: Vec<VxlanVtep>,
    pub learning: Option<bool>,
    pub disabled: Option<bool>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TunnelState {
    #[serde(rename = "IPIP")]
    pub ipip: Vec<IpipTunnelConfig>,
    #[serde(rename = "EoIP")]
    pub eoip: Vec<EoipTunnelConfig>,
    #[serde(rename = "GRE")]
    pub gre: Vec<GreTunnelConfig>,
    #[serde(rename = "VXLAN")]
    pub vxlan: Vec<VxlanInterfaceConfig>,
}

impl TunnelState {
    pub fn is_empty(&self) -> bool {
        self.ipip.is_empty() && self.eoip.is_empty() && self.gre.is_empty() && self.vxlan.is_empty()
    }

    pub fn count(&self) -> usize {
        self.ipip.len() + self.eoip.len() + self.gre.len() + self.vxlan.len()
    }
}
