//! Whole-router intake state
//!
//! [`StarState`] is what the setup wizard collects. It is read-only input to
//! the composers in [`crate::generator`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterGenError};

use super::common::ListValue;
use super::tunnel::TunnelState;
use super::vpn::VpnServerState;
use super::wan::WanState;
use super::wireless::WirelessConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    #[serde(alias = "easy")]
    Easy,
    #[serde(alias = "advance")]
    Advance,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Firmware {
    #[default]
    MikroTik,
    OpenWRT,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChooseState {
    pub mode: Mode,
    pub firmware: Firmware,
    pub router_model: Option<String>,
}

/// A LAN segment served by its own bridge, interface list and DHCP server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LanNetwork {
    pub name: String,
    /// Router address with prefix, e.g. `192.168.10.1/24`.
    pub address: String,
    pub dhcp: Option<bool>,
    pub dns_server: Option<String>,
}

/// Assignment of a physical ethernet port to a LAN network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EthernetAssignment {
    pub interface: String,
    pub network: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LanState {
    pub networks: Vec<LanNetwork>,
    pub wireless: Option<Vec<WirelessConfig>>,
    #[serde(rename = "VPNServer")]
    pub vpn_server: Option<VpnServerState>,
    pub tunnel: Option<TunnelState>,
    pub interface: Option<Vec<EthernetAssignment>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScheduleConfig {
    /// Start time, `HH:MM:SS`.
    pub time: String,
    /// Repeat interval, e.g. `1d` or `7d`.
    pub interval: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExtraConfig {
    pub router_identity: Option<String>,
    pub timezone: Option<String>,
    #[serde(rename = "NTPServers")]
    pub ntp_servers: Option<ListValue>,
    #[serde(rename = "DNSServers")]
    pub dns_servers: Option<ListValue>,
    pub allow_remote_dns: Option<bool>,
    pub auto_reboot: Option<ScheduleConfig>,
    pub auto_update: Option<ScheduleConfig>,
    /// IP services to disable, e.g. `telnet`, `ftp`.
    pub disabled_services: Vec<String>,
}

/// Export presentation flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShowConfig {
    pub header: Option<bool>,
    pub comments: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StarState {
    pub choose: ChooseState,
    #[serde(rename = "WAN")]
    pub wan: WanState,
    #[serde(rename = "LAN")]
    pub lan: LanState,
    pub extra_config: ExtraConfig,
    pub show_config: ShowConfig,
}

/// Serialized forms a [`StarState`] can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFormat {
    Json,
    Yaml,
    Toml,
}

impl StateFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(StateFormat::Json),
            "yaml" | "yml" => Ok(StateFormat::Yaml),
            "toml" => Ok(StateFormat::Toml),
            _ => Err(RouterGenError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl StarState {
    pub fn from_content(content: &str, format: StateFormat) -> Result<Self> {
        let state = match format {
            StateFormat::Json => serde_json::from_str(content)?,
            StateFormat::Yaml => serde_yaml::from_str(content)?,
            StateFormat::Toml => toml::from_str(content)?,
        };
        Ok(state)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = StateFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        Self::from_content(&content, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            StateFormat::from_path(Path::new("router.YML")).unwrap(),
            StateFormat::Yaml
        );
        assert!(matches!(
            StateFormat::from_path(Path::new("router.ini")),
            Err(RouterGenError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_json_state_names() {
        let state = StarState::from_content(
            r#"{
                "Choose": {"Mode": "advance", "RouterModel": "hAP ax2"},
                "WAN": {"WANLink": [{"Name": "ISP", "InterfaceName": "ether1"}]},
                "LAN": {"VPNServer": {"Users": [{"Username": "a", "Password": "b", "VPNType": ["Wireguard"]}]}},
                "ExtraConfig": {"NTPServers": "pool.ntp.org"}
            }"#,
            StateFormat::Json,
        )
        .unwrap();
        assert_eq!(state.choose.mode, Mode::Advance);
        assert_eq!(state.wan.wan_link[0].interface_name, "ether1");
        let vpn = state.lan.vpn_server.unwrap();
        assert_eq!(vpn.users.len(), 1);
        assert!(state.extra_config.ntp_servers.is_some());
    }
}
