use serde::{Deserialize, Serialize};

/// One wireless network broadcast by the router.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WirelessConfig {
    #[serde(rename = "SSID")]
    pub ssid: String,
    pub password: String,
    pub is_hide: bool,
    pub is_disabled: bool,
    /// Broadcast separate SSIDs on 2.4 GHz and 5 GHz.
    pub split_band: bool,
    /// LAN network the wireless clients join. Defaults to the first network.
    pub network: Option<String>,
    pub country: Option<String>,
    /// Authentication types, e.g. `wpa2-psk,wpa3-psk`.
    pub authentication_types: Option<String>,
}

/// Radio band of a wifi interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiBand {
    Band2G,
    Band5G,
}

impl WifiBand {
    pub const ALL: [WifiBand; 2] = [WifiBand::Band2G, WifiBand::Band5G];

    /// `default-name` of the physical radio carrying this band.
    pub fn master_interface(self) -> &'static str {
        match self {
            WifiBand::Band2G => "wifi2",
            WifiBand::Band5G => "wifi1",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            WifiBand::Band2G => "2.4",
            WifiBand::Band5G => "5",
        }
    }
}
