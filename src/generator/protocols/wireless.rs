//! RouterOS 7 `wifi` package configuration
//!
//! The first network takes over the physical radios; every further network
//! becomes a virtual interface on top of them.

use log::debug;

use crate::generator::format::Command;
use crate::generator::lan::{bridge_name, BRIDGE_PORT, DEFAULT_NETWORK};
use crate::models::{RouterConfig, WifiBand, WirelessConfig};

pub const WIFI: &str = "/interface wifi";

pub const DEFAULT_AUTHENTICATION_TYPES: &str = "wpa2-psk,wpa3-psk";

fn ssid_for(config: &WirelessConfig, band: WifiBand) -> String {
    if config.split_band {
        format!("{}-{}", config.ssid, band.suffix())
    } else {
        config.ssid.clone()
    }
}

fn radio_args(command: Command, config: &WirelessConfig, band: WifiBand) -> Command {
    command
        .arg("configuration.mode", "ap")
        .quoted("configuration.ssid", &ssid_for(config, band))
        .flag("configuration.hide-ssid", config.is_hide)
        .opt_quoted("configuration.country", config.country.as_deref())
        .arg(
            "security.authentication-types",
            config
                .authentication_types
                .as_deref()
                .unwrap_or(DEFAULT_AUTHENTICATION_TYPES),
        )
        .quoted("security.passphrase", &config.password)
        .flag("disabled", config.is_disabled)
}

/// Wifi interfaces and their bridge ports for every wireless network.
pub fn wireless_config(configs: &[WirelessConfig]) -> RouterConfig {
    debug!("building {} wireless network(s)", configs.len());

    let mut config = RouterConfig::new();
    if configs.is_empty() {
        return config;
    }

    config.comment("Wireless");
    config.comment(format!("Networks: {}", configs.len()));

    for (index, wireless) in configs.iter().enumerate() {
        let network = wireless.network.as_deref().unwrap_or(DEFAULT_NETWORK);
        let bridge = bridge_name(network);

        for band in WifiBand::ALL {
            let master = band.master_interface();
            let interface = if index == 0 {
                let selector = format!("[ find default-name={} ]", master);
                config.push(
                    WIFI,
                    radio_args(Command::set(Some(selector.as_str())), wireless, band),
                );
                master.to_string()
            } else {
                let name = format!("{}-{}-{}", master, network, index);
                config.push(
                    WIFI,
                    radio_args(
                        Command::add()
                            .arg("master-interface", master)
                            .quoted("name", &name),
                        wireless,
                        band,
                    ),
                );
                name
            };

            config.push(
                BRIDGE_PORT,
                Command::add()
                    .quoted("bridge", &bridge)
                    .quoted("interface", &interface),
            );
        }
    }

    config.shortened()
}
