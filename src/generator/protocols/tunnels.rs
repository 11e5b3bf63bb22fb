use log::debug;

use crate::generator::format::Command;
use crate::generator::merge::merge_router_configs;
use crate::generator::primitives::{ip_address, AddressOptions};
use crate::models::{
    EoipTunnelConfig, GreTunnelConfig, IpipTunnelConfig, RouterConfig, TunnelEndpoints,
    TunnelState, VxlanInterfaceConfig,
};

pub const IPIP: &str = "/interface ipip";
pub const EOIP: &str = "/interface eoip";
pub const GRE: &str = "/interface gre";
pub const VXLAN: &str = "/interface vxlan";
pub const VXLAN_VTEPS: &str = "/interface vxlan vteps";

pub const DEFAULT_KEEPALIVE: &str = "10s,10";
pub const DEFAULT_VXLAN_PORT: u16 = 8472;

/// Arguments shared by IPIP, EoIP and GRE, in console order.
fn endpoint_args(command: Command, endpoints: &TunnelEndpoints) -> Command {
    let mut command = command
        .arg("name", &endpoints.name)
        .opt("local-address", endpoints.local_address.as_deref())
        .arg("remote-address", &endpoints.remote_address)
        .arg(
            "keepalive",
            endpoints.keepalive.as_deref().unwrap_or(DEFAULT_KEEPALIVE),
        )
        .opt("mtu", endpoints.mtu);
    if let Some(secret) = endpoints.ipsec_secret.as_deref() {
        // IPsec protected tunnels cannot use fast path
        command = command
            .quoted("ipsec-secret", secret)
            .flag("allow-fast-path", false);
    }
    command
        .flag("disabled", endpoints.disabled.unwrap_or(false))
        .comment(endpoints.comment.as_deref())
}

fn tunnel_address(endpoints: &TunnelEndpoints) -> RouterConfig {
    match endpoints.tunnel_address.as_deref() {
        Some(address) => ip_address(&AddressOptions {
            address,
            interface: &endpoints.name,
            ..Default::default()
        }),
        None => RouterConfig::new(),
    }
}

pub fn ipip_tunnel(config: &IpipTunnelConfig) -> RouterConfig {
    let mut tunnel = RouterConfig::new();
    tunnel.push(
        IPIP,
        endpoint_args(Command::add(), &config.endpoints).opt("dscp", config.dscp.as_deref()),
    );
    merge_router_configs(&[&tunnel, &tunnel_address(&config.endpoints)]).shortened()
}

pub fn eoip_tunnel(config: &EoipTunnelConfig) -> RouterConfig {
    let command = endpoint_args(Command::add(), &config.endpoints)
        .arg("tunnel-id", config.tunnel_id.unwrap_or(0))
        .opt("mac-address", config.mac_address.as_deref())
        .opt("arp", config.arp.as_deref());
    let mut tunnel = RouterConfig::new();
    tunnel.push(EOIP, command);
    merge_router_configs(&[&tunnel, &tunnel_address(&config.endpoints)]).shortened()
}

pub fn gre_tunnel(config: &GreTunnelConfig) -> RouterConfig {
    let mut tunnel = RouterConfig::new();
    tunnel.push(
        GRE,
        endpoint_args(Command::add(), &config.endpoints).opt("dscp", config.dscp.as_deref()),
    );
    merge_router_configs(&[&tunnel, &tunnel_address(&config.endpoints)]).shortened()
}

/// VXLAN interface followed by one VTEP per remote endpoint.
pub fn vxlan_interface(config: &VxlanInterfaceConfig) -> RouterConfig {
    let port = config.port.unwrap_or(DEFAULT_VXLAN_PORT);
    let mut vxlan = RouterConfig::new();
    vxlan.push(
        VXLAN,
        Command::add()
            .arg("name", &config.name)
            .arg("vni", config.vni)
            .arg("port", port)
            .opt("local-address", config.local_address.as_deref())
            .opt("mtu", config.mtu)
            .flag("learning", config.learning.unwrap_or(true))
            .flag("disabled", config.disabled.unwrap_or(false))
            .comment(config.comment.as_deref()),
    );
    for vtep in &config.vteps {
        vxlan.push(
            VXLAN_VTEPS,
            Command::add()
                .arg("interface", &config.name)
                .arg("remote-ip", &vtep.remote_ip)
                .opt("port", vtep.port),
        );
    }

    if let Some(address) = config.tunnel_address.as_deref() {
        vxlan.merge(&ip_address(&AddressOptions {
            address,
            interface: &config.name,
            ..Default::default()
        }));
    }
    vxlan.shortened()
}

/// Every configured tunnel under one summary block.
pub fn tunnel_wrapper(state: &TunnelState) -> RouterConfig {
    debug!("building {} tunnel(s)", state.count());

    let mut summary = RouterConfig::new();
    summary.comment("Tunnels");
    summary.comment(format!(
        "IPIP: {}, EoIP: {}, GRE: {}, VXLAN: {}",
        state.ipip.len(),
        state.eoip.len(),
        state.gre.len(),
        state.vxlan.len()
    ));

    let parts: Vec<RouterConfig> = state
        .ipip
        .iter()
        .map(ipip_tunnel)
        .chain(state.eoip.iter().map(eoip_tunnel))
        .chain(state.gre.iter().map(gre_tunnel))
        .chain(state.vxlan.iter().map(vxlan_interface))
        .collect();

    let mut all: Vec<&RouterConfig> = vec![&summary];
    all.extend(parts.iter());
    merge_router_configs(&all).shortened()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VxlanVtep;

    fn endpoints(name: &str) -> TunnelEndpoints {
        TunnelEndpoints {
            name: name.to_string(),
            remote_address: "198.51.100.7".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ipip_defaults() {
        let config = ipip_tunnel(&IpipTunnelConfig {
            endpoints: endpoints("ipip-office"),
            dscp: None,
        });
        assert_eq!(
            config.lines(IPIP),
            ["add name=ipip-office remote-address=198.51.100.7 keepalive=10s,10 disabled=no"]
        );
        assert!(!config.contains_section("/ip address"));
    }

    #[test]
    fn test_eoip_with_ipsec_and_address() {
        let mut ep = endpoints("eoip-branch");
        ep.ipsec_secret = Some("s3cret".to_string());
        ep.tunnel_address = Some("172.16.0.1/30".to_string());
        let config = eoip_tunnel(&EoipTunnelConfig {
            endpoints: ep,
            tunnel_id: Some(42),
            ..Default::default()
        });
        let line = &config.lines(EOIP)[0];
        assert!(line.contains("ipsec-secret=s3cret allow-fast-path=no"));
        assert!(line.ends_with("tunnel-id=42"));
        assert_eq!(
            config.lines("/ip address"),
            ["add address=172.16.0.1/30 interface=eoip-branch"]
        );
    }

    #[test]
    fn test_vxlan_vteps() {
        let config = vxlan_interface(&VxlanInterfaceConfig {
            name: "vxlan100".to_string(),
            vni: 100,
            vteps: vec![
                VxlanVtep {
                    remote_ip: "203.0.113.1".to_string(),
                    port: None,
                },
                VxlanVtep {
                    remote_ip: "203.0.113.2".to_string(),
                    port: Some(4789),
                },
            ],
            ..Default::default()
        });
        assert_eq!(
            config.lines(VXLAN),
            ["add name=vxlan100 vni=100 port=8472 learning=yes disabled=no"]
        );
        assert_eq!(
            config.lines(VXLAN_VTEPS),
            [
                "add interface=vxlan100 remote-ip=203.0.113.1",
                "add interface=vxlan100 remote-ip=203.0.113.2 port=4789"
            ]
        );
    }

    #[test]
    fn test_wrapper_counts() {
        let state = TunnelState {
            gre: vec![GreTunnelConfig {
                endpoints: endpoints("gre1"),
                dscp: Some("inherit".to_string()),
            }],
            ..Default::default()
        };
        let config = tunnel_wrapper(&state);
        assert_eq!(config.lines("")[1], "# IPIP: 0, EoIP: 0, GRE: 1, VXLAN: 0");
        assert!(config.lines(GRE)[0].ends_with("dscp=inherit"));
    }
}
