use log::info;

use crate::generator::compose::INTERFACE_SECTIONS;
use crate::generator::merge::{hoist_sections, merge_router_configs};
use crate::generator::primitives::{nat_rule, NatOptions};
use crate::generator::protocols::wan_links::{wan_link_wrapper, WAN_LIST};
use crate::models::{RouterConfig, StarState};

/// Source NAT for everything leaving through a WAN interface.
pub fn masquerade() -> RouterConfig {
    nat_rule(&NatOptions {
        chain: "srcnat",
        action: "masquerade",
        out_interface_list: Some(WAN_LIST),
        comment: Some("Masquerade WAN"),
        ..Default::default()
    })
}

/// WAN side of the router: one block per uplink in failover order, then
/// masquerade. No links means no WAN configuration at all.
pub fn wan_cg(state: &StarState) -> RouterConfig {
    let links = &state.wan.wan_link;
    info!("generating WAN configuration for {} link(s)", links.len());
    if links.is_empty() {
        return RouterConfig::new();
    }

    let mut parts: Vec<RouterConfig> = links
        .iter()
        .enumerate()
        .map(|(index, link)| wan_link_wrapper(link, index))
        .collect();
    parts.push(masquerade());

    let refs: Vec<&RouterConfig> = parts.iter().collect();
    hoist_sections(&merge_router_configs(&refs), &INTERFACE_SECTIONS).shortened()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::primitives::{FIREWALL_NAT, INTERFACE_LIST_MEMBER};
    use crate::generator::protocols::wan_links::DHCP_CLIENT;
    use crate::models::{WanLinkConfig, WanState};

    fn link(name: &str, interface: &str) -> WanLinkConfig {
        WanLinkConfig {
            name: name.to_string(),
            interface_name: interface.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_links() {
        assert!(wan_cg(&StarState::default()).is_empty());
    }

    #[test]
    fn test_failover_distances() {
        let state = StarState {
            wan: WanState {
                wan_link: vec![link("ISP1", "ether1"), link("ISP2", "ether2")],
            },
            ..Default::default()
        };
        let config = wan_cg(&state);
        let dhcp = config.lines(DHCP_CLIENT);
        assert!(dhcp[0].contains("interface=ether1") && dhcp[0].contains("default-route-distance=1"));
        assert!(dhcp[1].contains("interface=ether2") && dhcp[1].contains("default-route-distance=2"));
        assert_eq!(
            config.lines(INTERFACE_LIST_MEMBER),
            ["add interface=ether1 list=WAN", "add interface=ether2 list=WAN"]
        );
        assert_eq!(
            config.lines(FIREWALL_NAT),
            ["add action=masquerade chain=srcnat out-interface-list=WAN comment=\"Masquerade WAN\""]
        );
    }
}
