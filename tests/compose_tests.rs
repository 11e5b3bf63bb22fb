use std::fs;

use routergen::generator::{generate, lan_cg, to_script, wan_cg, ExportOptions};
use routergen::models::*;
use routergen::command_shortener;

const STATE_YAML: &str = r#"
Choose:
  Mode: advance
  RouterModel: hAP ax3
WAN:
  WANLink:
    - Name: Fiber
      InterfaceName: ether1
      PPPoE:
        Username: user@isp
        Password: secret
    - Name: Backup
      InterfaceName: lte1
      LTE:
        APN: internet
LAN:
  Networks:
    - Name: LAN
      Address: 192.168.88.1/24
  Wireless:
    - SSID: Home
      Password: password123
  VPNServer:
    Users:
      - Username: alice
        Password: pw
        VPNType: [Wireguard, SSTP]
    WireguardServer: {}
    SstpServer: {}
ExtraConfig:
  RouterIdentity: home
  DisabledServices: [telnet]
"#;

#[cfg(test)]
mod compose_tests {
    use super::*;

    #[test]
    fn test_default_lan_has_no_vpn() {
        let config = lan_cg(&StarState::default());
        assert!(config.contains_section("/interface bridge"));
        assert!(config.contains_section("/interface list"));
        for section in [
            "/interface wireguard",
            "/interface ovpn-server server",
            "/interface pptp-server server",
            "/interface sstp-server server",
            "/interface l2tp-server server",
            "/ip ipsec peer",
            "/ppp secret",
        ] {
            assert!(!config.contains_section(section), "{}", section);
        }
    }

    #[test]
    fn test_state_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("router.yaml");
        fs::write(&path, STATE_YAML).unwrap();

        let state = StarState::from_file(&path).unwrap();
        assert_eq!(state.wan.wan_link.len(), 2);

        let wan = wan_cg(&state);
        assert!(wan.lines("/interface pppoe-client")[0].contains("default-route-distance=1"));
        assert!(wan.lines("/interface lte apn")[0].contains("default-route-distance=2"));

        let config = generate(&state);
        assert_eq!(command_shortener(&config), config);
        assert_eq!(config.lines("/interface wireguard peers").len(), 1);
        assert_eq!(config.lines("/ip service"), ["set telnet disabled=yes"]);

        let sections: Vec<&str> = config.sections().collect();
        let at = |name: &str| sections.iter().position(|s| *s == name).unwrap();
        let member = at("/interface list member");
        assert!(at("/interface list") < member);
        assert!(at("/interface bridge") < member);
        assert!(at("/interface pppoe-client") < member);
        assert!(at("/interface lte") < member);
        assert!(at("/interface wireguard") < member);
        assert!(at("/interface list") < at("/ip firewall nat"));
        assert!(at("/interface wifi") < at("/interface bridge port"));
        assert!(at("/interface pppoe-client") < at("/system identity"));
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("router.ini");
        fs::write(&path, "").unwrap();
        assert!(StarState::from_file(&path).is_err());
    }

    #[test]
    fn test_script_section_order() {
        let state = StarState::default();
        let config = generate(&state);
        let script = to_script(
            &config,
            &ExportOptions {
                header: false,
                ..Default::default()
            },
        )
        .unwrap();

        let positions: Vec<usize> = config
            .sections()
            .filter(|s| !s.is_empty())
            .map(|s| script.find(&format!("{}\n", s)).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
