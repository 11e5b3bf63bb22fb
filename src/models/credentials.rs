use serde::{Deserialize, Serialize};

/// VPN protocols a user account may be enabled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VpnType {
    Wireguard,
    OpenVPN,
    PPTP,
    SSTP,
    L2TP,
    IKeV2,
}

impl VpnType {
    /// Human-readable protocol name used in comments.
    pub fn display_name(self) -> &'static str {
        match self {
            VpnType::Wireguard => "WireGuard",
            VpnType::OpenVPN => "OpenVPN",
            VpnType::PPTP => "PPTP",
            VpnType::SSTP => "SSTP",
            VpnType::L2TP => "L2TP",
            VpnType::IKeV2 => "IKEv2",
        }
    }

    /// Value of the `service=` argument of `/ppp secret` for PPP based
    /// protocols.
    pub fn ppp_service(self) -> Option<&'static str> {
        match self {
            VpnType::OpenVPN => Some("ovpn"),
            VpnType::PPTP => Some("pptp"),
            VpnType::SSTP => Some("sstp"),
            VpnType::L2TP => Some("l2tp"),
            VpnType::Wireguard | VpnType::IKeV2 => None,
        }
    }
}

/// A VPN user account tagged with the protocols it applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(rename = "VPNType", default)]
    pub vpn_type: Vec<VpnType>,
}

impl Credentials {
    pub fn new(username: &str, password: &str, vpn_type: &[VpnType]) -> Self {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
            vpn_type: vpn_type.to_vec(),
        }
    }

    pub fn has_type(&self, vpn_type: VpnType) -> bool {
        self.vpn_type.contains(&vpn_type)
    }
}

/// Users of `users` enabled for `vpn_type`, in input order.
pub fn filter_users(users: &[Credentials], vpn_type: VpnType) -> Vec<&Credentials> {
    users.iter().filter(|u| u.has_type(vpn_type)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_users_keeps_order() {
        let users = vec![
            Credentials::new("alice", "a", &[VpnType::Wireguard, VpnType::PPTP]),
            Credentials::new("bob", "b", &[VpnType::PPTP]),
            Credentials::new("carol", "c", &[VpnType::Wireguard]),
        ];
        let names: Vec<&str> = filter_users(&users, VpnType::Wireguard)
            .iter()
            .map(|u| u.username.as_str())
            .collect();
        assert_eq!(names, vec!["alice", "carol"]);
        assert!(filter_users(&users, VpnType::IKeV2).is_empty());
    }

    #[test]
    fn test_deserialize_ui_shape() {
        let json = r#"{"Username":"u1","Password":"p1","VPNType":["Wireguard","IKeV2"]}"#;
        let user: Credentials = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "u1");
        assert!(user.has_type(VpnType::IKeV2));
        assert!(!user.has_type(VpnType::SSTP));
    }
}
