use serde::{Deserialize, Serialize};

/// A field that the UI may send either as one value or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListValue {
    One(String),
    Many(Vec<String>),
}

impl ListValue {
    pub fn is_empty(&self) -> bool {
        match self {
            ListValue::One(v) => v.is_empty(),
            ListValue::Many(v) => v.iter().all(String::is_empty),
        }
    }

    /// Values as a vector, a scalar becoming a one-element list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            ListValue::One(v) => vec![v.clone()],
            ListValue::Many(v) => v.clone(),
        }
    }
}

impl From<&str> for ListValue {
    fn from(value: &str) -> Self {
        ListValue::One(value.to_string())
    }
}

impl From<String> for ListValue {
    fn from(value: String) -> Self {
        ListValue::One(value)
    }
}

impl From<Vec<String>> for ListValue {
    fn from(value: Vec<String>) -> Self {
        ListValue::Many(value)
    }
}

impl From<Vec<&str>> for ListValue {
    fn from(value: Vec<&str>) -> Self {
        ListValue::Many(value.into_iter().map(str::to_string).collect())
    }
}

/// PPP authentication methods accepted by the PPP based servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PppAuthMethod {
    Pap,
    Chap,
    Mschap1,
    Mschap2,
}

impl PppAuthMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PppAuthMethod::Pap => "pap",
            PppAuthMethod::Chap => "chap",
            PppAuthMethod::Mschap1 => "mschap1",
            PppAuthMethod::Mschap2 => "mschap2",
        }
    }
}

/// Address pool and profile settings shared by the PPP based servers
/// (OpenVPN, PPTP, SSTP, L2TP).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PppProfileSettings {
    pub profile_name: Option<String>,
    pub pool_name: Option<String>,
    /// Pool range, e.g. `192.168.60.5-192.168.60.250`.
    pub pool_range: Option<String>,
    pub local_address: Option<String>,
    pub dns_server: Option<ListValue>,
    pub use_encryption: Option<bool>,
    pub only_one: Option<bool>,
}
