//! Core data models for the generator
//!
//! This module contains the configuration records the generators consume and
//! the [`RouterConfig`] container they produce, separated from the logic that
//! operates on them.
//!
//! # Usage
//!
//! ```rust
//! use routergen::models::{Credentials, RouterConfig, VpnType};
//!
//! let users = vec![Credentials::new("alice", "secret", &[VpnType::Wireguard])];
//! assert_eq!(users[0].vpn_type, vec![VpnType::Wireguard]);
//!
//! let mut config = RouterConfig::new();
//! config.push("/ip pool", "add name=lan-pool ranges=192.168.10.10-192.168.10.254");
//! assert_eq!(config.lines("/ip pool").len(), 1);
//! ```
//!
//! # Working with Option fields
//!
//! Almost every field of the protocol records is an `Option`. A `None` means
//! "use the generator default", never "emit an empty value":
//!
//! ```rust
//! use routergen::models::Ikev2ServerConfig;
//!
//! let config = Ikev2ServerConfig::default();
//! let group = config.policy_group.as_deref().unwrap_or("ike2-policies");
//! assert_eq!(group, "ike2-policies");
//! ```

mod common;
mod credentials;
mod router_config;
mod star_state;
mod tunnel;
mod vpn;
mod wan;
mod wireless;

pub use common::*;
pub use credentials::*;
pub use router_config::*;
pub use star_state::*;
pub use tunnel::*;
pub use vpn::*;
pub use wan::*;
pub use wireless::*;
