pub mod ip;
pub mod keys;

// Re-export common utilities
pub use ip::{
    is_valid_cidr, is_valid_ipv4, is_valid_mac, network_cidr, prefix_from_subnet, subnet_host,
    validate_ip_config,
};
pub use keys::is_valid_wireguard_key;
