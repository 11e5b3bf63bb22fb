use base64::{engine::general_purpose::STANDARD, Engine};

/// A WireGuard key is 32 bytes, base64 encoded with padding (44 chars).
pub fn is_valid_wireguard_key(key: &str) -> bool {
    key.len() == 44
        && STANDARD
            .decode(key)
            .map(|bytes| bytes.len() == 32)
            .unwrap_or(false)
}
