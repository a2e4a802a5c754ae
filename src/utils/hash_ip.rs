use sha2::{Digest, Sha256};

/// Hex characters kept from the digest
pub const IP_HASH_LEN: usize = 16;

/// Salt used when `IP_HASH_SALT` is not set
pub const DEFAULT_IP_SALT: &str = "pixeltrail_salt";

/// Hash an IP address for privacy and storage.
///
/// Returns an empty string when there is no address to hash.
pub fn hash_ip(ip: Option<&str>, salt: &str) -> String {
    let ip = match ip.map(str::trim) {
        Some(ip) if !ip.is_empty() => ip,
        _ => return String::new(),
    };

    // Add a salt to prevent rainbow table attacks
    let salted_ip = format!("{}{}", ip, salt);

    let mut hasher = Sha256::new();
    hasher.update(salted_ip.as_bytes());
    let result = hasher.finalize();

    let mut hex = format!("{:x}", result);
    hex.truncate(IP_HASH_LEN);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_truncated_hex() {
        let h = hash_ip(Some("203.0.113.7"), DEFAULT_IP_SALT);
        assert_eq!(h.len(), IP_HASH_LEN);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!h.contains("203"));
    }

    #[test]
    fn hash_is_stable_and_salt_dependent() {
        let a = hash_ip(Some("10.0.0.1"), "s1");
        assert_eq!(a, hash_ip(Some("10.0.0.1"), "s1"));
        assert_ne!(a, hash_ip(Some("10.0.0.1"), "s2"));
        assert_ne!(a, hash_ip(Some("10.0.0.2"), "s1"));
    }

    #[test]
    fn missing_ip_gives_empty_hash() {
        assert_eq!(hash_ip(None, DEFAULT_IP_SALT), "");
        assert_eq!(hash_ip(Some("  "), DEFAULT_IP_SALT), "");
    }
}
