use rand::RngCore;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the password
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    hash_password(password) == password_hash
}

/// 32 random bytes, hex-encoded
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_sha256_hex() {
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
        assert!(verify_password("password", &hash_password("password")));
        assert!(!verify_password("Password", &hash_password("password")));
    }

    #[test]
    fn test_session_tokens_are_unique() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
