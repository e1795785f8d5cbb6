//! Password hashing
//!
//! Passwords are stored as unsalted SHA-256 digests encoded as lowercase hex.
//! The encoding never contains a colon, which keeps `username:hash` lines
//! unambiguous.

use sha2::{Digest, Sha256};

/// Hashes a password into its stored representation.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Returns `true` when `password` hashes to `stored_hash`.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH_HEX_LEN: usize = 64;

    #[test]
    fn hashes_to_known_digest() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hash_is_fixed_length_hex() {
        for password in ["x", "secret1", "a much longer passphrase with spaces: and colons"] {
            let hash = hash_password(password);
            assert_eq!(hash.len(), HASH_HEX_LEN);
            assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn verifies_only_the_hashed_password() {
        let hash = hash_password("secret1");
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret1 ", &hash));
        assert!(!verify_password("wrong", &hash));
    }
}
