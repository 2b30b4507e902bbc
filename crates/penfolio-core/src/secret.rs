use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("failed to hash secret")]
    Hash(#[source] argon2::password_hash::Error),
}

/// Salted slow hashing for PINs and passwords. Injected so tests can trade
/// the work factor for speed; the stored format is opaque to callers.
pub trait SecretHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, HashError>;

    /// A malformed or absent stored hash verifies as `false`, never as an
    /// error, so callers cannot leak storage state.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// Argon2id with the crate's recommended parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl SecretHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(HashError::Hash)?;
        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default().verify_password(plaintext.as_bytes(), &parsed).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("Abcd123!").unwrap();
        assert_ne!(hash, "Abcd123!");
        assert!(hasher.verify("Abcd123!", &hash));
        assert!(!hasher.verify("abcd123!", &hash));
    }

    #[test]
    fn test_salted_hashes_differ() {
        let hasher = Argon2Hasher;
        assert_ne!(hasher.hash("1234").unwrap(), hasher.hash("1234").unwrap());
    }

    #[test]
    fn test_garbage_hash_verifies_false() {
        let hasher = Argon2Hasher;
        assert!(!hasher.verify("1234", "not a phc string"));
        assert!(!hasher.verify("1234", ""));
    }
}
