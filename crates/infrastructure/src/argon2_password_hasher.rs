//! Argon2id password hasher implementation.
//!
//! New digests use Argon2id with m=19456 (19 MiB), t=2, p=1. Digests in
//! bcrypt format written by the previous system are still verified.

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use nestling_application::PasswordHasher as PasswordHasherPort;
use nestling_core::{AppError, AppResult};
use tracing::debug;

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Argon2id password hasher with legacy bcrypt verification.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates a new Argon2id hasher with recommended parameters.
    #[must_use]
    pub fn new() -> Self {
        let params = Params::new(19456, 2, 1, None).unwrap_or_else(|_| Params::default());

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Self { argon2 }
    }

    fn verify_bcrypt(password: &str, hash: &str) -> AppResult<bool> {
        debug!("verifying legacy bcrypt password hash");
        bcrypt::verify(password, hash).map_err(|error| {
            AppError::Internal(format!("failed to verify legacy password hash: {error}"))
        })
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|error| AppError::Internal(format!("failed to hash password: {error}")))?;

        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        if BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix)) {
            return Self::verify_bcrypt(password, hash);
        }

        let parsed_hash = PasswordHash::new(hash).map_err(|error| {
            AppError::Internal(format!("failed to parse password hash: {error}"))
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(error) => Err(AppError::Internal(format!(
                "password verification failed: {error}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestling_core::AppResult;

    #[test]
    fn hash_and_verify_correct_password() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash_password("my-secret-password")?;
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("my-secret-password", &hash)?);
        Ok(())
    }

    #[test]
    fn verify_wrong_password_returns_false() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash_password("correct-password")?;
        assert!(!hasher.verify_password("wrong-password", &hash)?);
        Ok(())
    }

    #[test]
    fn same_password_gets_distinct_salts() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash_password("repeat")?;
        let second = hasher.hash_password("repeat")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn legacy_bcrypt_digest_is_verified() -> AppResult<()> {
        let legacy = bcrypt::hash("legacy-password", 4)
            .map_err(|error| AppError::Internal(error.to_string()))?;

        let hasher = Argon2PasswordHasher::new();
        assert!(hasher.verify_password("legacy-password", &legacy)?);
        assert!(!hasher.verify_password("other-password", &legacy)?);
        Ok(())
    }

    #[test]
    fn unparseable_digest_is_an_internal_error() {
        let hasher = Argon2PasswordHasher::new();
        let result = hasher.verify_password("anything", "not-a-digest");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
