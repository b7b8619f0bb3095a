use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use nestling_core::{AppError, AppResult, UserIdentity};
use nestling_domain::{User, UserCredential};

/// User row ready for insertion. The password is already hashed.
#[derive(Clone)]
pub struct NewUser {
    /// Assigned role.
    pub role_id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique login email.
    pub email: String,
    /// Password digest.
    pub password_hash: String,
}

/// Column replacements for a partial user update.
#[derive(Clone, Default)]
pub struct UserChanges {
    /// Replacement role.
    pub role_id: Option<i64>,
    /// Replacement given name.
    pub first_name: Option<String>,
    /// Replacement family name.
    pub last_name: Option<String>,
    /// Replacement email.
    pub email: Option<String>,
    /// Replacement password digest.
    pub password_hash: Option<String>,
}

/// Repository port for user accounts and their credentials.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists every user ordered by id.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Finds a user by identifier.
    async fn find(&self, user_id: i64) -> AppResult<Option<User>>;

    /// Finds the credential for an exact (case-sensitive) email match,
    /// joined with the role name.
    async fn find_credential_by_email(&self, email: &str) -> AppResult<Option<UserCredential>>;

    /// Inserts a user and returns it with its assigned id.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Applies the present changes. Returns `None` when the user is missing.
    async fn update(&self, user_id: i64, changes: UserChanges) -> AppResult<Option<User>>;

    /// Deletes a user. Returns `false` when the user is missing.
    async fn delete(&self, user_id: i64) -> AppResult<bool>;
}

/// Port for password hashing operations. Keeps application code free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Produces a salted one-way digest.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored digest.
    /// A mismatch is `Ok(false)`; only an unreadable digest is an error.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Signed token together with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact serialized token.
    pub token: String,
    /// Instant after which verification fails.
    pub expires_at: DateTime<Utc>,
}

/// Port for issuing and verifying identity assertions.
pub trait TokenIssuer: Send + Sync {
    /// Signs a time-limited assertion for the identity.
    fn issue(&self, identity: &UserIdentity) -> AppResult<IssuedToken>;

    /// Verifies signature and expiry and returns the embedded identity.
    /// Every failure maps to `AppError::InvalidToken`.
    fn verify(&self, token: &str) -> AppResult<UserIdentity>;
}

/// Hashes on the blocking pool so slow key derivation does not stall a worker.
pub(crate) async fn hash_blocking(
    hasher: &Arc<dyn PasswordHasher>,
    password: &str,
) -> AppResult<String> {
    let hasher = Arc::clone(hasher);
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hasher.hash_password(&password))
        .await
        .map_err(join_error)?
}

/// Verifies on the blocking pool.
pub(crate) async fn verify_blocking(
    hasher: &Arc<dyn PasswordHasher>,
    password: &str,
    hash: &str,
) -> AppResult<bool> {
    let hasher = Arc::clone(hasher);
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
        .await
        .map_err(join_error)?
}

fn join_error(error: tokio::task::JoinError) -> AppError {
    AppError::Internal(format!("password hashing task failed: {error}"))
}
