//! Credential verification and token issuance.
//!
//! Unknown emails and wrong passwords produce the same
//! [`AppError::InvalidCredentials`] so callers cannot enumerate accounts.

use std::sync::Arc;

use nestling_core::{AppError, AppResult, UserIdentity};
use nestling_domain::{Role, User};

use crate::auth_ports::{hash_blocking, verify_blocking};
use crate::{IssuedToken, PasswordHasher, TokenIssuer, UserRepository};

/// Message returned when either login field is missing.
const MISSING_FIELDS_MESSAGE: &str = "Email and password are required";

/// Successful login: the account, its role and a freshly issued token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Authenticated user, without the password digest.
    pub user: User,
    /// Role joined at login time.
    pub role: Role,
    /// Signed bearer token.
    pub token: IssuedToken,
}

/// Application service for login and bearer token authentication.
#[derive(Clone)]
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
    /// Creates a new authentication service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_issuer,
        }
    }

    /// Verifies credentials and issues a token carrying the joined role.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_owned()));
        }

        let credential = self.user_repository.find_credential_by_email(email).await?;

        let Some(credential) = credential else {
            // Keep the unknown-email path doing comparable work.
            let _ = hash_blocking(&self.password_hasher, password).await;
            return Err(AppError::InvalidCredentials);
        };

        if !verify_blocking(&self.password_hasher, password, &credential.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        let user = credential.user;
        let identity = UserIdentity::new(
            user.id,
            user.email.as_str(),
            user.role_id,
            credential.role_name.as_str(),
        );
        let token = self.token_issuer.issue(&identity)?;

        Ok(LoginOutcome {
            role: Role {
                id: user.role_id,
                name: credential.role_name,
            },
            user,
            token,
        })
    }

    /// Verifies a bearer token and returns the identity it asserts.
    pub fn authenticate(&self, token: &str) -> AppResult<UserIdentity> {
        self.token_issuer.verify(token)
    }
}
