//! User account management.
//!
//! Passwords are hashed here before they reach the repository, and the role
//! referenced by a user must exist.

use std::sync::Arc;

use async_trait::async_trait;
use nestling_core::{AppError, AppResult};
use nestling_domain::{Role, User, UserDraft, UserPatch};

use crate::auth_ports::hash_blocking;
use crate::{DeleteGuard, NewUser, PasswordHasher, RecordRepository, UserChanges, UserRepository};

/// Application service for user accounts.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    role_repository: Arc<dyn RecordRepository<Role>>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        role_repository: Arc<dyn RecordRepository<Role>>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            role_repository,
            password_hasher,
        }
    }

    /// Lists every user.
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.user_repository.list().await
    }

    /// Returns one user or `NotFound`.
    pub async fn get(&self, user_id: i64) -> AppResult<User> {
        self.user_repository
            .find(user_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Validates, hashes the password and stores a new user.
    pub async fn create(&self, draft: UserDraft) -> AppResult<User> {
        draft.validate()?;
        self.ensure_role_exists(draft.role_id).await?;

        let password_hash = hash_blocking(&self.password_hasher, &draft.password).await?;
        self.user_repository
            .create(NewUser {
                role_id: draft.role_id,
                first_name: draft.first_name,
                last_name: draft.last_name,
                email: draft.email,
                password_hash,
            })
            .await
    }

    /// Applies a partial update, re-hashing a replacement password.
    pub async fn update(&self, user_id: i64, patch: UserPatch) -> AppResult<User> {
        patch.validate()?;
        if let Some(role_id) = patch.role_id {
            self.ensure_role_exists(role_id).await?;
        }

        let password_hash = match patch.password.as_deref() {
            Some(password) => Some(hash_blocking(&self.password_hasher, password).await?),
            None => None,
        };

        self.user_repository
            .update(
                user_id,
                UserChanges {
                    role_id: patch.role_id,
                    first_name: patch.first_name,
                    last_name: patch.last_name,
                    email: patch.email,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(not_found)
    }

    /// Deletes a user or returns `NotFound`.
    pub async fn delete(&self, user_id: i64) -> AppResult<()> {
        if self.user_repository.delete(user_id).await? {
            return Ok(());
        }

        Err(not_found())
    }

    /// Creates the account unless one with the same email exists.
    /// Returns whether a user was created.
    pub async fn ensure_user(&self, draft: UserDraft) -> AppResult<bool> {
        if self
            .user_repository
            .find_credential_by_email(&draft.email)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        self.create(draft).await.map(|_| true)
    }

    async fn ensure_role_exists(&self, role_id: i64) -> AppResult<()> {
        if self.role_repository.find(role_id).await?.is_some() {
            return Ok(());
        }

        Err(AppError::Validation(format!("role {role_id} does not exist")))
    }
}

/// Refuses to delete a role while any user is assigned to it.
#[derive(Clone)]
pub struct RoleAssignmentGuard {
    user_repository: Arc<dyn UserRepository>,
}

impl RoleAssignmentGuard {
    /// Creates a guard backed by the user repository.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl DeleteGuard for RoleAssignmentGuard {
    async fn ensure_deletable(&self, role_id: i64) -> AppResult<()> {
        let assigned = self
            .user_repository
            .list()
            .await?
            .iter()
            .any(|user| user.role_id == role_id);

        if assigned {
            return Err(AppError::Validation(format!(
                "role {role_id} is assigned to users"
            )));
        }

        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("User not found".to_owned())
}

#[cfg(test)]
mod tests;
