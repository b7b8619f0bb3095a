use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use nestling_application::{NewUser, RecordRepository, UserChanges, UserRepository};
use nestling_core::{AppError, AppResult};
use nestling_domain::{Role, User, UserCredential};
use tokio::sync::RwLock;

struct StoredUser {
    user: User,
    password_hash: String,
}

struct UserTable {
    next_id: i64,
    rows: BTreeMap<i64, StoredUser>,
}

/// In-memory user store. Role names are joined from the role repository at
/// lookup time.
pub struct InMemoryUserRepository {
    roles: Arc<dyn RecordRepository<Role>>,
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository joined against `roles`.
    #[must_use]
    pub fn new(roles: Arc<dyn RecordRepository<Role>>) -> Self {
        Self {
            roles,
            table: RwLock::new(UserTable {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

fn ensure_email_free(table: &UserTable, email: &str, owner: Option<i64>) -> AppResult<()> {
    let taken = table
        .rows
        .values()
        .any(|row| row.user.email == email && Some(row.user.id) != owner);
    if taken {
        return Err(AppError::Conflict(
            "an account with this email already exists".to_owned(),
        ));
    }

    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .map(|row| row.user.clone())
            .collect())
    }

    async fn find(&self, user_id: i64) -> AppResult<Option<User>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .get(&user_id)
            .map(|row| row.user.clone()))
    }

    async fn find_credential_by_email(&self, email: &str) -> AppResult<Option<UserCredential>> {
        let found = {
            let table = self.table.read().await;
            table
                .rows
                .values()
                .find(|row| row.user.email == email)
                .map(|row| (row.user.clone(), row.password_hash.clone()))
        };

        let Some((user, password_hash)) = found else {
            return Ok(None);
        };

        let role = self.roles.find(user.role_id).await?.ok_or_else(|| {
            AppError::Internal(format!(
                "user {} references missing role {}",
                user.id, user.role_id
            ))
        })?;

        Ok(Some(UserCredential {
            user,
            role_name: role.name,
            password_hash,
        }))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut table = self.table.write().await;
        ensure_email_free(&table, &user.email, None)?;

        let created = User {
            id: table.next_id,
            role_id: user.role_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        };
        table.next_id += 1;
        table.rows.insert(
            created.id,
            StoredUser {
                user: created.clone(),
                password_hash: user.password_hash,
            },
        );

        Ok(created)
    }

    async fn update(&self, user_id: i64, changes: UserChanges) -> AppResult<Option<User>> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&user_id) {
            return Ok(None);
        }
        if let Some(email) = changes.email.as_deref() {
            ensure_email_free(&table, email, Some(user_id))?;
        }

        let Some(row) = table.rows.get_mut(&user_id) else {
            return Ok(None);
        };
        if let Some(role_id) = changes.role_id {
            row.user.role_id = role_id;
        }
        if let Some(first_name) = changes.first_name {
            row.user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            row.user.last_name = last_name;
        }
        if let Some(email) = changes.email {
            row.user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            row.password_hash = password_hash;
        }

        Ok(Some(row.user.clone()))
    }

    async fn delete(&self, user_id: i64) -> AppResult<bool> {
        Ok(self.table.write().await.rows.remove(&user_id).is_some())
    }
}

#[cfg(test)]
mod tests;
