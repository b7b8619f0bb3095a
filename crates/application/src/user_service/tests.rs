use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use nestling_core::{AppError, AppResult};
use nestling_domain::{Role, RoleDraft, RolePatch, User, UserCredential, UserDraft, UserPatch};
use tokio::sync::Mutex;

use crate::{DeleteGuard, NewUser, PasswordHasher, RecordRepository, UserChanges, UserRepository};

use super::{RoleAssignmentGuard, UserService};

struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct FakeUserRepository {
    rows: Mutex<BTreeMap<i64, StoredUser>>,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .map(|row| row.user.clone())
            .collect())
    }

    async fn find(&self, user_id: i64) -> AppResult<Option<User>> {
        Ok(self.rows.lock().await.get(&user_id).map(|row| row.user.clone()))
    }

    async fn find_credential_by_email(&self, email: &str) -> AppResult<Option<UserCredential>> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|row| row.user.email == email)
            .map(|row| UserCredential {
                user: row.user.clone(),
                role_name: "Teacher".to_owned(),
                password_hash: row.password_hash.clone(),
            }))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut rows = self.rows.lock().await;
        let id = rows.len() as i64 + 1;
        let created = User {
            id,
            role_id: user.role_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        };
        rows.insert(
            id,
            StoredUser {
                user: created.clone(),
                password_hash: user.password_hash,
            },
        );
        Ok(created)
    }

    async fn update(&self, user_id: i64, changes: UserChanges) -> AppResult<Option<User>> {
        let mut rows = self.rows.lock().await;
        let Some(row) = rows.get_mut(&user_id) else {
            return Ok(None);
        };
        if let Some(role_id) = changes.role_id {
            row.user.role_id = role_id;
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
        Ok(self.rows.lock().await.remove(&user_id).is_some())
    }
}

struct FakeRoleRepository;

#[async_trait]
impl RecordRepository<Role> for FakeRoleRepository {
    async fn list(&self) -> AppResult<Vec<Role>> {
        Ok(vec![Role {
            id: 1,
            name: "Teacher".to_owned(),
        }])
    }

    async fn find(&self, id: i64) -> AppResult<Option<Role>> {
        Ok(self.list().await?.into_iter().find(|role| role.id == id))
    }

    async fn create(&self, _draft: RoleDraft) -> AppResult<Role> {
        Err(AppError::Internal("not used".to_owned()))
    }

    async fn update(&self, _id: i64, _patch: RolePatch) -> AppResult<Option<Role>> {
        Ok(None)
    }

    async fn delete(&self, _id: i64) -> AppResult<bool> {
        Ok(false)
    }
}

struct ReversingHasher;

impl PasswordHasher for ReversingHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(password.chars().rev().collect())
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(password.chars().rev().collect::<String>() == hash)
    }
}

fn service() -> (UserService, Arc<FakeUserRepository>) {
    let users = Arc::new(FakeUserRepository::default());
    let service = UserService::new(
        users.clone(),
        Arc::new(FakeRoleRepository),
        Arc::new(ReversingHasher),
    );
    (service, users)
}

fn draft(role_id: i64) -> UserDraft {
    UserDraft {
        role_id,
        first_name: "Tess".to_owned(),
        last_name: "Teacher".to_owned(),
        email: "tess@example.com".to_owned(),
        password: "abc123".to_owned(),
    }
}

#[tokio::test]
async fn create_stores_hash_instead_of_plaintext() -> AppResult<()> {
    let (service, users) = service();

    let user = service.create(draft(1)).await?;

    let rows = users.rows.lock().await;
    let stored = rows.get(&user.id).map(|row| row.password_hash.clone());
    assert_eq!(stored.as_deref(), Some("321cba"));
    Ok(())
}

#[tokio::test]
async fn unknown_role_is_a_validation_error() {
    let (service, _) = service();

    let result = service.create(draft(99)).await;
    assert!(matches!(result, Err(AppError::Validation(message)) if message == "role 99 does not exist"));
}

#[tokio::test]
async fn update_rehashes_replacement_password() -> AppResult<()> {
    let (service, users) = service();
    let user = service.create(draft(1)).await?;

    service
        .update(
            user.id,
            UserPatch {
                password: Some("xyz".to_owned()),
                ..UserPatch::default()
            },
        )
        .await?;

    let rows = users.rows.lock().await;
    let stored = rows.get(&user.id).map(|row| row.password_hash.clone());
    assert_eq!(stored.as_deref(), Some("zyx"));
    Ok(())
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let (service, _) = service();

    let result = service.update(7, UserPatch::default()).await;
    assert!(matches!(result, Err(AppError::NotFound(message)) if message == "User not found"));
}

#[tokio::test]
async fn ensure_user_is_idempotent() -> AppResult<()> {
    let (service, _) = service();

    assert!(service.ensure_user(draft(1)).await?);
    assert!(!service.ensure_user(draft(1)).await?);
    assert_eq!(service.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn assigned_role_cannot_be_deleted() -> AppResult<()> {
    let (service, users) = service();
    service.create(draft(1)).await?;
    let guard = RoleAssignmentGuard::new(users);

    let result = guard.ensure_deletable(1).await;
    assert!(
        matches!(result, Err(AppError::Validation(message)) if message == "role 1 is assigned to users")
    );
    guard.ensure_deletable(2).await
}
