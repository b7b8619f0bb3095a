use std::sync::Arc;

use nestling_application::{NewUser, RecordRepository, UserChanges, UserRepository};
use nestling_core::{AppError, AppResult};
use nestling_domain::{Role, RoleDraft};

use super::InMemoryUserRepository;
use crate::InMemoryRecordRepository;

async fn repository() -> AppResult<(InMemoryUserRepository, Role)> {
    let roles = Arc::new(InMemoryRecordRepository::<Role>::new());
    let teacher = roles
        .create(RoleDraft {
            name: "Teacher".to_owned(),
        })
        .await?;
    Ok((InMemoryUserRepository::new(roles), teacher))
}

fn new_user(role_id: i64, email: &str) -> NewUser {
    NewUser {
        role_id,
        first_name: "Tess".to_owned(),
        last_name: "Teacher".to_owned(),
        email: email.to_owned(),
        password_hash: "digest".to_owned(),
    }
}

#[tokio::test]
async fn credential_lookup_joins_role_name() -> AppResult<()> {
    let (repository, teacher) = repository().await?;
    let created = repository
        .create(new_user(teacher.id, "tess@example.com"))
        .await?;

    let credential = repository
        .find_credential_by_email("tess@example.com")
        .await?;

    let credential = credential.ok_or_else(|| AppError::NotFound("credential".to_owned()))?;
    assert_eq!(credential.user, created);
    assert_eq!(credential.role_name, "Teacher");
    assert_eq!(credential.password_hash, "digest");
    Ok(())
}

#[tokio::test]
async fn email_match_is_exact() -> AppResult<()> {
    let (repository, teacher) = repository().await?;
    repository
        .create(new_user(teacher.id, "tess@example.com"))
        .await?;

    assert!(
        repository
            .find_credential_by_email("TESS@example.com")
            .await?
            .is_none()
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_email_conflicts() -> AppResult<()> {
    let (repository, teacher) = repository().await?;
    repository
        .create(new_user(teacher.id, "tess@example.com"))
        .await?;
    let other = repository
        .create(new_user(teacher.id, "tom@example.com"))
        .await?;

    let duplicate = repository
        .create(new_user(teacher.id, "tess@example.com"))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let steal = repository
        .update(
            other.id,
            UserChanges {
                email: Some("tess@example.com".to_owned()),
                ..UserChanges::default()
            },
        )
        .await;
    assert!(matches!(steal, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn update_replaces_only_present_columns() -> AppResult<()> {
    let (repository, teacher) = repository().await?;
    let created = repository
        .create(new_user(teacher.id, "tess@example.com"))
        .await?;

    let updated = repository
        .update(
            created.id,
            UserChanges {
                last_name: Some("Taylor".to_owned()),
                password_hash: Some("new-digest".to_owned()),
                ..UserChanges::default()
            },
        )
        .await?;

    let updated = updated.ok_or_else(|| AppError::NotFound("user".to_owned()))?;
    assert_eq!(updated.first_name, "Tess");
    assert_eq!(updated.last_name, "Taylor");

    let credential = repository
        .find_credential_by_email("tess@example.com")
        .await?
        .ok_or_else(|| AppError::NotFound("credential".to_owned()))?;
    assert_eq!(credential.password_hash, "new-digest");
    Ok(())
}
