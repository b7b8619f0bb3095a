//! Startup seeding: built-in roles and an optional Developer account.

use nestling_core::AppError;
use nestling_domain::{BUILTIN_ROLES, ROLE_DEVELOPER, RoleDraft, UserDraft};
use tracing::info;

use crate::api_config::BootstrapAdmin;
use crate::state::AppState;

pub async fn ensure_builtin_roles(state: &AppState) -> Result<(), AppError> {
    let existing = state.role_service.list().await?;

    for name in BUILTIN_ROLES {
        if existing.iter().any(|role| role.name == name) {
            continue;
        }

        let role = state
            .role_service
            .create(RoleDraft {
                name: name.to_owned(),
            })
            .await?;
        info!(role_id = role.id, role = %role.name, "created built-in role");
    }

    Ok(())
}

pub async fn ensure_admin_account(
    state: &AppState,
    admin: &BootstrapAdmin,
) -> Result<(), AppError> {
    let developer = state
        .role_service
        .list()
        .await?
        .into_iter()
        .find(|role| role.name == ROLE_DEVELOPER)
        .ok_or_else(|| AppError::Internal(format!("role '{ROLE_DEVELOPER}' is missing")))?;

    let created = state
        .user_service
        .ensure_user(UserDraft {
            role_id: developer.id,
            first_name: "Admin".to_owned(),
            last_name: "Account".to_owned(),
            email: admin.email.clone(),
            password: admin.password.clone(),
        })
        .await?;

    if created {
        info!(email = %admin.email, "created bootstrap admin account");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use nestling_core::AppError;
    use nestling_domain::PermissionTable;
    use nestling_infrastructure::JwtTokenIssuer;

    use super::{ensure_admin_account, ensure_builtin_roles};
    use crate::api_config::BootstrapAdmin;
    use crate::api_services::{RepositorySet, assemble_app_state};

    #[tokio::test]
    async fn seeding_is_idempotent() -> Result<(), AppError> {
        let state = assemble_app_state(
            RepositorySet::in_memory(),
            PermissionTable::builtin(),
            JwtTokenIssuer::new("test-secret"),
        );
        let admin = BootstrapAdmin {
            email: "root@example.com".to_owned(),
            password: "root-password".to_owned(),
        };

        for _ in 0..2 {
            ensure_builtin_roles(&state).await?;
            ensure_admin_account(&state, &admin).await?;
        }

        let roles = state.role_service.list().await?;
        assert_eq!(roles.len(), 3);

        let users = state.user_service.list().await?;
        assert_eq!(users.len(), 1);
        let developer = roles.iter().find(|role| role.name == "Developer");
        assert_eq!(developer.map(|role| role.id), Some(users[0].role_id));
        Ok(())
    }
}
