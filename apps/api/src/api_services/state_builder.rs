use std::sync::Arc;

use nestling_application::{
    AuthService, AuthorizationService, RecordService, RoleAssignmentGuard, UserService,
};
use nestling_core::AppError;
use nestling_domain::PermissionTable;
use nestling_infrastructure::{Argon2PasswordHasher, JwtTokenIssuer};
use tracing::{info, warn};

use crate::api_config::ApiConfig;
use crate::state::AppState;

use super::{RepositorySet, connect, load_permission_table};

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    if config.jwt_secret_is_default {
        warn!("JWT_SECRET is not set; signing tokens with the development default");
    }

    let permission_table = load_permission_table(config.permissions_file.as_deref())?;

    let repositories = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect(database_url, config.database_max_connections).await?;
            info!("using PostgreSQL storage");
            RepositorySet::postgres(&pool)
        }
        None => {
            warn!("DATABASE_URL is not set; using in-memory storage");
            RepositorySet::in_memory()
        }
    };

    Ok(assemble_app_state(
        repositories,
        permission_table,
        JwtTokenIssuer::new(&config.jwt_secret),
    ))
}

pub fn assemble_app_state(
    repositories: RepositorySet,
    permission_table: PermissionTable,
    token_issuer: JwtTokenIssuer,
) -> AppState {
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    AppState {
        auth_service: AuthService::new(
            repositories.users.clone(),
            password_hasher.clone(),
            Arc::new(token_issuer),
        ),
        authorization_service: AuthorizationService::new(Arc::new(permission_table)),
        user_service: UserService::new(
            repositories.users.clone(),
            repositories.roles.clone(),
            password_hasher,
        ),
        role_service: RecordService::new(repositories.roles)
            .with_delete_guard(Arc::new(RoleAssignmentGuard::new(repositories.users))),
        class_service: RecordService::new(repositories.classes),
        child_service: RecordService::new(repositories.children),
        category_service: RecordService::new(repositories.categories),
        milestone_service: RecordService::new(repositories.milestones),
        evaluation_service: RecordService::new(repositories.evaluations),
    }
}
