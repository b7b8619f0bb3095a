//! Nestling API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod bootstrap;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use nestling_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let app_state = api_services::build_app_state(&config).await?;

    bootstrap::ensure_builtin_roles(&app_state).await?;
    if let Some(admin) = config.bootstrap_admin.as_ref() {
        bootstrap::ensure_admin_account(&app_state, admin).await?;
    }

    let app = api_router::build_router(app_state, config.cors_allowed_origin.as_deref())?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "nestling-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
