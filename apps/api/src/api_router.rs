use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{MethodRouter, delete, get, post, put};
use nestling_application::{AuthorizationService, RecordService, UserService};
use nestling_core::AppError;
use nestling_domain::{Action, Record, Resource};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, children, health, records, users};
use crate::middleware::{self, PermissionGate};
use crate::state::AppState;

mod cors;

pub fn build_router(
    app_state: AppState,
    cors_allowed_origin: Option<&str>,
) -> Result<Router, AppError> {
    let authorization = &app_state.authorization_service;

    let protected_routes = Router::new()
        .route(
            "/api/auth/me",
            get(auth::me_handler).with_state(app_state.clone()),
        )
        .merge(
            record_routes("/api/roles", Resource::Roles, authorization)
                .with_state(app_state.role_service.clone()),
        )
        .merge(user_routes(authorization).with_state(app_state.user_service.clone()))
        .merge(
            record_routes("/api/classes", Resource::Classes, authorization)
                .with_state(app_state.class_service.clone()),
        )
        .merge(
            record_routes("/api/children", Resource::Children, authorization)
                .route(
                    "/api/children/{id}/class",
                    gated(
                        put(children::move_child_handler),
                        authorization,
                        Resource::Children,
                        Action::Move,
                    ),
                )
                .with_state(app_state.child_service.clone()),
        )
        .merge(
            record_routes("/api/categories", Resource::Categories, authorization)
                .with_state(app_state.category_service.clone()),
        )
        .merge(
            record_routes("/api/milestones", Resource::Milestones, authorization)
                .with_state(app_state.milestone_service.clone()),
        )
        .merge(
            record_routes("/api/evaluations", Resource::Evaluations, authorization)
                .with_state(app_state.evaluation_service.clone()),
        )
        .route_layer(from_fn_with_state(
            app_state.auth_service.clone(),
            middleware::require_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/auth/login",
            post(auth::login_handler).with_state(app_state.clone()),
        );

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(cors_allowed_origin)?))
}

/// Wraps a method router with a fixed permission requirement.
fn gated<S>(
    route: MethodRouter<S>,
    authorization: &AuthorizationService,
    resource: Resource,
    action: Action,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(
        PermissionGate {
            authorization: authorization.clone(),
            resource,
            action,
        },
        middleware::require_permission,
    ))
}

fn record_routes<R>(
    path: &str,
    resource: Resource,
    authorization: &AuthorizationService,
) -> Router<RecordService<R>>
where
    R: Record + Serialize,
    R::Draft: DeserializeOwned,
    R::Patch: DeserializeOwned,
{
    let item_path = format!("{path}/{{id}}");

    Router::new()
        .route(
            path,
            gated(
                get(records::list_records_handler::<R>),
                authorization,
                resource,
                Action::View,
            )
            .merge(gated(
                post(records::create_record_handler::<R>),
                authorization,
                resource,
                Action::Create,
            )),
        )
        .route(
            &item_path,
            gated(
                get(records::get_record_handler::<R>),
                authorization,
                resource,
                Action::View,
            )
            .merge(gated(
                put(records::update_record_handler::<R>),
                authorization,
                resource,
                Action::Edit,
            ))
            .merge(gated(
                delete(records::delete_record_handler::<R>),
                authorization,
                resource,
                Action::Delete,
            )),
        )
}

fn user_routes(authorization: &AuthorizationService) -> Router<UserService> {
    Router::new()
        .route(
            "/api/users",
            gated(
                get(users::list_users_handler),
                authorization,
                Resource::Users,
                Action::View,
            )
            .merge(gated(
                post(users::create_user_handler),
                authorization,
                Resource::Users,
                Action::Create,
            )),
        )
        .route(
            "/api/users/{id}",
            gated(
                get(users::get_user_handler),
                authorization,
                Resource::Users,
                Action::View,
            )
            .merge(gated(
                put(users::update_user_handler),
                authorization,
                Resource::Users,
                Action::Edit,
            ))
            .merge(gated(
                delete(users::delete_user_handler),
                authorization,
                Resource::Users,
                Action::Delete,
            )),
        )
}
