//! Application services and ports.

#![forbid(unsafe_code)]

mod auth_ports;
mod auth_service;
mod authorization_service;
mod record_service;
mod user_service;

pub use auth_ports::{
    IssuedToken, NewUser, PasswordHasher, TokenIssuer, UserChanges, UserRepository,
};
pub use auth_service::{AuthService, LoginOutcome};
pub use authorization_service::{AuthorizationService, FORBIDDEN_MESSAGE};
pub use record_service::{DeleteGuard, RecordRepository, RecordService};
pub use user_service::{RoleAssignmentGuard, UserService};
