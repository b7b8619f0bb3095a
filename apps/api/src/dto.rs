use chrono::{DateTime, Utc};
use nestling_application::LoginOutcome;
use nestling_core::UserIdentity;
use nestling_domain::{Role, RolePermissions, User};
use serde::{Deserialize, Serialize};

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Login credentials. Missing fields deserialize as empty and are rejected
/// by the authentication service.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// User joined with its role.
#[derive(Debug, Serialize)]
pub struct UserWithRoleResponse {
    #[serde(flatten)]
    pub user: User,
    pub role: Role,
}

/// Successful login payload.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserWithRoleResponse,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            user: UserWithRoleResponse {
                user: outcome.user,
                role: outcome.role,
            },
            token: outcome.token.token,
            expires_at: outcome.token.expires_at,
        }
    }
}

/// Authenticated identity with the permissions of its role.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub identity: UserIdentity,
    pub permissions: RolePermissions,
}

/// Target class for moving a child.
#[derive(Debug, Deserialize)]
pub struct MoveChildRequest {
    pub class_id: i64,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use nestling_application::{IssuedToken, LoginOutcome};
    use nestling_domain::{Role, User};

    use super::LoginResponse;

    #[test]
    fn login_response_nests_role_and_omits_password() {
        let response = LoginResponse::from(LoginOutcome {
            user: User {
                id: 1,
                role_id: 2,
                first_name: "Max".to_owned(),
                last_name: "Manager".to_owned(),
                email: "max@example.com".to_owned(),
            },
            role: Role {
                id: 2,
                name: "Manager".to_owned(),
            },
            token: IssuedToken {
                token: "signed".to_owned(),
                expires_at: Utc::now(),
            },
        });

        let value = serde_json::to_value(&response).unwrap_or_default();
        assert_eq!(value["token"], "signed");
        assert_eq!(value["user"]["email"], "max@example.com");
        assert_eq!(value["user"]["role"]["name"], "Manager");
        assert!(value["user"].get("password").is_none());
        assert!(value["user"].get("password_hash").is_none());
    }
}
