use serde::{Deserialize, Serialize};

/// Verified identity carried by a bearer token.
///
/// The role name is captured when the token is issued and trusted for the
/// token's whole lifetime; a role change takes effect at the next login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    user_id: i64,
    email: String,
    role_id: i64,
    role_name: String,
}

impl UserIdentity {
    /// Creates a user identity from a credential and its joined role.
    #[must_use]
    pub fn new(
        user_id: i64,
        email: impl Into<String>,
        role_id: i64,
        role_name: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            email: email.into(),
            role_id,
            role_name: role_name.into(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Returns the email the user logged in with.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the role identifier assigned at login.
    #[must_use]
    pub fn role_id(&self) -> i64 {
        self.role_id
    }

    /// Returns the role name assigned at login.
    #[must_use]
    pub fn role_name(&self) -> &str {
        self.role_name.as_str()
    }
}
