//! Staff accounts.
//!
//! A user's password hash never leaves the persistence layer through these
//! types: [`User`] has no hash field and [`UserDraft`] redacts the plaintext
//! password from its `Debug` output.

use std::fmt;

use nestling_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::record::{require_optional_text, require_text};

/// Staff account as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: i64,
    /// Assigned role.
    pub role_id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique login email.
    pub email: String,
}

/// Payload for creating a user. The password is plaintext until hashed.
#[derive(Clone, Deserialize)]
pub struct UserDraft {
    /// Assigned role.
    pub role_id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl UserDraft {
    /// Checks that every required field is present.
    pub fn validate(&self) -> AppResult<()> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_text("email", &self.email)?;
        require_text("password", &self.password)
    }
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("UserDraft")
            .field("role_id", &self.role_id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Partial user update. A present password is re-hashed before storage.
#[derive(Clone, Default, Deserialize)]
pub struct UserPatch {
    /// Replacement role.
    pub role_id: Option<i64>,
    /// Replacement given name.
    pub first_name: Option<String>,
    /// Replacement family name.
    pub last_name: Option<String>,
    /// Replacement email.
    pub email: Option<String>,
    /// Replacement plaintext password.
    pub password: Option<String>,
}

impl UserPatch {
    /// Checks that fields present in the patch are not blank.
    pub fn validate(&self) -> AppResult<()> {
        require_optional_text("first_name", self.first_name.as_ref())?;
        require_optional_text("last_name", self.last_name.as_ref())?;
        require_optional_text("email", self.email.as_ref())?;
        require_optional_text("password", self.password.as_ref())
    }
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("UserPatch")
            .field("role_id", &self.role_id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Login lookup result: the account, its joined role name and stored hash.
#[derive(Clone)]
pub struct UserCredential {
    /// Account as exposed to callers.
    pub user: User,
    /// Name of the role referenced by `user.role_id`.
    pub role_name: String,
    /// Stored password hash (Argon2id PHC string or legacy bcrypt).
    pub password_hash: String,
}

impl fmt::Debug for UserCredential {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("UserCredential")
            .field("user", &self.user)
            .field("role_name", &self.role_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{User, UserDraft, UserPatch};

    fn draft() -> UserDraft {
        UserDraft {
            role_id: 1,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "s3cret-value".to_owned(),
        }
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", draft());
        assert!(!rendered.contains("s3cret-value"));
        assert!(rendered.contains("<redacted>"));

        let patch = UserPatch {
            password: Some("s3cret-value".to_owned()),
            ..UserPatch::default()
        };
        assert!(!format!("{patch:?}").contains("s3cret-value"));
    }

    #[test]
    fn draft_requires_password() {
        let mut draft = draft();
        draft.password = "  ".to_owned();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn empty_patch_is_valid() {
        assert!(UserPatch::default().validate().is_ok());
    }

    #[test]
    fn serialized_user_has_no_password_field() {
        let user = User {
            id: 3,
            role_id: 1,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
        };
        let value = serde_json::to_value(&user).unwrap_or_default();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "ada@example.com");
    }
}
