use nestling_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::record::{Record, replace, require_optional_text, require_text};

/// Named role assigned to users. Permissions are keyed by the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier.
    pub id: i64,
    /// Unique role name, e.g. `Teacher`.
    pub name: String,
}

/// Payload for creating a role.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleDraft {
    /// Unique role name.
    pub name: String,
}

/// Partial role update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RolePatch {
    /// Replacement role name.
    pub name: Option<String>,
}

impl Record for Role {
    type Draft = RoleDraft;
    type Patch = RolePatch;

    const KIND: &'static str = "Role";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: RoleDraft) -> Self {
        Self {
            id,
            name: draft.name,
        }
    }

    fn apply_patch(&mut self, patch: RolePatch) {
        replace(&mut self.name, patch.name);
    }

    fn unique_key(&self) -> Option<&str> {
        Some(self.name.as_str())
    }

    fn validate_draft(draft: &RoleDraft) -> AppResult<()> {
        require_text("name", &draft.name)
    }

    fn validate_patch(patch: &RolePatch) -> AppResult<()> {
        require_optional_text("name", patch.name.as_ref())
    }
}
