use nestling_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::record::{Record, replace, require_optional_text, require_text};

/// Enrolled child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    /// Child identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Class the child currently attends.
    pub class_id: i64,
}

/// Payload for enrolling a child.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildDraft {
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Initial class.
    pub class_id: i64,
}

/// Partial child update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement age.
    pub age: Option<i32>,
    /// Replacement class.
    pub class_id: Option<i64>,
}

impl ChildPatch {
    /// Patch that only moves the child to another class.
    #[must_use]
    pub fn move_to_class(class_id: i64) -> Self {
        Self {
            class_id: Some(class_id),
            ..Self::default()
        }
    }
}

impl Record for Child {
    type Draft = ChildDraft;
    type Patch = ChildPatch;

    const KIND: &'static str = "Child";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: ChildDraft) -> Self {
        Self {
            id,
            name: draft.name,
            age: draft.age,
            class_id: draft.class_id,
        }
    }

    fn apply_patch(&mut self, patch: ChildPatch) {
        replace(&mut self.name, patch.name);
        replace(&mut self.age, patch.age);
        replace(&mut self.class_id, patch.class_id);
    }

    fn validate_draft(draft: &ChildDraft) -> AppResult<()> {
        require_text("name", &draft.name)
    }

    fn validate_patch(patch: &ChildPatch) -> AppResult<()> {
        require_optional_text("name", patch.name.as_ref())
    }
}
