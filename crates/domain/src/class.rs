use nestling_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::record::{Record, replace, require_optional_text, require_text};

/// Age-banded group of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// Class identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Youngest age admitted, in years.
    pub min_age: i32,
    /// Oldest age admitted, in years.
    pub max_age: i32,
}

/// Payload for creating a class.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassDraft {
    /// Display name.
    pub name: String,
    /// Youngest age admitted.
    pub min_age: i32,
    /// Oldest age admitted.
    pub max_age: i32,
}

/// Partial class update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement minimum age.
    pub min_age: Option<i32>,
    /// Replacement maximum age.
    pub max_age: Option<i32>,
}

impl Record for Class {
    type Draft = ClassDraft;
    type Patch = ClassPatch;

    const KIND: &'static str = "Class";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: ClassDraft) -> Self {
        Self {
            id,
            name: draft.name,
            min_age: draft.min_age,
            max_age: draft.max_age,
        }
    }

    fn apply_patch(&mut self, patch: ClassPatch) {
        replace(&mut self.name, patch.name);
        replace(&mut self.min_age, patch.min_age);
        replace(&mut self.max_age, patch.max_age);
    }

    fn validate_draft(draft: &ClassDraft) -> AppResult<()> {
        require_text("name", &draft.name)
    }

    fn validate_patch(patch: &ClassPatch) -> AppResult<()> {
        require_optional_text("name", patch.name.as_ref())
    }
}
