use nestling_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::record::{Record, replace, require_optional_text, require_text};

/// Grouping of developmental milestones, e.g. "Motor skills".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDraft {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Partial category update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}

impl Record for Category {
    type Draft = CategoryDraft;
    type Patch = CategoryPatch;

    const KIND: &'static str = "Category";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: CategoryDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
        }
    }

    fn apply_patch(&mut self, patch: CategoryPatch) {
        replace(&mut self.name, patch.name);
        replace(&mut self.description, patch.description);
    }

    fn validate_draft(draft: &CategoryDraft) -> AppResult<()> {
        require_text("name", &draft.name)
    }

    fn validate_patch(patch: &CategoryPatch) -> AppResult<()> {
        require_optional_text("name", patch.name.as_ref())
    }
}
