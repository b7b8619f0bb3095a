use nestling_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::record::{Record, replace, require_optional_text, require_text};

/// Developmental milestone expected within an age band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// What the child is expected to do.
    pub description: String,
    /// Age at which the milestone is first expected.
    pub min_age: i32,
    /// Age by which the milestone is expected.
    pub max_age: i32,
    /// Owning category.
    pub category_id: i64,
}

/// Payload for creating a milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct MilestoneDraft {
    /// Display name.
    pub name: String,
    /// Expected behaviour.
    pub description: String,
    /// Lower age bound.
    pub min_age: i32,
    /// Upper age bound.
    pub max_age: i32,
    /// Owning category.
    pub category_id: i64,
}

/// Partial milestone update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MilestonePatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement lower age bound.
    pub min_age: Option<i32>,
    /// Replacement upper age bound.
    pub max_age: Option<i32>,
    /// Replacement category.
    pub category_id: Option<i64>,
}

impl Record for Milestone {
    type Draft = MilestoneDraft;
    type Patch = MilestonePatch;

    const KIND: &'static str = "Milestone";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: MilestoneDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            min_age: draft.min_age,
            max_age: draft.max_age,
            category_id: draft.category_id,
        }
    }

    fn apply_patch(&mut self, patch: MilestonePatch) {
        replace(&mut self.name, patch.name);
        replace(&mut self.description, patch.description);
        replace(&mut self.min_age, patch.min_age);
        replace(&mut self.max_age, patch.max_age);
        replace(&mut self.category_id, patch.category_id);
    }

    fn validate_draft(draft: &MilestoneDraft) -> AppResult<()> {
        require_text("name", &draft.name)
    }

    fn validate_patch(patch: &MilestonePatch) -> AppResult<()> {
        require_optional_text("name", patch.name.as_ref())
    }
}
