use serde::{Deserialize, Serialize};

use crate::record::{Record, replace};

/// Assessment of a child, scored by staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Evaluation identifier.
    pub id: i64,
    /// Evaluated child.
    pub child_id: i64,
    /// Score awarded.
    pub score: i32,
    /// Optional free-form notes.
    pub comments: Option<String>,
}

/// Payload for recording an evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationDraft {
    /// Evaluated child.
    pub child_id: i64,
    /// Score awarded.
    pub score: i32,
    /// Optional notes.
    #[serde(default)]
    pub comments: Option<String>,
}

/// Partial evaluation update. Absent comments leave the stored value intact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluationPatch {
    /// Replacement child.
    pub child_id: Option<i64>,
    /// Replacement score.
    pub score: Option<i32>,
    /// Replacement notes.
    pub comments: Option<String>,
}

impl Record for Evaluation {
    type Draft = EvaluationDraft;
    type Patch = EvaluationPatch;

    const KIND: &'static str = "Evaluation";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: EvaluationDraft) -> Self {
        Self {
            id,
            child_id: draft.child_id,
            score: draft.score,
            comments: draft.comments,
        }
    }

    fn apply_patch(&mut self, patch: EvaluationPatch) {
        replace(&mut self.child_id, patch.child_id);
        replace(&mut self.score, patch.score);
        if patch.comments.is_some() {
            self.comments = patch.comments;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Evaluation, EvaluationDraft, EvaluationPatch};
    use crate::Record;

    #[test]
    fn patch_without_comments_keeps_existing_notes() {
        let mut evaluation = Evaluation::from_draft(
            1,
            EvaluationDraft {
                child_id: 9,
                score: 3,
                comments: Some("settling in".to_owned()),
            },
        );

        evaluation.apply_patch(EvaluationPatch {
            score: Some(4),
            ..EvaluationPatch::default()
        });

        assert_eq!(evaluation.score, 4);
        assert_eq!(evaluation.comments.as_deref(), Some("settling in"));
    }
}
