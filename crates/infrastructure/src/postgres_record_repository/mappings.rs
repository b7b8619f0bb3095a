use nestling_domain::{
    Category, CategoryDraft, CategoryPatch, Child, ChildDraft, ChildPatch, Class, ClassDraft,
    ClassPatch, Evaluation, EvaluationDraft, EvaluationPatch, Milestone, MilestoneDraft,
    MilestonePatch, Role, RoleDraft, RolePatch,
};

use super::{PostgresRecord, RowQuery};

#[derive(Debug, sqlx::FromRow)]
pub struct RoleRow {
    id: i64,
    name: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

impl PostgresRecord for Role {
    const TABLE: &'static str = "roles";
    const COLUMNS: &'static str = "name";
    const PLACEHOLDERS: &'static str = "$1";
    const ASSIGNMENTS: &'static str = "name = COALESCE($2, name)";

    type Row = RoleRow;

    fn bind_draft<'q>(query: RowQuery<'q, RoleRow>, draft: RoleDraft) -> RowQuery<'q, RoleRow> {
        query.bind(draft.name)
    }

    fn bind_patch<'q>(query: RowQuery<'q, RoleRow>, patch: RolePatch) -> RowQuery<'q, RoleRow> {
        query.bind(patch.name)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ClassRow {
    id: i64,
    name: String,
    min_age: i32,
    max_age: i32,
}

impl From<ClassRow> for Class {
    fn from(row: ClassRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            min_age: row.min_age,
            max_age: row.max_age,
        }
    }
}

impl PostgresRecord for Class {
    const TABLE: &'static str = "classes";
    const COLUMNS: &'static str = "name, min_age, max_age";
    const PLACEHOLDERS: &'static str = "$1, $2, $3";
    const ASSIGNMENTS: &'static str = "name = COALESCE($2, name), \
         min_age = COALESCE($3, min_age), \
         max_age = COALESCE($4, max_age)";

    type Row = ClassRow;

    fn bind_draft<'q>(query: RowQuery<'q, ClassRow>, draft: ClassDraft) -> RowQuery<'q, ClassRow> {
        query
            .bind(draft.name)
            .bind(draft.min_age)
            .bind(draft.max_age)
    }

    fn bind_patch<'q>(query: RowQuery<'q, ClassRow>, patch: ClassPatch) -> RowQuery<'q, ClassRow> {
        query
            .bind(patch.name)
            .bind(patch.min_age)
            .bind(patch.max_age)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ChildRow {
    id: i64,
    name: String,
    age: i32,
    class_id: i64,
}

impl From<ChildRow> for Child {
    fn from(row: ChildRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
            class_id: row.class_id,
        }
    }
}

impl PostgresRecord for Child {
    const TABLE: &'static str = "children";
    const COLUMNS: &'static str = "name, age, class_id";
    const PLACEHOLDERS: &'static str = "$1, $2, $3";
    const ASSIGNMENTS: &'static str = "name = COALESCE($2, name), \
         age = COALESCE($3, age), \
         class_id = COALESCE($4, class_id)";

    type Row = ChildRow;

    fn bind_draft<'q>(query: RowQuery<'q, ChildRow>, draft: ChildDraft) -> RowQuery<'q, ChildRow> {
        query.bind(draft.name).bind(draft.age).bind(draft.class_id)
    }

    fn bind_patch<'q>(query: RowQuery<'q, ChildRow>, patch: ChildPatch) -> RowQuery<'q, ChildRow> {
        query.bind(patch.name).bind(patch.age).bind(patch.class_id)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct CategoryRow {
    id: i64,
    name: String,
    description: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

impl PostgresRecord for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static str = "name, description";
    const PLACEHOLDERS: &'static str = "$1, $2";
    const ASSIGNMENTS: &'static str =
        "name = COALESCE($2, name), description = COALESCE($3, description)";

    type Row = CategoryRow;

    fn bind_draft<'q>(
        query: RowQuery<'q, CategoryRow>,
        draft: CategoryDraft,
    ) -> RowQuery<'q, CategoryRow> {
        query.bind(draft.name).bind(draft.description)
    }

    fn bind_patch<'q>(
        query: RowQuery<'q, CategoryRow>,
        patch: CategoryPatch,
    ) -> RowQuery<'q, CategoryRow> {
        query.bind(patch.name).bind(patch.description)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct MilestoneRow {
    id: i64,
    name: String,
    description: String,
    min_age: i32,
    max_age: i32,
    category_id: i64,
}

impl From<MilestoneRow> for Milestone {
    fn from(row: MilestoneRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            min_age: row.min_age,
            max_age: row.max_age,
            category_id: row.category_id,
        }
    }
}

impl PostgresRecord for Milestone {
    const TABLE: &'static str = "milestones";
    const COLUMNS: &'static str = "name, description, min_age, max_age, category_id";
    const PLACEHOLDERS: &'static str = "$1, $2, $3, $4, $5";
    const ASSIGNMENTS: &'static str = "name = COALESCE($2, name), \
         description = COALESCE($3, description), \
         min_age = COALESCE($4, min_age), \
         max_age = COALESCE($5, max_age), \
         category_id = COALESCE($6, category_id)";

    type Row = MilestoneRow;

    fn bind_draft<'q>(
        query: RowQuery<'q, MilestoneRow>,
        draft: MilestoneDraft,
    ) -> RowQuery<'q, MilestoneRow> {
        query
            .bind(draft.name)
            .bind(draft.description)
            .bind(draft.min_age)
            .bind(draft.max_age)
            .bind(draft.category_id)
    }

    fn bind_patch<'q>(
        query: RowQuery<'q, MilestoneRow>,
        patch: MilestonePatch,
    ) -> RowQuery<'q, MilestoneRow> {
        query
            .bind(patch.name)
            .bind(patch.description)
            .bind(patch.min_age)
            .bind(patch.max_age)
            .bind(patch.category_id)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct EvaluationRow {
    id: i64,
    child_id: i64,
    score: i32,
    comments: Option<String>,
}

impl From<EvaluationRow> for Evaluation {
    fn from(row: EvaluationRow) -> Self {
        Self {
            id: row.id,
            child_id: row.child_id,
            score: row.score,
            comments: row.comments,
        }
    }
}

impl PostgresRecord for Evaluation {
    const TABLE: &'static str = "evaluations";
    const COLUMNS: &'static str = "child_id, score, comments";
    const PLACEHOLDERS: &'static str = "$1, $2, $3";
    const ASSIGNMENTS: &'static str = "child_id = COALESCE($2, child_id), \
         score = COALESCE($3, score), \
         comments = COALESCE($4, comments)";

    type Row = EvaluationRow;

    fn bind_draft<'q>(
        query: RowQuery<'q, EvaluationRow>,
        draft: EvaluationDraft,
    ) -> RowQuery<'q, EvaluationRow> {
        query
            .bind(draft.child_id)
            .bind(draft.score)
            .bind(draft.comments)
    }

    fn bind_patch<'q>(
        query: RowQuery<'q, EvaluationRow>,
        patch: EvaluationPatch,
    ) -> RowQuery<'q, EvaluationRow> {
        query
            .bind(patch.child_id)
            .bind(patch.score)
            .bind(patch.comments)
    }
}
