//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod category;
mod child;
mod class;
mod evaluation;
mod milestone;
mod record;
mod role;
mod security;
mod user;

pub use category::{Category, CategoryDraft, CategoryPatch};
pub use child::{Child, ChildDraft, ChildPatch};
pub use class::{Class, ClassDraft, ClassPatch};
pub use evaluation::{Evaluation, EvaluationDraft, EvaluationPatch};
pub use milestone::{Milestone, MilestoneDraft, MilestonePatch};
pub use record::Record;
pub use role::{Role, RoleDraft, RolePatch};
pub use security::{
    Action, BUILTIN_ROLES, PermissionTable, ROLE_DEVELOPER, ROLE_MANAGER, ROLE_TEACHER, Resource,
    RolePermissions,
};
pub use user::{User, UserCredential, UserDraft, UserPatch};
