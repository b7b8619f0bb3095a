//! Role-based permission model.
//!
//! The permission table maps a role name to the actions it may perform on
//! each resource. Anything the table does not mention is denied: an unknown
//! role resolves to an empty [`RolePermissions`], and an unknown resource
//! resolves to an empty action set.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use nestling_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Name of the built-in teacher role.
pub const ROLE_TEACHER: &str = "Teacher";
/// Name of the built-in manager role.
pub const ROLE_MANAGER: &str = "Manager";
/// Name of the built-in developer role.
pub const ROLE_DEVELOPER: &str = "Developer";

/// Role names covered by the built-in permission table.
pub const BUILTIN_ROLES: [&str; 3] = [ROLE_TEACHER, ROLE_MANAGER, ROLE_DEVELOPER];

/// Resources guarded by the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Children enrolled in the childcare.
    Children,
    /// Evaluations recorded for children.
    Evaluations,
    /// Staff user accounts.
    Users,
    /// Age-banded classes.
    Classes,
    /// Milestone categories.
    Categories,
    /// Developmental milestones.
    Milestones,
    /// Roles assignable to users.
    Roles,
}

impl Resource {
    /// Returns the stable transport value for this resource.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Children => "children",
            Self::Evaluations => "evaluations",
            Self::Users => "users",
            Self::Classes => "classes",
            Self::Categories => "categories",
            Self::Milestones => "milestones",
            Self::Roles => "roles",
        }
    }

    /// Returns all known resources.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Resource] = &[
            Resource::Children,
            Resource::Evaluations,
            Resource::Users,
            Resource::Classes,
            Resource::Categories,
            Resource::Milestones,
            Resource::Roles,
        ];

        ALL
    }
}

impl FromStr for Resource {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|resource| resource.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown resource '{value}'")))
    }
}

/// Actions a role may perform on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read a single record or list records.
    View,
    /// Create a record.
    Create,
    /// Update a record.
    Edit,
    /// Delete a record.
    Delete,
    /// Move a child to another class.
    Move,
}

impl Action {
    /// Returns the stable transport value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Move => "move",
        }
    }

    /// Returns all known actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Action] = &[
            Action::View,
            Action::Create,
            Action::Edit,
            Action::Delete,
            Action::Move,
        ];

        ALL
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown action '{value}'")))
    }
}

static NO_ACTIONS: BTreeSet<Action> = BTreeSet::new();
static NO_PERMISSIONS: RolePermissions = RolePermissions(BTreeMap::new());

/// Actions one role may perform, keyed by resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RolePermissions(BTreeMap<Resource, BTreeSet<Action>>);

impl RolePermissions {
    /// Returns a copy granting `actions` on `resource` in addition to the
    /// existing grants.
    #[must_use]
    pub fn grant(mut self, resource: Resource, actions: &[Action]) -> Self {
        self.0
            .entry(resource)
            .or_default()
            .extend(actions.iter().copied());
        self
    }

    /// Returns the actions allowed on a resource. Unknown resources yield an
    /// empty set.
    #[must_use]
    pub fn actions(&self, resource: Resource) -> &BTreeSet<Action> {
        self.0.get(&resource).unwrap_or(&NO_ACTIONS)
    }

    /// Returns whether the action is allowed on the resource.
    #[must_use]
    pub fn allows(&self, resource: Resource, action: Action) -> bool {
        self.actions(resource).contains(&action)
    }

    /// Returns true when no action is granted on any resource.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }

    /// Iterates over the resources and their allowed actions.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, &BTreeSet<Action>)> {
        self.0.iter().map(|(resource, actions)| (*resource, actions))
    }
}

/// Immutable mapping from role name to the actions it may perform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTable(BTreeMap<String, RolePermissions>);

impl PermissionTable {
    /// Builds the default table for the Teacher, Manager and Developer roles.
    #[must_use]
    pub fn builtin() -> Self {
        use Action::{Create, Delete, Edit, Move, View};

        let crud = [View, Create, Edit, Delete];

        let teacher = RolePermissions::default()
            .grant(Resource::Children, &[View, Edit, Move])
            .grant(Resource::Evaluations, &[View, Create, Edit])
            .grant(Resource::Users, &[])
            .grant(Resource::Classes, &[View])
            .grant(Resource::Categories, &[View])
            .grant(Resource::Milestones, &[View]);

        let manager = RolePermissions::default()
            .grant(Resource::Children, &[View, Create, Edit, Delete, Move])
            .grant(Resource::Evaluations, &crud)
            .grant(Resource::Users, &[View, Create, Edit])
            .grant(Resource::Classes, &crud)
            .grant(Resource::Categories, &crud)
            .grant(Resource::Milestones, &crud)
            .grant(Resource::Roles, &[View]);

        let developer = RolePermissions::default()
            .grant(Resource::Children, &[View, Create, Edit, Delete, Move])
            .grant(Resource::Evaluations, &crud)
            .grant(Resource::Users, &crud)
            .grant(Resource::Classes, &crud)
            .grant(Resource::Categories, &crud)
            .grant(Resource::Milestones, &crud)
            .grant(Resource::Roles, &crud);

        Self(BTreeMap::from([
            (ROLE_TEACHER.to_owned(), teacher),
            (ROLE_MANAGER.to_owned(), manager),
            (ROLE_DEVELOPER.to_owned(), developer),
        ]))
    }

    /// Parses a table from JSON shaped as
    /// `{"Role": {"resource": ["action", ...]}}`.
    ///
    /// Unknown resource or action names are rejected rather than ignored.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw)
            .map_err(|error| AppError::Validation(format!("invalid permission table: {error}")))
    }

    /// Returns every permission of a role, or an empty set for unknown roles.
    #[must_use]
    pub fn permissions_for(&self, role_name: &str) -> &RolePermissions {
        self.0.get(role_name).unwrap_or(&NO_PERMISSIONS)
    }

    /// Returns whether the role may perform the action on the resource.
    #[must_use]
    pub fn allows(&self, role_name: &str, resource: Resource, action: Action) -> bool {
        self.permissions_for(role_name).allows(resource, action)
    }

    /// String-keyed variant of [`PermissionTable::allows`]. Unknown roles,
    /// resources and actions are denied.
    #[must_use]
    pub fn can_perform(&self, role_name: &str, resource: &str, action: &str) -> bool {
        let (Ok(resource), Ok(action)) = (resource.parse(), action.parse()) else {
            return false;
        };

        self.allows(role_name, resource, action)
    }

    /// Iterates over the role names present in the table.
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn teacher_cannot_delete_children() {
        let table = PermissionTable::builtin();
        assert!(!table.can_perform(ROLE_TEACHER, "children", "delete"));
        assert!(table.can_perform(ROLE_TEACHER, "children", "move"));
    }

    #[test]
    fn manager_can_delete_children_but_not_users() {
        let table = PermissionTable::builtin();
        assert!(table.can_perform(ROLE_MANAGER, "children", "delete"));
        assert!(!table.can_perform(ROLE_MANAGER, "users", "delete"));
    }

    #[test]
    fn developer_has_full_user_management() {
        let table = PermissionTable::builtin();
        for action in ["view", "create", "edit", "delete"] {
            assert!(table.can_perform(ROLE_DEVELOPER, "users", action));
        }
    }

    #[test]
    fn role_names_are_case_sensitive() {
        let table = PermissionTable::builtin();
        assert!(!table.can_perform("teacher", "children", "view"));
    }

    #[test]
    fn unknown_role_has_empty_permissions() {
        let table = PermissionTable::builtin();
        let permissions = table.permissions_for("Janitor");
        assert!(permissions.is_empty());
        assert!(permissions.actions(Resource::Children).is_empty());
    }

    #[test]
    fn teacher_has_no_user_permissions() {
        let table = PermissionTable::builtin();
        let permissions = table.permissions_for(ROLE_TEACHER);
        assert!(permissions.actions(Resource::Users).is_empty());
        assert!(permissions.actions(Resource::Roles).is_empty());
    }

    #[test]
    fn unknown_resource_or_action_is_denied() {
        let table = PermissionTable::builtin();
        assert!(!table.can_perform(ROLE_DEVELOPER, "invoices", "view"));
        assert!(!table.can_perform(ROLE_DEVELOPER, "children", "archive"));
    }

    #[test]
    fn json_table_replaces_builtin_grants() -> AppResult<()> {
        let table = PermissionTable::from_json(r#"{"Auditor": {"evaluations": ["view"]}}"#)?;

        assert!(table.can_perform("Auditor", "evaluations", "view"));
        assert!(!table.can_perform("Auditor", "evaluations", "edit"));
        assert!(!table.can_perform(ROLE_DEVELOPER, "children", "view"));
        Ok(())
    }

    #[test]
    fn json_table_with_unknown_action_is_rejected() {
        let result = PermissionTable::from_json(r#"{"Auditor": {"evaluations": ["approve"]}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn resource_roundtrip_transport_value() {
        for resource in Resource::all() {
            assert_eq!(Resource::from_str(resource.as_str()).ok(), Some(*resource));
        }
    }

    fn arbitrary_role() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(ROLE_TEACHER.to_owned()),
            Just(ROLE_MANAGER.to_owned()),
            Just(ROLE_DEVELOPER.to_owned()),
            "[A-Za-z]{1,12}",
        ]
    }

    fn arbitrary_name(known: &'static [&'static str]) -> impl Strategy<Value = String> {
        prop_oneof![
            proptest::sample::select(known).prop_map(str::to_owned),
            "[a-z_]{1,12}",
        ]
    }

    proptest! {
        #[test]
        fn combinations_outside_the_table_are_denied(
            role in arbitrary_role(),
            resource in arbitrary_name(&["children", "evaluations", "users", "classes", "categories", "milestones", "roles"]),
            action in arbitrary_name(&["view", "create", "edit", "delete", "move"]),
        ) {
            let table = PermissionTable::builtin();
            let listed = match (Resource::from_str(&resource), Action::from_str(&action)) {
                (Ok(resource), Ok(action)) => table
                    .permissions_for(&role)
                    .actions(resource)
                    .contains(&action),
                _ => false,
            };

            prop_assert_eq!(table.can_perform(&role, &resource, &action), listed);
        }
    }
}
