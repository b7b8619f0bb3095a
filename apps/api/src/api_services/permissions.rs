use std::path::Path;

use nestling_core::AppError;
use nestling_domain::PermissionTable;
use tracing::info;

pub fn load_permission_table(path: Option<&Path>) -> Result<PermissionTable, AppError> {
    let Some(path) = path else {
        return Ok(PermissionTable::builtin());
    };

    let raw = std::fs::read_to_string(path).map_err(|error| {
        AppError::Internal(format!(
            "failed to read permission table '{}': {error}",
            path.display()
        ))
    })?;
    let table = PermissionTable::from_json(&raw)?;

    info!(path = %path.display(), roles = table.role_names().count(), "loaded permission table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use nestling_core::AppError;

    use super::load_permission_table;

    #[test]
    fn builtin_table_is_used_without_a_file() -> Result<(), AppError> {
        let table = load_permission_table(None)?;
        assert!(table.can_perform("Manager", "children", "delete"));
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_permission_table(Some(Path::new("/nonexistent/permissions.json")));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
