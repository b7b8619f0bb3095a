//! Mapping of PostgreSQL constraint violations to application errors.

use nestling_core::AppError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Converts a `sqlx` error raised while performing `operation`.
///
/// Unique violations become `Conflict`, foreign key violations become
/// `Validation`, anything else is `Internal`.
pub(crate) fn store_error(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error {
        match database_error.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                return AppError::Conflict(format!(
                    "failed to {operation}: a record with the same unique value already exists"
                ));
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return AppError::Validation(format!(
                    "failed to {operation}: referenced record does not exist or is still in use"
                ));
            }
            _ => {}
        }
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
