use nestling_core::{AppResult, NonEmptyString};

/// A persisted resource with an integer identity and uniform CRUD shape.
///
/// `Draft` carries every field needed to create a record; `Patch` carries
/// optional replacements applied by a partial update.
pub trait Record: Clone + Send + Sync + 'static {
    /// Payload accepted when creating a record.
    type Draft: Send + Sync + 'static;
    /// Payload accepted when updating a record.
    type Patch: Send + Sync + 'static;

    /// Human-readable kind, used in error messages.
    const KIND: &'static str;

    /// Returns the record identifier.
    fn id(&self) -> i64;

    /// Materializes a record from a draft and its assigned identifier.
    fn from_draft(id: i64, draft: Self::Draft) -> Self;

    /// Applies every field present in the patch.
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Value that must be unique across records of this kind, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Checks that required draft fields are present.
    fn validate_draft(_draft: &Self::Draft) -> AppResult<()> {
        Ok(())
    }

    /// Checks that fields present in the patch are not blank.
    fn validate_patch(_patch: &Self::Patch) -> AppResult<()> {
        Ok(())
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> AppResult<()> {
    NonEmptyString::for_field(field, value).map(|_| ())
}

pub(crate) fn require_optional_text(field: &str, value: Option<&String>) -> AppResult<()> {
    match value {
        Some(value) => require_text(field, value),
        None => Ok(()),
    }
}

pub(crate) fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
