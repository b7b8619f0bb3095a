use std::sync::Arc;

use async_trait::async_trait;

use nestling_core::{AppError, AppResult};
use nestling_domain::Record;

/// Repository port for a uniform CRUD resource.
#[async_trait]
pub trait RecordRepository<R: Record>: Send + Sync {
    /// Lists every record ordered by id.
    async fn list(&self) -> AppResult<Vec<R>>;

    /// Finds a record by identifier.
    async fn find(&self, id: i64) -> AppResult<Option<R>>;

    /// Inserts a record and returns it with its assigned id.
    async fn create(&self, draft: R::Draft) -> AppResult<R>;

    /// Applies a partial update. Returns `None` when the record is missing.
    async fn update(&self, id: i64, patch: R::Patch) -> AppResult<Option<R>>;

    /// Deletes a record. Returns `false` when the record is missing.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Check run before a record is deleted.
///
/// Backends without foreign keys rely on this to refuse deleting a record
/// that other records still point at.
#[async_trait]
pub trait DeleteGuard: Send + Sync {
    /// Fails when the record with this identifier must not be deleted.
    async fn ensure_deletable(&self, id: i64) -> AppResult<()>;
}

/// Application service for a CRUD resource.
pub struct RecordService<R: Record> {
    repository: Arc<dyn RecordRepository<R>>,
    delete_guard: Option<Arc<dyn DeleteGuard>>,
}

impl<R: Record> Clone for RecordService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            delete_guard: self.delete_guard.clone(),
        }
    }
}

impl<R: Record> RecordService<R> {
    /// Creates a new record service.
    #[must_use]
    pub fn new(repository: Arc<dyn RecordRepository<R>>) -> Self {
        Self {
            repository,
            delete_guard: None,
        }
    }

    /// Runs `guard` before every delete.
    #[must_use]
    pub fn with_delete_guard(mut self, guard: Arc<dyn DeleteGuard>) -> Self {
        self.delete_guard = Some(guard);
        self
    }

    /// Lists every record.
    pub async fn list(&self) -> AppResult<Vec<R>> {
        self.repository.list().await
    }

    /// Returns one record or `NotFound`.
    pub async fn get(&self, id: i64) -> AppResult<R> {
        self.repository
            .find(id)
            .await?
            .ok_or_else(|| not_found::<R>())
    }

    /// Returns one record if it exists.
    pub async fn find(&self, id: i64) -> AppResult<Option<R>> {
        self.repository.find(id).await
    }

    /// Validates and stores a new record.
    pub async fn create(&self, draft: R::Draft) -> AppResult<R> {
        R::validate_draft(&draft)?;
        self.repository.create(draft).await
    }

    /// Validates and applies a partial update, or returns `NotFound`.
    pub async fn update(&self, id: i64, patch: R::Patch) -> AppResult<R> {
        R::validate_patch(&patch)?;
        self.repository
            .update(id, patch)
            .await?
            .ok_or_else(|| not_found::<R>())
    }

    /// Deletes a record or returns `NotFound`.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if let Some(guard) = &self.delete_guard {
            guard.ensure_deletable(id).await?;
        }

        if self.repository.delete(id).await? {
            return Ok(());
        }

        Err(not_found::<R>())
    }
}

fn not_found<R: Record>() -> AppError {
    AppError::NotFound(format!("{} not found", R::KIND))
}
