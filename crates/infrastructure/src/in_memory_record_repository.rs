use std::collections::BTreeMap;

use async_trait::async_trait;
use nestling_application::RecordRepository;
use nestling_core::{AppError, AppResult};
use nestling_domain::Record;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Table<R> {
    next_id: i64,
    rows: BTreeMap<i64, R>,
}

/// In-memory store for one resource kind, used in development and tests.
///
/// Identifiers start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryRecordRepository<R> {
    table: RwLock<Table<R>>,
}

impl<R: Record> InMemoryRecordRepository<R> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl<R: Record> Default for InMemoryRecordRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_unique<R: Record>(rows: &BTreeMap<i64, R>, candidate: &R) -> AppResult<()> {
    let Some(key) = candidate.unique_key() else {
        return Ok(());
    };

    let taken = rows
        .values()
        .any(|row| row.id() != candidate.id() && row.unique_key() == Some(key));
    if taken {
        return Err(AppError::Conflict(format!(
            "{} '{key}' already exists",
            R::KIND
        )));
    }

    Ok(())
}

#[async_trait]
impl<R: Record> RecordRepository<R> for InMemoryRecordRepository<R> {
    async fn list(&self) -> AppResult<Vec<R>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> AppResult<Option<R>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, draft: R::Draft) -> AppResult<R> {
        let mut table = self.table.write().await;
        let record = R::from_draft(table.next_id, draft);
        ensure_unique(&table.rows, &record)?;

        table.next_id += 1;
        table.rows.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, patch: R::Patch) -> AppResult<Option<R>> {
        let mut table = self.table.write().await;
        let Some(mut record) = table.rows.get(&id).cloned() else {
            return Ok(None);
        };

        record.apply_patch(patch);
        ensure_unique(&table.rows, &record)?;

        table.rows.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
