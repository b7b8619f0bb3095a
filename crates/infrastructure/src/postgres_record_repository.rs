//! PostgreSQL-backed repository shared by the uniform CRUD resources.

use std::marker::PhantomData;

use async_trait::async_trait;
use nestling_application::RecordRepository;
use nestling_core::AppResult;
use nestling_domain::Record;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};

use crate::postgres_error::store_error;

mod mappings;

/// Query whose remaining binds are supplied by a [`PostgresRecord`].
pub type RowQuery<'q, Row> = QueryAs<'q, Postgres, Row, PgArguments>;

/// Table mapping for a record kind.
///
/// `COLUMNS` lists the non-id columns in the order `bind_draft` binds them.
/// `ASSIGNMENTS` is the `SET` clause for a partial update: every column is
/// written as `column = COALESCE($n, column)` with `$1` reserved for the id,
/// in the order `bind_patch` binds them.
pub trait PostgresRecord: Record {
    /// Table name.
    const TABLE: &'static str;
    /// Comma-separated non-id columns.
    const COLUMNS: &'static str;
    /// Placeholders matching `COLUMNS`, starting at `$1`.
    const PLACEHOLDERS: &'static str;
    /// `SET` clause for partial updates.
    const ASSIGNMENTS: &'static str;

    /// Row shape decoded from `id` plus `COLUMNS`.
    type Row: for<'r> FromRow<'r, PgRow> + Into<Self> + Send + Unpin;

    /// Binds draft values in `COLUMNS` order.
    fn bind_draft<'q>(
        query: RowQuery<'q, Self::Row>,
        draft: Self::Draft,
    ) -> RowQuery<'q, Self::Row>;

    /// Binds optional patch values in `ASSIGNMENTS` order.
    fn bind_patch<'q>(
        query: RowQuery<'q, Self::Row>,
        patch: Self::Patch,
    ) -> RowQuery<'q, Self::Row>;
}

/// PostgreSQL implementation of [`RecordRepository`] for one table.
pub struct PostgresRecordRepository<R> {
    pool: PgPool,
    marker: PhantomData<fn() -> R>,
}

impl<R> Clone for PostgresRecordRepository<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            marker: PhantomData,
        }
    }
}

impl<R> PostgresRecordRepository<R> {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            marker: PhantomData,
        }
    }
}

#[async_trait]
impl<R: PostgresRecord> RecordRepository<R> for PostgresRecordRepository<R> {
    async fn list(&self) -> AppResult<Vec<R>> {
        let sql = format!("SELECT id, {} FROM {} ORDER BY id", R::COLUMNS, R::TABLE);
        let rows = sqlx::query_as::<_, R::Row>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| store_error(error, &format!("list {}", R::TABLE)))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: i64) -> AppResult<Option<R>> {
        let sql = format!("SELECT id, {} FROM {} WHERE id = $1", R::COLUMNS, R::TABLE);
        let row = sqlx::query_as::<_, R::Row>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| store_error(error, &format!("find {} row", R::TABLE)))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, draft: R::Draft) -> AppResult<R> {
        let sql = format!(
            "INSERT INTO {table} ({columns}) VALUES ({placeholders}) RETURNING id, {columns}",
            table = R::TABLE,
            columns = R::COLUMNS,
            placeholders = R::PLACEHOLDERS,
        );
        let row = R::bind_draft(sqlx::query_as::<_, R::Row>(&sql), draft)
            .fetch_one(&self.pool)
            .await
            .map_err(|error| store_error(error, &format!("insert into {}", R::TABLE)))?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, patch: R::Patch) -> AppResult<Option<R>> {
        let sql = format!(
            "UPDATE {table} SET {assignments} WHERE id = $1 RETURNING id, {columns}",
            table = R::TABLE,
            assignments = R::ASSIGNMENTS,
            columns = R::COLUMNS,
        );
        let row = R::bind_patch(sqlx::query_as::<_, R::Row>(&sql).bind(id), patch)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| store_error(error, &format!("update {}", R::TABLE)))?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", R::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|error| store_error(error, &format!("delete from {}", R::TABLE)))?;

        Ok(result.rows_affected() > 0)
    }
}
