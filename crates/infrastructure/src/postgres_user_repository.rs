//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use nestling_application::{NewUser, UserChanges, UserRepository};
use nestling_core::AppResult;
use nestling_domain::{User, UserCredential};

use crate::postgres_error::store_error;

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    role_id: i64,
    first_name: String,
    last_name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            role_id: row.role_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    role_id: i64,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    role_name: String,
}

impl From<CredentialRow> for UserCredential {
    fn from(row: CredentialRow) -> Self {
        Self {
            user: User {
                id: row.id,
                role_id: row.role_id,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
            },
            role_name: row.role_name,
            password_hash: row.password_hash,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn list(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, role_id, first_name, last_name, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| store_error(error, "list users"))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find(&self, user_id: i64) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, role_id, first_name, last_name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| store_error(error, "find user by id"))?;

        Ok(row.map(User::from))
    }

    async fn find_credential_by_email(&self, email: &str) -> AppResult<Option<UserCredential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT users.id, users.role_id, users.first_name, users.last_name,
                   users.email, users.password_hash, roles.name AS role_name
            FROM users
            INNER JOIN roles ON roles.id = users.role_id
            WHERE users.email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| store_error(error, "find user by email"))?;

        Ok(row.map(UserCredential::from))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (role_id, first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, role_id, first_name, last_name, email
            "#,
        )
        .bind(user.role_id)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| store_error(error, "create user"))?;

        Ok(row.into())
    }

    async fn update(&self, user_id: i64, changes: UserChanges) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET role_id = COALESCE($2, role_id),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                password_hash = COALESCE($6, password_hash)
            WHERE id = $1
            RETURNING id, role_id, first_name, last_name, email
            "#,
        )
        .bind(user_id)
        .bind(changes.role_id)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.email)
        .bind(changes.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| store_error(error, "update user"))?;

        Ok(row.map(User::from))
    }

    async fn delete(&self, user_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|error| store_error(error, "delete user"))?;

        Ok(result.rows_affected() > 0)
    }
}
