//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_record_repository;
mod in_memory_user_repository;
mod jwt_token_issuer;
mod postgres_error;
mod postgres_record_repository;
mod postgres_user_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_record_repository::InMemoryRecordRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use jwt_token_issuer::{JwtTokenIssuer, TOKEN_TTL_HOURS};
pub use postgres_record_repository::{PostgresRecord, PostgresRecordRepository, RowQuery};
pub use postgres_user_repository::PostgresUserRepository;
