pub mod auth;
pub mod children;
pub mod health;
pub mod records;
pub mod users;
