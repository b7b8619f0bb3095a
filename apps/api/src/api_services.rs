mod database;
mod permissions;
mod repositories;
mod state_builder;

pub use database::connect;
pub use permissions::load_permission_table;
pub use repositories::RepositorySet;
pub use state_builder::{assemble_app_state, build_app_state};
