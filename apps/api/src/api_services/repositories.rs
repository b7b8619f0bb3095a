use std::sync::Arc;

use nestling_application::{RecordRepository, UserRepository};
use nestling_domain::{Category, Child, Class, Evaluation, Milestone, Role};
use nestling_infrastructure::{
    InMemoryRecordRepository, InMemoryUserRepository, PostgresRecordRepository,
    PostgresUserRepository,
};
use sqlx::PgPool;

/// Storage adapters behind every port.
pub struct RepositorySet {
    pub users: Arc<dyn UserRepository>,
    pub roles: Arc<dyn RecordRepository<Role>>,
    pub classes: Arc<dyn RecordRepository<Class>>,
    pub children: Arc<dyn RecordRepository<Child>>,
    pub categories: Arc<dyn RecordRepository<Category>>,
    pub milestones: Arc<dyn RecordRepository<Milestone>>,
    pub evaluations: Arc<dyn RecordRepository<Evaluation>>,
}

impl RepositorySet {
    pub fn in_memory() -> Self {
        let roles: Arc<dyn RecordRepository<Role>> =
            Arc::new(InMemoryRecordRepository::<Role>::new());

        Self {
            users: Arc::new(InMemoryUserRepository::new(roles.clone())),
            roles,
            classes: Arc::new(InMemoryRecordRepository::<Class>::new()),
            children: Arc::new(InMemoryRecordRepository::<Child>::new()),
            categories: Arc::new(InMemoryRecordRepository::<Category>::new()),
            milestones: Arc::new(InMemoryRecordRepository::<Milestone>::new()),
            evaluations: Arc::new(InMemoryRecordRepository::<Evaluation>::new()),
        }
    }

    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            roles: Arc::new(PostgresRecordRepository::<Role>::new(pool.clone())),
            classes: Arc::new(PostgresRecordRepository::<Class>::new(pool.clone())),
            children: Arc::new(PostgresRecordRepository::<Child>::new(pool.clone())),
            categories: Arc::new(PostgresRecordRepository::<Category>::new(pool.clone())),
            milestones: Arc::new(PostgresRecordRepository::<Milestone>::new(pool.clone())),
            evaluations: Arc::new(PostgresRecordRepository::<Evaluation>::new(pool.clone())),
        }
    }
}
