use nestling_application::{AuthService, AuthorizationService, RecordService, UserService};
use nestling_domain::{Category, Child, Class, Evaluation, Milestone, Role};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub authorization_service: AuthorizationService,
    pub user_service: UserService,
    pub role_service: RecordService<Role>,
    pub class_service: RecordService<Class>,
    pub child_service: RecordService<Child>,
    pub category_service: RecordService<Category>,
    pub milestone_service: RecordService<Milestone>,
    pub evaluation_service: RecordService<Evaluation>,
}
