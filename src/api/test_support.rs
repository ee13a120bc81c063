// Shared fixtures for handler tests
use crate::models::{Lead, Role, User};
use crate::services::backend_client::mock::MockBackend;
use crate::services::backend_client::{load_snapshot, CrmBackend};
use crate::state::{Action, Store};
use actix_web::web;
use std::sync::Arc;

pub fn user(id: &str, role: Role, reports_to: Option<&str>) -> User {
    User {
        id: id.to_string(),
        name: format!("User {}", id),
        email: format!("{}@dmhca.edu", id),
        phone: None,
        role,
        reports_to: reports_to.map(str::to_string),
        department: None,
        branch: Some("Hyderabad".to_string()),
        preferred_language: None,
        is_active: true,
        created_at: None,
    }
}

pub fn lead(id: &str, assigned_to: &str, status: &str) -> Lead {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "fullName": format!("Lead {}", id),
        "phone": "9000000000",
        "status": status,
        "assignedTo": assigned_to
    }))
    .unwrap()
}

/// m (manager) > tl (team leader) > c1; c2 reports to nobody
pub fn roster() -> Vec<User> {
    vec![
        user("m", Role::Manager, None),
        user("tl", Role::TeamLeader, Some("m")),
        user("c1", Role::Counselor, Some("tl")),
        user("c2", Role::Counselor, None),
    ]
}

pub struct TestState {
    pub store: web::Data<Store>,
    pub backend: web::Data<dyn CrmBackend>,
}

pub async fn seeded(leads: Vec<Lead>) -> TestState {
    let backend = MockBackend::with_data(leads, roster());
    let store = Store::new();
    store.dispatch(Action::DataLoaded { snapshot: load_snapshot(&backend).await, at: 0 });

    let backend: Arc<dyn CrmBackend> = Arc::new(backend);
    TestState {
        store: web::Data::new(store),
        backend: web::Data::from(backend),
    }
}

/// Service with every route, backed by `TestState`
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.store.clone())
                .app_data($state.backend.clone())
                .configure(crate::api::configure),
        )
        .await
    };
}

pub(crate) use test_app;
