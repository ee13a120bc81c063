use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::services::backend_client::CrmBackend;
use crate::services::visibility_service;
use crate::state::{Action, Store};
use crate::utils::AppError;

pub fn list_users(store: &Store) -> Vec<User> {
    store.read(|state| state.users.clone())
}

/// Resolves the acting user from the loaded roster
pub fn find_user(store: &Store, id: &str) -> Option<User> {
    store.read(|state| state.find_user(id).cloned())
}

fn check_reports_to(store: &Store, reports_to: Option<&str>, user_id: Option<&str>) -> Result<(), AppError> {
    let Some(manager_id) = reports_to else {
        return Ok(());
    };
    if Some(manager_id) == user_id {
        return Err(AppError::InvalidRequest("A user cannot report to themselves".to_string()));
    }
    if find_user(store, manager_id).is_none() {
        return Err(AppError::InvalidRequest(format!("Unknown manager {}", manager_id)));
    }
    Ok(())
}

/// Creates a staff member with a role strictly below the creator's
pub async fn create_user(
    backend: &dyn CrmBackend,
    store: &Store,
    current_user: &User,
    req: CreateUserRequest,
) -> Result<User, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::InvalidRequest("Name is required".to_string()));
    }
    if !current_user.role.assignable_roles().contains(&req.role) {
        return Err(AppError::Forbidden(format!(
            "A {} cannot create {} users",
            current_user.role.label(),
            req.role.label()
        )));
    }
    check_reports_to(store, req.reports_to.as_deref(), None)?;

    let user = backend.create_user(&req).await.map_err(|e| {
        log::error!("❌ Create user failed: {}", e);
        e
    })?;

    log::info!("👤 User {} ({}) created by {}", user.id, user.role, current_user.id);
    store.dispatch(Action::UserAdded(user.clone()));
    Ok(user)
}

/// Users may edit themselves or anyone whose role ranks below theirs.
/// Role changes must stay below the editor's own role.
pub async fn update_user(
    backend: &dyn CrmBackend,
    store: &Store,
    current_user: &User,
    id: &str,
    updates: UpdateUserRequest,
) -> Result<User, AppError> {
    let target = find_user(store, id).ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
    let allowed = current_user.role.assignable_roles();

    if target.id != current_user.id && !allowed.contains(&target.role) {
        return Err(AppError::Forbidden(format!("Cannot edit user {}", id)));
    }
    if let Some(role) = updates.role {
        if role != target.role && !allowed.contains(&role) {
            return Err(AppError::Forbidden(format!("Cannot grant role {}", role.label())));
        }
    }
    check_reports_to(store, updates.reports_to.as_deref(), Some(id))?;

    let user = backend.update_user(id, &updates).await.map_err(|e| {
        log::error!("❌ Update user {} failed: {}", id, e);
        e
    })?;

    log::info!("✏️  User {} updated by {}", id, current_user.id);
    store.dispatch(Action::UserUpdated(user.clone()));
    Ok(user)
}

/// Everyone below the user in the reports-to tree
pub fn subordinates(store: &Store, current_user: &User) -> Vec<User> {
    store.read(|state| {
        let ids = visibility_service::subordinate_ids(&current_user.id, &state.users);
        state.users.iter().filter(|u| ids.contains(&u.id)).cloned().collect()
    })
}

pub fn assignable(store: &Store, current_user: &User) -> Vec<User> {
    store.read(|state| visibility_service::assignable_users(current_user, &state.users))
}

/// "Reports to" line for a user; `None` when they have no manager
pub fn hierarchy(store: &Store, id: &str) -> Result<Option<String>, AppError> {
    store.read(|state| {
        state
            .find_user(id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
        Ok(visibility_service::reports_to_display(id, &state.users))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::services::backend_client::load_snapshot;
    use crate::services::backend_client::mock::MockBackend;

    fn user(id: &str, role: Role, reports_to: Option<&str>) -> User {
        User {
            id: id.to_string(),
            name: format!("User {}", id),
            email: String::new(),
            phone: None,
            role,
            reports_to: reports_to.map(str::to_string),
            department: None,
            branch: None,
            preferred_language: None,
            is_active: true,
            created_at: None,
        }
    }

    fn roster() -> Vec<User> {
        vec![
            user("m", Role::Manager, None),
            user("tl", Role::TeamLeader, Some("m")),
            user("c1", Role::Counselor, Some("tl")),
        ]
    }

    async fn setup(backend: &MockBackend) -> Store {
        let store = Store::new();
        let snapshot = load_snapshot(backend).await;
        store.dispatch(Action::DataLoaded { snapshot, at: 0 });
        store
    }

    fn new_user(name: &str, role: Role, reports_to: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: String::new(),
            phone: None,
            role,
            reports_to: reports_to.map(str::to_string),
            branch: None,
            preferred_language: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_user_below_own_role() {
        let users = roster();
        let backend = MockBackend::with_data(vec![], users.clone());
        let store = setup(&backend).await;

        let created = create_user(&backend, &store, &users[1], new_user("Neha", Role::Counselor, Some("tl")))
            .await
            .unwrap();
        assert_eq!(store.read(|s| s.users.last().unwrap().id.clone()), created.id);

        let err = create_user(&backend, &store, &users[1], new_user("Boss", Role::Manager, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = create_user(&backend, &store, &users[0], new_user("Ghost", Role::Counselor, Some("nobody")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_update_user_permissions() {
        let users = roster();
        let backend = MockBackend::with_data(vec![], users.clone());
        let store = setup(&backend).await;

        let promote = UpdateUserRequest { role: Some(Role::TeamLeader), ..Default::default() };
        let updated = update_user(&backend, &store, &users[0], "c1", promote).await.unwrap();
        assert_eq!(updated.role, Role::TeamLeader);
        assert_eq!(find_user(&store, "c1").unwrap().role, Role::TeamLeader);

        let err = update_user(&backend, &store, &users[2], "m", UpdateUserRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let self_loop = UpdateUserRequest { reports_to: Some("tl".into()), ..Default::default() };
        let err = update_user(&backend, &store, &users[0], "tl", self_loop).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_subordinates_and_hierarchy() {
        let users = roster();
        let backend = MockBackend::with_data(vec![], users.clone());
        let store = setup(&backend).await;

        let subs: Vec<String> = subordinates(&store, &users[0]).into_iter().map(|u| u.id).collect();
        assert_eq!(subs, vec!["tl", "c1"]);

        assert_eq!(
            hierarchy(&store, "c1").unwrap().as_deref(),
            Some("Reports to: User tl (Team Leader)")
        );
        assert_eq!(hierarchy(&store, "m").unwrap(), None);
        assert!(hierarchy(&store, "ghost").is_err());
    }
}
