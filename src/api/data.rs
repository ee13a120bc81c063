use crate::models::User;
use crate::services::backend_client::{load_snapshot, CrmBackend, DataSource};
use crate::state::{Action, Store};
use crate::utils::AppError;
use actix_web::{web, HttpResponse, Responder};

/// POST /api/v1/data/refresh - Reloads everything from the backend.
/// Falls back to the sample data when the backend is down. Managers only,
/// since the reload replaces the shared cache for every user.
#[utoipa::path(
    post,
    path = "/api/v1/data/refresh",
    tag = "Data",
    responses(
        (status = 200, description = "Data reloaded (check `source`)"),
        (status = 403, description = "Caller is not a manager")
    )
)]
pub async fn refresh(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    backend: web::Data<dyn CrmBackend>,
) -> impl Responder {
    if !user.role.sees_all_leads() {
        log::warn!("🔒 Data refresh refused for {} ({})", user.id, user.role);
        return AppError::Forbidden("Only managers can reload data".to_string()).to_response();
    }

    log::info!("🔄 Refreshing data from backend (requested by {})...", user.id);
    let snapshot = load_snapshot(backend.get_ref()).await;
    let source = snapshot.source;
    let warning = snapshot.warning.clone();

    store.dispatch(Action::DataLoaded { snapshot, at: chrono::Utc::now().timestamp() });
    let (leads, users, courses) = store.read(|s| (s.leads.len(), s.users.len(), s.courses.len()));

    HttpResponse::Ok().json(serde_json::json!({
        "success": source == DataSource::Backend,
        "source": source,
        "warning": warning,
        "leads": leads,
        "users": users,
        "courses": courses
    }))
}

/// GET /api/v1/data/status - Where the current data came from
#[utoipa::path(
    get,
    path = "/api/v1/data/status",
    tag = "Data",
    responses((status = 200, description = "Data source and load time"))
)]
pub async fn status(store: web::Data<Store>) -> impl Responder {
    let (source, warning, loaded_at) = store.read(|s| (s.source, s.warning.clone(), s.loaded_at));

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "source": source,
        "warning": warning,
        "loadedAt": loaded_at
    }))
}
