use crate::services::dashboard_service::{self, DashboardStats};
use crate::services::visibility_service;
use crate::models::User;
use crate::state::Store;
use actix_web::{web, HttpResponse, Responder};

/// GET /api/v1/dashboard - Totals, breakdowns, monthly series and pipeline
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    responses((status = 200, description = "Dashboard stats over the caller's visible leads", body = DashboardStats))
)]
pub async fn get_dashboard(user: web::ReqData<User>, store: web::Data<Store>) -> impl Responder {
    let (stats, source, warning) = store.read(|state| {
        let visible = visibility_service::visible_leads(&user, &state.users, &state.leads);
        (
            dashboard_service::dashboard_stats(&visible, &state.users),
            state.source,
            state.warning.clone(),
        )
    });

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "stats": stats,
        "source": source,
        "warning": warning
    }))
}
