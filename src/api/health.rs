use crate::services::backend_client::DataSource;
use crate::state::Store;
use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    /// "backend" or "sample"
    pub data_source: DataSource,
    pub leads_loaded: usize,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<Store>) -> impl Responder {
    let (data_source, leads_loaded) = store.read(|s| (s.source, s.leads.len()));

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "crm-dashboard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        data_source,
        leads_loaded,
    })
}
