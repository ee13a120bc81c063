use crate::models::User;
use crate::services::filter_service::LeadFilter;
use crate::utils::cache::{self, SavedFilter};
use crate::utils::AppError;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SaveFilterRequest {
    pub name: String,
    #[schema(value_type = Object)]
    pub config: LeadFilter,
}

/// GET /api/v1/filters - Caller's saved presets
#[utoipa::path(
    get,
    path = "/api/v1/filters",
    tag = "Filters",
    responses((status = 200, description = "Saved filters", body = Vec<SavedFilter>))
)]
pub async fn list_filters(user: web::ReqData<User>) -> impl Responder {
    let filters = cache::list_saved_filters(&user.id);
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "filters": filters
    }))
}

/// POST /api/v1/filters - Saves (or replaces) a named preset
#[utoipa::path(
    post,
    path = "/api/v1/filters",
    tag = "Filters",
    request_body = SaveFilterRequest,
    responses(
        (status = 200, description = "Filter saved", body = SavedFilter),
        (status = 400, description = "Blank name")
    )
)]
pub async fn save_filter(user: web::ReqData<User>, request: web::Json<SaveFilterRequest>) -> impl Responder {
    let request = request.into_inner();
    let name = request.name.trim();
    if name.is_empty() {
        return AppError::InvalidRequest("Filter name is required".to_string()).to_response();
    }

    match cache::save_filter(&user.id, name, request.config) {
        Some(saved) => {
            log::info!("💾 Filter '{}' saved for {}", saved.name, user.id);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "filter": saved
            }))
        }
        None => AppError::SaveFailed("Filter store unavailable".to_string()).to_response(),
    }
}

/// GET /api/v1/filters/{name}
#[utoipa::path(
    get,
    path = "/api/v1/filters/{name}",
    tag = "Filters",
    params(("name" = String, Path, description = "Preset name")),
    responses(
        (status = 200, description = "Saved filter", body = SavedFilter),
        (status = 404, description = "No such preset")
    )
)]
pub async fn get_filter(user: web::ReqData<User>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    match cache::get_saved_filter(&user.id, &name) {
        Some(saved) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "filter": saved
        })),
        None => AppError::NotFound(format!("Filter '{}' not found", name)).to_response(),
    }
}

/// DELETE /api/v1/filters/{name}
#[utoipa::path(
    delete,
    path = "/api/v1/filters/{name}",
    tag = "Filters",
    params(("name" = String, Path, description = "Preset name")),
    responses(
        (status = 200, description = "Filter deleted"),
        (status = 404, description = "No such preset")
    )
)]
pub async fn delete_filter(user: web::ReqData<User>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    if cache::delete_saved_filter(&user.id, &name) {
        HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": format!("Filter '{}' deleted", name)
        }))
    } else {
        AppError::NotFound(format!("Filter '{}' not found", name)).to_response()
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{seeded, test_app};
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn test_save_load_delete() {
        let state = seeded(vec![]).await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/filters")
            .insert_header(("X-User-Id", "c2"))
            .set_json(serde_json::json!({
                "name": "Hot UAE",
                "config": { "view": "hot", "countries": ["AE"] }
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["filter"]["config"]["countries"][0], "AE");

        let req = test::TestRequest::get()
            .uri("/api/v1/filters/Hot%20UAE")
            .insert_header(("X-User-Id", "c2"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["filter"]["config"]["view"], "hot");

        let req = test::TestRequest::delete()
            .uri("/api/v1/filters/Hot%20UAE")
            .insert_header(("X-User-Id", "c2"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/v1/filters/Hot%20UAE")
            .insert_header(("X-User-Id", "c2"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
