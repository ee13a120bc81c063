use crate::models::{AddNoteRequest, CreateLeadRequest, Lead, UpdateLeadRequest, User};
use crate::services::backend_client::CrmBackend;
use crate::services::csv_service::{ExportColumn, LEAD_COLUMNS};
use crate::services::filter_service::{FilterOptions, LeadFilter};
use crate::services::{lead_service, user_service};
use crate::state::Store;
use crate::utils::AppError;
use actix_web::{http::header, web, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Comma list of column keys or labels, e.g. `fullName,phone,notes`
    pub columns: Option<String>,
}

/// Resolves `?columns=`; absent or blank means every lead column
pub fn export_columns(raw: Option<&str>, default: &[ExportColumn]) -> Result<Vec<ExportColumn>, AppError> {
    match raw.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(default.to_vec()),
        Some(list) => ExportColumn::parse_list(list).map_err(AppError::InvalidRequest),
    }
}

/// `text/csv` download response
pub fn csv_attachment(prefix: &str, body: String) -> HttpResponse {
    let filename = format!("{}_{}.csv", prefix, chrono::Local::now().format("%Y-%m-%d"));
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(body)
}

/// GET /api/v1/leads - Visible leads matching the filter
#[utoipa::path(
    get,
    path = "/api/v1/leads",
    tag = "Leads",
    params(
        ("search" = Option<String>, Query, description = "Substring over name, email, phone, course, country, status"),
        ("statuses" = Option<String>, Query, description = "Pipe-separated statuses"),
        ("view" = Option<String>, Query, description = "all | hot | warm | followup"),
        ("dateMode" = Option<String>, Query, description = "on | before | after | between"),
        ("dateField" = Option<String>, Query, description = "updatedAt | followUpDate | createdAt"),
        ("date" = Option<String>, Query, description = "YYYY-MM-DD"),
        ("dateEnd" = Option<String>, Query, description = "YYYY-MM-DD, used by between"),
        ("X-User-Id" = String, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Filtered leads", body = Vec<Lead>),
        (status = 401, description = "Unknown user")
    )
)]
pub async fn list_leads(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    filter: web::Query<LeadFilter>,
) -> impl Responder {
    let leads = lead_service::list_leads(&store, &user, &filter);
    log::debug!("📋 GET /leads - {} leads for {}", leads.len(), user.id);

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "leads": leads,
        "total": leads.len()
    }))
}

/// POST /api/v1/leads - Creates a lead through the backend
#[utoipa::path(
    post,
    path = "/api/v1/leads",
    tag = "Leads",
    request_body = CreateLeadRequest,
    responses(
        (status = 201, description = "Lead created", body = Lead),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Assignee outside the caller's team"),
        (status = 502, description = "Backend save failed")
    )
)]
pub async fn create_lead(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    backend: web::Data<dyn CrmBackend>,
    request: web::Json<CreateLeadRequest>,
) -> impl Responder {
    match lead_service::create_lead(backend.get_ref(), &store, &user, request.into_inner()).await {
        Ok(lead) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "lead": lead
        })),
        Err(e) => e.to_response(),
    }
}

/// PUT /api/v1/leads/{id}
#[utoipa::path(
    put,
    path = "/api/v1/leads/{id}",
    tag = "Leads",
    params(("id" = String, Path, description = "Lead id")),
    request_body = UpdateLeadRequest,
    responses(
        (status = 200, description = "Lead updated", body = Lead),
        (status = 403, description = "Lead not visible to the caller"),
        (status = 404, description = "Lead not found"),
        (status = 502, description = "Backend save failed")
    )
)]
pub async fn update_lead(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    backend: web::Data<dyn CrmBackend>,
    path: web::Path<String>,
    request: web::Json<UpdateLeadRequest>,
) -> impl Responder {
    let id = path.into_inner();
    match lead_service::update_lead(backend.get_ref(), &store, &user, &id, request.into_inner()).await {
        Ok(lead) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "lead": lead
        })),
        Err(e) => e.to_response(),
    }
}

/// DELETE /api/v1/leads/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/leads/{id}",
    tag = "Leads",
    params(("id" = String, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead deleted"),
        (status = 403, description = "Lead not visible to the caller"),
        (status = 502, description = "Backend delete failed")
    )
)]
pub async fn delete_lead(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    backend: web::Data<dyn CrmBackend>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match lead_service::delete_lead(backend.get_ref(), &store, &user, &id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": format!("Lead {} deleted", id)
        })),
        Err(e) => e.to_response(),
    }
}

/// POST /api/v1/leads/{id}/notes - Appends a timestamped note
#[utoipa::path(
    post,
    path = "/api/v1/leads/{id}/notes",
    tag = "Leads",
    params(("id" = String, Path, description = "Lead id")),
    request_body = AddNoteRequest,
    responses(
        (status = 200, description = "Note added", body = Lead),
        (status = 400, description = "Empty note")
    )
)]
pub async fn add_note(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    backend: web::Data<dyn CrmBackend>,
    path: web::Path<String>,
    request: web::Json<AddNoteRequest>,
) -> impl Responder {
    let id = path.into_inner();
    match lead_service::add_note(backend.get_ref(), &store, &user, &id, request.into_inner()).await {
        Ok(lead) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "lead": lead
        })),
        Err(e) => e.to_response(),
    }
}

/// GET /api/v1/leads/options - Dropdown values for the filter bar
#[utoipa::path(
    get,
    path = "/api/v1/leads/options",
    tag = "Leads",
    responses((status = 200, description = "Filter options", body = FilterOptions))
)]
pub async fn get_options(user: web::ReqData<User>, store: web::Data<Store>) -> impl Responder {
    let leads = lead_service::list_leads(&store, &user, &LeadFilter::default());
    let options = FilterOptions::from_leads(&leads);

    let counselors = if user.role.sees_all_leads() {
        user_service::list_users(&store)
    } else {
        let mut team = user_service::subordinates(&store, &user);
        team.insert(0, (*user).clone());
        team
    };
    let counselors: Vec<serde_json::Value> = counselors
        .iter()
        .map(|u| serde_json::json!({ "id": u.id, "name": u.name }))
        .collect();

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "options": options,
        "counselors": counselors
    }))
}

/// GET /api/v1/leads/export - CSV of the visible, filtered leads
#[utoipa::path(
    get,
    path = "/api/v1/leads/export",
    tag = "Leads",
    params(
        ("columns" = Option<String>, Query, description = "Comma list of column keys or labels"),
        ("search" = Option<String>, Query, description = "Same filters as the lead list")
    ),
    responses(
        (status = 200, description = "CSV file", body = String, content_type = "text/csv"),
        (status = 400, description = "Unknown column")
    )
)]
pub async fn export_leads(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    filter: web::Query<LeadFilter>,
    query: web::Query<ExportQuery>,
) -> impl Responder {
    let columns = match export_columns(query.columns.as_deref(), LEAD_COLUMNS) {
        Ok(columns) => columns,
        Err(e) => return e.to_response(),
    };

    let csv = lead_service::export_leads(&store, &user, &filter, &columns);
    log::info!("📤 Lead export by {} ({} columns)", user.id, columns.len());
    csv_attachment("leads_export", csv)
}

/// POST /api/v1/leads/import - Body is the CSV text
#[utoipa::path(
    post,
    path = "/api/v1/leads/import",
    tag = "Leads",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Import report", body = crate::services::lead_service::ImportReport),
        (status = 400, description = "No data rows")
    )
)]
pub async fn import_leads(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    backend: web::Data<dyn CrmBackend>,
    body: String,
) -> impl Responder {
    match lead_service::import_leads(backend.get_ref(), &store, &user, &body).await {
        Ok(report) => HttpResponse::Ok().json(serde_json::json!({
            "success": report.failed == 0,
            "message": report.message,
            "report": report
        })),
        Err(e) => e.to_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{lead, seeded, test_app};
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn test_missing_user_header_is_unauthorized() {
        let state = seeded(vec![]).await;
        let app = test_app!(state);
        let req = test::TestRequest::get().uri("/api/v1/leads").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/v1/leads")
            .insert_header(("X-User-Id", "nobody"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_list_with_query_filter() {
        let state = seeded(vec![
            lead("1", "c1", "Interested, Detail Sent"),
            lead("2", "c1", "Hot Lead"),
            lead("3", "c2", "Hot Lead"),
        ]).await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/v1/leads?statuses=Interested%2C%20Detail%20Sent%7CJunk")
            .insert_header(("X-User-Id", "tl"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["leads"][0]["id"], "1");

        let req = test::TestRequest::get()
            .uri("/api/v1/leads?view=hot")
            .insert_header(("X-User-Id", "m"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);
    }

    #[actix_web::test]
    async fn test_create_update_delete_flow() {
        let state = seeded(vec![lead("1", "c1", "Fresh")]).await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/leads")
            .insert_header(("X-User-Id", "c1"))
            .set_json(serde_json::json!({ "fullName": "Asha", "phone": "900" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let req = test::TestRequest::put()
            .uri("/api/v1/leads/1")
            .insert_header(("X-User-Id", "c2"))
            .set_json(serde_json::json!({ "status": "Hot Lead" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri("/api/v1/leads/1")
            .insert_header(("X-User-Id", "tl"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_export_and_import() {
        let state = seeded(vec![lead("1", "c1", "Fresh")]).await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/v1/leads/export?columns=fullName,phone")
            .insert_header(("X-User-Id", "c1"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("attachment; filename=\"leads_export_"));
        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).unwrap(), "Name,Phone\r\nLead 1,9000000000\r\n");

        let req = test::TestRequest::get()
            .uri("/api/v1/leads/export?columns=fullName,shoeSize")
            .insert_header(("X-User-Id", "c1"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/leads/import")
            .insert_header(("X-User-Id", "c1"))
            .insert_header(("Content-Type", "text/csv"))
            .set_payload("Name,Phone\r\nNew One,911\r\nNew Two,912\r\n")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["report"]["created"], 2);
        assert_eq!(body["report"]["failed"], 0);
        assert_eq!(body["message"], "Leads imported and saved to database!");
    }
}
