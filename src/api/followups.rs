use crate::api::leads::{csv_attachment, export_columns, ExportQuery};
use crate::models::{FollowUp, Lead, User};
use crate::services::csv_service::{self, FOLLOW_UP_COLUMNS};
use crate::services::filter_service::LeadFilter;
use crate::services::{follow_up_service, lead_service};
use crate::state::Store;
use actix_web::{web, HttpResponse, Responder};

fn follow_up_view(store: &Store, user: &User, filter: &LeadFilter) -> Vec<Lead> {
    let visible = lead_service::list_leads(store, user, &LeadFilter::default());
    follow_up_service::follow_up_leads(&visible, filter)
}

/// GET /api/v1/followups - Leads with a follow-up date, soonest first
#[utoipa::path(
    get,
    path = "/api/v1/followups",
    tag = "Follow-ups",
    params(
        ("search" = Option<String>, Query, description = "Substring search"),
        ("dateMode" = Option<String>, Query, description = "on | before | after | between"),
        ("date" = Option<String>, Query, description = "YYYY-MM-DD, compared with followUpDate"),
        ("dateEnd" = Option<String>, Query, description = "YYYY-MM-DD")
    ),
    responses((status = 200, description = "Follow-up leads", body = Vec<Lead>))
)]
pub async fn list_follow_ups(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    filter: web::Query<LeadFilter>,
) -> impl Responder {
    let leads = follow_up_view(&store, &user, &filter);

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "leads": leads,
        "total": leads.len()
    }))
}

/// GET /api/v1/followups/export
#[utoipa::path(
    get,
    path = "/api/v1/followups/export",
    tag = "Follow-ups",
    params(("columns" = Option<String>, Query, description = "Comma list of column keys or labels")),
    responses((status = 200, description = "CSV file", body = String, content_type = "text/csv"))
)]
pub async fn export_follow_ups(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    filter: web::Query<LeadFilter>,
    query: web::Query<ExportQuery>,
) -> impl Responder {
    let columns = match export_columns(query.columns.as_deref(), FOLLOW_UP_COLUMNS) {
        Ok(columns) => columns,
        Err(e) => return e.to_response(),
    };

    let leads = follow_up_view(&store, &user, &filter);
    let csv = store.read(|state| csv_service::export_leads(&leads, &state.users, &columns));
    csv_attachment("followups_export", csv)
}

/// GET /api/v1/followups/records - Follow-up history from the backend
#[utoipa::path(
    get,
    path = "/api/v1/followups/records",
    tag = "Follow-ups",
    responses((status = 200, description = "Follow-up records", body = Vec<FollowUp>))
)]
pub async fn list_records(user: web::ReqData<User>, store: web::Data<Store>) -> impl Responder {
    let records = follow_up_service::follow_up_records(&store, &user);

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "records": records,
        "total": records.len()
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{lead, seeded, test_app};
    use actix_web::test;

    #[actix_web::test]
    async fn test_follow_up_date_filter_scenario() {
        let mut due = lead("1", "c1", "Followup");
        due.follow_up_date = Some("2025-06-16".to_string());
        let state = seeded(vec![due, lead("2", "c1", "Fresh")]).await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/v1/followups?dateMode=on&date=2025-06-16")
            .insert_header(("X-User-Id", "c1"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/followups?dateMode=on&date=2025-06-17")
            .insert_header(("X-User-Id", "c1"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 0);
    }
}
