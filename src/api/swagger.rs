use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CRM Dashboard API",
        version = "1.0.0",
        description = "Admissions CRM dashboard service. \n\n**Acting user:** every `/api/v1` endpoint requires the `X-User-Id` header. Non-manager roles only see leads of their own reports-to subtree.\n\n**Features:**\n- Lead list with multi-criteria filters\n- CSV import and export\n- Follow-up view and reminder feed\n- Dashboard analytics and pipeline\n- Course catalog and hospital directory\n- Saved filter presets",
        contact(
            name = "CRM Dashboard Team",
            email = "support@dmhca.edu"
        )
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Leads
        crate::api::leads::list_leads,
        crate::api::leads::create_lead,
        crate::api::leads::update_lead,
        crate::api::leads::delete_lead,
        crate::api::leads::add_note,
        crate::api::leads::get_options,
        crate::api::leads::export_leads,
        crate::api::leads::import_leads,

        // Follow-ups
        crate::api::followups::list_follow_ups,
        crate::api::followups::export_follow_ups,
        crate::api::followups::list_records,

        // Users
        crate::api::users::list_users,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::my_subordinates,
        crate::api::users::my_assignable,
        crate::api::users::get_hierarchy,

        // Catalog
        crate::api::catalog::list_courses,
        crate::api::catalog::list_hospitals,

        // Dashboard & notifications
        crate::api::dashboard::get_dashboard,
        crate::api::notifications::list_notifications,
        crate::api::notifications::mark_read,

        // Data & filters
        crate::api::data::refresh,
        crate::api::data::status,
        crate::api::filters::list_filters,
        crate::api::filters::save_filter,
        crate::api::filters::get_filter,
        crate::api::filters::delete_filter,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
            crate::models::Lead,
            crate::models::Note,
            crate::models::CreateLeadRequest,
            crate::models::UpdateLeadRequest,
            crate::models::AddNoteRequest,
            crate::models::User,
            crate::models::CreateUserRequest,
            crate::models::UpdateUserRequest,
            crate::models::Course,
            crate::models::Hospital,
            crate::models::FollowUp,
            crate::models::Notification,
            crate::services::backend_client::DataSource,
            crate::services::filter_service::FilterOptions,
            crate::services::lead_service::ImportReport,
            crate::services::lead_service::ImportFailure,
            crate::services::dashboard_service::DashboardStats,
            crate::services::dashboard_service::Totals,
            crate::services::dashboard_service::FeeSummary,
            crate::services::dashboard_service::CountEntry,
            crate::services::dashboard_service::MonthlyEntry,
            crate::services::dashboard_service::PipelineStage,
            crate::services::dashboard_service::PipelineCard,
            crate::services::dashboard_service::PipelineColumn,
            crate::utils::cache::SavedFilter,
            crate::api::filters::SaveFilterRequest,
        )
    ),
    tags(
        (name = "Health", description = "Health check and metrics."),
        (name = "Leads", description = "Lead list, CRUD, notes, CSV import and export. Results are scoped to the caller's team."),
        (name = "Follow-ups", description = "Leads with scheduled follow-ups and the follow-up history."),
        (name = "Users", description = "Staff directory and the reports-to hierarchy."),
        (name = "Catalog", description = "Courses and partner hospitals."),
        (name = "Dashboard", description = "Totals, breakdowns, monthly series and pipeline columns."),
        (name = "Notifications", description = "In-service follow-up reminder feed."),
        (name = "Data", description = "Backend reload and data source status."),
        (name = "Filters", description = "Saved lead filter presets."),
    ),
    modifiers(&UserHeaderAddon)
)]
pub struct ApiDoc;

struct UserHeaderAddon;

impl utoipa::Modify for UserHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "user_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-User-Id",
                    "Id of the acting dashboard user",
                ))),
            );
        }
    }
}
