pub mod catalog;
pub mod dashboard;
pub mod data;
pub mod filters;
pub mod followups;
pub mod health;
pub mod leads;
pub mod metrics;
pub mod notifications;
pub mod swagger;
pub mod users;

#[cfg(test)]
pub mod test_support;

use crate::middleware::CurrentUser;
use actix_web::web;

/// Largest CSV body accepted by the import endpoint
pub const MAX_IMPORT_BYTES: usize = 5 * 1024 * 1024;

/// Registers every route. `/api/v1` requires a known `X-User-Id`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(
            web::scope("/api/v1")
                .wrap(CurrentUser)
                // Leads
                .service(
                    web::scope("/leads")
                        .app_data(web::PayloadConfig::new(MAX_IMPORT_BYTES))
                        .route("", web::get().to(leads::list_leads))
                        .route("", web::post().to(leads::create_lead))
                        .route("/options", web::get().to(leads::get_options))
                        .route("/export", web::get().to(leads::export_leads))
                        .route("/import", web::post().to(leads::import_leads))
                        .route("/{id}", web::put().to(leads::update_lead))
                        .route("/{id}", web::delete().to(leads::delete_lead))
                        .route("/{id}/notes", web::post().to(leads::add_note)),
                )
                // Follow-ups
                .service(
                    web::scope("/followups")
                        .route("", web::get().to(followups::list_follow_ups))
                        .route("/export", web::get().to(followups::export_follow_ups))
                        .route("/records", web::get().to(followups::list_records)),
                )
                // Users
                .service(
                    web::scope("/users")
                        .route("", web::get().to(users::list_users))
                        .route("", web::post().to(users::create_user))
                        .route("/me/subordinates", web::get().to(users::my_subordinates))
                        .route("/me/assignable", web::get().to(users::my_assignable))
                        .route("/{id}", web::put().to(users::update_user))
                        .route("/{id}/hierarchy", web::get().to(users::get_hierarchy)),
                )
                // Catalog
                .route("/courses", web::get().to(catalog::list_courses))
                .route("/hospitals", web::get().to(catalog::list_hospitals))
                // Dashboard & notifications
                .route("/dashboard", web::get().to(dashboard::get_dashboard))
                .route("/notifications", web::get().to(notifications::list_notifications))
                .route("/notifications/read", web::post().to(notifications::mark_read))
                // Data
                .route("/data/refresh", web::post().to(data::refresh))
                .route("/data/status", web::get().to(data::status))
                // Saved filters
                .service(
                    web::scope("/filters")
                        .route("", web::get().to(filters::list_filters))
                        .route("", web::post().to(filters::save_filter))
                        .route("/{name}", web::get().to(filters::get_filter))
                        .route("/{name}", web::delete().to(filters::delete_filter)),
                ),
        );
}
