mod api;
mod jobs;
mod middleware;
mod models;
mod seeds;
mod services;
mod state;
mod utils;

use actix_cors::Cors;
use actix_web::dev::Service;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use services::backend_client::{load_snapshot, CrmBackend, HttpBackend};
use state::{Action, Store};
use std::sync::Arc;
use utils::AppConfig;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();

    log::info!("🚀 Starting CRM Dashboard...");
    log::info!("🔗 CRM backend: {}", config.api_base_url);

    let backend = Arc::new(HttpBackend::new(&config.api_base_url, config.backend_timeout_secs));
    let store = Arc::new(Store::new());

    // Initial load; sample data stands in when the backend is down
    let snapshot = load_snapshot(backend.as_ref()).await;
    if let Some(warning) = &snapshot.warning {
        log::warn!("⚠️  {}", warning);
    }
    store.dispatch(Action::DataLoaded { snapshot, at: chrono::Utc::now().timestamp() });

    // ⏰ Start follow-up reminder
    log::info!("📅 Starting background jobs...");
    jobs::follow_up_reminder::start_follow_up_reminder(store.clone(), config.reminder_interval_secs).await;
    log::info!("✅ Background jobs started");

    let bind_address = config.bind_address();
    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_address);

    let store_data = web::Data::from(store);
    let backend: Arc<dyn CrmBackend> = backend;
    let backend_data: web::Data<dyn CrmBackend> = web::Data::from(backend);
    let cors_origins = config.cors_origins.clone();

    // Start HTTP server
    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CACHE_CONTROL,
                actix_web::http::header::HeaderName::from_static("x-user-id"),
            ])
            .expose_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::CONTENT_DISPOSITION,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .app_data(backend_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .wrap_fn(|req, srv| {
                api::metrics::increment_request_count();
                srv.call(req)
            })
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
