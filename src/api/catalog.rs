use crate::models::{Course, Hospital};
use crate::services::catalog_service::{self, CourseQuery, HospitalQuery};
use crate::state::Store;
use actix_web::{web, HttpResponse, Responder};

/// GET /api/v1/courses
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    tag = "Catalog",
    params(
        ("search" = Option<String>, Query, description = "Substring over name, category, description"),
        ("category" = Option<String>, Query, description = "Exact category"),
        ("activeOnly" = Option<bool>, Query, description = "Only active courses")
    ),
    responses((status = 200, description = "Course catalog", body = Vec<Course>))
)]
pub async fn list_courses(store: web::Data<Store>, query: web::Query<CourseQuery>) -> impl Responder {
    let (courses, categories) = store.read(|state| {
        (
            catalog_service::filter_courses(&state.courses, &query),
            catalog_service::course_categories(&state.courses),
        )
    });

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "courses": courses,
        "categories": categories,
        "total": courses.len()
    }))
}

/// GET /api/v1/hospitals
#[utoipa::path(
    get,
    path = "/api/v1/hospitals",
    tag = "Catalog",
    params(
        ("search" = Option<String>, Query, description = "Substring over name or city"),
        ("state" = Option<String>, Query, description = "Exact state")
    ),
    responses((status = 200, description = "Hospital directory", body = Vec<Hospital>))
)]
pub async fn list_hospitals(query: web::Query<HospitalQuery>) -> impl Responder {
    let hospitals = catalog_service::filter_hospitals(&query);

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "hospitals": hospitals,
        "states": catalog_service::hospital_states(),
        "total": hospitals.len()
    }))
}
