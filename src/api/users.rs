use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::services::backend_client::CrmBackend;
use crate::services::user_service;
use crate::state::Store;
use actix_web::{web, HttpResponse, Responder};

/// GET /api/v1/users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses((status = 200, description = "All users", body = Vec<User>))
)]
pub async fn list_users(store: web::Data<Store>) -> impl Responder {
    let users = user_service::list_users(&store);
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "users": users,
        "total": users.len()
    }))
}

/// POST /api/v1/users - Role must rank below the caller's
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 403, description = "Role not below the caller's")
    )
)]
pub async fn create_user(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    backend: web::Data<dyn CrmBackend>,
    request: web::Json<CreateUserRequest>,
) -> impl Responder {
    match user_service::create_user(backend.get_ref(), &store, &user, request.into_inner()).await {
        Ok(created) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "user": created
        })),
        Err(e) => e.to_response(),
    }
}

/// PUT /api/v1/users/{id}
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    user: web::ReqData<User>,
    store: web::Data<Store>,
    backend: web::Data<dyn CrmBackend>,
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> impl Responder {
    let id = path.into_inner();
    match user_service::update_user(backend.get_ref(), &store, &user, &id, request.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "user": updated
        })),
        Err(e) => e.to_response(),
    }
}

/// GET /api/v1/users/me/subordinates
#[utoipa::path(
    get,
    path = "/api/v1/users/me/subordinates",
    tag = "Users",
    responses((status = 200, description = "Direct and indirect reports", body = Vec<User>))
)]
pub async fn my_subordinates(user: web::ReqData<User>, store: web::Data<Store>) -> impl Responder {
    let users = user_service::subordinates(&store, &user);
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "users": users,
        "total": users.len()
    }))
}

/// GET /api/v1/users/me/assignable - Users the caller may assign leads to
#[utoipa::path(
    get,
    path = "/api/v1/users/me/assignable",
    tag = "Users",
    responses((status = 200, description = "Assignable users", body = Vec<User>))
)]
pub async fn my_assignable(user: web::ReqData<User>, store: web::Data<Store>) -> impl Responder {
    let users = user_service::assignable(&store, &user);
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "users": users,
        "total": users.len()
    }))
}

/// GET /api/v1/users/{id}/hierarchy
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/hierarchy",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Reports-to line, null at the top of the tree"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_hierarchy(store: web::Data<Store>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match user_service::hierarchy(&store, &id) {
        Ok(reports_to) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "userId": id,
            "reportsTo": reports_to
        })),
        Err(e) => e.to_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{seeded, test_app};
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn test_me_endpoints() {
        let state = seeded(vec![]).await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/v1/users/me/subordinates")
            .insert_header(("X-User-Id", "m"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);

        let req = test::TestRequest::get()
            .uri("/api/v1/users/me/assignable")
            .insert_header(("X-User-Id", "tl"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);

        let req = test::TestRequest::get()
            .uri("/api/v1/users/c1/hierarchy")
            .insert_header(("X-User-Id", "c1"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["reportsTo"], "Reports to: User tl (Team Leader)");
    }

    #[actix_web::test]
    async fn test_counselor_cannot_create_users() {
        let state = seeded(vec![]).await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header(("X-User-Id", "c1"))
            .set_json(serde_json::json!({ "name": "New", "role": "counselor" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
