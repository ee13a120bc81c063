use crate::models::User;
use crate::services::user_service;
use crate::state::Store;
use crate::utils::AppError;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

/// Header carrying the acting user's id. Authentication happens upstream.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Resolves `X-User-Id` against the loaded users and stores the `User`
/// in the request extensions (`web::ReqData<User>` in handlers).
/// Missing, unknown and inactive users get a 401 envelope.
pub struct CurrentUser;

impl<S, B> Transform<S, ServiceRequest> for CurrentUser
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CurrentUserMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CurrentUserMiddleware { service }))
    }
}

pub struct CurrentUserMiddleware<S> {
    service: S,
}

fn resolve_user(req: &ServiceRequest) -> Result<User, AppError> {
    let id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", USER_ID_HEADER)))?;

    let store = req
        .app_data::<web::Data<Store>>()
        .ok_or_else(|| AppError::Unauthorized("User directory unavailable".to_string()))?;

    let user = user_service::find_user(store, id)
        .ok_or_else(|| AppError::Unauthorized(format!("Unknown user {}", id)))?;

    if !user.is_active {
        return Err(AppError::Unauthorized(format!("User {} is inactive", id)));
    }
    Ok(user)
}

impl<S, B> Service<ServiceRequest> for CurrentUserMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match resolve_user(&req) {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(e) => {
                log::warn!("🔒 {} {}: {}", req.method(), req.path(), e);
                let response = e.to_response();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}
