use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Initial or refresh load from the CRM backend failed
    LoadFailed(String),
    /// Create/update call rejected or unreachable
    SaveFailed(String),
    DeleteFailed(String),
    NotFound(String),
    InvalidRequest(String),
    Forbidden(String),
    Unauthorized(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::LoadFailed(_) | AppError::SaveFailed(_) | AppError::DeleteFailed(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// `{"success": false, "error": ...}` envelope used by every handler
    pub fn to_response(&self) -> HttpResponse {
        crate::api::metrics::increment_error_count();
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::LoadFailed(msg) => write!(f, "Load failed: {}", msg),
            AppError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
            AppError::DeleteFailed(msg) => write!(f, "Delete failed: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
