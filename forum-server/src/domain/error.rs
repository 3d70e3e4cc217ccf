use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("post not found: {0}")]
    PostNotFound(Uuid),
    #[error("{0}")]
    Validation(String),
    #[error("media not found: {0}")]
    MediaNotFound(String),
    #[error("invalid media key: {0}")]
    InvalidMediaKey(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::PostNotFound(_) | DomainError::MediaNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::InvalidMediaKey(_) => StatusCode::BAD_REQUEST,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let details = match self {
            DomainError::PostNotFound(resource) => Some(json!({ "resource": resource })),
            DomainError::MediaNotFound(key) | DomainError::InvalidMediaKey(key) => {
                Some(json!({ "key": key }))
            }
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
