use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForumClientError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Not found")]
    NotFound,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ForumClientError {
    pub async fn from_http_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return ForumClientError::NotFound;
        }
        let message = resp.text().await.unwrap_or_default();
        ForumClientError::Http {
            status: status.as_u16(),
            message,
        }
    }
}
