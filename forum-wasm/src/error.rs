use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForumClientError {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error(transparent)]
    RequestError(#[from] gloo_net::Error),
    #[error("{0}")]
    Validation(String),
    #[error("File read error: {0}")]
    FileRead(String),
}
