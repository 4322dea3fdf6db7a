use astra::Response;
// errors.rs

/// Errors surfaced by route handlers. Every variant maps to a JSON
/// `{ "error": ... }` body; upstream detail never reaches the message.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    /// A required credential is missing from the environment.
    #[error("{0}")]
    Config(String),
    /// A call to a third-party service failed. Holds the generic message only.
    #[error("{0}")]
    Upstream(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Config(_) | ServerError::Upstream(_) | ServerError::InternalError => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
