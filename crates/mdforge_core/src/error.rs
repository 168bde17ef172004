//! Error taxonomy for the generation flow.
use thiserror::Error;

/// Classified failures for a generation request.
///
/// Editing-session and history operations are total and never produce one of
/// these; everything here belongs to the admission/gateway path and is
/// returned as a value, never raised as a fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Topic is required")]
    EmptyTopic,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("API key configuration error")]
    MissingCredentials,

    #[error("Authentication error")]
    AuthRejected,

    #[error("Request timed out. Please try again.")]
    UpstreamTimeout,

    #[error("No content generated")]
    EmptyResponse,

    #[error("{0}")]
    Unknown(String),
}
