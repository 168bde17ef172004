//! HTTP error mapping for API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mdforge_core::GenerateError;
use serde_json::json;
use thiserror::Error;

/// Wrapper mapping classified generation failures onto HTTP responses.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct HttpError(#[from] pub GenerateError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            GenerateError::EmptyTopic => StatusCode::BAD_REQUEST,
            GenerateError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GenerateError::AuthRejected => StatusCode::UNAUTHORIZED,
            GenerateError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            GenerateError::MissingCredentials
            | GenerateError::EmptyResponse
            | GenerateError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Generation failed: {}", self.0);
        }
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_for(err: GenerateError) -> StatusCode {
        HttpError(err).into_response().status()
    }

    #[test]
    fn each_failure_maps_to_its_status_code() {
        let cases = [
            (GenerateError::EmptyTopic, StatusCode::BAD_REQUEST),
            (GenerateError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (GenerateError::AuthRejected, StatusCode::UNAUTHORIZED),
            (GenerateError::UpstreamTimeout, StatusCode::GATEWAY_TIMEOUT),
            (
                GenerateError::MissingCredentials,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                GenerateError::EmptyResponse,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                GenerateError::Unknown("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let got = status_for(err.clone());
            assert_eq!(got, expected, "error: {:?}", err);
        }
    }
}
