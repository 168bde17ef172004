//! Generation HTTP handler.

use crate::{error::HttpError, AppState};
use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use mdforge_core::models::{GenerateRequest, GenerateResponse};
use mdforge_core::ratelimit::UNKNOWN_IDENTITY;
use mdforge_core::GenerateError;
use std::time::Instant;

/// Resolve the rate-limit identity from the caller's network origin.
///
/// Uses the first entry of a forwarded-for chain; callers without one share
/// the sentinel bucket.
fn client_identity(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_IDENTITY)
        .to_string()
}

/// Generate a markdown document for the requested topic.
///
/// # Arguments
/// - `state`: Application state.
/// - `headers`: Request headers, used for identity resolution.
/// - `req`: Generation payload.
///
/// # Returns
/// The generated content as JSON.
///
/// # Errors
/// Returns an error when admission, validation, or the upstream call fails;
/// no partial content is ever produced.
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, HttpError> {
    let identity = client_identity(&headers);
    if !state.limiter.admit(&identity, Instant::now()) {
        tracing::warn!(identity = %identity, "Generation request rejected by rate limiter");
        return Err(GenerateError::RateLimited.into());
    }

    let topic = req.topic.trim();
    if topic.is_empty() {
        return Err(GenerateError::EmptyTopic.into());
    }

    let content = state.gateway.generate(topic).await?;
    tracing::info!(identity = %identity, "Content generated successfully");
    Ok(Json(GenerateResponse { content }))
}
