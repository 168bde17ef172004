//! Upstream content-generation gateway.
//!
//! Issues exactly one chat-completions call per generation request and maps
//! every failure onto the [`GenerateError`] taxonomy. Retry is a caller
//! policy decision; the gateway never retries and imposes no deadline of its
//! own.

use axum::http::StatusCode;
use mdforge_core::{Config, GenerateError};
use serde::Deserialize;
use serde_json::json;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Client for the OpenAI-compatible generation upstream.
pub struct GenerationGateway {
    client: reqwest::Client,
    upstream_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl GenerationGateway {
    /// Build a gateway from the service configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            upstream_url: config.upstream_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
        }
    }

    /// Generate a structured markdown document about `topic`.
    ///
    /// # Arguments
    /// - `topic`: Non-empty document topic; the handler validates this
    ///   before the gateway is reached.
    ///
    /// # Returns
    /// The generated markdown on success.
    ///
    /// # Errors
    /// - [`GenerateError::MissingCredentials`] when no API key is configured
    ///   (no network call is made).
    /// - [`GenerateError::AuthRejected`] / [`GenerateError::UpstreamTimeout`] /
    ///   [`GenerateError::Unknown`] for classified upstream failures.
    /// - [`GenerateError::EmptyResponse`] when the upstream reply carries no
    ///   extractable text.
    pub async fn generate(&self, topic: &str) -> Result<String, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("GROQ_API_KEY is not set");
            GenerateError::MissingCredentials
        })?;

        let url = format!("{}{}", self.upstream_url, CHAT_COMPLETIONS_PATH);
        let body = json!({
            "messages": [{ "role": "user", "content": document_prompt(topic) }],
            "model": self.model,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "top_p": self.top_p,
            "stream": false,
        });

        tracing::debug!(topic = %topic, "Sending generation request upstream");
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_failure)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_upstream_failure(status.as_u16(), &detail));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| GenerateError::Unknown(err.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerateError::EmptyResponse)
    }
}

fn classify_transport_failure(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        GenerateError::UpstreamTimeout
    } else {
        GenerateError::Unknown(err.to_string())
    }
}

/// Classify a non-success upstream response by status code and body text.
fn classify_upstream_failure(status: u16, detail: &str) -> GenerateError {
    let lowered = detail.to_ascii_lowercase();
    if status == StatusCode::UNAUTHORIZED.as_u16()
        || status == StatusCode::FORBIDDEN.as_u16()
        || lowered.contains("api key")
        || lowered.contains("invalid_api_key")
    {
        return GenerateError::AuthRejected;
    }
    if status == StatusCode::REQUEST_TIMEOUT.as_u16()
        || status == StatusCode::GATEWAY_TIMEOUT.as_u16()
        || lowered.contains("timeout")
    {
        return GenerateError::UpstreamTimeout;
    }
    let detail = detail.trim();
    if detail.is_empty() {
        GenerateError::Unknown(format!("Upstream returned status {}", status))
    } else {
        GenerateError::Unknown(format!("Upstream returned status {}: {}", status, detail))
    }
}

/// Fixed prompt template, parameterized only by topic.
///
/// Requests a deterministic heading structure; prose itself varies with the
/// sampling temperature.
fn document_prompt(topic: &str) -> String {
    format!(
        r#"Generate a detailed and well-structured markdown document about "{topic}".

Structure the content as follows:

# {topic}

[Introduction: Write a compelling introduction that sets the context and importance of the topic]

## Overview
[Provide a high-level overview of the main concepts]

## Key Features/Components
[List and explain the main features or components]

## Implementation/Usage
[If applicable, include practical examples, code snippets, or usage instructions]

## Best Practices
[Share recommended practices and guidelines]

## Common Challenges and Solutions
[Address typical problems and their solutions]

## Future Perspectives
[Discuss future trends or potential developments]

## Conclusion
[Summarize key points and provide closing thoughts]

Important guidelines:
1. Use proper markdown syntax throughout
2. Include relevant code examples if the topic is technical
3. Use bullet points and numbered lists for better readability
4. Add emphasis using **bold** and *italic* where appropriate
5. Include `inline code` and code blocks where relevant
6. Keep the content informative yet concise
7. Maintain a professional tone throughout

Make the content engaging and valuable for both beginners and experienced users."#
    )
}
