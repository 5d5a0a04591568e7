//! Gemini HTTP client.

use reqwest::Client;
use std::time::Duration;

use super::error::{CompletionError, CompletionResult};
use super::types::*;

/// Default public endpoint for the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model used for completions.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Client for the Gemini generateContent API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// HTTP client.
    client: Client,
    /// Base URL of the API.
    base_url: String,
    /// Model to generate with.
    model: String,
    /// API key for authentication.
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Generate a completion for the assembled conversation.
    ///
    /// One blocking round trip: no retry, no streaming. Any upstream failure
    /// surfaces as a `CompletionError`.
    pub async fn generate(&self, turns: &[PromptTurn]) -> CompletionResult<String> {
        let prompt = build_prompt(turns);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => format!("completion service returned status {}", status),
            };
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::ParseError(e.to_string()))?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(CompletionError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new(DEFAULT_BASE_URL, DEFAULT_MODEL, "test-key");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.model, "gemini-2.5-flash");
    }
}
