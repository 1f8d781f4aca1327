//! Client implementation for the Gemini API
//!
//! This module provides the main client interface and the single-shot
//! analysis call the relay makes.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::gemini::http::HttpClient;
use crate::gemini::models::ModelsService;
use crate::gemini::types::Content;
use tracing::{debug, instrument, warn};

/// Client for the Gemini API
#[derive(Clone)]
pub struct Client {
    models: ModelsService,
    model: String,
}

impl Client {
    /// Create a new client with an API key, endpoint and model identifier
    pub fn with_api_key(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            models: ModelsService::new(HttpClient::with_api_key(base_url, api_key)?),
            model: model.into(),
        })
    }

    /// Create a client from the relay configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_api_key(
            config.gemini_api_url.clone(),
            config.gemini_api_key.clone(),
            config.model.clone(),
        )
    }

    /// The model every analysis is sent to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Submit a prompt and return the model's text verbatim
    ///
    /// No retry and no post-processing. A response without any candidate
    /// text is an error.
    #[instrument(skip(self, prompt), fields(prompt_bytes = prompt.len()), level = "debug")]
    pub async fn analyze(&self, prompt: &str) -> Result<String> {
        let content = Content::new().with_role("user").with_text(prompt);

        let response = self
            .models
            .generate_content(&self.model, vec![content])
            .await?;

        match response.text() {
            Some(text) => {
                debug!("Model returned {} bytes", text.len());
                Ok(text)
            }
            None => {
                let reason = response
                    .block_reason()
                    .or_else(|| {
                        response
                            .candidates
                            .first()
                            .and_then(|c| c.finish_reason.as_deref())
                    })
                    .unwrap_or("no candidates");
                warn!("Model returned no text: {}", reason);
                Err(Error::UnexpectedResponse(format!(
                    "model returned no text ({})",
                    reason
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_analyze_returns_text_verbatim() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::Json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Describe this"}]}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "  **It works.**\n"}]}}]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = Client::with_api_key(server.url(), "test-key", "gemini-2.0-flash").unwrap();
        let text = client.analyze("Describe this").await.unwrap();

        assert_eq!(text, "  **It works.**\n");
        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_analyze_blocked_prompt() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
            .create_async()
            .await;

        let client = Client::with_api_key(server.url(), "test-key", "gemini-2.0-flash").unwrap();
        let err = client.analyze("something").await.unwrap_err();

        assert!(matches!(err, Error::UnexpectedResponse(ref msg) if msg.contains("SAFETY")));
        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_analyze_propagates_provider_failure() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .with_status(500)
            .with_body("internal")
            .expect(1)
            .create_async()
            .await;

        let client = Client::with_api_key(server.url(), "test-key", "gemini-2.0-flash").unwrap();
        let err = client.analyze("something").await.unwrap_err();

        assert!(matches!(err, Error::Api { status_code: 500, .. }));
        mock_server.assert_async().await;
    }
}
