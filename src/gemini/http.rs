//! HTTP client for the Gemini API

use crate::error::{Error, Result};
use reqwest::{Client as ReqwestClient, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use url::Url;

/// Version segment of every Gemini API path
const API_VERSION: &str = "v1beta";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for making requests to the Gemini API
#[derive(Clone)]
pub struct HttpClient {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Base URL for API requests
    base_url: String,

    /// API key for authentication
    api_key: String,
}

impl HttpClient {
    /// Create a new HTTP client with an API key
    ///
    /// No request timeout is set; a stalled model call stalls its request.
    pub fn with_api_key(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = ReqwestClient::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Build a URL for the Gemini API
    fn build_url(&self, path: &str) -> Result<Url> {
        let url = format!("{}/{}/{}", self.base_url, API_VERSION, path);
        Url::parse(&url).map_err(|e| Error::Other(format!("Invalid URL: {}", e)))
    }

    /// Prepare a POST request with a JSON body
    #[instrument(skip(self, body), level = "debug")]
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.build_url(path)?;

        let request = self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(body);

        debug!("Sending POST request to {}", path);
        self.execute_request(request).await
    }

    /// Execute an HTTP request and handle the response
    ///
    /// Transport errors are stripped of their URL before they propagate.
    async fn execute_request<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        if status.is_success() {
            serde_json::from_str(&response_text).map_err(|e| {
                error!("Failed to parse response: {}", e);
                Error::UnexpectedResponse(format!("Failed to parse response: {}", e))
            })
        } else {
            error!("API error: {} - {}", status, response_text);

            if status == StatusCode::TOO_MANY_REQUESTS {
                Err(Error::RateLimit {
                    retry_after_secs: 60,
                })
            } else if status == StatusCode::UNAUTHORIZED {
                Err(Error::Auth("Invalid API key or credentials".to_string()))
            } else {
                Err(Error::Api {
                    status_code: status.as_u16(),
                    message: response_text,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct TestResponse {
        message: String,
    }

    #[tokio::test]
    async fn test_post_request_success() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/v1beta/test")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"message\": \"success\"}")
            .expect(1)
            .create_async()
            .await;

        let client = HttpClient::with_api_key(server.url(), "test-key").unwrap();

        let body = serde_json::json!({"test": "data"});
        let response: TestResponse = client.post("test", &body).await.unwrap();
        assert_eq!(response.message, "success");

        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_handling() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/v1beta/test")
            .with_status(429)
            .with_body("Resource exhausted")
            .create_async()
            .await;

        let client = HttpClient::with_api_key(server.url(), "test-key").unwrap();

        let body = serde_json::json!({});
        let result: Result<TestResponse> = client.post("test", &body).await;
        assert!(matches!(result, Err(Error::RateLimit { .. })));

        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_keeps_body() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/v1beta/test")
            .with_status(400)
            .with_body("{\"error\": {\"message\": \"prompt too long\"}}")
            .create_async()
            .await;

        let client = HttpClient::with_api_key(server.url(), "test-key").unwrap();

        let body = serde_json::json!({});
        let result: Result<TestResponse> = client.post("test", &body).await;
        match result {
            Err(Error::Api {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, 400);
                assert!(message.contains("prompt too long"));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_key_stays_out_of_url() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/v1beta/test")
            .match_query(mockito::Matcher::Missing)
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body("{\"message\": \"ok\"}")
            .expect(1)
            .create_async()
            .await;

        let client = HttpClient::with_api_key(server.url(), "test-key").unwrap();

        let result: TestResponse = client.post("test", &serde_json::json!({})).await.unwrap();
        assert_eq!(result.message, "ok");

        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            HttpClient::with_api_key(format!("http://{}", addr), "SECRET-GEMINI-KEY").unwrap();

        let result: Result<TestResponse> = client.post("test", &serde_json::json!({})).await;
        let err = result.unwrap_err();

        assert!(matches!(err, Error::Http(_)));
        assert!(!err.to_string().contains("SECRET-GEMINI-KEY"));
        assert!(!format!("{:?}", err).contains("SECRET-GEMINI-KEY"));
    }
}
