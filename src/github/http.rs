//! HTTP client for the GitHub REST API

use crate::error::{Error, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client as ReqwestClient, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use url::Url;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// HTTP client for making authenticated requests to the GitHub API
#[derive(Clone)]
pub struct HttpClient {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Base URL for API requests
    base_url: String,

    /// Token sent as a bearer credential
    token: String,
}

impl HttpClient {
    /// Create a new HTTP client for the given base URL and token
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("code-analyzer/", env!("CARGO_PKG_VERSION"))),
        );

        let client = ReqwestClient::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Build a URL from path segments, percent-encoding each one
    pub fn build_url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Other(format!("Invalid URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Other(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a GET request and deserialize the JSON response
    #[instrument(skip(self), level = "debug")]
    pub async fn get<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> Result<T> {
        let request = self
            .client
            .get(url)
            .query(query)
            .header(AUTHORIZATION, format!("Bearer {}", self.token));

        debug!("Sending GET request");
        self.execute_request(request).await
    }

    /// Execute an HTTP request and handle the response
    async fn execute_request<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(Error::Http)?;

        let status = response.status();
        let response_text = response.text().await.map_err(Error::Http)?;

        if status.is_success() {
            serde_json::from_str(&response_text).map_err(|e| {
                error!("Failed to parse response: {}", e);
                Error::UnexpectedResponse(format!("Failed to parse response: {}", e))
            })
        } else {
            error!("GitHub API error: {} - {}", status, response_text);
            Err(Error::Api {
                status_code: status.as_u16(),
                message: response_text,
            })
        }
    }
}
