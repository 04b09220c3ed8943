//! HTTP transport for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for making JSON requests under `{base}/api`
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    api_root: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base URL is empty".into()));
        }

        // Every request is sent as JSON, bodyless ones included
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_root: config.api_root(),
        })
    }

    /// Get the API root URL
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.api_root, path.trim_start_matches('/'));
        tracing::debug!(%method, %url, "Sending request");
        self.client.request(method, url)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a bodyless PATCH request; arguments travel in the query string
    pub async fn patch<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.request(Method::PATCH, path).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request, expecting an empty body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let text = Self::check_status(response).await?;
        if text.trim().is_empty() {
            return Err(ClientError::InvalidResponse("empty response body".into()));
        }
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// Map non-2xx responses to [`ClientError::Api`], returning the body text otherwise
    async fn check_status(response: reqwest::Response) -> ClientResult<String> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %text, "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}
