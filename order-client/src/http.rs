//! HTTP client for the restaurant backend

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// HTTP client for making network requests to the backend
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request against a backend path
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<reqwest::Response> {
        let url = self.url(path);
        let response = self.client.get(&url).query(query).send().await?;
        tracing::debug!(%url, status = %response.status(), "GET");
        Ok(response)
    }

    /// Make a GET request against an absolute URL
    pub async fn get_absolute(&self, url: &str) -> ClientResult<reqwest::Response> {
        let response = self.client.get(url).send().await?;
        tracing::debug!(%url, status = %response.status(), "GET");
        Ok(response)
    }

    /// Make a POST request with JSON body
    pub async fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<reqwest::Response> {
        let url = self.url(path);
        let response = self.client.post(&url).json(body).send().await?;
        tracing::debug!(%url, status = %response.status(), "POST");
        Ok(response)
    }

    /// Decode a JSON body, treating anything but HTTP 200 as a failure
    ///
    /// `failure` turns a reason (status or decode error) into the
    /// endpoint-specific error.
    pub async fn decode<T, F>(response: reqwest::Response, failure: F) -> ClientResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce(String) -> ClientError,
    {
        let status = response.status();
        if status != StatusCode::OK {
            return Err(failure(format!("HTTP {}", status)));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| failure(format!("invalid body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:8080/")).unwrap();
        assert_eq!(client.url("categories"), "http://localhost:8080/categories");
        assert_eq!(client.url("/order"), "http://localhost:8080/order");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = HttpClient::new(&ClientConfig::new(""));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
