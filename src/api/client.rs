use super::error::ApiError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Header carrying the operator's gateway API key
pub const API_KEY_HEADER: &str = "x-api-key";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Preconfigured HTTP client for the gateway: fixed base URL and a JSON
/// content type on every request. Cheap to clone.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        // Validate once up front so every endpoint() call can rely on it
        Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for `path` with the given query pairs (empty values are skipped)
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        build_url(&self.base_url, path, query)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path, query)?;
        let body = self.execute(self.http.request(Method::GET, url)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn get_bytes(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(path, query)?;
        self.execute(self.http.request(Method::GET, url)).await
    }

    /// POST a JSON body, optionally authenticated with an API key header.
    /// Returns the raw response body.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        api_key: Option<&str>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(path, &[])?;
        let mut request = self.http.request(Method::POST, url).json(body);
        if let Some(key) = api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        self.execute(request).await
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.bytes().await?;

        debug!(
            path = %url,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "gateway response"
        );

        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(ApiError::from_status(
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
            ))
        }
    }
}

/// Build a full URL from base, path and query pairs
pub(crate) fn build_url(
    base_url: &str,
    path: &str,
    query: &[(&str, String)],
) -> Result<Url, ApiError> {
    let full_path = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );

    let mut url = Url::parse(&full_path).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

    // Only non-empty values make it onto the query string
    let non_empty: Vec<_> = query.iter().filter(|(_, v)| !v.is_empty()).collect();
    if !non_empty.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in non_empty {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}
