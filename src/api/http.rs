//! HTTP utilities for management API calls

use super::auth::AccessToken;
use super::config::ClientConfig;
use super::error::{sanitize_for_log, Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use url::Url;

/// Media type of management API request bodies
pub const CONTENT_TYPE_MANAGEMENT: &str = "application/vnd.contentful.management.v1+json";

/// Header carrying `sys.version` on mutations
pub const VERSION_HEADER: &str = "X-Contentful-Version";

/// Header naming the content type of a new entry
pub const CONTENT_TYPE_HEADER: &str = "X-Contentful-Content-Type";

/// Header selecting the organization a new space belongs to
pub const ORGANIZATION_HEADER: &str = "X-Contentful-Organization";

/// Seconds until the rate limit resets, sent with 429 responses
const RATE_LIMIT_RESET_HEADER: &str = "X-Contentful-RateLimit-Reset";

/// HTTP client wrapper for management API calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    token: AccessToken,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            token: config.access_token.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path (e.g. `/spaces/abc`) against the base URL
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("invalid request path '{}': {}", path, e)))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        tracing::debug!("GET {}", path);

        let request = self.request(Method::GET, path)?.query(query);
        self.execute(request, "GET", path).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, path: &str, body: &Value, headers: &[(&str, String)]) -> Result<Value> {
        tracing::debug!("POST {}", path);

        let mut request = self.request(Method::POST, path)?;
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        let request = with_body(request, body)?;
        self.execute(request, "POST", path).await
    }

    /// Make a PUT request, optionally with a body and the entity version
    pub async fn put(
        &self,
        path: &str,
        body: Option<&Value>,
        version: Option<u64>,
        headers: &[(&str, String)],
    ) -> Result<Value> {
        tracing::debug!("PUT {} (version: {:?})", path, version);

        let mut request = self.request(Method::PUT, path)?;
        if let Some(version) = version {
            request = request.header(VERSION_HEADER, version.to_string());
        }
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        if let Some(body) = body {
            request = with_body(request, body)?;
        }
        self.execute(request, "PUT", path).await
    }

    /// Make a DELETE request, optionally with the entity version
    pub async fn delete(&self, path: &str, version: Option<u64>) -> Result<Value> {
        tracing::debug!("DELETE {} (version: {:?})", path, version);

        let mut request = self.request(Method::DELETE, path)?;
        if let Some(version) = version {
            request = request.header(VERSION_HEADER, version.to_string());
        }
        self.execute(request, "DELETE", path).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        Ok(self
            .client
            .request(method, url)
            .bearer_auth(self.token.as_str()))
    }

    async fn execute(&self, request: RequestBuilder, method: &str, path: &str) -> Result<Value> {
        let response = request.send().await?;

        let status = response.status();
        let rate_limit_reset = response
            .headers()
            .get(RATE_LIMIT_RESET_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!(
                "API error: {} {} -> {} - {}",
                method,
                path,
                status,
                sanitize_for_log(&body)
            );
            return Err(Error::from_response(status, &body, rate_limit_reset));
        }

        // Handle empty response
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::MalformedResponse(format!("{} {} returned invalid JSON: {}", method, path, e))
        })
    }
}

fn with_body(request: RequestBuilder, body: &Value) -> Result<RequestBuilder> {
    Ok(request
        .header(CONTENT_TYPE, CONTENT_TYPE_MANAGEMENT)
        .body(serde_json::to_vec(body)?))
}

/// Percent-encode a single path segment (an entity id or locale code)
pub fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
