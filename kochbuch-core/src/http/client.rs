//! HTTP client trait and implementations.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;

use crate::error::FetchError;

/// A browser-like User-Agent; several recipe portals serve reduced
/// markup (or a 403) to anything that identifies as a bot.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const IMAGE_ACCEPT: &str = "image/avif,image/webp,image/apng,image/*,*/*;q=0.8";

/// A fetched image: raw bytes plus the declared content type.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

/// Trait for HTTP clients, enabling mockability in tests.
///
/// Every fetch is stateless and independent: no cookies, no auth,
/// nothing carried over between requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch a page as text.
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;

    /// Fetch an image, bounded by the image timeout rather than the
    /// page timeout.
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

/// Configuration for WebClient.
#[derive(Clone)]
pub struct WebClientBuilder {
    page_timeout: Duration,
    image_timeout: Duration,
    user_agent: String,
}

impl Default for WebClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WebClientBuilder {
    pub fn new() -> Self {
        Self {
            page_timeout: Duration::from_secs(30),
            image_timeout: Duration::from_secs(10),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Set the page fetch timeout.
    pub fn page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    /// Set the per-image fetch timeout.
    pub fn image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Build the WebClient.
    pub fn build(self) -> Result<WebClient, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(self.page_timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(WebClient {
            inner,
            image_timeout: self.image_timeout,
        })
    }
}

/// Production HTTP client.
pub struct WebClient {
    inner: reqwest::Client,
    image_timeout: Duration,
}

impl WebClient {
    /// Create a new WebClient with default configuration.
    pub fn new() -> Result<Self, reqwest::Error> {
        WebClientBuilder::new().build()
    }

    /// Get a builder for custom configuration.
    pub fn builder() -> WebClientBuilder {
        WebClientBuilder::new()
    }
}

#[async_trait]
impl HttpClient for WebClient {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        tracing::debug!(url, "fetching page");
        let response = self.inner.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = %status, "page fetch failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(FetchError::RequestFailed)
    }

    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let response = self
            .inner
            .get(parsed)
            .header(header::ACCEPT, IMAGE_ACCEPT)
            .timeout(self.image_timeout)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let data = response.bytes().await?.to_vec();

        Ok(FetchedImage { data, content_type })
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    Html(String),
    Image(Vec<u8>, Option<String>),
    Status(u16),
    Error(String),
}

/// Mock HTTP client for testing.
#[derive(Default)]
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
}

impl MockClient {
    /// Create a new empty mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for a URL.
    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Add an HTML response for a URL.
    pub fn with_html(self, url: &str, html: &str) -> Self {
        self.with_response(url, MockResponse::Html(html.to_string()))
    }

    /// Add an image response for a URL.
    pub fn with_image(self, url: &str, data: Vec<u8>, content_type: &str) -> Self {
        self.with_response(url, MockResponse::Image(data, Some(content_type.to_string())))
    }

    /// Add a non-success status response for a URL.
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.with_response(url, MockResponse::Status(status))
    }

    /// Add a transport error response for a URL.
    pub fn with_error(self, url: &str, error: &str) -> Self {
        self.with_response(url, MockResponse::Error(error.to_string()))
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        match self.responses.get(url) {
            Some(MockResponse::Html(html)) => Ok(html.clone()),
            Some(MockResponse::Image(data, _)) => String::from_utf8(data.clone())
                .map_err(|e| FetchError::InvalidEncoding(e.to_string())),
            Some(MockResponse::Status(code)) => Err(FetchError::Status(*code)),
            Some(MockResponse::Error(e)) => Err(FetchError::InvalidUrl(e.clone())),
            None => Err(FetchError::InvalidUrl(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }

    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, FetchError> {
        match self.responses.get(url) {
            Some(MockResponse::Image(data, content_type)) => Ok(FetchedImage {
                data: data.clone(),
                content_type: content_type.clone(),
            }),
            Some(MockResponse::Html(html)) => Ok(FetchedImage {
                data: html.clone().into_bytes(),
                content_type: None,
            }),
            Some(MockResponse::Status(code)) => Err(FetchError::Status(*code)),
            Some(MockResponse::Error(e)) => Err(FetchError::InvalidUrl(e.clone())),
            None => Err(FetchError::InvalidUrl(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }
}
