pub mod allowlist;
pub mod fetcher;
pub mod source;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use allowlist::DomainAllowlist;
pub use fetcher::HttpFetcher;
pub use source::SourceImage;

pub const PRESET: &str = "pr:sharp";
pub const ACCEPT: &str = "image/avif,image/webp,image/apng,*/*";
pub const SERVER_NAME: &str = "NextImageTransformation";
pub const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
pub const DEFAULT_QUALITY: u32 = 75;

// Headers that describe the backend connection rather than the image
const SKIPPED_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-length",
    "server",
    "cache-control",
];

#[derive(Error, Debug)]
pub enum ImageProxyError {
    #[error("Malformed source URL: {0}")]
    MalformedSource(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Backend responded with status {0}")]
    BackendStatus(u16),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
    pub quality: u32,
}

impl Default for ResizeParams {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl ResizeParams {
    pub fn new(width: Option<u32>, height: Option<u32>, quality: Option<u32>) -> Self {
        let defaults = Self::default();
        Self {
            width: width.unwrap_or(defaults.width),
            height: height.unwrap_or(defaults.height),
            quality: quality.unwrap_or(defaults.quality),
        }
    }
}

/// A transformed image as returned by the backend, body fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedImage {
    pub body: Vec<u8>,
    pub headers: Vec<(String, String)>,
}

impl TransformedImage {
    /// Drops connection-level headers and stamps the gateway's own
    /// `Server` and `Cache-Control` values.
    pub fn with_delivery_headers(mut self) -> Self {
        self.headers
            .retain(|(name, _)| !SKIPPED_HEADERS.iter().any(|h| name.eq_ignore_ascii_case(h)));
        self.headers.push(("Server".to_string(), SERVER_NAME.to_string()));
        self.headers.push(("Cache-Control".to_string(), CACHE_CONTROL.to_string()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Performs the outbound GET against the transformation backend.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<TransformedImage, ImageProxyError>;
}

pub struct ImageProxy {
    base_url: String,
    fetcher: Arc<dyn ImageFetcher>,
}

impl ImageProxy {
    pub fn new(base_url: &str, fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fetcher,
        }
    }

    /// imgproxy URL for `src` resized with `params`.
    pub fn transform_url(&self, src: &str, params: &ResizeParams) -> String {
        format!(
            "{}/{}/resize:fill:{}:{}/q:{}/plain/{}",
            self.base_url, PRESET, params.width, params.height, params.quality, src
        )
    }

    // Fetch the transformed image and prepare it for delivery
    pub async fn fetch_transformed(
        &self,
        src: &str,
        params: &ResizeParams,
    ) -> Result<TransformedImage, ImageProxyError> {
        let url = self.transform_url(src, params);
        log::debug!("Requesting transformation from {}", url);
        let image = self.fetcher.fetch(&url).await?;
        Ok(image.with_delivery_headers())
    }
}
