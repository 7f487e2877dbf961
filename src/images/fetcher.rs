use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT as ACCEPT_HEADER;
use reqwest::Client;

use super::{ImageFetcher, ImageProxyError, TransformedImage, ACCEPT};

/// Talks to imgproxy over HTTP. The client is built once and shared by
/// every request.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: u64) -> Result<Self, ImageProxyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| ImageProxyError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<TransformedImage, ImageProxyError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT_HEADER, ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Transformation request failed with status: {}", status);
            return Err(ImageProxyError::BackendStatus(status.as_u16()));
        }

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.bytes().await?.to_vec();
        log::debug!("Transformation request successful ({} bytes)", body.len());

        Ok(TransformedImage { body, headers })
    }
}
