use rocket::http::uri::Origin;
use rocket::{request::Request, response::{self, Response, Responder}};
use rocket::State;
use std::io::Cursor;

use crate::api::ApiError;
use crate::cache::{CacheKey, ImageCache};
use crate::images::{DomainAllowlist, ImageProxy, ResizeParams, SourceImage, TransformedImage};

pub const IMAGE_PREFIX: &str = "/image/";

// Responder for a transformed image, headers passed through as stored
pub struct ImageResponse(pub TransformedImage);

impl<'r> Responder<'r, 'static> for ImageResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let TransformedImage { body, headers } = self.0;
        let mut response = Response::build();
        for (name, value) in headers {
            response.raw_header_adjoin(name, value);
        }
        response.sized_body(body.len(), Cursor::new(body));
        response.ok()
    }
}

#[get("/image/<_..>?<width>&<height>&<quality>")]
pub async fn resize(
    uri: &Origin<'_>,
    width: Option<u32>,
    height: Option<u32>,
    quality: Option<u32>,
    allowlist: &State<DomainAllowlist>,
    image_cache: &State<ImageCache>,
    image_proxy: &State<ImageProxy>,
) -> Result<ImageResponse, ApiError> {
    let raw_source = uri.path().as_str().strip_prefix(IMAGE_PREFIX).unwrap_or("");

    let source = match SourceImage::from_path(raw_source) {
        Ok(source) => source,
        Err(err) => {
            log::error!("Rejecting image request: {}", err);
            return Err(err.into());
        }
    };

    if !allowlist.is_allowed(source.origin()) {
        log::warn!("Domain '{}' not in allowlist", source.origin());
        return Err(ApiError::DomainRejected(source.origin().to_string()));
    }

    let params = ResizeParams::new(width, height, quality);
    let cache_key = CacheKey::new(source.url(), &params);

    if let Some(image) = image_cache.get(&cache_key) {
        log::info!("Transformed image found in cache: {}", cache_key);
        return Ok(ImageResponse(image));
    }

    log::info!("Transformed image not found in cache: {}", cache_key);

    match image_proxy.fetch_transformed(source.url(), &params).await {
        Ok(image) => {
            image_cache.set(cache_key, image.clone());
            log::debug!(
                "Image cache holds {}/{} entries",
                image_cache.entry_count(),
                image_cache.capacity()
            );
            Ok(ImageResponse(image))
        }
        Err(err) => {
            log::error!("Error resizing {}: {}", source.url(), err);
            Err(err.into())
        }
    }
}
