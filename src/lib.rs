#[macro_use]
extern crate rocket;

pub mod api;
pub mod cache;
pub mod config;
pub mod images;

use std::sync::Arc;

use rocket::figment::Provider;
use rocket::{Build, Rocket};

use cache::ImageCache;
use config::AppConfig;
use images::{DomainAllowlist, ImageFetcher, ImageProxy};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const HOMEPAGE: &str = "https://github.com/coollabsio/next-image-transformation";

/// Assembles the gateway. `fetcher` performs the calls to imgproxy at
/// `config.imgproxy_url`.
pub fn build_rocket<T: Provider>(
    provider: T,
    config: &AppConfig,
    fetcher: Arc<dyn ImageFetcher>,
) -> Rocket<Build> {
    let allowlist = DomainAllowlist::new(&config.allowed_remote_domains);
    let image_cache = ImageCache::new(config.cache_max_entries);
    let image_proxy = ImageProxy::new(&config.imgproxy_url, fetcher);

    rocket::custom(provider)
        .manage(allowlist)
        .manage(image_cache)
        .manage(image_proxy)
        .mount(
            "/",
            routes![
                api::root::index,
                api::root::health,
                api::root::fallback,
                api::image::resize,
            ],
        )
}
