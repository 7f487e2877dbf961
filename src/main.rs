use std::error::Error;
use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use log::info;

use next_image_transformation::config::{self, AppConfig};
use next_image_transformation::images::HttpFetcher;
use next_image_transformation::{build_rocket, VERSION};

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // Load config
    let figment = config::figment();
    let config = figment.extract::<AppConfig>()?;
    info!("Configuration loaded successfully");

    info!("Allowed remote domains: {}", config.allowed_remote_domains.join(", "));
    info!("Forwarding transformations to {}", config.imgproxy_url);
    info!(
        "Image cache initialized ({} entries max)",
        config.cache_max_entries
    );

    let fetcher = HttpFetcher::new(config.timeout)?;

    info!(
        "Starting Next Image Transformation v{} on {}:{}",
        VERSION, config.address, config.port
    );

    build_rocket(figment, &config, Arc::new(fetcher))
        .launch()
        .await?;

    Ok(())
}
