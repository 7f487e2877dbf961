use std::num::NonZeroUsize;

use log::info;
use rocket::figment::{
    providers::{Format, Serialized, Toml},
    Figment, Profile,
};
use rocket::Config;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_IMGPROXY_URL: &str = "http://imgproxy:8080";
pub const DEVELOPMENT_IMGPROXY_URL: &str = "http://localhost:8888";
pub const DEVELOPMENT_PROFILE: &str = "development";

const DEFAULT_CACHE_MAX_ENTRIES: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(n) => n,
    None => panic!("default cache size must be non-zero"),
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub address: String,
    #[serde(default = "default_allowed_remote_domains")]
    pub allowed_remote_domains: Vec<String>,
    #[serde(default = "default_imgproxy_url")]
    pub imgproxy_url: String,
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: NonZeroUsize,
    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_allowed_remote_domains() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_imgproxy_url() -> String {
    DEFAULT_IMGPROXY_URL.to_string()
}

fn default_cache_max_entries() -> NonZeroUsize {
    DEFAULT_CACHE_MAX_ENTRIES
}

fn default_timeout() -> u64 {
    30
}

/// Builds the figment from `App.toml` and the process environment.
pub fn figment() -> Figment {
    figment_with_env(|key| std::env::var(key).ok())
}

/// Same as [`figment`], with the environment supplied by `lookup`.
pub fn figment_with_env<F>(lookup: F) -> Figment
where
    F: Fn(&str) -> Option<String>,
{
    let mut figment = Figment::from(Config::default())
        .merge(Serialized::default("port", DEFAULT_PORT))
        .merge(Toml::file("App.toml").nested());

    if let Some(domains) = lookup("ALLOWED_REMOTE_DOMAINS") {
        let domains: Vec<String> = domains.split(',').map(|s| s.trim().to_string()).collect();
        figment = figment.merge(Serialized::global("allowed_remote_domains", domains));
    }

    if let Some(url) = lookup("IMGPROXY_URL") {
        figment = figment.merge(Serialized::global("imgproxy_url", url.trim().to_string()));
    }

    if let Some(entries) = lookup("CACHE_MAX_ENTRIES").and_then(|v| v.trim().parse::<usize>().ok()) {
        figment = figment.merge(Serialized::global("cache_max_entries", entries));
    }

    if let Some(timeout) = lookup("REQUEST_TIMEOUT").and_then(|v| v.trim().parse::<u64>().ok()) {
        figment = figment.merge(Serialized::global("timeout", timeout));
    }

    let profile = lookup("APP_PROFILE").unwrap_or_else(|| "default".to_string());
    if profile == DEVELOPMENT_PROFILE {
        info!("Development profile active, using local imgproxy at {}", DEVELOPMENT_IMGPROXY_URL);
        figment = figment.merge(Serialized::global("imgproxy_url", DEVELOPMENT_IMGPROXY_URL));
    }

    figment.select(Profile::new(&profile))
}
