pub mod image;

pub use image::{CacheKey, ImageCache};
