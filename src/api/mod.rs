pub mod error;
pub mod image;
pub mod root;

pub use error::ApiError;
