use crate::images::ImageProxyError;
use crate::HOMEPAGE;
use rocket::http::{ContentType, Status};
use std::io::Cursor;

pub const GENERIC_ERROR: &str = "Error resizing image";

#[derive(Debug)]
pub enum ApiError {
    DomainRejected(String),
    ImageError(ImageProxyError),
}

impl From<ImageProxyError> for ApiError {
    fn from(error: ImageProxyError) -> Self {
        ApiError::ImageError(error)
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        let (status, body) = match self {
            ApiError::DomainRejected(origin) => (
                Status::Forbidden,
                format!(
                    "Domain ({}) not allowed. More details here: {}",
                    origin, HOMEPAGE
                ),
            ),
            ApiError::ImageError(_) => (Status::InternalServerError, GENERIC_ERROR.to_string()),
        };

        rocket::Response::build()
            .status(status)
            .header(ContentType::Plain)
            .sized_body(None, Cursor::new(body))
            .ok()
    }
}
