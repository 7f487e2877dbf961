use rocket::response::content::RawHtml;
use rocket::response::Redirect;

use crate::{HOMEPAGE, VERSION};

#[get("/")]
pub fn index() -> RawHtml<String> {
    RawHtml(format!(
        "<h3>Next Image Transformation v{}</h3>More info <a href=\"{}\">{}</a>.",
        VERSION, HOMEPAGE, HOMEPAGE
    ))
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}

// Everything that is not an image request points at the project page
#[get("/<_..>", rank = 20)]
pub fn fallback() -> Redirect {
    Redirect::found(HOMEPAGE)
}
