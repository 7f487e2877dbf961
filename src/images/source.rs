use url::Url;

use super::ImageProxyError;

/// The remote image a resize request points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    url: String,
    origin: String,
}

impl SourceImage {
    /// Parses the path tail following `/image/`.
    ///
    /// URI normalization may collapse `https://` into `https:/`; the
    /// missing slash is restored before parsing. The returned URL string is
    /// otherwise kept exactly as received so that it can be forwarded
    /// verbatim and used in cache keys.
    pub fn from_path(raw: &str) -> Result<Self, ImageProxyError> {
        let url = restore_scheme_separator(raw);
        let parsed = Url::parse(&url)
            .map_err(|e| ImageProxyError::MalformedSource(format!("{}: {}", raw, e)))?;
        let origin = parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ImageProxyError::MalformedSource(format!("{}: missing host", raw)))?
            .to_string();

        Ok(Self { url, origin })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Hostname of the source URL.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

fn restore_scheme_separator(raw: &str) -> String {
    if let Some((scheme, rest)) = raw.split_once(":/") {
        let is_scheme = !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if is_scheme && !rest.starts_with('/') {
            return format!("{}://{}", scheme, rest);
        }
    }
    raw.to_string()
}
