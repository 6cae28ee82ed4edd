//! Materialization of a `ResponseSpec` into a concrete HTTP response.
//!
//! # Design
//! The response is plain data. The core decides status, header list and body
//! bytes; the host (the server crate, or any other embedding) writes them to
//! the network. All fields are owned so the value can outlive its `ResponseSpec`.

use crate::registry::AllowedHeader;
use crate::spec::ResponseSpec;

/// Used when neither the `ResponseSpec` nor the request path names a media type.
pub const FALLBACK_CONTENT_TYPE: &str = "text/plain";

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First value of `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl ResponseSpec {
    /// Build the response served for a request to `path`.
    ///
    /// A `content-type` header wins. Otherwise the stored content
    /// type is used, then a guess from the extension of `path`, then
    /// `text/plain`.
    pub fn materialize(&self, path: &str) -> HttpResponse {
        let mut headers: Vec<(String, String)> = self
            .headers()
            .map(|(header, value)| (header.as_str().to_string(), value.to_string()))
            .collect();

        if self.header(AllowedHeader::ContentType).is_none() {
            let content_type = if self.content_type().is_empty() {
                mime_guess::from_path(path)
                    .first_raw()
                    .unwrap_or(FALLBACK_CONTENT_TYPE)
            } else {
                self.content_type()
            };
            headers.insert(
                0,
                (AllowedHeader::ContentType.as_str().to_string(), content_type.to_string()),
            );
        }

        HttpResponse {
            status: self.status(),
            headers,
            body: self.body().to_vec(),
        }
    }
}
