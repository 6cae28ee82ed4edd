//! Share-link builder and parser bound to one responder deployment.
//!
//! # Design
//! `Responder` holds only a `base_url` and carries no state between calls.
//! `build_url` turns a spec into the link an editor hands out; `parse_url`
//! is the inverse used by tooling that receives such a link. Neither touches
//! the network.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::SpecError;
use crate::spec::ResponseSpec;
use crate::wire;

/// Bytes escaped in the path of a share link. `/` is kept so nested paths
/// stay nested; `?` and `#` would otherwise end the path early.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Stateless share-link codec for a responder at `base_url`.
#[derive(Debug, Clone)]
pub struct Responder {
    base_url: String,
}

impl Responder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Link serving `spec` at `path`. The path picks the guessed content type
    /// when `spec` has none, so `/poc.html` and `/poc.svg` behave differently.
    pub fn build_url(&self, spec: &ResponseSpec, path: &str) -> String {
        let path = utf8_percent_encode(path.trim_start_matches('/'), PATH);
        let query = wire::encode(spec);
        if query.is_empty() {
            format!("{}/{path}", self.base_url)
        } else {
            format!("{}/{path}?{query}", self.base_url)
        }
    }

    /// Decode the query of a share link. Any base URL is accepted; a link
    /// without a query decodes to the default spec.
    pub fn parse_url(&self, url: &str) -> Result<ResponseSpec, SpecError> {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        let query = url.split_once('?').map_or("", |(_, query)| query);
        wire::decode(query)
    }
}
