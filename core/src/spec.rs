//! The in-memory model of one shareable response.
//!
//! # Design
//! Headers are keyed by `AllowedHeader`, so a spec can only ever hold
//! allow-listed names and each name at most once. `insert_header` and
//! `set_content_type` are where names and values are validated; everything
//! downstream (the encoder in particular) trusts a `ResponseSpec` and cannot
//! fail.

use std::collections::BTreeMap;

use crate::cors::{self, CORS_HEADERS};
use crate::error::SpecError;
use crate::registry::{self, AllowedHeader};

pub const DEFAULT_STATUS: u16 = 200;

/// A response described as plain data: status, content type, headers, body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    status: u16,
    content_type: String,
    headers: BTreeMap<AllowedHeader, String>,
    body: Vec<u8>,
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self {
            status: DEFAULT_STATUS,
            content_type: String::new(),
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }
}

impl ResponseSpec {
    /// Fails with `InvalidHeaderValue` when `content_type` carries control
    /// characters; it is served as the `content-type` header.
    pub fn new(content_type: &str) -> Result<Self, SpecError> {
        let mut spec = Self::default();
        spec.set_content_type(content_type)?;
        Ok(spec)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) -> Result<(), SpecError> {
        if !(100..=999).contains(&status) {
            return Err(SpecError::InvalidStatus(status));
        }
        self.status = status;
        Ok(())
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn set_content_type(&mut self, content_type: &str) -> Result<(), SpecError> {
        validate_value(AllowedHeader::ContentType, content_type)?;
        self.content_type = content_type.to_string();
        Ok(())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// Add or replace a header. Returns the previous value, if any.
    ///
    /// Fails with `InvalidHeader` for names outside the allow-list and with
    /// `InvalidHeaderValue` for values carrying control characters.
    pub fn insert_header(&mut self, name: &str, value: &str) -> Result<Option<String>, SpecError> {
        let header = registry::canonicalize(name)?;
        self.insert(header, value)
    }

    pub(crate) fn insert(
        &mut self,
        header: AllowedHeader,
        value: &str,
    ) -> Result<Option<String>, SpecError> {
        validate_value(header, value)?;
        Ok(self.headers.insert(header, value.to_string()))
    }

    pub(crate) fn contains(&self, header: AllowedHeader) -> bool {
        self.headers.contains_key(&header)
    }

    pub fn remove_header(&mut self, name: &str) -> Result<Option<String>, SpecError> {
        let header = registry::canonicalize(name)?;
        Ok(self.headers.remove(&header))
    }

    pub fn header(&self, header: AllowedHeader) -> Option<&str> {
        self.headers.get(&header).map(String::as_str)
    }

    /// Headers in registry order.
    pub fn headers(&self) -> impl Iterator<Item = (AllowedHeader, &str)> + '_ {
        self.headers.iter().map(|(header, value)| (*header, value.as_str()))
    }

    pub fn has_cors(&self) -> bool {
        cors::has_cors(self.headers().map(|(header, value)| (header.as_str(), value)))
    }

    /// The editor's CORS toggle: write or remove the whole bundle.
    pub fn set_cors(&mut self, enabled: bool) {
        for (header, value) in CORS_HEADERS {
            if enabled {
                self.headers.insert(header, value.to_string());
            } else {
                self.headers.remove(&header);
            }
        }
    }
}

/// Header values may not carry control characters other than horizontal tab.
fn validate_value(header: AllowedHeader, value: &str) -> Result<(), SpecError> {
    if value.chars().any(|c| c.is_ascii_control() && c != '\t') {
        return Err(SpecError::InvalidHeaderValue {
            header: header.as_str(),
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_is_empty_200() {
        let spec = ResponseSpec::default();
        assert_eq!(spec.status(), 200);
        assert_eq!(spec.content_type(), "");
        assert!(spec.body().is_empty());
        assert_eq!(spec.headers().count(), 0);
    }

    #[test]
    fn insert_header_canonicalizes_name() {
        let mut spec = ResponseSpec::new("text/html").unwrap();
        assert_eq!(spec.insert_header(" Location ", "https://example.com").unwrap(), None);
        assert_eq!(spec.header(AllowedHeader::Location), Some("https://example.com"));
    }

    #[test]
    fn insert_header_replaces_instead_of_duplicating() {
        let mut spec = ResponseSpec::default();
        spec.insert_header("Set-Cookie", "a=1").unwrap();
        let previous = spec.insert_header("set-cookie", "b=2").unwrap();
        assert_eq!(previous.as_deref(), Some("a=1"));
        assert_eq!(spec.headers().collect::<Vec<_>>(), vec![(AllowedHeader::SetCookie, "b=2")]);
    }

    #[test]
    fn insert_header_rejects_unlisted_name() {
        let mut spec = ResponseSpec::default();
        let err = spec.insert_header("X-Evil-Header", "1").unwrap_err();
        assert_eq!(err, SpecError::InvalidHeader("X-Evil-Header".to_string()));
        assert_eq!(spec.headers().count(), 0);
    }

    #[test]
    fn insert_header_rejects_line_breaks() {
        let mut spec = ResponseSpec::default();
        for value in ["a\r\nx-evil: 1", "a\nb", "nul\0"] {
            let err = spec.insert_header("server", value).unwrap_err();
            assert!(matches!(err, SpecError::InvalidHeaderValue { header: "server", .. }));
        }
        spec.insert_header("server", "tab\tis fine, ünïcode too").unwrap();
    }

    #[test]
    fn content_type_rejects_line_breaks() {
        let err = ResponseSpec::new("text/html\r\nx-evil: 1").unwrap_err();
        assert!(matches!(err, SpecError::InvalidHeaderValue { header: "content-type", .. }));

        let mut spec = ResponseSpec::new("text/html").unwrap();
        assert!(spec.set_content_type("text/plain\0").is_err());
        assert_eq!(spec.content_type(), "text/html");
        spec.set_content_type("text/plain; charset=utf-8").unwrap();
        assert_eq!(spec.content_type(), "text/plain; charset=utf-8");
    }

    #[test]
    fn headers_iterate_in_registry_order() {
        let mut spec = ResponseSpec::default();
        spec.insert_header("set-cookie", "a=1").unwrap();
        spec.insert_header("content-type", "text/html").unwrap();
        spec.insert_header("location", "/").unwrap();
        let order: Vec<AllowedHeader> = spec.headers().map(|(h, _)| h).collect();
        assert_eq!(
            order,
            vec![AllowedHeader::ContentType, AllowedHeader::Location, AllowedHeader::SetCookie]
        );
    }

    #[test]
    fn remove_header_returns_old_value() {
        let mut spec = ResponseSpec::default();
        spec.insert_header("server", "nginx").unwrap();
        assert_eq!(spec.remove_header("Server").unwrap().as_deref(), Some("nginx"));
        assert_eq!(spec.remove_header("server").unwrap(), None);
        assert!(spec.remove_header("x-evil-header").is_err());
    }

    #[test]
    fn set_status_bounds() {
        let mut spec = ResponseSpec::default();
        spec.set_status(302).unwrap();
        assert_eq!(spec.status(), 302);
        assert_eq!(spec.set_status(99), Err(SpecError::InvalidStatus(99)));
        assert_eq!(spec.set_status(1000), Err(SpecError::InvalidStatus(1000)));
        assert_eq!(spec.status(), 302);
    }

    #[test]
    fn cors_toggle_writes_and_clears_bundle() {
        let mut spec = ResponseSpec::default();
        spec.insert_header("content-type", "application/json").unwrap();
        assert!(!spec.has_cors());

        spec.set_cors(true);
        assert!(spec.has_cors());
        assert_eq!(spec.header(AllowedHeader::AccessControlAllowMethods), Some("*"));

        spec.set_cors(false);
        assert!(!spec.has_cors());
        assert_eq!(spec.headers().count(), 1);
    }

    #[test]
    fn edited_bundle_value_turns_cors_off() {
        let mut spec = ResponseSpec::default();
        spec.set_cors(true);
        spec.insert_header("access-control-allow-origin", "https://example.com").unwrap();
        assert!(!spec.has_cors());
    }
}
