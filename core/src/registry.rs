//! The closed allow-list of shareable response headers and their aliases.
//!
//! # Design
//! The allow-list is a security boundary: a shared URL may only set the
//! headers listed here. It is an enum rather than a string set so that, once a
//! name has passed `canonicalize`, membership is checked by the compiler.
//!
//! Aliases shorten the wire keys of the most common headers. `alias_for` and
//! `header_for_alias` both read the same `match`, so the inverse property
//! holds by construction. Every implementation of the protocol must carry
//! this exact table; `manifest()` dumps it for comparison against the shared
//! fixture in `test-vectors/registry.json`.

use serde::Serialize;

use crate::error::SpecError;

/// A response header that may appear in a shared specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AllowedHeader {
    ContentType,
    Location,
    CacheControl,
    Server,
    XFrameOptions,
    ContentDisposition,
    ContentSecurityPolicy,
    ContentEncoding,
    SetCookie,
    AccessControlAllowOrigin,
    AccessControlAllowMethods,
    AccessControlAllowHeaders,
}

impl AllowedHeader {
    /// Every allowed header, in registry order.
    pub const ALL: [AllowedHeader; 12] = [
        AllowedHeader::ContentType,
        AllowedHeader::Location,
        AllowedHeader::CacheControl,
        AllowedHeader::Server,
        AllowedHeader::XFrameOptions,
        AllowedHeader::ContentDisposition,
        AllowedHeader::ContentSecurityPolicy,
        AllowedHeader::ContentEncoding,
        AllowedHeader::SetCookie,
        AllowedHeader::AccessControlAllowOrigin,
        AllowedHeader::AccessControlAllowMethods,
        AllowedHeader::AccessControlAllowHeaders,
    ];

    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            AllowedHeader::ContentType => "content-type",
            AllowedHeader::Location => "location",
            AllowedHeader::CacheControl => "cache-control",
            AllowedHeader::Server => "server",
            AllowedHeader::XFrameOptions => "x-frame-options",
            AllowedHeader::ContentDisposition => "content-disposition",
            AllowedHeader::ContentSecurityPolicy => "content-security-policy",
            AllowedHeader::ContentEncoding => "content-encoding",
            AllowedHeader::SetCookie => "set-cookie",
            AllowedHeader::AccessControlAllowOrigin => "access-control-allow-origin",
            AllowedHeader::AccessControlAllowMethods => "access-control-allow-methods",
            AllowedHeader::AccessControlAllowHeaders => "access-control-allow-headers",
        }
    }

    /// Name as offered in the editor's header picker.
    pub const fn display_name(self) -> &'static str {
        match self {
            AllowedHeader::ContentType => "Content-Type",
            AllowedHeader::Location => "Location",
            AllowedHeader::CacheControl => "Cache-Control",
            AllowedHeader::Server => "Server",
            AllowedHeader::XFrameOptions => "X-Frame-Options",
            AllowedHeader::ContentDisposition => "Content-Disposition",
            AllowedHeader::ContentSecurityPolicy => "Content-Security-Policy",
            AllowedHeader::ContentEncoding => "Content-Encoding",
            AllowedHeader::SetCookie => "Set-Cookie",
            AllowedHeader::AccessControlAllowOrigin => "Access-Control-Allow-Origin",
            AllowedHeader::AccessControlAllowMethods => "Access-Control-Allow-Methods",
            AllowedHeader::AccessControlAllowHeaders => "Access-Control-Allow-Headers",
        }
    }

    /// Short wire token, if this header has one.
    pub const fn alias(self) -> Option<&'static str> {
        match self {
            AllowedHeader::ContentType => Some("ct"),
            AllowedHeader::SetCookie => Some("c"),
            AllowedHeader::Location => Some("l"),
            AllowedHeader::ContentSecurityPolicy => Some("csp"),
            _ => None,
        }
    }

    /// Key used on the wire: the alias when there is one, else the canonical name.
    pub fn wire_key(self) -> &'static str {
        self.alias().unwrap_or(self.as_str())
    }

    /// Resolve a decoded query key. Alias tokens match exactly, canonical
    /// names ignoring ASCII case. Unlike `canonicalize`, nothing is trimmed.
    pub fn from_wire_key(key: &str) -> Option<AllowedHeader> {
        header_for_alias(key).or_else(|| {
            AllowedHeader::ALL
                .into_iter()
                .find(|header| header.as_str().eq_ignore_ascii_case(key))
        })
    }
}

impl std::fmt::Display for AllowedHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trim and lowercase `name`, then look it up in the allow-list.
pub fn canonicalize(name: &str) -> Result<AllowedHeader, SpecError> {
    let lowered = name.trim().to_ascii_lowercase();
    AllowedHeader::ALL
        .into_iter()
        .find(|header| header.as_str() == lowered)
        .ok_or_else(|| SpecError::InvalidHeader(name.to_string()))
}

pub fn alias_for(header: AllowedHeader) -> Option<&'static str> {
    header.alias()
}

/// Exact inverse of `alias_for`. Tokens are case-sensitive.
pub fn header_for_alias(token: &str) -> Option<AllowedHeader> {
    AllowedHeader::ALL
        .into_iter()
        .find(|header| header.alias() == Some(token))
}

/// One row of the registry table as exchanged with other implementations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub canonical: &'static str,
    pub display: &'static str,
    pub alias: Option<&'static str>,
}

/// The full registry table in registry order.
pub fn manifest() -> Vec<RegistryEntry> {
    AllowedHeader::ALL
        .into_iter()
        .map(|header| RegistryEntry {
            canonical: header.as_str(),
            display: header.display_name(),
            alias: header.alias(),
        })
        .collect()
}
