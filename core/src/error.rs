//! Error types for the response-specification protocol.
//!
//! # Design
//! One enum covers both sides of the wire. Mutations of a `ResponseSpec`
//! fail with `InvalidHeader`, `InvalidHeaderValue` or `InvalidStatus`; the
//! decoder adds the wire-level kinds. Every failure is returned to the caller
//! that attempted the mutation or decode, so a shared URL never turns into a
//! partially applied response.

use std::fmt;

/// Errors returned by `ResponseSpec` mutators and `wire::decode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The header name is not in the allow-list.
    InvalidHeader(String),

    /// The header value contains a control character (CR, LF, NUL, ...).
    InvalidHeaderValue { header: &'static str, value: String },

    /// The status code is outside 100..=999.
    InvalidStatus(u16),

    /// A query component could not be decoded.
    MalformedWireValue { key: String, reason: String },

    /// A query key is neither reserved nor a known header key.
    UnknownWireKey(String),

    /// A key, or a header reachable through two keys, appears twice.
    DuplicateKey(String),
}

impl SpecError {
    pub(crate) fn malformed(key: &str, reason: impl Into<String>) -> Self {
        SpecError::MalformedWireValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::InvalidHeader(name) => write!(f, "header not allowed: {name:?}"),
            SpecError::InvalidHeaderValue { header, value } => {
                write!(f, "invalid value for {header}: {value:?}")
            }
            SpecError::InvalidStatus(status) => write!(f, "invalid status code: {status}"),
            SpecError::MalformedWireValue { key, reason } => {
                write!(f, "malformed value for {key:?}: {reason}")
            }
            SpecError::UnknownWireKey(key) => write!(f, "unknown query key: {key:?}"),
            SpecError::DuplicateKey(key) => write!(f, "duplicate query key: {key:?}"),
        }
    }
}

impl std::error::Error for SpecError {}
