//! Detection of the permissive CORS bundle.
//!
//! The bundle is three headers with fixed values. `has_cors` only drives the
//! editor's CORS toggle; it gates nothing on its own.

use crate::registry::AllowedHeader;

/// The CORS bundle, in the order it is written to a response.
pub const CORS_HEADERS: [(AllowedHeader, &str); 3] = [
    (AllowedHeader::AccessControlAllowOrigin, "*"),
    (AllowedHeader::AccessControlAllowMethods, "*"),
    (AllowedHeader::AccessControlAllowHeaders, "*"),
];

/// True iff every bundle header is present with exactly its fixed value.
///
/// Names compare case-insensitively and may carry surrounding whitespace;
/// values compare exactly. When a name repeats, the last pair wins.
pub fn has_cors<'a, I>(headers: I) -> bool
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut seen: [Option<&str>; 3] = [None; 3];
    for (name, value) in headers {
        let name = name.trim();
        if let Some(slot) = CORS_HEADERS
            .iter()
            .position(|(header, _)| header.as_str().eq_ignore_ascii_case(name))
        {
            seen[slot] = Some(value);
        }
    }
    CORS_HEADERS
        .iter()
        .zip(seen)
        .all(|((_, expected), actual)| actual == Some(*expected))
}
