//! Query-string codec for `ResponseSpec` (protocol version 1).
//!
//! # Wire format
//! `key=value` pairs joined by `&`. Reserved keys sit outside the header
//! namespace:
//!
//! | key    | carries                                           |
//! |--------|---------------------------------------------------|
//! | `s`    | status code, omitted when 200                     |
//! | `t`    | content type, omitted when empty                  |
//! | `b`    | body bytes, omitted when empty                    |
//! | `b64`  | body as standard base64 (accepted, never emitted) |
//! | `cors` | shorthand for the whole CORS bundle               |
//!
//! Every other key names a header: its alias token if it has one, otherwise
//! its canonical lowercase name. Keys and values escape every byte outside
//! `A-Z a-z 0-9 - . _ ~` as `%XX`, so delimiters, `%`, `+` and non-ASCII
//! bytes survive unchanged.
//!
//! # Decoding policy
//! Unknown keys, repeated keys and malformed escapes are errors. A URL that
//! cannot be decoded completely is never served as a partial response.
//!
//! Alias tokens match exactly. Canonical header names match ignoring ASCII
//! case but are never trimmed, so `%20server` is an unknown key.
//!
//! Links written for older deployments spell the reserved keys differently
//! (`RESERVED_ALIASES`). They are read but never written.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::cors::CORS_HEADERS;
use crate::error::SpecError;
use crate::registry::AllowedHeader;
use crate::spec::{ResponseSpec, DEFAULT_STATUS};

pub const STATUS_KEY: &str = "s";
pub const CONTENT_TYPE_KEY: &str = "t";
pub const BODY_KEY: &str = "b";
pub const BODY_BASE64_KEY: &str = "b64";
pub const CORS_KEY: &str = "cors";

/// All keys outside the header namespace.
pub const RESERVED_KEYS: [&str; 5] = [STATUS_KEY, CONTENT_TYPE_KEY, BODY_KEY, BODY_BASE64_KEY, CORS_KEY];

/// Older spellings of reserved keys, paired with the key they stand for.
pub const RESERVED_ALIASES: [(&str, &str); 8] = [
    ("status", STATUS_KEY),
    ("code", STATUS_KEY),
    ("body", BODY_KEY),
    ("data", BODY_KEY),
    ("d", BODY_KEY),
    ("base64", BODY_BASE64_KEY),
    ("body.b64", BODY_BASE64_KEY),
    ("data.b64", BODY_BASE64_KEY),
];

/// Everything except RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Serialize `spec` into a query string (without the leading `?`).
///
/// Output order is fixed: status, content type, headers in registry order,
/// CORS shorthand, body. A CORS-complete header set is written as `cors=1`
/// instead of the three bundle headers.
pub fn encode(spec: &ResponseSpec) -> String {
    let status = spec.status().to_string();
    let compact_cors = spec.has_cors();

    let mut pairs: Vec<(&str, &[u8])> = Vec::new();
    if spec.status() != DEFAULT_STATUS {
        pairs.push((STATUS_KEY, status.as_bytes()));
    }
    if !spec.content_type().is_empty() {
        pairs.push((CONTENT_TYPE_KEY, spec.content_type().as_bytes()));
    }
    for (header, value) in spec.headers() {
        if compact_cors && is_cors_header(header) {
            continue;
        }
        pairs.push((header.wire_key(), value.as_bytes()));
    }
    if compact_cors {
        pairs.push((CORS_KEY, b"1"));
    }
    if !spec.body().is_empty() {
        pairs.push((BODY_KEY, spec.body()));
    }

    pairs
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                percent_encode(key.as_bytes(), COMPONENT),
                percent_encode(value, COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse a query string produced by `encode` (or written by hand).
pub fn decode(query: &str) -> Result<ResponseSpec, SpecError> {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut spec = ResponseSpec::default();
    let mut claimed: Vec<&'static str> = Vec::new();
    let mut cors = false;

    for segment in query.split('&').filter(|segment| !segment.is_empty()) {
        let (raw_key, raw_value) = segment.split_once('=').unwrap_or((segment, ""));
        let key = into_utf8(raw_key, unescape(raw_key, raw_key)?)?;
        let value = unescape(&key, raw_value)?;

        match reserved(&key) {
            Some(STATUS_KEY) => {
                claim(&mut claimed, STATUS_KEY, &key)?;
                let status = into_utf8(&key, value)?
                    .parse::<u16>()
                    .map_err(|e| SpecError::malformed(&key, e.to_string()))?;
                spec.set_status(status)?;
            }
            Some(CONTENT_TYPE_KEY) => {
                claim(&mut claimed, CONTENT_TYPE_KEY, &key)?;
                spec.set_content_type(&into_utf8(&key, value)?)?;
            }
            Some(BODY_KEY) => {
                claim(&mut claimed, BODY_KEY, &key)?;
                spec.set_body(value);
            }
            Some(BODY_BASE64_KEY) => {
                claim(&mut claimed, BODY_KEY, &key)?;
                spec.set_body(decode_base64(&key, value)?);
            }
            Some(CORS_KEY) => {
                claim(&mut claimed, CORS_KEY, &key)?;
                cors = parse_flag(&into_utf8(&key, value)?);
            }
            _ => {
                let header = AllowedHeader::from_wire_key(&key)
                    .ok_or_else(|| SpecError::UnknownWireKey(key.clone()))?;
                if spec.contains(header) {
                    return Err(SpecError::DuplicateKey(key));
                }
                let value = into_utf8(&key, value)?;
                spec.insert(header, &value)?;
            }
        }
    }

    if cors {
        if let Some((header, _)) = CORS_HEADERS.iter().find(|(header, _)| spec.contains(*header)) {
            return Err(SpecError::DuplicateKey(header.wire_key().to_string()));
        }
        spec.set_cors(true);
    }
    Ok(spec)
}

/// The reserved key `key` stands for, if any.
fn reserved(key: &str) -> Option<&'static str> {
    RESERVED_KEYS.into_iter().find(|candidate| *candidate == key).or_else(|| {
        RESERVED_ALIASES
            .into_iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, reserved)| reserved)
    })
}

fn is_cors_header(header: AllowedHeader) -> bool {
    CORS_HEADERS.iter().any(|(bundled, _)| *bundled == header)
}

/// Reserved keys may appear once, under any spelling; `b` and `b64` share
/// one slot.
fn claim(claimed: &mut Vec<&'static str>, slot: &'static str, key: &str) -> Result<(), SpecError> {
    if claimed.contains(&slot) {
        return Err(SpecError::DuplicateKey(key.to_string()));
    }
    claimed.push(slot);
    Ok(())
}

/// Strict query-component decoding: `+` is a space and every `%` must start
/// a two-digit hex escape.
fn unescape(key: &str, raw: &str) -> Result<Vec<u8>, SpecError> {
    let bytes = raw.as_bytes();
    for (at, _) in raw.match_indices('%') {
        match bytes.get(at + 1..at + 3) {
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {}
            _ => {
                return Err(SpecError::malformed(
                    key,
                    format!("invalid percent escape at byte {at}"),
                ))
            }
        }
    }
    Ok(percent_decode_str(&raw.replace('+', " ")).collect())
}

fn into_utf8(key: &str, bytes: Vec<u8>) -> Result<String, SpecError> {
    String::from_utf8(bytes).map_err(|_| SpecError::malformed(key, "not valid UTF-8"))
}

/// Standard base64 with lenient padding. An unescaped `+` reaches us as a
/// space, so spaces are turned back first.
fn decode_base64(key: &str, value: Vec<u8>) -> Result<Vec<u8>, SpecError> {
    let text = into_utf8(key, value)?.replace(' ', "+");
    STANDARD_NO_PAD
        .decode(text.trim_end_matches('='))
        .map_err(|e| SpecError::malformed(key, e.to_string()))
}

/// `false`, `f`, `no`, `n` and `0` disable; anything else, empty included, enables.
fn parse_flag(value: &str) -> bool {
    !matches!(value, "false" | "f" | "no" | "n" | "0")
}
