//! Response-specification protocol for shareable proof-of-concept responses.
//!
//! # Overview
//! A `ResponseSpec` (status, content type, headers, body) is encoded into a
//! URL query string and decoded back by the responder server, which then
//! serves exactly that response. No part of this crate touches the network.
//!
//! # Design
//! - `registry` is the single allow-list of headers and their wire aliases.
//!   Every implementation of the protocol must carry the identical table;
//!   `test-vectors/registry.json` is the shared fixture.
//! - `ResponseSpec::insert_header` and `set_content_type` are the validation
//!   boundary. Encoding is total; decoding re-checks everything against the
//!   same table.
//! - `Responder` builds and parses complete share links.
//! - `ResponseSpec::materialize` produces a plain-data `HttpResponse`; the
//!   host writes it to the wire.

pub mod client;
pub mod cors;
pub mod error;
pub mod http;
pub mod registry;
pub mod spec;
pub mod wire;

pub use client::Responder;
pub use cors::{has_cors, CORS_HEADERS};
pub use error::SpecError;
pub use http::HttpResponse;
pub use registry::{alias_for, canonicalize, header_for_alias, AllowedHeader};
pub use spec::ResponseSpec;
pub use wire::{decode, encode};
