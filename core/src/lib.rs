//! Blocking client for the Yelp Love API.
//!
//! # Overview
//! Sends love, fetches love history and autocompletes usernames. Every
//! operation is a `build_*` step that produces an `HttpRequest`, a
//! `Transport` round-trip, and a `parse_*` step that decodes the
//! `HttpResponse`. `LoveClient::get_love` and friends run all three; callers
//! with their own HTTP stack can use the halves directly.
//!
//! # Design
//! - `LoveClient` is stateless: `api_key`, `base_url` and a transport.
//! - `UreqTransport` is the default transport; any closure
//!   `Fn(&HttpRequest) -> Result<HttpResponse, LoveError>` also works.
//! - Response types are decoded explicitly from `serde_json::Value` so a
//!   missing key or a bad timestamp is a `LoveError::Decode`, never a default.
//! - Errors are returned, never logged.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::LoveClient;
pub use error::{LoveError, LoveStatus};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Love, User};
