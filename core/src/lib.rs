//! Blocking JSON-over-POST client for the MechMania game server.
//!
//! # Overview
//! `RequestClient` sends a JSON payload to a path on a fixed `host:port`,
//! drains the response, and hands back a `RequestResult` with the status code
//! and the parsed JSON object. Failures are logged through `tracing` and
//! reported in `RequestResult::error`; they never surface as `Err` or panic.
//!
//! # Design
//! - `RequestClient` is immutable and holds no connection between calls, so
//!   one instance can be shared across threads.
//! - A round trip is `build_*` (plain `HttpRequest`), `Transport::execute`
//!   (the only I/O), then `parse_response`.
//! - Every request is a POST labelled `application/x-www-form-urlencoded`
//!   while carrying raw JSON; the server depends on that pairing.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::RequestClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::RequestError;
pub use http::{HttpRequest, HttpResponse, CONTENT_TYPE};
pub use transport::{Transport, UreqTransport};
pub use types::{placeholder_payload, JsonObject, RequestResult, NO_STATUS};
