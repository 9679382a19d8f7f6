//! HTTP exchange described as plain data.
//!
//! # Design
//! `RequestClient` builds an `HttpRequest`, hands it to a `Transport`, and
//! parses the `HttpResponse` that comes back. Keeping both ends as plain data
//! lets the build and parse steps be tested without a socket, and lets the
//! transport be swapped out.

use serde::{Deserialize, Serialize};

/// Content type sent with every request. The body is raw JSON text even
/// though the header claims form encoding; the game server expects exactly
/// this pairing.
pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An HTTP request described as plain data. Every request is a POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// `None` when the payload was empty; the request then carries no body.
    pub body: Option<String>,
}

impl HttpRequest {
    pub const METHOD: &'static str = "POST";
}

/// An HTTP response described as plain data: the status line code and the
/// fully drained body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the server refused to hand back a usable body.
    pub fn is_error_status(&self) -> bool {
        self.status >= 400
    }
}
