//! Payload and result types exchanged with callers.

use serde_json::{Map, Value};

use crate::error::RequestError;

/// A JSON object: string keys mapped to arbitrary JSON values.
pub type JsonObject = Map<String, Value>;

/// Status code recorded when no HTTP status line was obtained.
pub const NO_STATUS: i32 = -1;

/// The one-entry payload sent by `RequestClient::fetch` so every request is a
/// body-bearing POST.
pub fn placeholder_payload() -> JsonObject {
    let mut payload = JsonObject::new();
    payload.insert("empty".to_string(), Value::String("empty".to_string()));
    payload
}

/// Outcome of one round trip.
///
/// `status_code` is `NO_STATUS` when no response arrived, in which case `body`
/// is always `None`. A real status with `body == None` means the status was
/// read but the body was unusable; `error` says why.
#[derive(Debug)]
pub struct RequestResult {
    pub status_code: i32,
    pub body: Option<JsonObject>,
    pub error: Option<RequestError>,
}

impl RequestResult {
    pub fn success(status: u16, body: JsonObject) -> Self {
        Self {
            status_code: i32::from(status),
            body: Some(body),
            error: None,
        }
    }

    /// A failure before any status line was read.
    pub fn no_response(error: RequestError) -> Self {
        Self {
            status_code: NO_STATUS,
            body: None,
            error: Some(error),
        }
    }

    /// A failure after the status line was read.
    pub fn without_body(status: u16, error: RequestError) -> Self {
        Self {
            status_code: i32::from(status),
            body: None,
            error: Some(error),
        }
    }

    /// The HTTP status, if one was obtained.
    pub fn status(&self) -> Option<u16> {
        u16::try_from(self.status_code).ok()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.body.is_some()
    }
}
