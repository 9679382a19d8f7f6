//! Error kinds attached to a `RequestResult`.
//!
//! # Design
//! None of these ever escape `RequestClient::submit` as an `Err`. Each one
//! names the step of the round trip that failed and travels back to the caller
//! inside `RequestResult::error`, next to whatever status code was captured
//! before the failure.

/// The step of a round trip that failed.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// `http://host:port` + path did not form a valid URL.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The payload could not be serialized to JSON text.
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// Connect, write or read failed before a status line arrived,
    /// including timeouts.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The status line arrived but draining the body failed.
    #[error("reading body of HTTP {status} response failed: {source}")]
    BodyRead {
        status: u16,
        #[source]
        source: ureq::Error,
    },

    /// The server answered with a 4xx or 5xx status; the body is not used.
    #[error("HTTP {status}")]
    HttpStatus { status: u16 },

    /// The response body was not a JSON object.
    #[error("response decoding failed: {0}")]
    Decode(String),
}

impl RequestError {
    /// Create an invalid-URL error.
    pub fn invalid_url(url: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Whether the transport gave up because a timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport(ureq::Error::Timeout(_))
                | Self::BodyRead {
                    source: ureq::Error::Timeout(_),
                    ..
                }
        )
    }

    /// The status code captured before this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BodyRead { status, .. } | Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
