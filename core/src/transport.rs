//! Executes an `HttpRequest` against the network.
//!
//! # Design
//! `Transport` is the only place that touches a socket. `UreqTransport` is the
//! default; tests and embedders can supply their own implementation through
//! `RequestClient::with_transport`.

use std::fmt;

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs one blocking round trip.
///
/// Implementations return `Ok` for every response that has a status line,
/// including 4xx and 5xx, so the caller can record the status code. A failure
/// while draining the body after the status line is reported as
/// `RequestError::BodyRead` carrying that status.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let timeout = Some(config.timeout);
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(timeout)
            .timeout_recv_response(timeout)
            .timeout_recv_body(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let mut builder = self.agent.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = match &request.body {
            Some(body) => builder.send(body.as_bytes())?,
            None => builder.send_empty()?,
        };

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|source| RequestError::BodyRead { status, source })?;
        Ok(HttpResponse { status, body })
    }
}
