//! Blocking request client for the game server.
//!
//! # Design
//! `RequestClient` holds the server's host and port and carries no mutable
//! state between calls. A round trip is split into `build_submit` (produces an
//! `HttpRequest`), `Transport::execute` (the only I/O), and `parse_response`
//! (consumes an `HttpResponse`). `submit` and `fetch` chain the three and fold
//! any failure into the returned `RequestResult`, so a network hiccup never
//! reaches the caller as an `Err` or a panic.

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::http::{HttpRequest, HttpResponse, CONTENT_TYPE};
use crate::transport::{Transport, UreqTransport};
use crate::types::{placeholder_payload, JsonObject, RequestResult};

/// Synchronous client bound to one game server.
#[derive(Debug, Clone)]
pub struct RequestClient<T = UreqTransport> {
    host: String,
    port: u16,
    config: ClientConfig,
    transport: T,
}

impl RequestClient<UreqTransport> {
    pub fn new(host: &str, port: u16) -> Self {
        Self::with_config(host, port, ClientConfig::default())
    }

    pub fn with_config(host: &str, port: u16, config: ClientConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self {
            host: host.to_string(),
            port,
            config,
            transport,
        }
    }
}

impl<T: Transport> RequestClient<T> {
    pub fn with_transport(host: &str, port: u16, config: ClientConfig, transport: T) -> Self {
        Self {
            host: host.to_string(),
            port,
            config,
            transport,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request `path` with the placeholder payload `{"empty":"empty"}`.
    pub fn fetch(&self, path: &str) -> RequestResult {
        self.submit(path, &placeholder_payload())
    }

    /// POST `payload` to `path` and return the status code with the parsed
    /// JSON object. An empty payload sends no body at all.
    pub fn submit(&self, path: &str, payload: &JsonObject) -> RequestResult {
        let request = match self.build_submit(path, payload) {
            Ok(request) => request,
            Err(err) => {
                tracing::error!(target: "mechmania_core::client", path, "Failed to build request: {}", err);
                return RequestResult::no_response(err);
            }
        };

        let response = match self.transport.execute(&request) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(target: "mechmania_core::client", url = %request.url, "Request failed: {}", err);
                return match err.status() {
                    Some(status) => RequestResult::without_body(status, err),
                    None => RequestResult::no_response(err),
                };
            }
        };

        self.parse_response(response)
    }

    /// Build the request `fetch` would send.
    pub fn build_fetch(&self, path: &str) -> Result<HttpRequest, RequestError> {
        self.build_submit(path, &placeholder_payload())
    }

    pub fn build_submit(&self, path: &str, payload: &JsonObject) -> Result<HttpRequest, RequestError> {
        let url = format!("http://{}:{}{}", self.host, self.port, path);
        url::Url::parse(&url).map_err(|e| RequestError::invalid_url(url.as_str(), e))?;

        let body = if payload.is_empty() {
            None
        } else {
            Some(serde_json::to_string(payload).map_err(|e| RequestError::Serialize(e.to_string()))?)
        };

        Ok(HttpRequest {
            url,
            headers: vec![("content-type".to_string(), CONTENT_TYPE.to_string())],
            body,
        })
    }

    /// Turn a raw response into a `RequestResult`. The status code is kept
    /// even when the body turns out to be unusable.
    pub fn parse_response(&self, response: HttpResponse) -> RequestResult {
        if let Err(err) = check_status(&response) {
            tracing::error!(target: "mechmania_core::client", status = response.status, "Server returned an error status");
            return RequestResult::without_body(response.status, err);
        }

        match serde_json::from_slice::<JsonObject>(&response.body) {
            Ok(body) => {
                tracing::debug!(target: "mechmania_core::client", status = response.status, "{}", serde_json::Value::Object(body.clone()));
                RequestResult::success(response.status, body)
            }
            Err(err) => {
                let err = RequestError::from(err);
                tracing::error!(target: "mechmania_core::client", status = response.status, "Failed to parse response: {}", err);
                RequestResult::without_body(response.status, err)
            }
        }
    }
}

/// 4xx and 5xx responses carry no usable body.
fn check_status(response: &HttpResponse) -> Result<(), RequestError> {
    if response.is_error_status() {
        return Err(RequestError::HttpStatus {
            status: response.status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{json, Value};

    use super::*;
    use crate::types::NO_STATUS;

    /// Records every request and answers with a canned response.
    struct StubTransport {
        seen: Mutex<Vec<HttpRequest>>,
        reply: fn() -> Result<HttpResponse, RequestError>,
    }

    impl StubTransport {
        fn new(reply: fn() -> Result<HttpResponse, RequestError>) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                reply,
            }
        }
    }

    impl Transport for StubTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
            self.seen.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    fn client() -> RequestClient {
        RequestClient::new("localhost", 7000)
    }

    fn stub_client(reply: fn() -> Result<HttpResponse, RequestError>) -> RequestClient<StubTransport> {
        RequestClient::with_transport("localhost", 7000, ClientConfig::default(), StubTransport::new(reply))
    }

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn build_submit_produces_correct_request() {
        let payload = object(json!({"team": "red", "towers": [1, 2]}));
        let req = client().build_submit("/game/join", &payload).unwrap();
        assert_eq!(req.url, "http://localhost:7000/game/join");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), CONTENT_TYPE.to_string())]
        );
        let body: JsonObject = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, payload);
    }

    #[test]
    fn build_submit_with_empty_payload_has_no_body() {
        let req = client().build_submit("/status", &JsonObject::new()).unwrap();
        assert!(req.body.is_none());
        assert_eq!(req.headers[0].1, "application/x-www-form-urlencoded");
    }

    #[test]
    fn build_fetch_sends_placeholder() {
        let req = client().build_fetch("/status").unwrap();
        assert_eq!(req.body.as_deref(), Some(r#"{"empty":"empty"}"#));
    }

    #[test]
    fn build_submit_rejects_malformed_host() {
        let client = RequestClient::new("bad host", 7000);
        let err = client.build_submit("/status", &JsonObject::new()).unwrap_err();
        assert!(matches!(err, RequestError::InvalidUrl { .. }));
    }

    #[test]
    fn submit_with_malformed_host_returns_sentinel() {
        let client = RequestClient::new("bad host", 7000);
        let result = client.fetch("/status");
        assert_eq!(result.status_code, NO_STATUS);
        assert!(result.body.is_none());
        assert!(matches!(result.error, Some(RequestError::InvalidUrl { .. })));
    }

    #[test]
    fn parse_response_success() {
        let response = HttpResponse::new(200, r#"{"status":"ok","turn":4}"#);
        let result = client().parse_response(response);
        assert_eq!(result.status_code, 200);
        assert_eq!(result.body, Some(object(json!({"status": "ok", "turn": 4}))));
        assert!(result.error.is_none());
    }

    #[test]
    fn parse_response_bad_json_keeps_status() {
        let response = HttpResponse::new(200, "not json");
        let result = client().parse_response(response);
        assert_eq!(result.status_code, 200);
        assert!(result.body.is_none());
        assert!(matches!(result.error, Some(RequestError::Decode(_))));
    }

    #[test]
    fn parse_response_rejects_non_object_json() {
        let response = HttpResponse::new(200, "[1,2,3]");
        let result = client().parse_response(response);
        assert_eq!(result.status_code, 200);
        assert!(result.body.is_none());
        assert!(matches!(result.error, Some(RequestError::Decode(_))));
    }

    #[test]
    fn parse_response_error_status_drops_body() {
        let response = HttpResponse::new(404, r#"{"error":"not found"}"#);
        let result = client().parse_response(response);
        assert_eq!(result.status_code, 404);
        assert!(result.body.is_none());
        assert!(matches!(
            result.error,
            Some(RequestError::HttpStatus { status: 404 })
        ));
    }

    #[test]
    fn fetch_and_submit_placeholder_send_identical_requests() {
        let client = stub_client(|| Ok(HttpResponse::new(200, r#"{"status":"ok"}"#)));
        let fetched = client.fetch("/status");
        let submitted = client.submit("/status", &object(json!({"empty": "empty"})));

        assert_eq!(fetched.status_code, submitted.status_code);
        assert_eq!(fetched.body, submitted.body);
        let seen = client.transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn transport_failure_returns_sentinel() {
        let client = stub_client(|| {
            Err(RequestError::Transport(ureq::Error::Io(std::io::Error::from(
                std::io::ErrorKind::ConnectionRefused,
            ))))
        });
        let result = client.fetch("/status");
        assert_eq!(result.status_code, NO_STATUS);
        assert!(result.body.is_none());
        assert!(matches!(result.error, Some(RequestError::Transport(_))));
    }

    #[test]
    fn body_read_failure_keeps_status() {
        let client = stub_client(|| {
            Err(RequestError::BodyRead {
                status: 200,
                source: ureq::Error::Io(std::io::Error::from(std::io::ErrorKind::UnexpectedEof)),
            })
        });
        let result = client.fetch("/status");
        assert_eq!(result.status_code, 200);
        assert!(result.body.is_none());
        assert!(matches!(
            result.error,
            Some(RequestError::BodyRead { status: 200, .. })
        ));
    }

    #[test]
    fn accessors_expose_construction_values() {
        let client = RequestClient::with_config(
            "game.local",
            8080,
            ClientConfig::default().with_timeout(std::time::Duration::from_secs(5)),
        );
        assert_eq!(client.host(), "game.local");
        assert_eq!(client.port(), 8080);
        assert_eq!(client.config().timeout, std::time::Duration::from_secs(5));
    }
}
