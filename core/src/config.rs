//! Client configuration.

use std::time::Duration;

/// Connect and read timeout used unless overridden. Long enough to wait out a
/// slow turn computation on the server.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(120_000);

/// Settings fixed for the lifetime of a `RequestClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Applied to connecting, waiting for the response, and reading the body.
    ///
    /// For the body this is a deadline on the whole read, not an idle timeout
    /// between reads: a body that keeps trickling in for longer than
    /// `timeout` fails with a timeout even if no single read stalls.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
