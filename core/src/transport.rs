//! Executes `HttpRequest` values against the network.
//!
//! `Transport` is the seam between the deterministic client and real I/O.
//! `UreqTransport` is the blocking default; any
//! `Fn(&HttpRequest) -> Result<HttpResponse, LoveError>` closure is also a
//! transport, which is how tests observe requests without a server.

use std::fmt;
use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::error::LoveError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, LoveError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, LoveError>,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, LoveError> {
        self(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as data and the client decides what they mean.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, LoveError> {
        debug!(method = ?request.method, path = %request.path, "sending request");
        let url = request.url();

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| LoveError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = match response.body_mut().read_to_string() {
            Ok(body) => body,
            // A send only reads the body for error text, so its status is
            // still worth reporting.
            Err(e) if request.method == HttpMethod::Post => {
                debug!(status, error = %e, "response body unreadable");
                String::new()
            }
            Err(e) => return Err(LoveError::Transport(format!("reading response body: {e}"))),
        };
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse { status, body })
    }
}
