//! Error types for the love API client.
//!
//! # Design
//! Four failure classes are kept apart so callers can react differently:
//! a bad argument never reached the network, a transport failure never got
//! a response, an API error got a response with the wrong status, and a
//! decode error got the right status with a body we could not read.
//! `LoveStatus` names the status codes the love API actually uses.

use thiserror::Error;
use ureq::http::StatusCode;

/// Status codes returned by the love API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum LoveStatus {
    /// Successful read (`GET /love`, `GET /autocomplete`).
    Ok = 200,
    /// Love was created.
    Created = 201,
    /// The server refused the love, e.g. sending love to yourself.
    Failed = 418,
    /// A parameter was missing or named an unknown user.
    BadParams = 422,
}

impl LoveStatus {
    pub const fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => Some(LoveStatus::Ok),
            201 => Some(LoveStatus::Created),
            418 => Some(LoveStatus::Failed),
            422 => Some(LoveStatus::BadParams),
            _ => None,
        }
    }
}

/// Errors returned by `LoveClient` operations.
#[derive(Debug, Error)]
pub enum LoveError {
    /// Caller-supplied parameters failed a precondition. No request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The HTTP exchange could not complete (DNS, connect, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with an unexpected status code.
    #[error("Love API error: {}{}", status_line(.status), body_suffix(.body))]
    Api { status: u16, body: String },

    /// The response body was not the JSON we expected.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl LoveError {
    /// The love API status behind an `Api` error, if it is one we know.
    pub fn status(&self) -> Option<LoveStatus> {
        match self {
            LoveError::Api { status, .. } => LoveStatus::from_code(*status),
            _ => None,
        }
    }
}

fn status_line(status: &u16) -> String {
    match StatusCode::from_u16(*status).ok().and_then(|s| s.canonical_reason()) {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
    }
}

fn body_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_reason_and_body() {
        let err = LoveError::Api {
            status: 422,
            body: "Unknown recipient\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Love API error: 422 Unprocessable Entity: Unknown recipient"
        );
    }

    #[test]
    fn api_error_display_without_body() {
        let err = LoveError::Api {
            status: 599,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Love API error: 599");
    }

    #[test]
    fn status_maps_known_codes() {
        let err = LoveError::Api {
            status: 418,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(LoveStatus::Failed));
        assert_eq!(LoveError::Decode("x".into()).status(), None);
        assert_eq!(LoveStatus::Created.code(), 201);
        assert_eq!(LoveStatus::from_code(500), None);
    }
}
