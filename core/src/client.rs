//! Request builder, response parser, and blocking front door for the love API.
//!
//! # Design
//! `LoveClient` holds only `api_key`, `base_url` and a transport, and carries
//! no mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`; `get_love`, `send_love`, `send_loves` and
//! `autocomplete` run both halves around one `Transport::execute`.

use tracing::debug;

use crate::error::{LoveError, LoveStatus};
use crate::http::{encode_pairs, HttpMethod, HttpRequest, HttpResponse, FORM_CONTENT_TYPE};
use crate::transport::{Transport, UreqTransport};
use crate::types::{decode_array, Love, User};

/// Synchronous, stateless client for the love API.
///
/// `base_url` should include the API prefix, e.g.
/// `https://cwrulove.appspot.com/api`.
#[derive(Debug, Clone)]
pub struct LoveClient<T = UreqTransport> {
    api_key: String,
    base_url: String,
    transport: T,
}

impl LoveClient<UreqTransport> {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self::with_transport(api_key, base_url, UreqTransport::default())
    }
}

impl<T> LoveClient<T> {
    pub fn with_transport(api_key: &str, base_url: &str, transport: T) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `GET /love`. At least one of `sender` and `recipient` must be
    /// non-empty; `limit` is only sent when positive.
    pub fn build_get_love(
        &self,
        sender: &str,
        recipient: &str,
        limit: i64,
    ) -> Result<HttpRequest, LoveError> {
        if sender.is_empty() && recipient.is_empty() {
            return Err(LoveError::InvalidArgument(
                "must specify at least one of sender and recipient".to_string(),
            ));
        }
        let mut query = vec![("api_key".to_string(), self.api_key.clone())];
        if !sender.is_empty() {
            query.push(("sender".to_string(), sender.to_string()));
        }
        if !recipient.is_empty() {
            query.push(("recipient".to_string(), recipient.to_string()));
        }
        if limit > 0 {
            query.push(("limit".to_string(), limit.to_string()));
        }
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/love", self.base_url),
            query,
            headers: Vec::new(),
            body: None,
        })
    }

    /// Build `POST /love`. `recipient` may hold several comma-separated
    /// usernames; it is sent as a single form field.
    pub fn build_send_love(&self, sender: &str, recipient: &str, message: &str) -> HttpRequest {
        let form = [
            ("api_key", self.api_key.as_str()),
            ("sender", sender),
            ("recipient", recipient),
            ("message", message),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<Vec<_>>();
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/love", self.base_url),
            query: Vec::new(),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body: Some(encode_pairs(&form)),
        }
    }

    /// Same as `build_send_love` with `recipients` joined by commas.
    pub fn build_send_loves<S: AsRef<str>>(
        &self,
        sender: &str,
        recipients: &[S],
        message: &str,
    ) -> HttpRequest {
        self.build_send_love(sender, &join_recipients(recipients), message)
    }

    /// Build `GET /autocomplete`. An empty `term` is still sent.
    pub fn build_autocomplete(&self, term: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/autocomplete", self.base_url),
            query: vec![
                ("api_key".to_string(), self.api_key.clone()),
                ("term".to_string(), term.to_string()),
            ],
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_get_love(&self, response: HttpResponse) -> Result<Vec<Love>, LoveError> {
        check_status(response, LoveStatus::Ok)
            .and_then(|response| decode_array(&response.body, Love::from_json))
    }

    pub fn parse_send_love(&self, response: HttpResponse) -> Result<(), LoveError> {
        check_status(response, LoveStatus::Created).map(|_| ())
    }

    pub fn parse_autocomplete(&self, response: HttpResponse) -> Result<Vec<User>, LoveError> {
        check_status(response, LoveStatus::Ok)
            .and_then(|response| decode_array(&response.body, User::from_json))
    }
}

impl<T: Transport> LoveClient<T> {
    /// Fetch loves sent by `sender` and/or received by `recipient`, newest
    /// first as the server returns them. Either name may be empty but not
    /// both. A `limit` of zero or less requests no limit; a small limit such
    /// as 20 is kinder to the server.
    pub fn get_love(&self, sender: &str, recipient: &str, limit: i64) -> Result<Vec<Love>, LoveError> {
        let request = self.build_get_love(sender, recipient, limit)?;
        let response = self.transport.execute(&request)?;
        self.parse_get_love(response)
    }

    /// Send love from `sender` to `recipient`, which may be several
    /// usernames separated by commas.
    pub fn send_love(&self, sender: &str, recipient: &str, message: &str) -> Result<(), LoveError> {
        let request = self.build_send_love(sender, recipient, message);
        let response = self.transport.execute(&request)?;
        self.parse_send_love(response)?;
        debug!(recipient, "love sent");
        Ok(())
    }

    /// Send love from `sender` to every name in `recipients`. The slice
    /// should not be empty; an empty slice is left for the server to reject.
    pub fn send_loves<S: AsRef<str>>(
        &self,
        sender: &str,
        recipients: &[S],
        message: &str,
    ) -> Result<(), LoveError> {
        self.send_love(sender, &join_recipients(recipients), message)
    }

    /// Username completions for `term`, matched against username, first or
    /// last name by the server.
    pub fn autocomplete(&self, term: &str) -> Result<Vec<User>, LoveError> {
        let request = self.build_autocomplete(term);
        let response = self.transport.execute(&request)?;
        self.parse_autocomplete(response)
    }
}

fn join_recipients<S: AsRef<str>>(recipients: &[S]) -> String {
    recipients
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Pass `response` through if it carries `expected`, else turn it into an
/// `Api` error holding the status and whatever body text was read.
fn check_status(response: HttpResponse, expected: LoveStatus) -> Result<HttpResponse, LoveError> {
    if response.status == expected.code() {
        return Ok(response);
    }
    Err(LoveError::Api {
        status: response.status,
        body: response.body,
    })
}
