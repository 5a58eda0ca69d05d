//! Request/reply types and the [`Transport`] seam.
//!
//! A [`Transport`] turns a [`Request`] into a [`Reply`] against one base
//! address. Any HTTP status is a successful [`Reply`]; deciding which
//! statuses count as an answer is the dispatcher's job. Only failures to get
//! a status at all (connect, timeout, body read) are errors here.

mod http;
mod session;

pub use http::*;
pub use session::*;

use crate::error::Result;
use serde_json::Value;

/// HTTP method of a [`Request`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A transport-agnostic description of one HTTP request.
///
/// Requests are cheap to build and are rebuilt for every attempt, so a
/// builder may embed fresh random values (e.g. a JSON-RPC id) each time.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

/// The status and raw body of an HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parses the body as JSON. Returns `None` for empty or non-JSON bodies.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Statuses in `[200, 500)` are authoritative answers; anything else is
    /// an endpoint failure.
    pub const fn is_answer(&self) -> bool {
        self.status >= 200 && self.status < 500
    }
}

/// Executes a [`Request`] against a base address.
///
/// Implemented by [`HttpTransport`] for real traffic and by scripted mocks in
/// tests.
pub trait Transport {
    fn execute(&self, address: &str, request: &Request) -> impl Future<Output = Result<Reply>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, address: &str, request: &Request) -> impl Future<Output = Result<Reply>> {
        (**self).execute(address, request)
    }
}
