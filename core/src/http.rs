//! HTTP transport seam for the catalog client.
//!
//! # Design
//! `HttpRequest` describes a request as plain data and `Transport` is the
//! narrow capability that executes it. The client never talks to a socket
//! directly, so tests substitute canned responses and hosts can plug in any
//! HTTP stack that can send a GET and hand back a status plus a body reader.
//!
//! Response bodies are readers rather than buffers so downloads can stream.
//! Dropping an `HttpResponse` closes whatever the transport holds open.

use std::fmt;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use crate::error::BoxError;

/// HTTP method for a request. The catalog API is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HttpMethod {
    Get,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Build a GET for `url` carrying the given user agent.
    ///
    /// Fails when `url` is not an absolute URL with a scheme and host.
    pub fn get(url: &str, user_agent: &str) -> Result<Self, BoxError> {
        let uri: ::http::Uri = url.parse()?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(format!("url {url:?} is not absolute").into());
        }
        Ok(Self {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: vec![("user-agent".to_string(), user_agent.to_string())],
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response whose body has not been read yet.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read + Send>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Executes an `HttpRequest`.
///
/// Implementations must return non-2xx statuses as responses, not errors;
/// status classification belongs to the client. An `Err` means no status was
/// obtained at all.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        (**self).send(request)
    }
}

/// Default blocking transport backed by a `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// `timeout` bounds the whole exchange, body included; `None` waits forever.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
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
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder.call()?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.into_body().into_reader();

        Ok(HttpResponse {
            status,
            headers,
            body: Box::new(body),
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Canned-response transport for unit tests.

    use std::collections::VecDeque;
    use std::io::{self, Cursor, Read};
    use std::sync::{Mutex, PoisonError};

    use super::{HttpRequest, HttpResponse, Transport};
    use crate::error::BoxError;

    enum Canned {
        Response { status: u16, body: Vec<u8> },
        BrokenBody { status: u16 },
        Fail(String),
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("boom"))
        }
    }

    /// Replays queued responses in order and records every request.
    ///
    /// Once the queue is drained every further call fails, which makes
    /// "the transport must not be called again" easy to assert.
    #[derive(Default)]
    pub struct MockTransport {
        queue: Mutex<VecDeque<Canned>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
            self.push(Canned::Response {
                status,
                body: body.into(),
            })
        }

        /// Queue a response whose body fails on the first read.
        pub fn broken_body(&self, status: u16) -> &Self {
            self.push(Canned::BrokenBody { status })
        }

        /// Queue a transport-level failure.
        pub fn fail(&self, reason: &str) -> &Self {
            self.push(Canned::Fail(reason.to_string()))
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        pub fn calls(&self) -> usize {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        fn push(&self, canned: Canned) -> &Self {
            self.queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(canned);
            self
        }
    }

    impl Transport for MockTransport {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request.clone());
            let next = self
                .queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front();
            match next {
                Some(Canned::Response { status, body }) => Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: Box::new(Cursor::new(body)),
                }),
                Some(Canned::BrokenBody { status }) => Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: Box::new(BrokenReader),
                }),
                Some(Canned::Fail(reason)) => Err(reason.into()),
                None => Err("no canned response left".into()),
            }
        }
    }
}
