//! Error types for the catalog API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! code, resolved URL and body for debugging, plus an `HttpCause` naming the
//! call that produced it. Failures that happen before a status code exists
//! are `Transport`, tagged with the step that failed. `NotFound` is the only
//! leaf; every other variant exposes a `source()`.
//!
//! Every layer passes these through unchanged; nothing here is retried.

use std::fmt;

/// Boxed error used for causes coming from a pluggable transport.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The request step that failed before a status code was available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOp {
    CreateRequest,
    DoRequest,
    ReadBody,
}

impl RequestOp {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestOp::CreateRequest => "create request",
            RequestOp::DoRequest => "do request",
            RequestOp::ReadBody => "read body",
        }
    }
}

impl fmt::Display for RequestOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which client call produced an `ApiError::Http`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HttpCause {
    #[error("api error")]
    Api,
    #[error("download error")]
    Download,
}

/// Errors returned by `Client` and `Endpoint` operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Building, sending, or reading the request failed.
    #[error("request error during {op}: {source}")]
    Transport {
        op: RequestOp,
        #[source]
        source: BoxError,
    },

    /// The server returned 404: the requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("http {status} for {url}: {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
        #[source]
        cause: HttpCause,
    },

    /// A 2xx body could not be decoded into the expected shape.
    #[error("decode error for {resource}: {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub(crate) fn transport(op: RequestOp, source: impl Into<BoxError>) -> Self {
        ApiError::Transport {
            op,
            source: source.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading a `ClientConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid number of seconds: {value:?}")]
    InvalidSeconds {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("unknown language {0:?}")]
    UnknownLanguage(String),
}
