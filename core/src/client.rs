//! Caching transport client for the catalog API.
//!
//! # Design
//! `Client` resolves API-relative paths against its base URL, consults the
//! optional `ResponseCache`, executes the request through a pluggable
//! `Transport` and classifies the status. Configuration is fixed at
//! construction through `ClientBuilder`; the cache is the only mutable state
//! and it carries its own lock, so one `Client` can be shared across threads
//! behind an `Arc`.
//!
//! Only successful bodies are cached. Downloads are never cached and never
//! buffered: the caller gets the open body stream.

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::config::ClientConfig;
use crate::enums::Language;
use crate::error::{ApiError, HttpCause, RequestOp};
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};

pub const API_ROOT: &str = "https://api.tcgdex.net/v2";
pub const DEFAULT_BASE_URL: &str = "https://api.tcgdex.net/v2/en";
pub const DEFAULT_USER_AGENT: &str = concat!("tcgdex-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Blocking client shared by every endpoint.
pub struct Client {
    base_url: String,
    user_agent: String,
    transport: Arc<dyn Transport>,
    cache: Option<ResponseCache>,
}

impl Client {
    /// Client with default settings and the `ureq` transport.
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// Fetch `base_url + path` and return the raw body of a 2xx response.
    pub fn get(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let full_url = format!("{}{path}", self.base_url);

        if let Some(cache) = &self.cache {
            if let Some(payload) = cache.get(&full_url) {
                debug!(url = %full_url, "cache hit");
                return Ok(payload);
            }
            debug!(url = %full_url, "cache miss");
        }

        let mut response = self.send(&full_url)?;
        let body = read_body(&mut response.body)
            .map_err(|e| ApiError::transport(RequestOp::ReadBody, e))?;
        classify(response.status, &full_url, HttpCause::Api, || {
            String::from_utf8_lossy(&body).into_owned()
        })?;

        if let Some(cache) = &self.cache {
            debug!(url = %full_url, bytes = body.len(), "cache store");
            cache.set(&full_url, body.clone());
        }
        Ok(body)
    }

    /// Open a streaming GET on an absolute `url`.
    ///
    /// The status is classified before the stream is handed back, so a
    /// returned `Download` always belongs to a 2xx response. Dropping it
    /// closes the connection.
    pub fn download(&self, url: &str) -> Result<Download, ApiError> {
        let mut response = self.send(url)?;
        classify(response.status, url, HttpCause::Download, || {
            read_body(&mut response.body)
                .map(|body| String::from_utf8_lossy(&body).into_owned())
                .unwrap_or_default()
        })?;

        let content_type = response
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.clone());
        Ok(Download {
            content_type,
            body: response.body,
        })
    }

    fn send(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest::get(url, &self.user_agent)
            .map_err(|e| ApiError::transport(RequestOp::CreateRequest, e))?;
        let response = self
            .transport
            .send(&request)
            .map_err(|e| ApiError::transport(RequestOp::DoRequest, e))?;
        debug!(url, status = response.status, "response received");
        Ok(response)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Map a status code to `NotFound`, `Http`, or success.
///
/// `body` is only evaluated for error statuses.
fn classify(
    status: u16,
    url: &str,
    cause: HttpCause,
    body: impl FnOnce() -> String,
) -> Result<(), ApiError> {
    if status == 404 {
        return Err(ApiError::NotFound);
    }
    if !(200..300).contains(&status) {
        let body = body();
        warn!(url, status, "unexpected status");
        return Err(ApiError::Http {
            status,
            url: url.to_string(),
            body,
            cause,
        });
    }
    Ok(())
}

fn read_body(body: &mut (dyn Read + Send)) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    body.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Open body of a successful download. Reading streams from the network.
pub struct Download {
    content_type: Option<String>,
    body: Box<dyn Read + Send>,
}

impl Download {
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Read the rest of the stream into memory.
    pub fn into_bytes(mut self) -> Result<Vec<u8>, ApiError> {
        read_body(&mut self.body).map_err(|e| ApiError::transport(RequestOp::ReadBody, e))
    }
}

impl Read for Download {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf)
    }
}

impl fmt::Debug for Download {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Download")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Options for constructing a `Client`.
///
/// An explicit `base_url` wins over `language`. `timeout` only applies to
/// the default `ureq` transport; a custom transport manages its own.
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    language: Option<Language>,
    user_agent: Option<String>,
    cache_ttl: Option<Duration>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a `ClientConfig`; later builder calls override it.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            language: config.language,
            user_agent: config.user_agent.clone(),
            cache_ttl: config.cache_ttl(),
            timeout: config.timeout(),
            transport: None,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Enable response caching with the given TTL.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> Client {
        let base_url = match (self.base_url, self.language) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, Some(lang)) => format!("{API_ROOT}/{lang}"),
            (None, None) => DEFAULT_BASE_URL.to_string(),
        };
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(UreqTransport::new(self.timeout)));

        Client {
            base_url,
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            transport,
            cache: self.cache_ttl.map(ResponseCache::new),
        }
    }
}
