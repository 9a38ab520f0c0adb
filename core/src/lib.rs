//! Blocking, typed client for the TCGdex card catalog API.
//!
//! # Overview
//! Fetches cards, sets and series as strongly-typed values. Requests go
//! through a pluggable `Transport` (a `ureq` agent by default), responses can
//! be cached per resolved URL for a fixed TTL, and every failure surfaces as
//! one `ApiError` variant.
//!
//! # Design
//! - `Client` owns the base URL, user agent, transport and optional
//!   `ResponseCache`; it is configured once through `ClientBuilder` and then
//!   shared by reference count.
//! - `Endpoint<T, L>` binds a collection path to a detail shape `T` and a
//!   summary shape `L` and decodes JSON with serde.
//! - `Query` renders filters, sorting and pagination into a query string.
//! - `TcgDex` wires the `cards`, `sets` and `series` endpoints to one client.
//! - The library emits `tracing` events and never installs a subscriber.

pub mod cache;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod enums;
pub mod error;
pub mod http;
pub mod models;
pub mod query;
pub mod tcgdex;

pub use cache::ResponseCache;
pub use client::{Client, ClientBuilder, Download};
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use enums::{Extension, Language, Quality};
pub use error::{ApiError, ConfigError, HttpCause, RequestOp};
pub use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use query::Query;
pub use tcgdex::TcgDex;
