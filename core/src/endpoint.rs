//! Typed access to one API collection.
//!
//! # Design
//! `Endpoint<T, L>` binds a resource path to its detail shape `T` (returned
//! by `get`) and summary shape `L` (returned by `list`). Decoding is static
//! through serde; a body that does not fit the shape is a `Decode` error
//! naming the resolved path, never a defaulted value. Errors from the
//! client pass through untouched.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug_span;

use crate::client::Client;
use crate::error::ApiError;
use crate::query::Query;

pub struct Endpoint<T, L> {
    client: Arc<Client>,
    path: String,
    _shapes: PhantomData<fn() -> (T, L)>,
}

impl<T, L> Endpoint<T, L>
where
    T: DeserializeOwned,
    L: DeserializeOwned,
{
    pub fn new(client: Arc<Client>, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _shapes: PhantomData,
        }
    }

    /// Fetch `/<path>/<id>` and decode it as the detail shape.
    ///
    /// `id` is percent-encoded as a single path segment, so names such as
    /// `Darkness Ablaze` are valid ids.
    pub fn get(&self, id: &str) -> Result<T, ApiError> {
        let resource = format!("/{}/{}", self.path, urlencoding::encode(id));
        let _span = debug_span!("endpoint_get", resource = %resource).entered();
        let body = self.client.get(&resource)?;
        decode(&resource, &body)
    }

    /// Fetch `/<path>` with an optional query and decode a list of summaries.
    pub fn list(&self, query: Option<&Query>) -> Result<Vec<L>, ApiError> {
        let query_string = query.map(Query::build).unwrap_or_default();
        let resource = format!("/{}{query_string}", self.path);
        let _span = debug_span!("endpoint_list", resource = %resource).entered();
        let body = self.client.get(&resource)?;
        decode(&resource, &body)
    }
}

impl<T, L> Endpoint<T, L> {
    pub fn client(&self) -> &Arc<Client> {
        &self.client
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<T, L> Clone for Endpoint<T, L> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            path: self.path.clone(),
            _shapes: PhantomData,
        }
    }
}

impl<T, L> fmt::Debug for Endpoint<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("path", &self.path)
            .field("base_url", &self.client.base_url())
            .finish()
    }
}

fn decode<V: DeserializeOwned>(resource: &str, body: &[u8]) -> Result<V, ApiError> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode {
        resource: resource.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::error::RequestOp;
    use crate::http::mock::MockTransport;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
        name: String,
    }

    fn endpoint(mock: &Arc<MockTransport>) -> Endpoint<Item, Item> {
        let client = Client::builder()
            .base_url("http://example")
            .transport(Arc::clone(mock))
            .build();
        Endpoint::new(Arc::new(client), "cards")
    }

    #[test]
    fn new_keeps_client_and_path() {
        let client = Arc::new(Client::builder().base_url("http://example").build());
        let e: Endpoint<Item, Item> = Endpoint::new(Arc::clone(&client), "cards");
        assert!(Arc::ptr_eq(e.client(), &client));
        assert_eq!(e.path(), "cards");
    }

    #[test]
    fn get_decodes_detail() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, r#"{"id":"123","name":"bob"}"#);
        let item = endpoint(&mock).get("123").unwrap();
        assert_eq!(
            item,
            Item {
                id: "123".to_string(),
                name: "bob".to_string()
            }
        );
        assert_eq!(mock.requests()[0].url, "http://example/cards/123");
    }

    #[test]
    fn get_escapes_id_as_one_path_segment() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, r#"{"id":"swsh3","name":"Darkness Ablaze"}"#)
            .respond(200, r#"{"id":"x","name":"Flabébé"}"#)
            .respond(200, r#"{"id":"a/b","name":"slash"}"#);
        let sets = endpoint(&mock);

        let item = sets.get("Darkness Ablaze").unwrap();
        assert_eq!(item.name, "Darkness Ablaze");
        sets.get("Flabébé").unwrap();
        sets.get("a/b").unwrap();

        let urls: Vec<String> = mock.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            [
                "http://example/cards/Darkness%20Ablaze",
                "http://example/cards/Flab%C3%A9b%C3%A9",
                "http://example/cards/a%2Fb",
            ]
        );
    }

    #[test]
    fn get_decode_error_names_resource() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, "not-json");
        let err = endpoint(&mock).get("123").unwrap_err();
        match &err {
            ApiError::Decode { resource, .. } => assert_eq!(resource, "/cards/123"),
            other => panic!("expected Decode, got {other:?}"),
        }
        assert!(err.to_string().contains("/cards/123"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn get_wrong_shape_is_a_decode_error() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, r#"{"id": 7}"#);
        let err = endpoint(&mock).get("7").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn get_passes_not_found_through() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(404, r#"{"error":"not found"}"#);
        let err = endpoint(&mock).get("missing").unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn get_passes_transport_error_through() {
        let mock = Arc::new(MockTransport::new());
        mock.fail("boom");
        let err = endpoint(&mock).get("123").unwrap_err();
        assert!(matches!(err, ApiError::Transport { op: RequestOp::DoRequest, .. }));
    }

    #[test]
    fn list_without_query_hits_bare_path() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, r#"[{"id":"1","name":"a"},{"id":"2","name":"b"}]"#);
        let items = endpoint(&mock).list(None).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "b");
        assert_eq!(mock.requests()[0].url, "http://example/cards");
    }

    #[test]
    fn list_with_query_appends_query_string() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, r#"[{"id":"9","name":"bob"}]"#);
        let mut q = Query::new();
        q.contains("name", "bob").paginate(1, 10);
        let items = endpoint(&mock).list(Some(&q)).unwrap();
        assert_eq!(items[0].id, "9");
        assert_eq!(
            mock.requests()[0].url,
            "http://example/cards?name=bob&pagination%3Apage=1&pagination%3AitemsPerPage=10"
        );
    }

    #[test]
    fn list_with_empty_query_has_no_suffix() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, "[]");
        endpoint(&mock).list(Some(&Query::new())).unwrap();
        assert_eq!(mock.requests()[0].url, "http://example/cards");
    }

    #[test]
    fn list_empty_array_is_empty_vec() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, "[]");
        let items = endpoint(&mock).list(None).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn list_decode_error_names_resource() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, "not-json");
        let err = endpoint(&mock).list(None).unwrap_err();
        assert!(matches!(err, ApiError::Decode { ref resource, .. } if resource == "/cards"));
    }

    #[test]
    fn list_http_error_passes_through() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(503, "maintenance");
        let err = endpoint(&mock).list(None).unwrap_err();
        assert_eq!(err.status(), Some(503));
    }
}
