//! Fluent builder for list filters, sorting and pagination.
//!
//! Each operator appends `key=value` pairs in call order; the operator is
//! encoded as a prefix on the value (`eq:`, `neq:`, `gte:` ...). `build`
//! percent-encodes keys and values independently, so `:` in `sort:field`
//! or `eq:active` renders as `%3A` and spaces as `%20`.

use std::fmt::Display;

use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Param {
    key: String,
    value: String,
}

/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<Param>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.push(Param {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Substring match, the API's default operator.
    pub fn contains(&mut self, key: &str, value: &str) -> &mut Self {
        self.add(key, value)
    }

    pub fn equal(&mut self, key: &str, value: &str) -> &mut Self {
        self.add(key, format!("eq:{value}"))
    }

    pub fn not_equal(&mut self, key: &str, value: &str) -> &mut Self {
        self.add(key, format!("neq:{value}"))
    }

    pub fn not_contains(&mut self, key: &str, value: &str) -> &mut Self {
        self.add(key, format!("not:{value}"))
    }

    pub fn gte(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.add(key, format!("gte:{value}"))
    }

    pub fn lte(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.add(key, format!("lte:{value}"))
    }

    pub fn gt(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.add(key, format!("gt:{value}"))
    }

    pub fn lt(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.add(key, format!("lt:{value}"))
    }

    pub fn is_null(&mut self, key: &str) -> &mut Self {
        self.add(key, "null:")
    }

    pub fn not_null(&mut self, key: &str) -> &mut Self {
        self.add(key, "notnull:")
    }

    pub fn sort(&mut self, field: &str, order: &str) -> &mut Self {
        self.add("sort:field", field).add("sort:order", order)
    }

    pub fn paginate(&mut self, page: u32, items_per_page: u32) -> &mut Self {
        self.add("pagination:page", page.to_string())
            .add("pagination:itemsPerPage", items_per_page.to_string())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Render `?k=v&k=v`, or an empty string when nothing was added.
    pub fn build(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{}={}", urlencoding::encode(&p.key), urlencoding::encode(&p.value)))
            .collect();
        let rendered = format!("?{}", pairs.join("&"));
        trace!(query = %rendered, "query built");
        rendered
    }
}
