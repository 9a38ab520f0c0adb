//! In-process stand-in for the catalog API.
//!
//! Serves a small fixed catalog under `/cards`, `/sets` and `/series` with
//! the same list filter syntax as the real API (`eq:`, `neq:`, `not:`,
//! `gte:` ..., `sort:*`, `pagination:*`), a binary asset route and a route
//! that answers with any status code. Every request bumps a hit counter so
//! tests can tell whether a client went to the network.

use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering as AtomicOrdering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Cards,
    Sets,
    Series,
}

impl Collection {
    fn summary_keys(self) -> &'static [&'static str] {
        match self {
            Collection::Cards => &["id", "localId", "name", "image"],
            Collection::Sets => &["id", "name", "logo", "symbol", "cardCount"],
            Collection::Series => &["id", "name", "logo"],
        }
    }
}

/// Catalog records plus the request counter.
#[derive(Debug)]
pub struct MockState {
    cards: Vec<Value>,
    sets: Vec<Value>,
    series: Vec<Value>,
    hits: AtomicUsize,
}

impl MockState {
    pub fn new() -> Self {
        Self {
            cards: cards(),
            sets: sets(),
            series: series(),
            hits: AtomicUsize::new(0),
        }
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(AtomicOrdering::SeqCst)
    }

    fn records(&self, collection: Collection) -> &[Value] {
        match collection {
            Collection::Cards => &self.cards,
            Collection::Sets => &self.sets,
            Collection::Series => &self.series,
        }
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new()
    }
}

pub type Shared = Arc<MockState>;

pub fn app() -> Router {
    app_with(Arc::new(MockState::new()))
}

pub fn app_with(state: Shared) -> Router {
    Router::new()
        .route("/cards", get(list_cards))
        .route("/cards/{id}", get(get_card))
        .route("/sets", get(list_sets))
        .route("/sets/{id}", get(get_set))
        .route("/series", get(list_series))
        .route("/series/{id}", get(get_serie))
        .route("/assets/{*path}", get(asset))
        .route("/status/{code}", get(forced_status))
        .layer(middleware::from_fn_with_state(state.clone(), count_hits))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Arc::new(MockState::new())).await
}

pub async fn serve(listener: TcpListener, state: Shared) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(state)).await
}

async fn count_hits(State(state): State<Shared>, request: Request, next: Next) -> Response {
    state.hits.fetch_add(1, AtomicOrdering::SeqCst);
    tracing::debug!(uri = %request.uri(), "mock request");
    next.run(request).await
}

type Params = Query<HashMap<String, String>>;

async fn list_cards(State(state): State<Shared>, Query(params): Params) -> Json<Vec<Value>> {
    Json(list(&state, Collection::Cards, &params))
}

async fn list_sets(State(state): State<Shared>, Query(params): Params) -> Json<Vec<Value>> {
    Json(list(&state, Collection::Sets, &params))
}

async fn list_series(State(state): State<Shared>, Query(params): Params) -> Json<Vec<Value>> {
    Json(list(&state, Collection::Series, &params))
}

async fn get_card(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    find(&state, Collection::Cards, &id)
}

async fn get_set(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    find(&state, Collection::Sets, &id)
}

async fn get_serie(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    find(&state, Collection::Series, &id)
}

async fn asset(Path(path): Path<String>) -> Response {
    if path.ends_with(".png") {
        ([(header::CONTENT_TYPE, "image/png")], PNG_BYTES).into_response()
    } else {
        not_found()
    }
}

async fn forced_status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, format!("forced status {code}")).into_response(),
        Err(_) => (StatusCode::BAD_REQUEST, "invalid status").into_response(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}

fn find(state: &MockState, collection: Collection, id: &str) -> Response {
    state
        .records(collection)
        .iter()
        .find(|record| record["id"] == id)
        .map(|record| Json(record.clone()).into_response())
        .unwrap_or_else(not_found)
}

/// Apply filters, then sorting, then pagination, and project to summaries.
pub fn list(state: &MockState, collection: Collection, params: &HashMap<String, String>) -> Vec<Value> {
    let mut records: Vec<&Value> = state
        .records(collection)
        .iter()
        .filter(|record| {
            params
                .iter()
                .filter(|(key, _)| !key.starts_with("sort:") && !key.starts_with("pagination:"))
                .all(|(key, filter)| matches_filter(record.get(key), filter))
        })
        .collect();

    if let Some(field) = params.get("sort:field") {
        records.sort_by(|a, b| compare(a.get(field), b.get(field)));
        if params.get("sort:order").is_some_and(|o| o.eq_ignore_ascii_case("desc")) {
            records.reverse();
        }
    }

    let page: usize = params
        .get("pagination:page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let per_page: Option<usize> = params
        .get("pagination:itemsPerPage")
        .and_then(|p| p.parse().ok());
    let records: Vec<&Value> = match per_page {
        Some(size) => records
            .into_iter()
            .skip(page.saturating_sub(1) * size)
            .take(size)
            .collect(),
        None => records,
    };

    records
        .into_iter()
        .map(|record| summarize(record, collection.summary_keys()))
        .collect()
}

fn summarize(record: &Value, keys: &[&str]) -> Value {
    let summary: Map<String, Value> = keys
        .iter()
        .filter_map(|key| record.get(*key).map(|v| (key.to_string(), v.clone())))
        .collect();
    Value::Object(summary)
}

fn matches_filter(field: Option<&Value>, filter: &str) -> bool {
    let text = field.map(|v| match v {
        Value::String(s) => s.to_lowercase(),
        other => other.to_string(),
    });
    let number = field.and_then(Value::as_f64);
    let numeric = |raw: &str, cmp: fn(f64, f64) -> bool| {
        raw.parse::<f64>()
            .ok()
            .zip(number)
            .is_some_and(|(wanted, have)| cmp(have, wanted))
    };

    if filter == "null:" {
        return field.map_or(true, Value::is_null);
    }
    if filter == "notnull:" {
        return field.is_some_and(|v| !v.is_null());
    }
    if let Some(raw) = filter.strip_prefix("eq:") {
        return text.is_some_and(|t| t == raw.to_lowercase());
    }
    if let Some(raw) = filter.strip_prefix("neq:") {
        return text.map_or(true, |t| t != raw.to_lowercase());
    }
    if let Some(raw) = filter.strip_prefix("not:") {
        return text.map_or(true, |t| !t.contains(&raw.to_lowercase()));
    }
    if let Some(raw) = filter.strip_prefix("gte:") {
        return numeric(raw, |have, wanted| have >= wanted);
    }
    if let Some(raw) = filter.strip_prefix("lte:") {
        return numeric(raw, |have, wanted| have <= wanted);
    }
    if let Some(raw) = filter.strip_prefix("gt:") {
        return numeric(raw, |have, wanted| have > wanted);
    }
    if let Some(raw) = filter.strip_prefix("lt:") {
        return numeric(raw, |have, wanted| have < wanted);
    }
    text.is_some_and(|t| t.contains(&filter.to_lowercase()))
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn cards() -> Vec<Value> {
    let darkness_ablaze = json!({
        "id": "swsh3",
        "name": "Darkness Ablaze",
        "logo": "https://assets.tcgdex.net/en/swsh/swsh3/logo",
        "cardCount": { "official": 189, "total": 201 }
    });
    vec![
        json!({
            "id": "swsh3-136",
            "localId": "136",
            "name": "Furret",
            "image": "https://assets.tcgdex.net/en/swsh/swsh3/136",
            "category": "Pokemon",
            "rarity": "Uncommon",
            "hp": 110,
            "types": ["Colorless"],
            "stage": "Stage1",
            "evolveFrom": "Sentret",
            "attacks": [{ "cost": ["Colorless", "Colorless"], "name": "Tail Smash", "damage": 90 }],
            "variants": { "normal": true, "reverse": true, "holo": false, "firstEdition": false, "wPromo": false },
            "legal": { "standard": false, "expanded": true },
            "set": darkness_ablaze.clone(),
            "pricing": {
                "cardmarket": { "updated": "2025-08-05T00:42:15.000Z", "unit": "EUR", "avg": 0.08, "avg-holo": 0.27 }
            }
        }),
        json!({
            "id": "swsh3-20",
            "localId": "20",
            "name": "Charizard VMAX",
            "image": "https://assets.tcgdex.net/en/swsh/swsh3/20",
            "category": "Pokemon",
            "rarity": "Rare Holo VMAX",
            "hp": 330,
            "types": ["Fire"],
            "attacks": [{ "cost": ["Fire", "Fire", "Fire"], "name": "G-Max Wildfire", "damage": "300" }],
            "legal": { "standard": false, "expanded": true },
            "set": darkness_ablaze
        }),
        json!({
            "id": "base1-4",
            "localId": "4",
            "name": "Charizard",
            "category": "Pokemon",
            "rarity": "Rare",
            "hp": 120,
            "types": ["Fire"],
            "attacks": [{ "cost": ["Fire", "Fire", "Fire", "Fire"], "name": "Fire Spin", "damage": 100 }],
            "set": { "id": "base1", "name": "Base Set", "cardCount": { "official": 102, "total": 102 } }
        }),
    ]
}

fn sets() -> Vec<Value> {
    vec![
        json!({
            "id": "swsh3",
            "name": "Darkness Ablaze",
            "logo": "https://assets.tcgdex.net/en/swsh/swsh3/logo",
            "symbol": "https://assets.tcgdex.net/univ/swsh/swsh3/symbol",
            "cardCount": { "official": 189, "total": 201 },
            "serie": { "id": "swsh", "name": "Sword & Shield" },
            "releaseDate": "2020-08-14",
            "tcgOnline": "DAA",
            "legal": { "standard": false, "expanded": true },
            "cards": [
                { "id": "swsh3-20", "localId": "20", "name": "Charizard VMAX" },
                { "id": "swsh3-136", "localId": "136", "name": "Furret" }
            ]
        }),
        json!({
            "id": "base1",
            "name": "Base Set",
            "cardCount": { "official": 102, "total": 102 },
            "serie": { "id": "base", "name": "Base" },
            "releaseDate": "1999-01-09",
            "cards": [{ "id": "base1-4", "localId": "4", "name": "Charizard" }]
        }),
    ]
}

fn series() -> Vec<Value> {
    vec![
        json!({
            "id": "base",
            "name": "Base",
            "sets": [{ "id": "base1", "name": "Base Set", "cardCount": { "official": 102, "total": 102 } }]
        }),
        json!({
            "id": "swsh",
            "name": "Sword & Shield",
            "logo": "https://assets.tcgdex.net/en/swsh/swsh1/logo",
            "sets": [{ "id": "swsh3", "name": "Darkness Ablaze", "cardCount": { "official": 189, "total": 201 } }]
        }),
    ]
}
