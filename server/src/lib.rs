use anyhow::{Context, Result};
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, put}, Json, Router};
use parking_lot::RwLock;
use retrieval_core::{load_documents, parse_documents, Collection, Documents, Hit};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

type ApiError = (StatusCode, Json<Value>);

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// Documents as form text (`id: text` per line) or as an id -> text object.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum DocumentsPayload {
    Form(String),
    Map(Documents),
}

#[derive(Deserialize)]
pub struct AdHocSearch {
    pub documents: DocumentsPayload,
    pub query: String,
}

#[derive(Deserialize)]
pub struct ReplaceCollection {
    pub documents: DocumentsPayload,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<Hit>,
}

/// The active collection. Replacing it swaps the `Arc`; searches clone the
/// `Arc` and never hold the lock while evaluating.
#[derive(Clone)]
pub struct AppState {
    collection: Arc<RwLock<Arc<Collection>>>,
}

impl AppState {
    pub fn new(collection: Collection) -> Self {
        Self { collection: Arc::new(RwLock::new(Arc::new(collection))) }
    }

    pub fn current(&self) -> Arc<Collection> {
        self.collection.read().clone()
    }

    fn replace(&self, collection: Collection) {
        *self.collection.write() = Arc::new(collection);
    }
}

/// Load the startup collection from `docs`, or the sample collection.
pub fn load_collection(docs: Option<&str>) -> Result<Collection> {
    match docs {
        Some(path) => {
            let docs = load_documents(path).with_context(|| format!("loading documents from {path}"))?;
            Ok(Collection::new(docs)?)
        }
        None => Ok(Collection::sample()?),
    }
}

pub fn build_app(collection: Collection) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler).post(ad_hoc_search))
        .route("/collection", put(replace_collection))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(AppState::new(collection))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn bad_request(message: impl ToString) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message.to_string() })))
}

fn into_collection(payload: DocumentsPayload) -> Result<Collection, ApiError> {
    let docs = match payload {
        DocumentsPayload::Form(text) => parse_documents(&text).map_err(bad_request)?,
        DocumentsPayload::Map(docs) => docs,
    };
    Collection::new(docs).map_err(bad_request)
}

fn run_search(collection: &Collection, query: String) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let results = collection.search(&query).map_err(bad_request)?;
    let elapsed = start.elapsed();
    Ok(Json(SearchResponse { query, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results }))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let collection = state.current();
    run_search(&collection, params.q)
}

pub async fn ad_hoc_search(Json(req): Json<AdHocSearch>) -> Result<Json<SearchResponse>, ApiError> {
    let collection = into_collection(req.documents)?;
    run_search(&collection, req.query)
}

pub async fn replace_collection(
    State(state): State<AppState>,
    Json(req): Json<ReplaceCollection>,
) -> Result<Json<Value>, ApiError> {
    let collection = into_collection(req.documents)?;
    let (num_docs, num_terms) = (collection.len(), collection.index().num_terms());
    state.replace(collection);
    tracing::info!(num_docs, num_terms, "replaced active collection");
    Ok(Json(json!({ "num_docs": num_docs, "num_terms": num_terms })))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let collection = state.current();
    match collection.text(&doc_id) {
        Some(text) => Ok(Json(json!({ "doc_id": doc_id, "text": text }))),
        None => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))),
    }
}
