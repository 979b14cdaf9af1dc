use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lontar_core::corpus::{CorpusRecord, CorpusStore};
use lontar_core::persist::JsonCorpusStore;
use lontar_core::search::Searcher;
use lontar_core::tokenizer::preprocess;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

/// Ranked hit. Relevance only orders the list; the score itself is not part
/// of the response.
#[derive(Serialize)]
pub struct SearchHit {
    pub rank: usize,
    pub filename: String,
    pub timestamp: String,
    pub snippet: Option<String>,
}

#[derive(Deserialize)]
pub struct IngestRequest {
    pub filename: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct IngestResponse {
    pub filename: String,
    pub tokens: usize,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct CorpusEntry {
    pub filename: String,
    pub timestamp: String,
    pub preprocessed_content: String,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonCorpusStore>,
}

pub fn build_app<P: AsRef<Path>>(corpus_path: P) -> Router {
    let state = AppState { store: Arc::new(JsonCorpusStore::new(corpus_path)) };

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
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/corpus", get(corpus_handler))
        .route("/documents", post(ingest_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let searcher = Searcher::new(state.store.clone());
    let ranked = searcher.search(&params.q).map_err(internal_error)?;

    // Raw whitespace terms drive snippet extraction against the original
    // content; the index-side terms are stemmed and would rarely match it.
    let raw_terms: Vec<String> = params.q.split_whitespace().map(str::to_string).collect();
    let results: Vec<SearchHit> = ranked
        .into_iter()
        .enumerate()
        .map(|(i, doc)| SearchHit {
            rank: i + 1,
            filename: doc.filename,
            timestamp: doc.created_at,
            snippet: make_snippet(&doc.raw_text, &raw_terms),
        })
        .collect();

    Ok(Json(SearchResponse {
        query: params.q,
        took_s: start.elapsed().as_secs_f64(),
        total_hits: results.len(),
        results,
    }))
}

pub async fn corpus_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CorpusEntry>>, (StatusCode, String)> {
    let docs = state.store.load_all().map_err(internal_error)?;
    let entries = docs
        .into_iter()
        .map(|doc| CorpusEntry {
            filename: doc.filename,
            timestamp: doc.created_at,
            preprocessed_content: doc.preprocessed_text,
        })
        .collect();
    Ok(Json(entries))
}

pub async fn ingest_handler(
    State(state): State<AppState>,
    Json(req): Json<IngestRequest>,
) -> Result<(StatusCode, Json<IngestResponse>), (StatusCode, String)> {
    let (preprocessed, tokens) = preprocess(&req.content);
    let timestamp = now_timestamp();
    state
        .store
        .append(CorpusRecord {
            filename: req.filename.clone(),
            original_content: req.content,
            preprocessed_content: preprocessed,
            timestamp: timestamp.clone(),
        })
        .map_err(internal_error)?;
    tracing::info!(filename = %req.filename, tokens = tokens.len(), "document ingested");

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse { filename: req.filename, tokens: tokens.len(), timestamp }),
    ))
}

fn internal_error(err: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

fn now_timestamp() -> String {
    let format =
        time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    time::OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_else(|_| String::new())
}

/// Plain-text window around the first case-insensitive match of any raw
/// query term, or the head of the document if nothing matches.
fn make_snippet(text: &str, raw_terms: &[String]) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let lowered = text.to_lowercase();
    let mut first_idx: Option<usize> = None;
    for term in raw_terms {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }
        if let Some(pos) = lowered.find(&needle) {
            first_idx = Some(pos);
            break;
        }
    }
    let snippet = match first_idx {
        Some(idx) => {
            let start = clamp_boundary(text, idx.saturating_sub(100));
            let end = clamp_boundary(text, idx + 200);
            text[start..end].to_string()
        }
        None => text.chars().take(200).collect(),
    };
    Some(snippet)
}

// Lowercasing can shift byte offsets, so positions found in the lowered text
// are clamped back onto a char boundary of the original.
fn clamp_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
