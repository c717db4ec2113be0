use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

use docsearch_core::types::SearchRequest;

use crate::catalog::Document;
use crate::types::AppContext;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// `POST /search/` — documents whose title contains the query and whose fields
/// contain every non-empty filter.
///
/// Malformed bodies get a 422 with a JSON `detail`, so the widget renders them as
/// "no results" instead of logging a fetch error.
pub async fn api_search(
    State(ctx): State<AppContext>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<Document>>, (StatusCode, Json<serde_json::Value>)> {
    let Json(req) = body.map_err(|rejection| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "detail": rejection.body_text() })),
        )
    })?;

    let start = Instant::now();
    let hits: Vec<Document> = ctx.catalog.search(&req, ctx.limit).into_iter().cloned().collect();

    debug!(
        query = req.query.as_str(),
        topic = req.topic.as_str(),
        author = req.author.as_str(),
        location = req.location.as_str(),
        hits = hits.len(),
        time_us = start.elapsed().as_micros() as u64,
        "Search"
    );

    Ok(Json(hits))
}

// ---------------------------------------------------------------------------
// Probes
// ---------------------------------------------------------------------------

/// `GET /test/` — liveness probe, answers the JSON string `"Done"`.
pub async fn api_test() -> Json<&'static str> {
    Json("Done")
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    documents: usize,
    uptime_secs: u64,
}

/// `GET /health` — `"ok"`, or `"empty"` when the catalog has no documents to find.
pub async fn api_health(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: if ctx.catalog.is_empty() { "empty" } else { "ok" },
        documents: ctx.catalog.len(),
        uptime_secs: ctx.start_time.elapsed().as_secs(),
    })
}
