//! Shared server types: limits and the axum application context.

use std::sync::Arc;
use std::time::Instant;

use crate::catalog::Catalog;

/// Results returned per search when `--limit` is not given.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Hard ceiling on `--limit`.
pub const MAX_RESULT_LIMIT: usize = 100;

/// Port the widget's default endpoint points at.
pub const DEFAULT_PORT: u16 = 8000;

/// Axum application state.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<Catalog>,
    pub limit: usize,
    pub start_time: Instant,
}

impl AppContext {
    pub fn new(catalog: Catalog, limit: usize) -> Self {
        Self {
            catalog: Arc::new(catalog),
            limit: limit.clamp(1, MAX_RESULT_LIMIT),
            start_time: Instant::now(),
        }
    }
}
