//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use tracing::Span;
use warehouse_db::InventoryEngine;

/// State handed to every handler.
///
/// Cheap to clone: the engine sits behind an `Arc` and owns the pool.
#[derive(Clone)]
pub struct AppState {
    /// The inventory engine, shared across requests
    pub engine: Arc<dyn InventoryEngine>,

    /// Deadline given to each request's engine call
    pub backend_timeout: Duration,

    /// Parent of every request span. Spawned connection tasks don't
    /// inherit the caller's span, so it is carried here.
    pub root_span: Span,
}

impl AppState {
    pub fn new(engine: Arc<dyn InventoryEngine>, backend_timeout: Duration) -> Self {
        AppState {
            engine,
            backend_timeout,
            root_span: Span::none(),
        }
    }

    pub fn with_root_span(mut self, span: Span) -> Self {
        self.root_span = span;
        self
    }
}
