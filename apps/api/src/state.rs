use std::sync::Arc;

use crate::knowledge::CompanyKnowledge;
use crate::llm_client::CompletionGateway;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is read-only per request: concurrent requests run
/// independent pipeline runs with no shared mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Gateway to the hosted model. Trait object so tests inject canned
    /// completions without touching the handlers.
    pub gateway: Arc<dyn CompletionGateway>,
    pub knowledge: CompanyKnowledge,
}
