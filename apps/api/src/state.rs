use std::sync::Arc;

use crate::matching::orchestrator::ScoringOrchestrator;

/// Shared application state injected into all route handlers via Axum
/// extractors. Nothing here is mutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ScoringOrchestrator>,
}
