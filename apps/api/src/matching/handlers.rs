//! Axum route handlers for the scoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::matching::{BulkMatchItem, CandidateScore, JobSpec, MatchRequest, MatchResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BulkScoreRequest {
    #[serde(flatten)]
    pub job: JobSpec,
    pub candidates: Vec<BulkMatchItem>,
}

#[derive(Debug, Serialize)]
pub struct BulkScoreResponse {
    pub results: Vec<CandidateScore>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/score
///
/// Scores one CV against one job. Fallback results are 200s, not errors: the
/// caller always receives a complete result unless the input is invalid or
/// the provider quota is exhausted.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    request.validate()?;

    let result = state.orchestrator.score_one(&request).await?;

    Ok(Json(result))
}

/// POST /api/v1/score/bulk
///
/// Scores every candidate in the list against one job. Never partially fails:
/// each candidate yields exactly one result, sorted by score descending.
pub async fn handle_score_bulk(
    State(state): State<AppState>,
    Json(request): Json<BulkScoreRequest>,
) -> Result<Json<BulkScoreResponse>, AppError> {
    request.job.validate()?;

    let results = state
        .orchestrator
        .score_bulk(&request.job, request.candidates)
        .await?;

    Ok(Json(BulkScoreResponse { results }))
}
