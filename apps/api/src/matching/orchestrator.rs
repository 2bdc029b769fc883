//! Scoring orchestration: single and bulk evaluation, plus the fallback
//! policy.
//!
//! The client reports *what* failed; this module decides what the caller
//! gets. Provider unavailability and contract breaks degrade to local
//! heuristic results, always tagged with their source. Quota exhaustion and
//! validation failures propagate untouched.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::matching::client::MatchProvider;
use crate::matching::{fallback, MatchError};
use crate::models::matching::{
    BulkMatchItem, CandidateScore, JobSpec, MatchRequest, MatchResult, MatchSource, MatchStatus,
};

#[derive(Clone)]
pub struct ScoringOrchestrator {
    provider: Arc<dyn MatchProvider>,
    /// Bound on in-flight scoring calls during a bulk run. The provider rate
    /// limits per minute; unbounded fan-out exhausts the quota.
    bulk_concurrency: usize,
}

impl ScoringOrchestrator {
    pub fn new(provider: Arc<dyn MatchProvider>, bulk_concurrency: usize) -> Self {
        Self {
            provider,
            bulk_concurrency: bulk_concurrency.max(1),
        }
    }

    /// Scores one CV against one job. Transient provider trouble never fails
    /// the caller: it degrades to a heuristic result carrying
    /// `source = FALLBACK`.
    pub async fn score_one(&self, request: &MatchRequest) -> Result<MatchResult, MatchError> {
        match self.provider.score(request).await {
            Ok(result) => Ok(result),
            Err(MatchError::ProviderUnavailable { attempts, message }) => {
                warn!(
                    "scoring provider unavailable after {attempts} attempt(s) ({message}); \
                     using heuristic fallback"
                );
                Ok(fallback::score(request))
            }
            Err(MatchError::MalformedResponse(message)) => {
                // A contract break with the provider, not mere unavailability.
                error!("scoring provider returned a malformed response: {message}");
                Ok(fallback::score(request))
            }
            Err(err) => Err(err),
        }
    }

    /// Scores every candidate against one job with bounded concurrency.
    ///
    /// Total: exactly one result per input item, with per-item failures
    /// absorbed into degraded records. Output is sorted by score descending,
    /// ties in input order. Fails only when the job-level input is invalid.
    pub async fn score_bulk(
        &self,
        job: &JobSpec,
        items: Vec<BulkMatchItem>,
    ) -> Result<Vec<CandidateScore>, MatchError> {
        job.validate()?;

        info!(
            "bulk scoring {} candidate(s), concurrency {}",
            items.len(),
            self.bulk_concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.bulk_concurrency));
        let mut tasks = JoinSet::new();
        let mut pending: HashMap<tokio::task::Id, (usize, Uuid)> = HashMap::new();

        for (position, item) in items.into_iter().enumerate() {
            let orchestrator = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let request = job.to_request(item.cv_text);
            let candidate_id = item.candidate_id;

            let handle = tasks.spawn(async move {
                // The semaphore is never closed while tasks run.
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                let result = match orchestrator.score_one(&request).await {
                    Ok(result) => result,
                    Err(err) => {
                        warn!("candidate {candidate_id} failed to score: {err}");
                        error_result(&err.to_string())
                    }
                };
                (position, CandidateScore {
                    candidate_id,
                    result,
                })
            });
            pending.insert(handle.id(), (position, candidate_id));
        }

        let mut scored: Vec<(usize, CandidateScore)> = Vec::with_capacity(pending.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, entry)) => {
                    pending.remove(&id);
                    scored.push(entry);
                }
                Err(join_err) => {
                    // Even a panicked task must still yield its row.
                    if let Some((position, candidate_id)) = pending.remove(&join_err.id()) {
                        error!("bulk scoring task for candidate {candidate_id} panicked: {join_err}");
                        scored.push((
                            position,
                            CandidateScore {
                                candidate_id,
                                result: error_result("scoring task panicked"),
                            },
                        ));
                    }
                }
            }
        }

        // Restore input order first so the stable sort below breaks score
        // ties by original position.
        scored.sort_by_key(|(position, _)| *position);
        let mut results: Vec<CandidateScore> =
            scored.into_iter().map(|(_, entry)| entry).collect();
        results.sort_by(|a, b| b.result.score.cmp(&a.result.score));

        Ok(results)
    }
}

/// Minimal degraded record for a candidate whose scoring failed outright.
fn error_result(detail: &str) -> MatchResult {
    MatchResult {
        score: 0,
        match_percentage: 0,
        status: MatchStatus::Rejected,
        strengths: Vec::new(),
        weaknesses: vec![format!("Scoring failed: {detail}")],
        recommendation: MatchStatus::Rejected.recommendation().to_string(),
        skills_matched: Vec::new(),
        skills_missing: Vec::new(),
        source: MatchSource::Fallback,
    }
}
