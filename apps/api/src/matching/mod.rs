// CV-to-job matching engine.
// Implements: signal extraction, heuristic fallback scoring, the provider
// client with its retry/timeout/classification policy, score normalization,
// and single/bulk orchestration. All provider calls go through client.rs.

pub mod client;
pub mod extraction;
pub mod fallback;
pub mod handlers;
pub mod normalize;
pub mod orchestrator;

use thiserror::Error;

/// Failure taxonomy for scoring operations.
///
/// `Validation` and `QuotaExceeded` always propagate to the caller.
/// `ProviderUnavailable` and `MalformedResponse` are converted into
/// fallback-tagged results by the orchestrator, never silently.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("validation error: {0}")]
    Validation(String),

    /// Provider-reported quota or rate-limit exhaustion. Never retried and
    /// never degraded to a fallback result: operators must see this.
    #[error("scoring provider quota exhausted: {0}")]
    QuotaExceeded(String),

    #[error("scoring provider unavailable after {attempts} attempt(s): {message}")]
    ProviderUnavailable { attempts: u32, message: String },

    /// The provider answered 2xx with a structurally unparseable body. A
    /// contract break rather than unavailability; logged distinctly upstream.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}
