//! Matching client: the single point of entry for all scoring-provider calls.
//!
//! ARCHITECTURAL RULE: no other module may call the provider directly. The
//! client owns payload construction, the timeout/retry policy, and failure
//! classification. It handles *mechanics* only; whether to accept a fallback
//! result for an unavailable provider is orchestrator policy. The one
//! exception is provider misconfiguration (no usable API key), which the
//! client resolves locally because no amount of retrying can fix it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::matching::extraction::{extract_experience_years, extract_skills, ExperienceSignal};
use crate::matching::normalize::{normalize, RawMatchResponse};
use crate::matching::{fallback, MatchError};
use crate::models::matching::{MatchRequest, MatchResult};

/// Fixed provider path appended to the configured base URL.
const MATCH_PATH: &str = "/v1/match";
/// Candidate skills sentinel when extraction finds nothing usable.
const GENERAL_SKILLS_SENTINEL: &str = "general skills";

// ────────────────────────────────────────────────────────────────────────────
// Provider seam
// ────────────────────────────────────────────────────────────────────────────

/// Seam between the orchestrator and the provider mechanics. Lets the
/// fallback policy be exercised against a stubbed provider in tests.
#[async_trait]
pub trait MatchProvider: Send + Sync {
    async fn score(&self, request: &MatchRequest) -> Result<MatchResult, MatchError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire payload
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct MatchPayload<'a> {
    job: JobPayload<'a>,
    candidate: CandidatePayload<'a>,
}

#[derive(Debug, Serialize)]
struct JobPayload<'a> {
    title: &'a str,
    description: &'a str,
    required_skills: &'a [String],
    required_experience_years: u32,
}

/// Candidate block. The provider schema requires education, languages,
/// location and work-permit fields; this service has no such data, so they
/// are sent as empty placeholders.
#[derive(Debug, Serialize)]
struct CandidatePayload<'a> {
    cv_text: &'a str,
    skills: Vec<String>,
    experience_years: u32,
    education: &'a str,
    languages: Vec<String>,
    location: &'a str,
    work_permit: &'a str,
}

fn build_payload(request: &MatchRequest) -> MatchPayload<'_> {
    let mut skills = extract_skills(&request.cv_text);
    if skills.is_empty() {
        skills = request.required_skills.clone();
    }
    if skills.is_empty() {
        skills = vec![GENERAL_SKILLS_SENTINEL.to_string()];
    }

    let experience_years = match extract_experience_years(&request.cv_text) {
        ExperienceSignal::Found(years) => years,
        ExperienceSignal::NotFound if request.required_experience_years > 0 => {
            request.required_experience_years
        }
        ExperienceSignal::NotFound => 1,
    };

    MatchPayload {
        job: JobPayload {
            title: &request.job_title,
            description: &request.job_description,
            required_skills: &request.required_skills,
            required_experience_years: request.required_experience_years,
        },
        candidate: CandidatePayload {
            cv_text: &request.cv_text,
            skills,
            experience_years,
            education: "",
            languages: Vec::new(),
            location: "",
            work_permit: "",
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Failure classification
// ────────────────────────────────────────────────────────────────────────────

/// Quota exhaustion: HTTP 429 or a quota marker anywhere in the error body.
/// Never retried and never degraded: it signals a hit resource limit, not
/// unavailability.
fn is_quota_error(status: StatusCode, body: &str) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || body.to_lowercase().contains("quota")
}

/// Provider-side configuration failure ("API key not configured" and
/// friends). The only error body that triggers an automatic fallback.
fn is_config_error(body: &str) -> bool {
    let body = body.to_lowercase();
    body.contains("api key not configured")
        || body.contains("api key not valid")
        || body.contains("invalid api key")
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single scoring-provider client. Holds only immutable configuration;
/// safe to share across concurrent scoring calls.
#[derive(Clone)]
pub struct MatchingClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl MatchingClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            config,
        }
    }

    /// Obtains a match result from the provider, or from the local heuristic
    /// when the provider is misconfigured.
    ///
    /// Retries transport failures and 5xx responses up to the configured
    /// attempt budget with a fixed delay. 4xx responses are classified once
    /// and never retried.
    pub async fn score(&self, request: &MatchRequest) -> Result<MatchResult, MatchError> {
        request.validate()?;

        if self.config.api_key.trim().is_empty() {
            warn!("scoring provider API key not configured; using heuristic fallback");
            return Ok(fallback::score(request));
        }

        let payload = build_payload(request);
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), MATCH_PATH);

        let mut last_error: Option<MatchError> = None;

        for attempt in 0..self.config.retry_count {
            if attempt > 0 {
                let delay = Duration::from_millis(self.config.retry_delay_ms);
                warn!(
                    "scoring attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-api-key", &self.config.api_key)
                .json(&payload)
                .send()
                .await;

            let response = match response {
                Ok(response) => response,
                // Timeouts and connection errors are retryable transport
                // failures.
                Err(err) => {
                    warn!("scoring provider transport error: {err}");
                    last_error = Some(MatchError::ProviderUnavailable {
                        attempts: attempt + 1,
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            let status = response.status();

            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("scoring provider returned {status}: {body}");
                last_error = Some(MatchError::ProviderUnavailable {
                    attempts: attempt + 1,
                    message: format!("{status}: {body}"),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                if is_quota_error(status, &body) {
                    return Err(MatchError::QuotaExceeded(format!("{status}: {body}")));
                }
                if is_config_error(&body) {
                    warn!(
                        "scoring provider rejected configuration ({status}); using heuristic fallback"
                    );
                    return Ok(fallback::score(request));
                }
                return Err(MatchError::ProviderUnavailable {
                    attempts: attempt + 1,
                    message: format!("{status}: {body}"),
                });
            }

            let body = response
                .text()
                .await
                .map_err(|err| MatchError::MalformedResponse(err.to_string()))?;
            let raw: RawMatchResponse = serde_json::from_str(&body)
                .map_err(|err| MatchError::MalformedResponse(err.to_string()))?;

            let result = normalize(raw);
            debug!(
                "scoring provider returned score={} status={:?}",
                result.score, result.status
            );
            return Ok(result);
        }

        Err(last_error.unwrap_or_else(|| MatchError::ProviderUnavailable {
            attempts: self.config.retry_count,
            message: "retry budget exhausted".to_string(),
        }))
    }
}

#[async_trait]
impl MatchProvider for MatchingClient {
    async fn score(&self, request: &MatchRequest) -> Result<MatchResult, MatchError> {
        MatchingClient::score(self, request).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
