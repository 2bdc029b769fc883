//! Domain value objects for the matching engine.
//!
//! Everything here is a per-call immutable value: built for one scoring
//! operation, serialized back to the caller, never persisted by this service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::MatchError;

/// Score at or above which a candidate is approved outright.
pub const APPROVAL_THRESHOLD: u32 = 70;
/// Score at or above which a candidate is held for manual review.
pub const REVIEW_THRESHOLD: u32 = 50;

/// Input to a single CV-against-job scoring operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Job title. Only forwarded to the provider payload.
    #[serde(default)]
    pub job_title: String,
    pub job_description: String,
    pub cv_text: String,
    /// Hard skills the vacancy requires, in posting order. May be empty.
    #[serde(default)]
    pub required_skills: Vec<String>,
    /// Required years of experience; 0 means the vacancy did not specify.
    #[serde(default)]
    pub required_experience_years: u32,
}

impl MatchRequest {
    /// Fails fast when either free-text field is blank. A provider call is
    /// never attempted for an invalid request.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.cv_text.trim().is_empty() {
            return Err(MatchError::Validation(
                "cv_text cannot be empty".to_string(),
            ));
        }
        if self.job_description.trim().is_empty() {
            return Err(MatchError::Validation(
                "job_description cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Job-side requirements shared by every candidate in a bulk run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    #[serde(default)]
    pub job_title: String,
    pub job_description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub required_experience_years: u32,
}

impl JobSpec {
    /// Job-level validation. Per-candidate problems are handled per item and
    /// never fail the bulk call.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.job_description.trim().is_empty() {
            return Err(MatchError::Validation(
                "job_description cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Pairs these job requirements with one candidate's CV text.
    pub fn to_request(&self, cv_text: String) -> MatchRequest {
        MatchRequest {
            job_title: self.job_title.clone(),
            job_description: self.job_description.clone(),
            cv_text,
            required_skills: self.required_skills.clone(),
            required_experience_years: self.required_experience_years,
        }
    }
}

/// Decision bucket derived from the numeric score.
///
/// Thresholds are fixed constants shared by the provider-path normalizer and
/// the heuristic fallback, so both paths bucket identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchStatus {
    Approved,
    Pending,
    Rejected,
}

impl MatchStatus {
    pub fn from_score(score: u32) -> Self {
        if score >= APPROVAL_THRESHOLD {
            Self::Approved
        } else if score >= REVIEW_THRESHOLD {
            Self::Pending
        } else {
            Self::Rejected
        }
    }

    /// Fixed recommendation wording per status. Never varies with provider
    /// output.
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Approved => "Continue with the selection process.",
            Self::Pending => "Requires manual review.",
            Self::Rejected => "Does not meet the minimum requirements.",
        }
    }
}

/// Where a result came from: the remote provider or the local heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchSource {
    Provider,
    Fallback,
}

/// Canonical scoring output. Both numeric fields are always in 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u32,
    pub match_percentage: u32,
    pub status: MatchStatus,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendation: String,
    pub skills_matched: Vec<String>,
    pub skills_missing: Vec<String>,
    pub source: MatchSource,
}

/// One candidate's identity plus CV text for a bulk run. Transient: built per
/// call and discarded after result collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkMatchItem {
    pub candidate_id: Uuid,
    pub cv_text: String,
}

/// One row of bulk output.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateScore {
    pub candidate_id: Uuid,
    pub result: MatchResult,
}
