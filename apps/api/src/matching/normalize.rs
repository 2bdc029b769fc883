//! Score normalization: maps the provider's raw response shape onto the
//! canonical `MatchResult`.
//!
//! Every provider field is optional with an explicit default; the normalizer
//! never fails on a missing field. A structurally unparseable body is rejected
//! at the deserialization boundary in the client, not probed field-by-field
//! here.

use serde::Deserialize;

use crate::models::matching::{MatchResult, MatchSource, MatchStatus};

/// Raw provider response. The provider reports one 0-100 match score; it feeds
/// both `score` and `match_percentage` (the provider boundary does not
/// distinguish them).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMatchResponse {
    #[serde(default)]
    pub match_score: f64,
    #[serde(default)]
    pub skill_match: RawSkillMatch,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSkillMatch {
    #[serde(default)]
    pub matched: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
}

/// Builds the canonical result from a parsed provider payload. The result is
/// always tagged `Provider`.
pub fn normalize(raw: RawMatchResponse) -> MatchResult {
    let score = raw.match_score.round().clamp(0.0, 100.0) as u32;
    let status = MatchStatus::from_score(score);

    let matched = raw.skill_match.matched;
    // A sloppy provider may list a skill in both sets; matched wins.
    let missing: Vec<String> = raw
        .skill_match
        .missing
        .into_iter()
        .filter(|skill| !matched.contains(skill))
        .collect();

    MatchResult {
        score,
        match_percentage: score,
        status,
        strengths: raw.strengths,
        weaknesses: raw.weaknesses,
        recommendation: status.recommendation().to_string(),
        skills_matched: matched,
        skills_missing: missing,
        source: MatchSource::Provider,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with_score(match_score: f64) -> RawMatchResponse {
        RawMatchResponse {
            match_score,
            ..Default::default()
        }
    }

    #[test]
    fn test_score_feeds_both_numeric_fields() {
        let result = normalize(raw_with_score(83.0));
        assert_eq!(result.score, 83);
        assert_eq!(result.match_percentage, 83);
        assert_eq!(result.source, MatchSource::Provider);
    }

    #[test]
    fn test_status_thresholds_on_provider_path() {
        assert_eq!(normalize(raw_with_score(49.0)).status, MatchStatus::Rejected);
        assert_eq!(normalize(raw_with_score(50.0)).status, MatchStatus::Pending);
        assert_eq!(normalize(raw_with_score(69.0)).status, MatchStatus::Pending);
        assert_eq!(normalize(raw_with_score(70.0)).status, MatchStatus::Approved);
    }

    #[test]
    fn test_fractional_scores_round_before_bucketing() {
        assert_eq!(normalize(raw_with_score(69.4)).status, MatchStatus::Pending);
        assert_eq!(normalize(raw_with_score(69.5)).status, MatchStatus::Approved);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        assert_eq!(normalize(raw_with_score(250.0)).score, 100);
        assert_eq!(normalize(raw_with_score(-5.0)).score, 0);
    }

    #[test]
    fn test_empty_payload_defaults_to_zero_and_empty() {
        let raw: RawMatchResponse = serde_json::from_str("{}").unwrap();
        let result = normalize(raw);
        assert_eq!(result.score, 0);
        assert_eq!(result.status, MatchStatus::Rejected);
        assert!(result.strengths.is_empty());
        assert!(result.weaknesses.is_empty());
        assert!(result.skills_matched.is_empty());
        assert!(result.skills_missing.is_empty());
    }

    #[test]
    fn test_partial_payload_fills_missing_fields() {
        let raw: RawMatchResponse =
            serde_json::from_str(r#"{"match_score": 72, "strengths": ["Great SQL"]}"#).unwrap();
        let result = normalize(raw);
        assert_eq!(result.score, 72);
        assert_eq!(result.strengths, vec!["Great SQL".to_string()]);
        assert!(result.skills_matched.is_empty());
    }

    #[test]
    fn test_skill_lists_are_forced_disjoint() {
        let raw: RawMatchResponse = serde_json::from_str(
            r#"{
                "match_score": 60,
                "skill_match": {"matched": ["Rust", "SQL"], "missing": ["Rust", "Docker"]}
            }"#,
        )
        .unwrap();
        let result = normalize(raw);
        assert_eq!(result.skills_matched, vec!["Rust", "SQL"]);
        assert_eq!(result.skills_missing, vec!["Docker"]);
    }

    #[test]
    fn test_recommendation_ignores_provider_wording() {
        // Unknown fields (including any provider recommendation text) are
        // dropped; the recommendation comes from the status mapping alone.
        let raw: RawMatchResponse = serde_json::from_str(
            r#"{"match_score": 90, "recommendation": "Hire immediately!!"}"#,
        )
        .unwrap();
        let result = normalize(raw);
        assert_eq!(result.recommendation, "Continue with the selection process.");
    }
}
