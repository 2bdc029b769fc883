//! Heuristic fallback scorer.
//!
//! Synthesizes a complete match result from extracted CV signals when the
//! remote provider cannot be used. Pure and deterministic: a fixed request
//! always yields an identical result, so this module is unit-testable with
//! zero mocking.

use tracing::debug;

use crate::matching::extraction::{extract_experience_years, extract_skills, ExperienceSignal};
use crate::models::matching::{MatchRequest, MatchResult, MatchSource, MatchStatus};

/// Weight of the skill component in the blended score.
const SKILL_WEIGHT: f64 = 0.7;
/// Weight of the experience component in the blended score.
const EXPERIENCE_WEIGHT: f64 = 0.3;
/// Skill score assumed when the vacancy lists no required skills.
const DEFAULT_SKILL_SCORE: f64 = 70.0;

/// Scores a request locally. The result is always tagged `Fallback`.
pub fn score(request: &MatchRequest) -> MatchResult {
    let extracted = extract_skills(&request.cv_text);
    let (matched, missing) = partition_skills(&request.required_skills, &extracted);

    let skill_score = if request.required_skills.is_empty() {
        DEFAULT_SKILL_SCORE
    } else {
        100.0 * matched.len() as f64 / request.required_skills.len() as f64
    };

    let signal = extract_experience_years(&request.cv_text);
    let years = match signal {
        ExperienceSignal::Found(years) => years,
        // Unknown counts as one year so the ratio below stays defined.
        ExperienceSignal::NotFound => 1,
    };
    let required_years = request.required_experience_years.max(1);
    let experience_score = (100.0 * years as f64 / required_years as f64).min(100.0);

    let final_score = (SKILL_WEIGHT * skill_score + EXPERIENCE_WEIGHT * experience_score)
        .round()
        .clamp(0.0, 100.0) as u32;
    let status = MatchStatus::from_score(final_score);

    debug!(
        "fallback scoring: skill={skill_score:.1} experience={experience_score:.1} final={final_score}"
    );

    MatchResult {
        score: final_score,
        match_percentage: final_score,
        status,
        strengths: build_strengths(&matched, signal),
        weaknesses: build_weaknesses(&missing, signal, request.required_experience_years),
        recommendation: status.recommendation().to_string(),
        skills_matched: matched,
        skills_missing: missing,
        source: MatchSource::Fallback,
    }
}

/// Splits the required skills into matched and missing, preserving the
/// vacancy's spelling and order. Membership is case-insensitive against the
/// extracted (lowercase) skill set.
fn partition_skills(required: &[String], extracted: &[String]) -> (Vec<String>, Vec<String>) {
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for skill in required {
        let lowered = skill.to_lowercase();
        if extracted.iter().any(|found| *found == lowered) {
            matched.push(skill.clone());
        } else {
            missing.push(skill.clone());
        }
    }
    (matched, missing)
}

fn build_strengths(matched: &[String], signal: ExperienceSignal) -> Vec<String> {
    let mut strengths = Vec::new();
    if !matched.is_empty() {
        strengths.push(format!(
            "Covers {} required skill(s): {}",
            matched.len(),
            matched.join(", ")
        ));
    }
    if let ExperienceSignal::Found(years) = signal {
        strengths.push(format!("CV states {years} year(s) of experience"));
    }
    strengths
}

fn build_weaknesses(
    missing: &[String],
    signal: ExperienceSignal,
    required_years: u32,
) -> Vec<String> {
    let mut weaknesses = Vec::new();
    if !missing.is_empty() {
        weaknesses.push(format!(
            "Missing {} required skill(s): {}",
            missing.len(),
            missing.join(", ")
        ));
    }
    match signal {
        ExperienceSignal::Found(years) if years < required_years => {
            weaknesses.push(format!(
                "{years} year(s) of experience stated, vacancy asks for {required_years}"
            ));
        }
        ExperienceSignal::NotFound => {
            weaknesses.push("No explicit years of experience stated in the CV".to_string());
        }
        ExperienceSignal::Found(_) => {}
    }
    weaknesses
}
