//! Signal extraction: coarse skill and experience-years signals pulled out of
//! free-form CV text with keyword and pattern matching.
//!
//! Pure functions of the text. No network, no clock, no state.

use lazy_static::lazy_static;
use regex::Regex;

/// Known skill vocabulary tested against CV text. Substring semantics,
/// case-insensitive: "react" matches inside "reactjs" too.
const SKILL_VOCABULARY: &[&str] = &[
    // Languages
    "javascript",
    "typescript",
    "python",
    "java",
    "rust",
    "golang",
    "c#",
    "c++",
    "php",
    "ruby",
    "kotlin",
    "swift",
    // Frontend
    "react",
    "angular",
    "vue",
    "next.js",
    "html",
    "css",
    "tailwind",
    // Backend and data
    "node.js",
    "django",
    "spring",
    "laravel",
    ".net",
    "sql",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "graphql",
    "rest",
    // Infrastructure
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "terraform",
    "ci/cd",
    "linux",
    "git",
    // Practices and soft skills
    "agile",
    "scrum",
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "project management",
];

/// Years beyond this are treated as noise (birth years, phone fragments).
const MAX_CREDIBLE_YEARS: u32 = 50;

lazy_static! {
    /// Prioritized experience patterns. Tried in order; the first match with a
    /// credible year count wins.
    static ref EXPERIENCE_PATTERNS: Vec<Regex> = vec![
        // "7 years of experience", "7+ years of professional experience"
        Regex::new(r"(\d{1,2})\s*\+?\s*years?\s+of\s+(?:\w+\s+)?experience").unwrap(),
        // "experience: 7 years", "experience of 7 years"
        Regex::new(r"experience\s*(?::|of)\s*(\d{1,2})\s*\+?\s*years?").unwrap(),
        // "7 years as a backend engineer", "7 years in fintech"
        Regex::new(r"(\d{1,2})\s*\+?\s*years?\s+(?:as|in)\b").unwrap(),
        // "over 7 years", "more than 7 years"
        Regex::new(r"(?:over|more than)\s+(\d{1,2})\s*years?").unwrap(),
    ];
}

/// Outcome of experience extraction. A tagged result instead of an optional
/// keeps the first-match-wins policy explicit at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceSignal {
    Found(u32),
    NotFound,
}

/// Returns the vocabulary skills present in the text, in vocabulary order.
/// Lowercase tokens; callers compare case-insensitively against them.
pub fn extract_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| haystack.contains(**skill))
        .map(|skill| skill.to_string())
        .collect()
}

/// Scans the text with the prioritized pattern list and returns the first
/// credible year count (0 < n <= 50), or `NotFound`.
pub fn extract_experience_years(text: &str) -> ExperienceSignal {
    let haystack = text.to_lowercase();
    for pattern in EXPERIENCE_PATTERNS.iter() {
        for caps in pattern.captures_iter(&haystack) {
            if let Ok(years) = caps[1].parse::<u32>() {
                if years > 0 && years <= MAX_CREDIBLE_YEARS {
                    return ExperienceSignal::Found(years);
                }
            }
        }
    }
    ExperienceSignal::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_skills_is_case_insensitive() {
        let skills = extract_skills("Senior engineer: RUST, Docker and PostgreSQL.");
        assert!(skills.contains(&"rust".to_string()));
        assert!(skills.contains(&"docker".to_string()));
        assert!(skills.contains(&"postgresql".to_string()));
    }

    #[test]
    fn test_extract_skills_accepts_substring_matches() {
        // No word-boundary checking: "reactjs" still counts as react.
        let skills = extract_skills("Built dashboards with ReactJS.");
        assert!(skills.contains(&"react".to_string()));
    }

    #[test]
    fn test_extract_skills_returns_vocabulary_order() {
        let first = extract_skills("docker before rust in the text");
        let second = extract_skills("rust before docker in the text");
        // Output order depends on the vocabulary, not on text position.
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_skills_empty_for_unrelated_text() {
        assert!(extract_skills("Fluent in Esperanto. Licensed beekeeper.").is_empty());
    }

    #[test]
    fn test_experience_years_of_experience_pattern() {
        assert_eq!(
            extract_experience_years("I have 3 years of experience in backend work."),
            ExperienceSignal::Found(3)
        );
    }

    #[test]
    fn test_experience_with_qualifier_word() {
        assert_eq!(
            extract_experience_years("12+ years of professional experience."),
            ExperienceSignal::Found(12)
        );
    }

    #[test]
    fn test_experience_colon_pattern() {
        assert_eq!(
            extract_experience_years("Experience: 7 years. References on request."),
            ExperienceSignal::Found(7)
        );
    }

    #[test]
    fn test_experience_years_as_pattern() {
        assert_eq!(
            extract_experience_years("5 years as a data engineer at Acme."),
            ExperienceSignal::Found(5)
        );
    }

    #[test]
    fn test_experience_over_pattern() {
        assert_eq!(
            extract_experience_years("Worked in fintech for over 9 years."),
            ExperienceSignal::Found(9)
        );
    }

    #[test]
    fn test_experience_pattern_priority_is_fixed() {
        // Both pattern 1 and pattern 3 match; pattern 1 wins regardless of
        // where each phrase sits in the text.
        let text = "2 years as an intern, then 8 years of experience as an engineer.";
        assert_eq!(extract_experience_years(text), ExperienceSignal::Found(8));
    }

    #[test]
    fn test_experience_zero_years_is_not_found() {
        assert_eq!(
            extract_experience_years("0 years of experience so far."),
            ExperienceSignal::NotFound
        );
    }

    #[test]
    fn test_experience_implausible_years_is_not_found() {
        assert_eq!(
            extract_experience_years("60 years of experience."),
            ExperienceSignal::NotFound
        );
    }

    #[test]
    fn test_experience_not_found_without_numbers() {
        assert_eq!(
            extract_experience_years("Extensive experience with many systems."),
            ExperienceSignal::NotFound
        );
    }
}
