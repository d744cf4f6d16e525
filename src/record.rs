use serde::{Deserialize, Serialize};

pub const NAME_FALLBACK: &str = "Unknown Assessment";
pub const DESCRIPTION_FALLBACK: &str = "Description unavailable";

/// Single-letter test type codes and their catalog labels.
pub const TEST_TYPE_MAP: [(char, &str); 8] = [
    ('A', "Ability & Aptitude"),
    ('B', "Biodata & Situational Judgement"),
    ('C', "Competencies"),
    ('D', "Development & 360"),
    ('E', "Assessment Exercises"),
    ('K', "Knowledge & Skills"),
    ('P', "Personality & Behavior"),
    ('S', "Simulations"),
];

/// Label used when no recognizable test type code appears on the page.
pub const TEST_TYPE_FALLBACK: &str = "Knowledge & Skills";

pub fn test_type_label(code: char) -> Option<&'static str> {
    TEST_TYPE_MAP
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Support {
    Yes,
    No,
}

/// One extracted assessment, persisted as one JSON artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub url: String,
    pub name: String,
    pub description: String,
    pub job_levels: Vec<String>,
    pub languages: Vec<String>,
    pub duration: Option<u32>,
    pub test_type: Vec<String>,
    pub remote_support: Support,
    pub adaptive_support: Support,
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AssessmentRecord {
        AssessmentRecord {
            url: "https://www.shl.com/products/product-catalog/view/verify-g-plus/".into(),
            name: "Verify G+".into(),
            description: "General cognitive ability test.".into(),
            job_levels: vec!["Graduate".into(), "Manager".into()],
            languages: vec!["English (USA)".into(), "German".into()],
            duration: Some(36),
            test_type: vec!["Ability & Aptitude".into()],
            remote_support: Support::Yes,
            adaptive_support: Support::Yes,
        }
    }

    #[test]
    fn support_serializes_as_yes_no() {
        assert_eq!(serde_json::to_string(&Support::Yes).unwrap(), "\"Yes\"");
        assert_eq!(serde_json::to_string(&Support::No).unwrap(), "\"No\"");
    }

    #[test]
    fn record_round_trips_field_for_field() {
        let record = sample();
        let json = serde_json::to_string_pretty(&record).unwrap();
        let back: AssessmentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        // Sequence order survives the trip
        assert_eq!(back.job_levels, vec!["Graduate", "Manager"]);
        assert_eq!(back.languages[1], "German");
    }

    #[test]
    fn vocabulary_covers_all_eight_codes() {
        for code in ['A', 'B', 'C', 'D', 'E', 'K', 'P', 'S'] {
            assert!(test_type_label(code).is_some());
        }
        assert_eq!(test_type_label('Z'), None);
        assert_eq!(test_type_label('K'), Some("Knowledge & Skills"));
    }
}
