use std::sync::LazyLock;

use regex::Regex;

use crate::record::{test_type_label, TEST_TYPE_FALLBACK};

static CODES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Test Type:\s*([A-Z](?:\s+[A-Z])*)").unwrap());

/// Scan page text for "Test Type:" followed by single-letter codes and map
/// them through the closed vocabulary. Never returns an empty list.
pub fn extract(page_text: &str) -> Vec<String> {
    let mut labels = Vec::new();
    if let Some(caps) = CODES_RE.captures(page_text) {
        for code in caps[1].split_whitespace() {
            let letter = code.chars().next().unwrap_or(' ');
            if let Some(label) = test_type_label(letter) {
                labels.push(label.to_string());
            }
        }
    }
    if labels.is_empty() {
        labels.push(TEST_TYPE_FALLBACK.to_string());
    }
    labels
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::extract;

    #[test]
    fn maps_codes_in_order() {
        assert_eq!(
            extract("Languages English Test Type: K P Remote Testing"),
            vec!["Knowledge & Skills", "Personality & Behavior"]
        );
        assert_eq!(extract("Test Type: S"), vec!["Simulations"]);
    }

    #[test]
    fn unrecognized_codes_are_skipped() {
        // Trailing capitalized word contributes a bogus single-letter code
        assert_eq!(
            extract("Test Type: A Remote"),
            vec!["Ability & Aptitude"]
        );
    }

    #[test]
    fn absent_or_unknown_falls_back() {
        assert_eq!(extract("no marker here"), vec!["Knowledge & Skills"]);
        assert_eq!(extract("Test Type: Q"), vec!["Knowledge & Skills"]);
    }
}
