use std::sync::LazyLock;

use regex::Regex;

/// Ordered patterns for the "Assessment length" text; first match wins.
static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)(?:max\s*)?(\d+)\s*min").unwrap(),
        Regex::new(r"(?i)Approximate Completion Time in minutes\s*=\s*(?:max\s*)?(\d+)").unwrap(),
        Regex::new(r"(?i)(\d+)\s*minutes?").unwrap(),
        Regex::new(r"=\s*(\d+)$").unwrap(),
    ]
});

/// Minutes from free-form duration text. A zero match counts as no match so
/// a present duration is always positive.
pub fn parse_minutes(text: &str) -> Option<u32> {
    let text = text.trim();
    PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|&minutes| minutes > 0)
}

// ── Tests ──
