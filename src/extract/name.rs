use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::error::ScrapeError;
use crate::record::NAME_FALLBACK;

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

/// Substrings that mark the page as an upstream error, not an assessment.
const ERROR_SIGNATURES: [&str; 3] = ["error", "gateway timeout", "404"];

/// First heading's text, or the fallback when no heading renders. A heading
/// matching an error signature fails the whole page.
pub fn extract(doc: &Html) -> Result<String, ScrapeError> {
    let name = doc
        .select(&H1)
        .next()
        .map(super::element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NAME_FALLBACK.to_string());

    let lower = name.to_lowercase();
    if ERROR_SIGNATURES.iter().any(|sig| lower.contains(sig)) {
        return Err(ScrapeError::ErrorPageDetected(name));
    }
    Ok(name)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_heading_wins() {
        let doc = Html::parse_document("<h1> Verify  Numerical </h1><h1>Other</h1>");
        assert_eq!(extract(&doc).unwrap(), "Verify Numerical");
    }

    #[test]
    fn missing_heading_uses_fallback() {
        let doc = Html::parse_document("<p>no heading here</p>");
        assert_eq!(extract(&doc).unwrap(), NAME_FALLBACK);
    }

    #[test]
    fn error_signatures_reject_the_page() {
        for heading in ["404 Not Found", "500 - Gateway Timeout", "Server Error"] {
            let doc = Html::parse_document(&format!("<h1>{heading}</h1>"));
            assert!(matches!(
                extract(&doc),
                Err(ScrapeError::ErrorPageDetected(_))
            ));
        }
    }
}
