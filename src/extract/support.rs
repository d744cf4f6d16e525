use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::record::Support;

static ANY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("*").unwrap());
static SVG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("svg").unwrap());

static REMOTE_TICK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Remote Testing:\s*✓").unwrap());
static REMOTE_YES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Remote Testing:\s*Yes").unwrap());
static ADAPTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(adaptive|irt)\b").unwrap());

/// Remote-testing heuristic, in order: an icon glyph near the "Remote
/// Testing" marker, then explicit text patterns, then a default of Yes.
/// The Yes bias on ambiguity is deliberate; the catalog gives no stronger
/// signal. The defaulted case is logged so layout drift stays visible.
pub fn remote(url: &str, doc: &Html, page_text: &str) -> Support {
    for el in doc.select(&ANY) {
        if !has_direct_text(el, "Remote Testing") {
            continue;
        }
        let outer = el.html().to_lowercase();
        if outer.contains("svg") || outer.contains('✓') || outer.contains("check") {
            return Support::Yes;
        }
        if let Some(parent) = el.parent().and_then(ElementRef::wrap) {
            if parent.select(&SVG).next().is_some() {
                return Support::Yes;
            }
        }
    }

    if REMOTE_TICK_RE.is_match(page_text) || REMOTE_YES_RE.is_match(page_text) {
        return Support::Yes;
    }

    debug!("no remote-testing signal on {url}, defaulting to Yes (low confidence)");
    Support::Yes
}

/// Yes iff the page mentions adaptive testing or IRT as a whole word.
pub fn adaptive(page_text: &str) -> Support {
    if ADAPTIVE_RE.is_match(page_text) {
        Support::Yes
    } else {
        Support::No
    }
}

fn has_direct_text(el: ElementRef<'_>, needle: &str) -> bool {
    el.children()
        .filter_map(|c| c.value().as_text())
        .any(|t| t.text.contains(needle))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::page_text;

    fn check(html: &str) -> Support {
        let doc = Html::parse_document(html);
        let text = page_text(&doc);
        remote("https://example.invalid/x", &doc, &text)
    }

    #[test]
    fn svg_near_marker_means_yes() {
        let html = r#"<p>Remote Testing: <span class="circle"><svg viewBox="0 0 10 10"></svg></span></p>"#;
        assert_eq!(check(html), Support::Yes);
    }

    #[test]
    fn text_patterns_mean_yes() {
        assert_eq!(check("<p>Remote Testing: ✓</p>"), Support::Yes);
        assert_eq!(check("<div><b>Remote Testing:</b> yes</div>"), Support::Yes);
    }

    #[test]
    fn ambiguity_defaults_to_yes() {
        assert_eq!(check("<p>Nothing about delivery mode here.</p>"), Support::Yes);
    }

    #[test]
    fn adaptive_needs_whole_word() {
        assert_eq!(adaptive("An adaptive numerical test"), Support::Yes);
        assert_eq!(adaptive("Scored with IRT models"), Support::Yes);
        // Substrings don't count: "shirt" contains "irt"
        assert_eq!(adaptive("Retail shirt folding assessment"), Support::No);
        assert_eq!(adaptive("Fixed-form test battery"), Support::No);
    }
}
