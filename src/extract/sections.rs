use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static H4: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h4").unwrap());

/// Label-then-sibling pattern: find the `h4` whose text equals `label`,
/// read the first `p` element that follows it. An absent label is not an
/// error, just `None`.
pub fn labeled_text(doc: &Html, label: &str) -> Option<String> {
    let heading = doc.select(&H4).find(|h| super::element_text(*h) == label)?;
    let para = heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "p")?;
    let text = super::element_text(para);
    (!text.is_empty()).then_some(text)
}

/// Comma-separated variant for the list-valued sections.
pub fn labeled_list(doc: &Html, label: &str) -> Vec<String> {
    labeled_text(doc, label)
        .map(|text| {
            text.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <div>
          <h4>Description</h4>
          <p>Measures numerical reasoning.</p>
        </div>
        <div>
          <h4>Job levels</h4>
          <p>Entry-Level, Graduate, </p>
        </div>
        <div>
          <h4>Languages</h4>
        </div>"#;

    #[test]
    fn finds_paragraph_after_matching_heading() {
        let doc = Html::parse_document(PAGE);
        assert_eq!(
            labeled_text(&doc, "Description").as_deref(),
            Some("Measures numerical reasoning.")
        );
    }

    #[test]
    fn list_splits_on_commas_and_drops_empties() {
        let doc = Html::parse_document(PAGE);
        assert_eq!(labeled_list(&doc, "Job levels"), vec!["Entry-Level", "Graduate"]);
    }

    #[test]
    fn missing_label_or_paragraph_yields_default() {
        let doc = Html::parse_document(PAGE);
        assert_eq!(labeled_text(&doc, "Assessment length"), None);
        // Heading present but no following paragraph
        assert_eq!(labeled_text(&doc, "Languages"), None);
        assert!(labeled_list(&doc, "Languages").is_empty());
    }
}
