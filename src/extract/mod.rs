pub mod duration;
pub mod name;
pub mod sections;
pub mod support;
pub mod test_type;

use scraper::{ElementRef, Html};

use crate::error::ScrapeError;
use crate::record::{AssessmentRecord, DESCRIPTION_FALLBACK};

/// Parse one rendered detail page into a record. Each field extractor is
/// independent: a missing label or unmatched pattern leaves that field on
/// its default and never touches the others. Only an error-page heading
/// fails the whole page.
pub fn parse_detail_page(url: &str, html: &str) -> Result<AssessmentRecord, ScrapeError> {
    if html.trim().is_empty() {
        return Err(ScrapeError::Parse("empty document".to_string()));
    }

    let doc = Html::parse_document(html);
    let text = page_text(&doc);

    let name = name::extract(&doc)?;

    let description = sections::labeled_text(&doc, "Description")
        .unwrap_or_else(|| DESCRIPTION_FALLBACK.to_string());
    let job_levels = sections::labeled_list(&doc, "Job levels");
    let languages = sections::labeled_list(&doc, "Languages");
    let duration = sections::labeled_text(&doc, "Assessment length")
        .and_then(|t| duration::parse_minutes(&t));

    let test_type = test_type::extract(&text);
    let remote_support = support::remote(url, &doc, &text);
    let adaptive_support = support::adaptive(&text);

    Ok(AssessmentRecord {
        url: url.to_string(),
        name,
        description,
        job_levels,
        languages,
        duration,
        test_type,
        remote_support,
        adaptive_support,
    })
}

/// Flatten the document to space-joined text for whole-page pattern scans.
pub(crate) fn page_text(doc: &Html) -> String {
    squash_ws(&doc.root_element().text().collect::<Vec<_>>().join(" "))
}

pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    squash_ws(&el.text().collect::<Vec<_>>().join(" "))
}

pub(crate) fn squash_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── Tests ──
