use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::error::ScrapeError;
use crate::record::AssessmentRecord;
use crate::session::Session;
use crate::{discovery, extract, store};

/// Advisory floor for a healthy full-catalog run; falling under it warns
/// but never fails.
pub const EXPECTED_MIN_ASSESSMENTS: usize = 377;

const ITEM_DELAY: Duration = Duration::from_millis(500);
const DETAIL_SETTLE: Duration = Duration::from_millis(1500);
const DETAIL_LANDMARK: &str = "h1";

pub struct RunReport {
    pub links_found: usize,
    pub saved: usize,
    pub failed: usize,
}

impl RunReport {
    fn new(links_found: usize) -> Self {
        Self {
            links_found,
            saved: 0,
            failed: 0,
        }
    }

    /// Persist a successful record or count the failure. Every outcome
    /// bumps exactly one counter, so `saved + failed == links_found` after
    /// a full run.
    fn absorb(
        &mut self,
        out_dir: &Path,
        link: &str,
        outcome: Result<AssessmentRecord, ScrapeError>,
    ) -> Result<()> {
        match outcome {
            Ok(record) => {
                store::save_record(out_dir, &record)?;
                debug!(
                    "saved {:?}: types={:?} duration={:?}",
                    record.name, record.test_type, record.duration
                );
                self.saved += 1;
            }
            Err(e) => {
                warn!("skipping {link}: {e}");
                self.failed += 1;
            }
        }
        Ok(())
    }

    pub fn print(&self) {
        println!("\nTotal links found: {}", self.links_found);
        println!("Successfully saved: {}", self.saved);
        println!("Failed: {}", self.failed);
        println!("Files location: {}/", store::OUTPUT_DIR);
    }
}

/// Full run: discovery, then sequential extraction with per-item failure
/// isolation. One failing link never aborts the batch; every link ends up
/// either saved or counted as failed.
pub async fn run(session: &Session, limit: Option<usize>) -> Result<RunReport> {
    let discovery = discovery::discover_links(session).await?;
    let mut links = discovery.links;

    if links.len() < EXPECTED_MIN_ASSESSMENTS {
        warn!(
            "only {} links found, expected at least {} (pagination issue or site change?)",
            links.len(),
            EXPECTED_MIN_ASSESSMENTS
        );
    }
    if let Some(n) = limit {
        links.truncate(n);
    }

    let pb = ProgressBar::new(links.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let out_dir = Path::new(store::OUTPUT_DIR);
    let mut report = RunReport::new(links.len());

    for link in &links {
        let outcome = extract_one(session, link).await;
        report.absorb(out_dir, link, outcome)?;
        pb.inc(1);
        // Cooperative pause to keep the request rate polite
        tokio::time::sleep(ITEM_DELAY).await;
    }
    pb.finish_and_clear();

    info!(
        "extraction finished: {} saved, {} failed of {} links",
        report.saved, report.failed, report.links_found
    );
    if report.saved < EXPECTED_MIN_ASSESSMENTS {
        warn!(
            "only {} records saved, expected at least {}",
            report.saved, EXPECTED_MIN_ASSESSMENTS
        );
    }

    Ok(report)
}

/// Render one detail page and extract its record.
pub async fn extract_one(session: &Session, url: &str) -> Result<AssessmentRecord, ScrapeError> {
    session.navigate(url, DETAIL_LANDMARK).await?;
    tokio::time::sleep(DETAIL_SETTLE).await;
    let html = session.content().await?;
    extract::parse_detail_page(url, &html)
}

// ── Tests ──
