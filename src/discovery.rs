use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ScrapeError;
use crate::session::Session;

pub const CATALOG_ROOT: &str = "https://www.shl.com/products/product-catalog/";

const DETAIL_PATH: &str = "/product-catalog/view/";
/// Bundled/job-focused product variants are out of scope for this catalog.
const EXCLUDED_MARKERS: [&str; 2] = ["solution", "job-focused-assessment"];

const LISTING_LANDMARK: &str = "table";
const ARROW_SELECTOR: &str = ".pagination__arrow";
const TABLE_TIMEOUT: Duration = Duration::from_secs(20);
const SETTLE: Duration = Duration::from_secs(2);
const PRE_CLICK_PAUSE: Duration = Duration::from_secs(1);
const CLICKABLE_TIMEOUT: Duration = Duration::from_secs(5);
const CLICKABLE_POLL: Duration = Duration::from_millis(250);

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Why the pagination walk ended. All of these are normal termination,
/// never failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// An iteration added zero new links.
    Stalled,
    /// No pagination control on the page.
    NoControl,
    /// The "next" control is present but disabled.
    ControlDisabled,
    /// A transient browser fault while working the control; stop rather
    /// than loop forever.
    ControlError,
}

pub struct Discovery {
    pub links: Vec<String>,
    pub pages_visited: u32,
    pub stop: StopReason,
}

/// Monotonic link accumulator: exact-value dedup, discovery order.
#[derive(Default)]
pub struct LinkSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl LinkSet {
    pub fn insert(&mut self, link: String) -> bool {
        if self.seen.insert(link.clone()) {
            self.ordered.push(link);
            true
        } else {
            false
        }
    }

    /// Number of links that were actually new.
    pub fn absorb(&mut self, links: impl IntoIterator<Item = String>) -> usize {
        links.into_iter().filter(|l| self.insert(l.clone())).count()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// Cheap reachability probe of the catalog root, before any browser work.
/// An error here aborts the run.
pub async fn probe_root() -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let resp = client
        .get(CATALOG_ROOT)
        .send()
        .await
        .with_context(|| format!("catalog root unreachable: {CATALOG_ROOT}"))?;
    debug!("catalog root probe: HTTP {}", resp.status());
    Ok(())
}

/// Walk the paginated listing and return every qualifying detail-page link.
/// Only a failure to reach the root at all is an error; everything after
/// that degrades to termination with whatever was collected.
pub async fn discover_links(session: &Session) -> Result<Discovery> {
    info!("starting discovery at {CATALOG_ROOT}");
    session
        .navigate(CATALOG_ROOT, LISTING_LANDMARK)
        .await
        .context("failed to reach the catalog root")?;
    session.dismiss_consent_banner().await;

    let mut set = LinkSet::default();
    let mut pages_visited = 1u32;

    let stop = loop {
        if let Err(e) = session.wait_for(LISTING_LANDMARK, TABLE_TIMEOUT).await {
            warn!("listing table never rendered on page {pages_visited}: {e}");
            break StopReason::ControlError;
        }
        tokio::time::sleep(SETTLE).await;

        let html = match session.content().await {
            Ok(html) => html,
            Err(e) => {
                warn!("could not read page {pages_visited}: {e}");
                break StopReason::ControlError;
            }
        };

        let new = set.absorb(collect_detail_links(&html));
        info!("page {pages_visited}: {new} new links, {} total", set.len());
        if new == 0 {
            break StopReason::Stalled;
        }

        match advance(session).await {
            Ok(Advance::Clicked) => pages_visited += 1,
            Ok(Advance::NoControl) => break StopReason::NoControl,
            Ok(Advance::Disabled) => break StopReason::ControlDisabled,
            Err(e) => {
                warn!("pagination control failed on page {pages_visited}: {e}");
                break StopReason::ControlError;
            }
        }
    };

    info!(
        "discovery finished: {} links over {} pages ({:?})",
        set.len(),
        pages_visited,
        stop
    );
    Ok(Discovery {
        links: set.into_vec(),
        pages_visited,
        stop,
    })
}

enum Advance {
    Clicked,
    NoControl,
    Disabled,
}

/// Find the "next" arrow (last pagination arrow), check its state, click it
/// and let the listing settle.
async fn advance(session: &Session) -> Result<Advance, ScrapeError> {
    let arrows = session.find_all(ARROW_SELECTOR).await?;
    let Some(next) = arrows.last() else {
        return Ok(Advance::NoControl);
    };

    let class = next.attribute("class").await?.unwrap_or_default();
    if class.contains("disabled") {
        return Ok(Advance::Disabled);
    }

    next.scroll_into_view().await?;
    tokio::time::sleep(PRE_CLICK_PAUSE).await;
    wait_clickable(next).await?;
    next.click().await?;
    tokio::time::sleep(SETTLE).await;
    Ok(Advance::Clicked)
}

/// Poll until the element has a clickable point (visible, laid out), so the
/// click lands after any reflow from scrolling.
async fn wait_clickable(el: &chromiumoxide::element::Element) -> Result<(), ScrapeError> {
    let deadline = tokio::time::Instant::now() + CLICKABLE_TIMEOUT;
    loop {
        if el.clickable_point().await.is_ok() {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(ScrapeError::timeout(ARROW_SELECTOR, CLICKABLE_TIMEOUT));
        }
        tokio::time::sleep(CLICKABLE_POLL).await;
    }
}

/// Harvest qualifying detail-page links from rendered listing HTML.
/// Relative hrefs are resolved against the catalog root.
pub fn collect_detail_links(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let base = Url::parse(CATALOG_ROOT).expect("catalog root is a valid URL");

    doc.select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .map(String::from)
        .filter(|href| qualifies(href))
        .collect()
}

fn qualifies(href: &str) -> bool {
    let lower = href.to_lowercase();
    lower.contains(DETAIL_PATH) && !EXCLUDED_MARKERS.iter().any(|m| lower.contains(m))
}

// ── Tests ──
