use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::ScrapeError;

const LOAD_TIMEOUT: Duration = Duration::from_secs(20);
const POLL_INTERVAL: Duration = Duration::from_millis(250);
const CONSENT_SELECTOR: &str = "#onetrust-accept-btn-handler";
const CONSENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Long-lived rendering context shared by discovery and extraction: one
/// browser process, one tab, single-owner sequential use. `close` runs
/// exactly once at shutdown on every exit path.
pub struct Session {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl Session {
    /// Launch Chrome and open the working tab. Failure here is fatal to the
    /// whole run.
    pub async fn launch(headful: bool) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--disable-blink-features=AutomationControlled");
        if headful {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(|e| anyhow::anyhow!(e))?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .context("failed to launch browser")?;

        // The handler stream must be polled for the CDP connection to make
        // progress; it ends when the browser closes.
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    debug!("browser handler: {e}");
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to open browser tab")?;

        Ok(Self { browser, page, handler })
    }

    /// Navigate and block until `landmark` renders or the load timeout
    /// lapses.
    pub async fn navigate(&self, url: &str, landmark: &str) -> Result<(), ScrapeError> {
        match tokio::time::timeout(LOAD_TIMEOUT, self.page.goto(url)).await {
            Ok(result) => {
                result?;
            }
            Err(_) => return Err(ScrapeError::timeout(url, LOAD_TIMEOUT)),
        }
        self.wait_for(landmark, LOAD_TIMEOUT).await.map(|_| ())
    }

    /// Poll until an element matching `selector` exists.
    pub async fn wait_for(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Element, ScrapeError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(ScrapeError::timeout(selector, timeout));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn find_all(&self, selector: &str) -> Result<Vec<Element>, ScrapeError> {
        Ok(self.page.find_elements(selector).await?)
    }

    /// Fully rendered document HTML.
    pub async fn content(&self) -> Result<String, ScrapeError> {
        Ok(self.page.content().await?)
    }

    /// Accept the cookie banner if one shows up. An absent banner is a
    /// normal outcome, never an error for the caller.
    pub async fn dismiss_consent_banner(&self) {
        match self.wait_for(CONSENT_SELECTOR, CONSENT_TIMEOUT).await {
            Ok(button) => match button.click().await {
                Ok(_) => {
                    debug!("consent banner dismissed");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
                Err(e) => warn!("consent banner present but click failed: {e}"),
            },
            Err(_) => debug!("no consent banner within {CONSENT_TIMEOUT:?}"),
        }
    }

    /// Shut the browser down and reap the handler task.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("browser close failed: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("browser did not exit cleanly: {e}");
        }
        self.handler.abort();
    }
}
