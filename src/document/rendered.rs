//! Rendered-page document source.
//!
//! The attractions portal builds parts of its card markup with scripts, so
//! a plain HTTP fetch can miss fields a browser would show. This adapter
//! drives a headless Chrome, waits for the page to settle, snapshots the
//! rendered markup and serves it through the same [`Document`] capability
//! set as the static adapter. The browser process is torn down when the
//! [`RenderedBrowser`] is dropped, on every exit path.

use std::ffi::OsStr;
use std::time::Duration;

use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions};
use tracing::info;

use crate::document::{Document, StaticDocument};

pub struct RenderedBrowser {
    browser: Browser,
}

impl RenderedBrowser {
    pub fn launch() -> Result<Self> {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .idle_browser_timeout(Duration::from_secs(90))
            .args(vec![
                OsStr::new("--disable-gpu"),
                OsStr::new("--window-size=1920,1080"),
                OsStr::new("--disable-blink-features=AutomationControlled"),
                OsStr::new("--lang=ru-RU"),
            ])
            .build()
            .context("building browser launch options")?;

        let browser = Browser::new(launch_options).context("launching headless browser")?;
        Ok(Self { browser })
    }

    /// Navigate to `url`, wait for the page to settle and wrap the rendered
    /// markup as a [`Document`].
    pub fn load(&self, url: &str) -> Result<RenderedDocument> {
        info!(url, "loading page in headless browser");
        let tab = self.browser.new_tab().context("opening tab")?;
        tab.navigate_to(url).context("navigating")?;
        tab.wait_until_navigated().context("waiting for page load")?;
        // Give late scripts the same grace period the static sites need.
        std::thread::sleep(Duration::from_secs(3));

        let html = tab.get_content().context("reading rendered markup")?;
        let _ = tab.close(true);
        Ok(RenderedDocument::from_snapshot(&html))
    }
}

/// Snapshot of a rendered page. Same capability set as [`StaticDocument`];
/// the cascades cannot tell the two apart.
pub struct RenderedDocument {
    inner: StaticDocument,
}

impl RenderedDocument {
    fn from_snapshot(html: &str) -> Self {
        Self {
            inner: StaticDocument::parse(html),
        }
    }
}

impl Document for RenderedDocument {
    fn texts(&self, selector: &str) -> Vec<String> {
        self.inner.texts(selector)
    }

    fn attrs(&self, selector: &str, attr: &str) -> Vec<String> {
        self.inner.attrs(selector, attr)
    }

    fn texts_with_parent(&self, selector: &str) -> Vec<(String, String)> {
        self.inner.texts_with_parent(selector)
    }

    fn full_text(&self) -> String {
        self.inner.full_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serves_the_document_capabilities() {
        let doc = RenderedDocument::from_snapshot(
            "<html><body><h1>Летний сад</h1><p>Адрес: наб. Кутузова, 2</p></body></html>",
        );
        assert_eq!(doc.texts("h1"), vec!["Летний сад"]);
        assert!(doc.full_text().contains("Адрес: наб. Кутузова, 2"));
    }
}
