//! Browser infrastructure: implements `NotebookPage` with Playwright.
//!
//! `PlaywrightNotebook` owns the driver, browser, context and page of one
//! run. Call [`PlaywrightNotebook::close`] when done; dropping it tears the
//! driver down without a graceful browser shutdown.

use std::time::Duration;

use anyhow::{Context, Result};
use playwright_rs::{Browser, BrowserContext, GotoOptions, LaunchOptions, Page, Playwright};

use crate::application::ports::NotebookPage;
use crate::domain::UiTarget;

/// A live Chromium page driven through Playwright.
pub struct PlaywrightNotebook {
    _playwright: Playwright,
    browser: Browser,
    _context: BrowserContext,
    page: Page,
}

impl PlaywrightNotebook {
    /// Start the driver and open a fresh page in a new context.
    ///
    /// # Errors
    ///
    /// Returns an error if the Playwright driver or Chromium cannot start.
    pub async fn launch(headless: bool) -> Result<Self> {
        let playwright = Playwright::launch()
            .await
            .context("starting Playwright driver")?;
        let options = LaunchOptions {
            headless: Some(headless),
            ..Default::default()
        };
        let browser = playwright
            .chromium()
            .launch_with_options(options)
            .await
            .context("launching Chromium")?;
        let context = browser
            .new_context()
            .await
            .context("creating browser context")?;
        let page = context.new_page().await.context("opening page")?;
        tracing::info!(headless, "browser opened");
        Ok(Self {
            _playwright: playwright,
            browser,
            _context: context,
            page,
        })
    }

    /// Close the browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser does not shut down cleanly.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await.context("closing browser")?;
        tracing::info!("browser closed");
        Ok(())
    }

    async fn locate(&self, target: &UiTarget) -> playwright_rs::Locator {
        let selector = target.selector();
        tracing::debug!(%selector, "locate");
        self.page.locator(&selector).await
    }
}

impl NotebookPage for PlaywrightNotebook {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
        tracing::debug!(url, "goto");
        self.page
            .goto(url, Some(GotoOptions::new().timeout(timeout)))
            .await
            .with_context(|| format!("navigating to {url}"))?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.page.url())
    }

    async fn is_visible(&self, target: &UiTarget) -> Result<bool> {
        self.locate(target)
            .await
            .is_visible()
            .await
            .with_context(|| format!("checking visibility of '{target}'"))
    }

    async fn click(&self, target: &UiTarget) -> Result<()> {
        self.locate(target)
            .await
            .click(None)
            .await
            .with_context(|| format!("clicking '{target}'"))
    }

    async fn fill(&self, target: &UiTarget, text: &str) -> Result<()> {
        self.locate(target)
            .await
            .fill(text, None)
            .await
            .with_context(|| format!("filling '{target}'"))
    }

    async fn press(&self, target: &UiTarget, key: &str) -> Result<()> {
        self.locate(target)
            .await
            .press(key, None)
            .await
            .with_context(|| format!("pressing {key} in '{target}'"))
    }

    async fn inner_text(&self, target: &UiTarget) -> Result<String> {
        self.locate(target)
            .await
            .inner_text()
            .await
            .with_context(|| format!("reading text of '{target}'"))
    }

    async fn text_contents(&self, target: &UiTarget) -> Result<Vec<String>> {
        let locator = self.locate(target).await;
        let count = locator
            .count()
            .await
            .with_context(|| format!("counting '{target}'"))?;
        let mut texts = Vec::with_capacity(count);
        for index in 0..count {
            let index = i32::try_from(index).context("too many matches")?;
            if let Some(text) = locator
                .nth(index)
                .text_content()
                .await
                .with_context(|| format!("reading text of '{target}' #{index}"))?
            {
                texts.push(text);
            }
        }
        Ok(texts)
    }

    async fn computed_color(&self, target: &UiTarget) -> Result<String> {
        let Some(css) = target.as_css() else {
            anyhow::bail!("computed color needs a CSS target, got '{target}'");
        };
        // querySelector returns the first match, the same element `First` resolves to.
        let quoted = serde_json::Value::String(css.to_string()).to_string();
        let script = format!(
            "(() => {{ const el = document.querySelector({quoted}); \
             return el ? window.getComputedStyle(el).color : ''; }})()"
        );
        let color = self
            .page
            .evaluate_value(&script)
            .await
            .with_context(|| format!("reading color of '{target}'"))?;
        Ok(color.trim_matches('"').to_string())
    }

    async fn body_text(&self) -> Result<Option<String>> {
        self.locate(&UiTarget::css("body"))
            .await
            .text_content()
            .await
            .context("reading page text")
    }
}
