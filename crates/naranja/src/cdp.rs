//! Real browser backend over the Chrome DevTools Protocol.
//!
//! Compiled behind the `browser` feature. One [`CdpSession`] owns one
//! Chromium instance with a single page, satisfying the one-session-per-test
//! isolation model; parallel tests launch independent sessions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::SuiteConfig;
use crate::locator::Selector;
use crate::result::{SuiteError, SuiteResult};
use crate::session::{ElementSnapshot, Session};

/// A [`Session`] backed by a real Chromium instance.
pub struct CdpSession {
    browser: Arc<Mutex<Browser>>,
    page: Arc<Mutex<Page>>,
    handler: tokio::task::JoinHandle<()>,
    closed: AtomicBool,
}

impl std::fmt::Debug for CdpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpSession")
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}

impl CdpSession {
    /// Launch a browser and open a blank page.
    pub async fn launch(config: &SuiteConfig) -> SuiteResult<Self> {
        let mut builder = BrowserConfig::builder();
        if !config.headless {
            builder = builder.with_head();
        }
        if config.ci {
            // CI containers commonly lack the kernel features the sandbox needs.
            builder = builder.no_sandbox();
        }
        let browser_config = builder.build().map_err(|e| SuiteError::BrowserLaunch {
            message: e.to_string(),
        })?;

        let (browser, mut events) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| SuiteError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SuiteError::BrowserLaunch {
                message: e.to_string(),
            })?;

        Ok(Self {
            browser: Arc::new(Mutex::new(browser)),
            page: Arc::new(Mutex::new(page)),
            handler,
            closed: AtomicBool::new(false),
        })
    }

    fn guard(&self) -> SuiteResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SuiteError::SessionClosed);
        }
        Ok(())
    }

    async fn evaluate<T: serde::de::DeserializeOwned>(&self, script: String) -> SuiteResult<T> {
        self.guard()?;
        let page = self.page.lock().await;
        let result = page.evaluate(script).await.map_err(|e| SuiteError::Action {
            message: e.to_string(),
        })?;
        result.into_value().map_err(|e| SuiteError::Action {
            message: e.to_string(),
        })
    }
}

/// JS probe resolving a selector to element snapshots.
///
/// Selector expressions may carry a trailing `:visible` pseudo-class (a
/// convention from the selector table, not valid CSS); it is stripped here
/// and expressed as a visibility filter instead.
fn probe_script(selector: &Selector) -> String {
    let (raw_css, text_filter, visible_only) = match selector {
        Selector::Css(css) => (css.as_str(), None, false),
        Selector::CssWithText { css, text } => (css.as_str(), Some(text.as_str()), false),
    };
    let (css, visible_only) = match raw_css.strip_suffix(":visible") {
        Some(stripped) => (stripped, true),
        None => (raw_css, visible_only),
    };
    let css_json = serde_json::json!(css);
    let text_json = serde_json::json!(text_filter.map(str::to_lowercase));
    format!(
        r"(() => {{
            const textFilter = {text_json};
            const visibleOnly = {visible_json};
            const isVisible = el =>
                !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length);
            return Array.from(document.querySelectorAll({css_json}))
                .filter(el => textFilter === null
                    || (el.innerText || '').toLowerCase().includes(textFilter))
                .filter(el => !visibleOnly || isVisible(el))
                .map(el => ({{
                    text: (el.innerText || '').trim(),
                    value: el.value === undefined ? '' : String(el.value),
                    visible: isVisible(el),
                }}));
        }})()",
        visible_json = visible_only,
    )
}

/// JS snippet selecting the first visible match, shared by the act scripts.
fn first_visible_js(selector: &Selector) -> String {
    let (raw_css, text_filter) = match selector {
        Selector::Css(css) => (css.as_str(), None),
        Selector::CssWithText { css, text } => (css.as_str(), Some(text.as_str())),
    };
    let css = raw_css.strip_suffix(":visible").unwrap_or(raw_css);
    let css_json = serde_json::json!(css);
    let text_json = serde_json::json!(text_filter.map(str::to_lowercase));
    format!(
        r"Array.from(document.querySelectorAll({css_json}))
            .filter(el => {text_json} === null
                || (el.innerText || '').toLowerCase().includes({text_json}))
            .find(el => !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length))"
    )
}

#[async_trait]
impl Session for CdpSession {
    async fn navigate(&self, url: &str) -> SuiteResult<()> {
        self.guard()?;
        debug!(%url, "navigating");
        let page = self.page.lock().await;
        page.goto(url).await.map_err(|e| SuiteError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        page.wait_for_navigation()
            .await
            .map_err(|e| SuiteError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&self) -> SuiteResult<String> {
        self.evaluate("window.location.href".to_string()).await
    }

    async fn title(&self) -> SuiteResult<String> {
        self.evaluate("document.title".to_string()).await
    }

    async fn query(&self, selector: &Selector) -> SuiteResult<Vec<ElementSnapshot>> {
        self.evaluate(probe_script(selector)).await
    }

    async fn click_now(&self, selector: &Selector) -> SuiteResult<()> {
        let target = first_visible_js(selector);
        let clicked: bool = self
            .evaluate(format!(
                r"(() => {{
                    const el = {target};
                    if (!el) return false;
                    el.click();
                    return true;
                }})()"
            ))
            .await?;
        if clicked {
            Ok(())
        } else {
            Err(SuiteError::Action {
                message: format!("no visible element matching {selector} to click"),
            })
        }
    }

    async fn fill_now(&self, selector: &Selector, text: &str) -> SuiteResult<()> {
        let target = first_visible_js(selector);
        let text_json = serde_json::json!(text);
        let filled: bool = self
            .evaluate(format!(
                r"(() => {{
                    const el = {target};
                    if (!el) return false;
                    el.focus();
                    el.value = {text_json};
                    el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                    el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                    return true;
                }})()"
            ))
            .await?;
        if filled {
            Ok(())
        } else {
            Err(SuiteError::Action {
                message: format!("no visible field matching {selector} to fill"),
            })
        }
    }

    async fn screenshot(&self) -> SuiteResult<Vec<u8>> {
        self.guard()?;
        let page = self.page.lock().await;
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let shot = page
            .execute(params)
            .await
            .map_err(|e| SuiteError::Screenshot {
                message: e.to_string(),
            })?;

        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&shot.data)
            .map_err(|e| SuiteError::Screenshot {
                message: e.to_string(),
            })
    }

    async fn close(&self) -> SuiteResult<()> {
        self.guard()?;
        self.closed.store(true, Ordering::SeqCst);
        let mut browser = self.browser.lock().await;
        browser.close().await.map_err(|e| SuiteError::BrowserLaunch {
            message: e.to_string(),
        })?;
        self.handler.abort();
        Ok(())
    }
}
