//! Element interaction layer.
//!
//! Uniform, safe primitives over a [`Locator`], isolating all waiting and
//! retry policy from callers. Act primitives (`click`, `fill`) first wait
//! for a visible match within a bounded timeout; `is_visible` is the one
//! primitive that absorbs failure into a value, so "element absent" is
//! representable without exceptional control flow.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::SuiteConfig;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::session::{ElementSnapshot, Session};
use crate::wait::{StableSampler, WaitOptions};

/// Interaction primitives bound to one session.
///
/// Borrows the session; constructing one is cheap and page objects do it
/// freely. Every wait honors a per-locator timeout override when present.
#[derive(Debug)]
pub struct Interactor<'s, S: Session + ?Sized> {
    session: &'s S,
    wait: WaitOptions,
    visibility_timeout: Duration,
}

impl<'s, S: Session + ?Sized> Interactor<'s, S> {
    /// Create an interactor with the suite's timeout budget.
    #[must_use]
    pub fn new(session: &'s S, config: &SuiteConfig) -> Self {
        Self {
            session,
            wait: WaitOptions {
                timeout: config.action_timeout,
                poll_interval: config.poll_interval,
            },
            visibility_timeout: config.visibility_timeout,
        }
    }

    /// The underlying session.
    #[must_use]
    pub const fn session(&self) -> &'s S {
        self.session
    }

    /// Wait until the locator resolves to a visible node, then return its
    /// snapshot.
    ///
    /// # Errors
    ///
    /// [`SuiteError::Timeout`] if no visible match appears within the bound.
    pub async fn wait_until_visible(&self, locator: &Locator) -> SuiteResult<ElementSnapshot> {
        let timeout = locator.timeout().unwrap_or(self.wait.timeout);
        let deadline = Instant::now() + timeout;
        loop {
            let snapshots = self.session.query(locator.selector()).await?;
            if let Some(snapshot) = snapshots.iter().find(|s| s.visible) {
                return Ok(snapshot.clone());
            }
            if Instant::now() >= deadline {
                return Err(SuiteError::timeout(
                    timeout,
                    format!("{locator} to become visible"),
                ));
            }
            tokio::time::sleep(self.wait.poll_interval).await;
        }
    }

    /// Wait for visibility, then click.
    pub async fn click(&self, locator: &Locator) -> SuiteResult<()> {
        debug!(%locator, "clicking");
        self.wait_until_visible(locator).await?;
        self.session.click_now(locator.selector()).await
    }

    /// Wait for visibility, then replace the field content with `text`.
    ///
    /// Afterwards the field contains exactly `text`; there is no append.
    pub async fn fill(&self, locator: &Locator, text: &str) -> SuiteResult<()> {
        debug!(%locator, %text, "filling");
        self.wait_until_visible(locator).await?;
        self.session.fill_now(locator.selector(), text).await
    }

    /// Wait for visibility, then return the rendered text.
    ///
    /// An empty string is a valid result, not an error.
    pub async fn text(&self, locator: &Locator) -> SuiteResult<String> {
        let snapshot = self.wait_until_visible(locator).await?;
        debug!(%locator, text = %snapshot.text, "read text");
        Ok(snapshot.text)
    }

    /// Wait until at least one visible match, then return the texts of all
    /// visible matches in document order.
    pub async fn texts(&self, locator: &Locator) -> SuiteResult<Vec<String>> {
        self.wait_until_visible(locator).await?;
        let snapshots = self.session.query(locator.selector()).await?;
        Ok(snapshots
            .into_iter()
            .filter(|s| s.visible)
            .map(|s| s.text)
            .collect())
    }

    /// Wait for visibility, then return the current input value.
    pub async fn input_value(&self, locator: &Locator) -> SuiteResult<String> {
        let snapshot = self.wait_until_visible(locator).await?;
        Ok(snapshot.value)
    }

    /// Poll until the locator has a visible match, up to the existence-check
    /// timeout (or the locator's override).
    ///
    /// Resolves to `false` on expiry instead of an error; this is the one
    /// primitive designed for checks that are expected to sometimes be
    /// false. A closed session still fails loudly.
    pub async fn is_visible(&self, locator: &Locator) -> SuiteResult<bool> {
        let timeout = locator.timeout().unwrap_or(self.visibility_timeout);
        let deadline = Instant::now() + timeout;
        loop {
            let snapshots = self.session.query(locator.selector()).await?;
            if snapshots.iter().any(|s| s.visible) {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                debug!(%locator, ?timeout, "not visible within budget");
                return Ok(false);
            }
            tokio::time::sleep(self.wait.poll_interval).await;
        }
    }

    /// Number of nodes currently matching the locator. Zero is valid.
    ///
    /// No waiting: this reports the state of the page right now.
    pub async fn count(&self, locator: &Locator) -> SuiteResult<usize> {
        Ok(self.session.query(locator.selector()).await?.len())
    }

    /// Poll the match count until two consecutive samples agree, then
    /// return the settled count.
    ///
    /// Used where the UI exposes no completion signal (the sidebar filter);
    /// bounded by the action timeout.
    pub async fn settled_count(&self, locator: &Locator) -> SuiteResult<usize> {
        let timeout = locator.timeout().unwrap_or(self.wait.timeout);
        let deadline = Instant::now() + timeout;
        let mut sampler = StableSampler::new();
        loop {
            let count = self.count(locator).await?;
            if sampler.observe(count) {
                debug!(%locator, count, "count settled");
                return Ok(count);
            }
            if Instant::now() >= deadline {
                return Err(SuiteError::timeout(
                    timeout,
                    format!("{locator} match count to settle"),
                ));
            }
            tokio::time::sleep(self.wait.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Selector;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted session: pops one pre-programmed query response per poll,
    /// repeating the last one once the script runs out.
    #[derive(Debug, Default)]
    struct ScriptedSession {
        responses: Mutex<VecDeque<Vec<ElementSnapshot>>>,
        clicked: Mutex<Vec<Selector>>,
        filled: Mutex<Vec<(Selector, String)>>,
        closed: Mutex<bool>,
    }

    impl ScriptedSession {
        fn with_script(script: Vec<Vec<ElementSnapshot>>) -> Self {
            Self {
                responses: Mutex::new(script.into()),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl Session for ScriptedSession {
        async fn navigate(&self, _url: &str) -> SuiteResult<()> {
            Ok(())
        }

        async fn current_url(&self) -> SuiteResult<String> {
            Ok("about:blank".to_string())
        }

        async fn title(&self) -> SuiteResult<String> {
            Ok(String::new())
        }

        async fn query(&self, _selector: &Selector) -> SuiteResult<Vec<ElementSnapshot>> {
            if *self.closed.lock().unwrap() {
                return Err(SuiteError::SessionClosed);
            }
            let mut responses = self.responses.lock().unwrap();
            if responses.len() > 1 {
                Ok(responses.pop_front().unwrap())
            } else {
                Ok(responses.front().cloned().unwrap_or_default())
            }
        }

        async fn click_now(&self, selector: &Selector) -> SuiteResult<()> {
            self.clicked.lock().unwrap().push(selector.clone());
            Ok(())
        }

        async fn fill_now(&self, selector: &Selector, text: &str) -> SuiteResult<()> {
            self.filled
                .lock()
                .unwrap()
                .push((selector.clone(), text.to_string()));
            Ok(())
        }

        async fn screenshot(&self) -> SuiteResult<Vec<u8>> {
            Ok(vec![])
        }

        async fn close(&self) -> SuiteResult<()> {
            *self.closed.lock().unwrap() = true;
            Ok(())
        }
    }

    fn fast_config() -> SuiteConfig {
        SuiteConfig::new()
            .with_action_timeout(Duration::from_millis(200))
            .with_visibility_timeout(Duration::from_millis(100))
            .with_poll_interval(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_click_waits_for_visibility_before_acting() {
        let session = ScriptedSession::with_script(vec![
            vec![],
            vec![ElementSnapshot::hidden("Login")],
            vec![ElementSnapshot::visible("Login")],
        ]);
        let config = fast_config();
        let ui = Interactor::new(&session, &config);

        ui.click(&Locator::new("button[type='submit']"))
            .await
            .unwrap();
        assert_eq!(session.clicked.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_click_times_out_on_never_visible_element() {
        let session = ScriptedSession::with_script(vec![vec![ElementSnapshot::hidden("x")]]);
        let config = fast_config();
        let ui = Interactor::new(&session, &config);

        let err = ui.click(&Locator::new("#never")).await.unwrap_err();
        assert!(err.is_timeout(), "expected timeout, got: {err}");
        assert!(session.clicked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_is_visible_absorbs_absence_into_false() {
        let session = ScriptedSession::with_script(vec![]);
        let config = fast_config();
        let ui = Interactor::new(&session, &config);

        let visible = ui.is_visible(&Locator::new("#ghost")).await.unwrap();
        assert!(!visible);
    }

    #[tokio::test]
    async fn test_is_visible_fails_loudly_on_closed_session() {
        let session = ScriptedSession::with_script(vec![]);
        session.close().await.unwrap();
        let config = fast_config();
        let ui = Interactor::new(&session, &config);

        let err = ui.is_visible(&Locator::new("#any")).await.unwrap_err();
        assert!(matches!(err, SuiteError::SessionClosed));
    }

    #[tokio::test]
    async fn test_texts_returns_visible_matches_in_order() {
        let session = ScriptedSession::with_script(vec![vec![
            ElementSnapshot::visible("Required"),
            ElementSnapshot::hidden("stale"),
            ElementSnapshot::visible("Required"),
        ]]);
        let config = fast_config();
        let ui = Interactor::new(&session, &config);

        let texts = ui
            .texts(&Locator::new(".oxd-input-field-error-message"))
            .await
            .unwrap();
        assert_eq!(texts, vec!["Required", "Required"]);
    }

    #[tokio::test]
    async fn test_count_reports_zero_without_error() {
        let session = ScriptedSession::with_script(vec![]);
        let config = fast_config();
        let ui = Interactor::new(&session, &config);

        assert_eq!(ui.count(&Locator::new(".none")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_settled_count_waits_for_two_equal_samples() {
        // Filter still churning: 12, 5, then stable at 3.
        let session = ScriptedSession::with_script(vec![
            vec![ElementSnapshot::visible("a"); 12],
            vec![ElementSnapshot::visible("a"); 5],
            vec![ElementSnapshot::visible("a"); 3],
            vec![ElementSnapshot::visible("a"); 3],
        ]);
        let config = fast_config();
        let ui = Interactor::new(&session, &config);

        let count = ui.settled_count(&Locator::new(".item")).await.unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_locator_timeout_override_beats_suite_budget() {
        let session = ScriptedSession::with_script(vec![vec![ElementSnapshot::hidden("x")]]);
        let config = fast_config();
        let ui = Interactor::new(&session, &config);

        let start = Instant::now();
        let locator = Locator::new("#slow").with_timeout(Duration::from_millis(20));
        let err = ui.wait_until_visible(&locator).await.unwrap_err();
        assert!(err.is_timeout());
        assert!(start.elapsed() < Duration::from_millis(150));
    }
}
