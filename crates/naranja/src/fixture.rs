//! Fixture layer.
//!
//! Assembles page objects bound to one session and provides the
//! pre-authenticated entry point. Fixture failures surface as
//! [`SuiteError::Setup`], distinct from scenario assertion failures, and
//! are always bounded; a login that never completes fails the fixture
//! instead of hanging the test.

use std::time::Instant;

use regex::Regex;
use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::data::VALID_CREDENTIALS;
use crate::page::{DashboardScreen, LoginScreen, Screen, SidebarSearch};
use crate::result::{SuiteError, SuiteResult};
use crate::selectors::SelectorTable;
use crate::session::Session;

/// URL pattern the session must reach after a successful login
const DASHBOARD_URL_PATTERN: &str = r"/dashboard(/|$)";

/// Builds page objects for one session.
///
/// Constructed per test; screens come out fresh on every call and borrow
/// the session for the fixture's lifetime.
#[derive(Debug)]
pub struct Fixtures<'s, S: Session + ?Sized> {
    session: &'s S,
    config: SuiteConfig,
    selectors: SelectorTable,
}

impl<'s, S: Session + ?Sized> Fixtures<'s, S> {
    /// Create a fixture set over a session with the default selector table.
    #[must_use]
    pub fn new(session: &'s S, config: SuiteConfig) -> Self {
        Self {
            session,
            config,
            selectors: SelectorTable::default(),
        }
    }

    /// Replace the selector table (e.g. loaded from JSON).
    #[must_use]
    pub fn with_selectors(mut self, selectors: SelectorTable) -> Self {
        self.selectors = selectors;
        self
    }

    /// The suite configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// The underlying session.
    #[must_use]
    pub const fn session(&self) -> &'s S {
        self.session
    }

    /// A fresh login screen.
    #[must_use]
    pub fn login_screen(&self) -> LoginScreen<'s, S> {
        LoginScreen::new(self.session, &self.config, &self.selectors.login)
    }

    /// A fresh dashboard screen.
    #[must_use]
    pub fn dashboard_screen(&self) -> DashboardScreen<'s, S> {
        DashboardScreen::new(self.session, &self.config, &self.selectors.dashboard)
    }

    /// A fresh sidebar filter widget.
    #[must_use]
    pub fn sidebar_search(&self) -> SidebarSearch<'s, S> {
        SidebarSearch::new(self.session, &self.config, &self.selectors.sidebar)
    }

    /// Pre-authenticated entry point: open the login screen, submit the
    /// known-valid credentials, and wait until the session URL matches the
    /// dashboard route and the dashboard load-check holds.
    ///
    /// # Errors
    ///
    /// [`SuiteError::Setup`] if login does not complete within the
    /// navigation bound. A single failed attempt fails the fixture; there
    /// is no retry.
    pub async fn authenticated(&self) -> SuiteResult<DashboardScreen<'s, S>> {
        info!("fixture: performing automatic login");
        match self.try_authenticate().await {
            Ok(dashboard) => {
                info!("fixture: login complete, dashboard loaded");
                Ok(dashboard)
            }
            Err(err @ SuiteError::SessionClosed) => Err(err),
            Err(err) => Err(SuiteError::Setup {
                message: format!("authenticated session fixture: {err}"),
            }),
        }
    }

    async fn try_authenticate(&self) -> SuiteResult<DashboardScreen<'s, S>> {
        let login = self.login_screen();
        login.open().await?;
        login.login(VALID_CREDENTIALS).await?;

        self.wait_for_url(DASHBOARD_URL_PATTERN).await?;

        let dashboard = self.dashboard_screen();
        if dashboard.is_loaded().await? {
            Ok(dashboard)
        } else {
            Err(SuiteError::Action {
                message: format!("{} screen failed its load-check", dashboard.name()),
            })
        }
    }

    /// Poll the session URL until it matches `pattern`, bounded by the
    /// navigation timeout.
    async fn wait_for_url(&self, pattern: &str) -> SuiteResult<()> {
        let re = Regex::new(pattern).map_err(|e| SuiteError::Setup {
            message: format!("invalid URL pattern {pattern:?}: {e}"),
        })?;
        let timeout = self.config.navigation_timeout;
        let deadline = Instant::now() + timeout;
        loop {
            let url = self.session.current_url().await?;
            if re.is_match(&url) {
                debug!(%url, "URL matched {pattern}");
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SuiteError::timeout(
                    timeout,
                    format!("URL to match {pattern} (last was {url})"),
                ));
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_pattern_matches_expected_urls() {
        let re = Regex::new(DASHBOARD_URL_PATTERN).unwrap();
        assert!(re.is_match("https://hr.example.test/web/index.php/dashboard/index"));
        assert!(re.is_match("https://hr.example.test/web/index.php/dashboard"));
        assert!(!re.is_match("https://hr.example.test/web/index.php/auth/login"));
        assert!(!re.is_match("https://hr.example.test/web/index.php/pim/viewEmployeeList"));
    }
}
