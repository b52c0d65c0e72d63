//! In-memory simulation of the HR application.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::data::{messages, routes, VALID_CREDENTIALS};
use crate::locator::Selector;
use crate::result::{SuiteError, SuiteResult};
use crate::selectors::css;
use crate::session::{ElementSnapshot, Session};

/// Sidebar menu of the simulated application, in display order.
pub(crate) const MENU_ITEMS: [&str; 12] = [
    "Admin",
    "PIM",
    "Leave",
    "Time",
    "Recruitment",
    "My Info",
    "Performance",
    "Dashboard",
    "Directory",
    "Maintenance",
    "Claim",
    "Buzz",
];

/// Screen the simulated session is currently on.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Blank,
    Login,
    Dashboard,
    Module(String),
}

impl Route {
    fn path(&self) -> String {
        match self {
            Self::Blank => "about:blank".to_string(),
            Self::Login => routes::LOGIN.to_string(),
            Self::Dashboard => routes::DASHBOARD.to_string(),
            Self::Module(name) if name == "PIM" => routes::EMPLOYEE_LIST.to_string(),
            Self::Module(name) => {
                let slug: String = name
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_lowercase();
                format!("/web/index.php/{slug}/viewModule")
            }
        }
    }

    fn heading(&self) -> Option<&str> {
        match self {
            Self::Blank | Self::Login => None,
            Self::Dashboard => Some("Dashboard"),
            Self::Module(name) => Some(name),
        }
    }

    const fn is_authenticated_area(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Module(_))
    }
}

#[derive(Debug)]
struct AppState {
    route: Route,
    username: String,
    password: String,
    error_alert: Option<String>,
    validation_messages: Vec<String>,
    search: String,
    authenticated: bool,
    /// Elements of the current route report hidden before this instant.
    visible_after: Instant,
    closed: bool,
}

impl AppState {
    fn rendered(&self) -> bool {
        Instant::now() >= self.visible_after
    }
}

/// An in-memory [`Session`] over a simulated HR application.
///
/// Behavior mirrors what the suite asserts against the real site: empty
/// required fields produce per-field "Required" messages, wrong credentials
/// produce the invalid-login alert, a successful login navigates to the
/// dashboard, and the sidebar filter matches case-insensitively. A render
/// delay can be configured to exercise the interaction layer's wait paths.
#[derive(Debug)]
pub struct FakeSession {
    base_url: String,
    render_delay: Duration,
    state: Mutex<AppState>,
}

impl Default for FakeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSession {
    /// Create a session pointed at a blank page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: "https://hr.example.test".to_string(),
            render_delay: Duration::ZERO,
            state: Mutex::new(AppState {
                route: Route::Blank,
                username: String::new(),
                password: String::new(),
                error_alert: None,
                validation_messages: Vec::new(),
                search: String::new(),
                authenticated: false,
                visible_after: Instant::now(),
                closed: false,
            }),
        }
    }

    /// Delay before a freshly navigated route reports its elements visible.
    #[must_use]
    pub fn with_render_delay(mut self, delay: Duration) -> Self {
        self.render_delay = delay;
        self
    }

    /// Base URL the simulated application answers under.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn lock(&self) -> SuiteResult<MutexGuard<'_, AppState>> {
        let state = self.state.lock().expect("fake session state poisoned");
        if state.closed {
            return Err(SuiteError::SessionClosed);
        }
        Ok(state)
    }

    fn filtered_menu(state: &AppState) -> Vec<&'static str> {
        let needle = state.search.to_lowercase();
        MENU_ITEMS
            .iter()
            .copied()
            .filter(|item| needle.is_empty() || item.to_lowercase().contains(&needle))
            .collect()
    }

    fn resolve(state: &AppState, selector: &Selector) -> Vec<ElementSnapshot> {
        let rendered = state.rendered();
        let shown = |text: &str| {
            if rendered {
                ElementSnapshot::visible(text)
            } else {
                ElementSnapshot::hidden(text)
            }
        };

        match selector {
            Selector::Css(sel) => match (sel.as_str(), &state.route) {
                (css::USERNAME_INPUT, Route::Login) => {
                    vec![shown("").with_value(&state.username)]
                }
                (css::PASSWORD_INPUT, Route::Login) => {
                    vec![shown("").with_value(&state.password)]
                }
                (css::SUBMIT_BUTTON, Route::Login) => vec![shown("Login")],
                (css::ERROR_ALERT, Route::Login) => state
                    .error_alert
                    .as_deref()
                    .map(|msg| vec![shown(msg)])
                    .unwrap_or_default(),
                (css::VALIDATION_MESSAGE, Route::Login) => state
                    .validation_messages
                    .iter()
                    .map(|msg| shown(msg))
                    .collect(),
                (css::PAGE_HEADING, route) => route
                    .heading()
                    .map(|h| vec![shown(h)])
                    .unwrap_or_default(),
                (css::SIDEBAR_MENU, route) if route.is_authenticated_area() => {
                    vec![shown("")]
                }
                (css::QUICK_LAUNCH, Route::Dashboard) => vec![shown("")],
                (css::SEARCH_INPUT, route) if route.is_authenticated_area() => {
                    vec![shown("").with_value(&state.search)]
                }
                (css::VISIBLE_MENU_ITEM, route) if route.is_authenticated_area() => {
                    Self::filtered_menu(state)
                        .into_iter()
                        .map(|item| shown(item))
                        .collect()
                }
                (css::MENU_ITEM, route) if route.is_authenticated_area() => {
                    MENU_ITEMS.iter().map(|item| shown(item)).collect()
                }
                _ => Vec::new(),
            },
            Selector::CssWithText { css: sel, text } => {
                let needle = text.to_lowercase();
                match (sel.as_str(), &state.route) {
                    (css::MENU_ITEM | css::VISIBLE_MENU_ITEM, route)
                        if route.is_authenticated_area() =>
                    {
                        MENU_ITEMS
                            .iter()
                            .filter(|item| item.to_lowercase().contains(&needle))
                            .map(|item| shown(item))
                            .collect()
                    }
                    _ => Vec::new(),
                }
            }
        }
    }

    fn submit_login(state: &mut AppState, render_delay: Duration) {
        state.error_alert = None;
        state.validation_messages.clear();
        if state.username.is_empty() {
            state
                .validation_messages
                .push(messages::REQUIRED_FIELD.to_string());
        }
        if state.password.is_empty() {
            state
                .validation_messages
                .push(messages::REQUIRED_FIELD.to_string());
        }
        if !state.validation_messages.is_empty() {
            return;
        }
        if state.username == VALID_CREDENTIALS.username
            && state.password == VALID_CREDENTIALS.password
        {
            state.authenticated = true;
            state.route = Route::Dashboard;
            state.search.clear();
            state.visible_after = Instant::now() + render_delay;
        } else {
            state.error_alert = Some(messages::INVALID_LOGIN.to_string());
        }
    }

    fn activate_menu_item(state: &mut AppState, label: &str, render_delay: Duration) {
        state.route = if label == "Dashboard" {
            Route::Dashboard
        } else {
            Route::Module(label.to_string())
        };
        state.search.clear();
        state.visible_after = Instant::now() + render_delay;
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn navigate(&self, url: &str) -> SuiteResult<()> {
        let mut state = self.lock()?;
        let path = url.strip_prefix(&self.base_url).unwrap_or(url);
        state.route = if path.starts_with(routes::LOGIN) {
            Route::Login
        } else if state.authenticated {
            if path.starts_with(routes::DASHBOARD) {
                Route::Dashboard
            } else if path.starts_with(routes::EMPLOYEE_LIST) {
                Route::Module("PIM".to_string())
            } else {
                Route::Blank
            }
        } else {
            // Unauthenticated access to the app redirects to the login form.
            Route::Login
        };
        if state.route == Route::Login {
            state.error_alert = None;
            state.validation_messages.clear();
            state.username.clear();
            state.password.clear();
        }
        state.search.clear();
        state.visible_after = Instant::now() + self.render_delay;
        Ok(())
    }

    async fn current_url(&self) -> SuiteResult<String> {
        let state = self.lock()?;
        match state.route {
            Route::Blank => Ok("about:blank".to_string()),
            _ => Ok(format!("{}{}", self.base_url, state.route.path())),
        }
    }

    async fn title(&self) -> SuiteResult<String> {
        let _guard = self.lock()?;
        Ok("OrangeHRM".to_string())
    }

    async fn query(&self, selector: &Selector) -> SuiteResult<Vec<ElementSnapshot>> {
        let state = self.lock()?;
        Ok(Self::resolve(&state, selector))
    }

    async fn click_now(&self, selector: &Selector) -> SuiteResult<()> {
        let mut state = self.lock()?;
        let matches = Self::resolve(&state, selector);
        if !matches.iter().any(|s| s.visible) {
            return Err(SuiteError::Action {
                message: format!("no visible element matching {selector} to click"),
            });
        }
        match selector {
            Selector::Css(sel) if sel == css::SUBMIT_BUTTON && state.route == Route::Login => {
                Self::submit_login(&mut state, self.render_delay);
                Ok(())
            }
            Selector::CssWithText { css: sel, text }
                if (sel == css::MENU_ITEM || sel == css::VISIBLE_MENU_ITEM)
                    && state.route.is_authenticated_area() =>
            {
                let needle = text.to_lowercase();
                let label = MENU_ITEMS
                    .iter()
                    .find(|item| item.to_lowercase().contains(&needle))
                    .copied()
                    .ok_or_else(|| SuiteError::Action {
                        message: format!("no menu entry matching {text:?}"),
                    })?;
                Self::activate_menu_item(&mut state, label, self.render_delay);
                Ok(())
            }
            _ => Err(SuiteError::Action {
                message: format!("{selector} is not clickable in the simulated application"),
            }),
        }
    }

    async fn fill_now(&self, selector: &Selector, text: &str) -> SuiteResult<()> {
        let mut state = self.lock()?;
        let matches = Self::resolve(&state, selector);
        if !matches.iter().any(|s| s.visible) {
            return Err(SuiteError::Action {
                message: format!("no visible field matching {selector} to fill"),
            });
        }
        match selector {
            Selector::Css(sel) if sel == css::USERNAME_INPUT && state.route == Route::Login => {
                state.username = text.to_string();
                Ok(())
            }
            Selector::Css(sel) if sel == css::PASSWORD_INPUT && state.route == Route::Login => {
                state.password = text.to_string();
                Ok(())
            }
            Selector::Css(sel)
                if sel == css::SEARCH_INPUT && state.route.is_authenticated_area() =>
            {
                state.search = text.to_string();
                Ok(())
            }
            _ => Err(SuiteError::Action {
                message: format!("{selector} is not a fillable field here"),
            }),
        }
    }

    async fn screenshot(&self) -> SuiteResult<Vec<u8>> {
        let state = self.lock()?;
        // Minimal PNG-tagged payload; enough for artifact plumbing.
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(state.route.path().as_bytes());
        Ok(bytes)
    }

    async fn close(&self) -> SuiteResult<()> {
        let mut state = self.state.lock().expect("fake session state poisoned");
        state.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_selector() -> Selector {
        Selector::css(css::USERNAME_INPUT)
    }

    #[tokio::test]
    async fn test_unauthenticated_navigation_redirects_to_login() {
        let session = FakeSession::new();
        session
            .navigate("https://hr.example.test/web/index.php/dashboard/index")
            .await
            .unwrap();
        let url = session.current_url().await.unwrap();
        assert!(url.ends_with(routes::LOGIN));
    }

    #[tokio::test]
    async fn test_valid_login_lands_on_dashboard() {
        let session = FakeSession::new();
        session.navigate(routes::LOGIN).await.unwrap();
        session
            .fill_now(&Selector::css(css::USERNAME_INPUT), "Admin")
            .await
            .unwrap();
        session
            .fill_now(&Selector::css(css::PASSWORD_INPUT), "admin123")
            .await
            .unwrap();
        session
            .click_now(&Selector::css(css::SUBMIT_BUTTON))
            .await
            .unwrap();
        let url = session.current_url().await.unwrap();
        assert!(url.contains("/dashboard/"));
    }

    #[tokio::test]
    async fn test_empty_submit_reports_two_required_fields() {
        let session = FakeSession::new();
        session.navigate(routes::LOGIN).await.unwrap();
        session
            .click_now(&Selector::css(css::SUBMIT_BUTTON))
            .await
            .unwrap();
        let messages = session
            .query(&Selector::css(css::VALIDATION_MESSAGE))
            .await
            .unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.text == messages::REQUIRED_FIELD));
    }

    #[tokio::test]
    async fn test_closed_session_fails_loudly() {
        let session = FakeSession::new();
        session.navigate(routes::LOGIN).await.unwrap();
        session.close().await.unwrap();
        let err = session.query(&login_selector()).await.unwrap_err();
        assert!(matches!(err, SuiteError::SessionClosed));
    }

    #[tokio::test]
    async fn test_render_delay_hides_elements_initially() {
        let session = FakeSession::new().with_render_delay(Duration::from_millis(30));
        session.navigate(routes::LOGIN).await.unwrap();
        let before = session.query(&login_selector()).await.unwrap();
        assert!(!before[0].visible);
        tokio::time::sleep(Duration::from_millis(40)).await;
        let after = session.query(&login_selector()).await.unwrap();
        assert!(after[0].visible);
    }

    #[tokio::test]
    async fn test_fill_rejects_fields_still_hidden_by_render_delay() {
        let session = FakeSession::new().with_render_delay(Duration::from_millis(50));
        session.navigate(routes::LOGIN).await.unwrap();

        let err = session
            .fill_now(&Selector::css(css::USERNAME_INPUT), "Admin")
            .await
            .unwrap_err();
        assert!(matches!(err, SuiteError::Action { .. }), "got: {err}");

        tokio::time::sleep(Duration::from_millis(60)).await;
        session
            .fill_now(&Selector::css(css::USERNAME_INPUT), "Admin")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_menu_filter_is_case_insensitive() {
        let session = FakeSession::new();
        session.navigate(routes::LOGIN).await.unwrap();
        session
            .fill_now(&Selector::css(css::USERNAME_INPUT), "Admin")
            .await
            .unwrap();
        session
            .fill_now(&Selector::css(css::PASSWORD_INPUT), "admin123")
            .await
            .unwrap();
        session
            .click_now(&Selector::css(css::SUBMIT_BUTTON))
            .await
            .unwrap();

        session
            .fill_now(&Selector::css(css::SEARCH_INPUT), "le")
            .await
            .unwrap();
        let items = session
            .query(&Selector::css(css::VISIBLE_MENU_ITEM))
            .await
            .unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().all(|i| i.text.to_lowercase().contains("le")));
    }
}
