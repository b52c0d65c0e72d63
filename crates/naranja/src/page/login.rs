//! Login screen.

use async_trait::async_trait;
use tracing::info;

use crate::config::SuiteConfig;
use crate::data::{routes, Credentials};
use crate::interact::Interactor;
use crate::locator::Locator;
use crate::result::SuiteResult;
use crate::selectors::LoginSelectors;
use crate::session::Session;

use super::Screen;

/// Page object for the login screen.
#[derive(Debug)]
pub struct LoginScreen<'s, S: Session + ?Sized> {
    ui: Interactor<'s, S>,
    login_url: String,
    username_input: Locator,
    password_input: Locator,
    submit_button: Locator,
    error_alert: Locator,
    validation_message: Locator,
}

impl<'s, S: Session + ?Sized> LoginScreen<'s, S> {
    /// Bind a login screen to a session.
    #[must_use]
    pub fn new(session: &'s S, config: &SuiteConfig, selectors: &LoginSelectors) -> Self {
        Self {
            ui: Interactor::new(session, config),
            login_url: config.url_for(routes::LOGIN),
            username_input: Locator::new(&selectors.username_input),
            password_input: Locator::new(&selectors.password_input),
            submit_button: Locator::new(&selectors.submit_button),
            // The credential alert renders after a server round-trip, so it
            // gets twice the usual existence budget.
            error_alert: Locator::new(&selectors.error_alert)
                .with_timeout(config.visibility_timeout * 2),
            validation_message: Locator::new(&selectors.validation_message)
                .with_timeout(config.visibility_timeout),
        }
    }

    /// Navigate to the login screen and wait for the form to render.
    pub async fn open(&self) -> SuiteResult<()> {
        info!(url = %self.login_url, "opening login screen");
        self.ui.session().navigate(&self.login_url).await?;
        self.ui.wait_until_visible(&self.username_input).await?;
        Ok(())
    }

    /// Type a username into the username field.
    pub async fn enter_username(&self, username: &str) -> SuiteResult<()> {
        info!(%username, "entering username");
        self.ui.fill(&self.username_input, username).await
    }

    /// Type a password into the password field.
    pub async fn enter_password(&self, password: &str) -> SuiteResult<()> {
        info!("entering password: ****");
        self.ui.fill(&self.password_input, password).await
    }

    /// Click the login button.
    pub async fn submit(&self) -> SuiteResult<()> {
        info!("submitting login form");
        self.ui.click(&self.submit_button).await
    }

    /// Full login flow with the given credentials.
    pub async fn login(&self, credentials: Credentials) -> SuiteResult<()> {
        info!(username = %credentials.username, "performing login");
        self.enter_username(credentials.username).await?;
        self.enter_password(credentials.password).await?;
        self.submit().await
    }

    /// Text of the credential error alert (e.g. "Invalid credentials").
    pub async fn error_message(&self) -> SuiteResult<String> {
        self.ui.text(&self.error_alert).await
    }

    /// Whether the credential error alert is displayed.
    pub async fn is_error_displayed(&self) -> SuiteResult<bool> {
        self.ui.is_visible(&self.error_alert).await
    }

    /// All field-level validation messages, in document order.
    pub async fn validation_messages(&self) -> SuiteResult<Vec<String>> {
        self.ui.texts(&self.validation_message).await
    }

    /// Number of field validation errors currently shown.
    pub async fn validation_error_count(&self) -> SuiteResult<usize> {
        self.ui.count(&self.validation_message).await
    }

    /// Current value of the username field.
    pub async fn username_value(&self) -> SuiteResult<String> {
        self.ui.input_value(&self.username_input).await
    }
}

#[async_trait]
impl<S: Session + ?Sized> Screen for LoginScreen<'_, S> {
    fn name(&self) -> &'static str {
        "login"
    }

    fn url_pattern(&self) -> &'static str {
        routes::LOGIN
    }

    async fn is_loaded(&self) -> SuiteResult<bool> {
        Ok(self.ui.is_visible(&self.username_input).await?
            && self.ui.is_visible(&self.submit_button).await?)
    }
}
