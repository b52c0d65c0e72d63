//! Suite configuration.
//!
//! All knobs the harness consumes: base URL, headless/CI flags, and the
//! timeout budget for each class of wait. Read once from the environment at
//! startup and passed in explicitly; nothing here is a process-wide
//! singleton.

use std::time::Duration;

/// Default bound for act primitives (click, fill) waiting on visibility
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(15);

/// Default bound for navigation and the authenticated fixture
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default generous bound for screen load-checks
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Default bound for existence checks that may legitimately be false
pub const DEFAULT_VISIBILITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Default polling interval for all waits
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Immutable configuration for one suite run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Base URL of the application under test
    pub base_url: String,
    /// Run the browser headless
    pub headless: bool,
    /// Running under CI
    pub ci: bool,
    /// Bound for act primitives waiting on visibility
    pub action_timeout: Duration,
    /// Bound for navigation and fixture setup
    pub navigation_timeout: Duration,
    /// Bound for screen load-checks
    pub load_timeout: Duration,
    /// Bound for boolean existence checks
    pub visibility_timeout: Duration,
    /// Polling interval for all waits
    pub poll_interval: Duration,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://opensource-demo.orangehrmlive.com".to_string(),
            headless: true,
            ci: false,
            action_timeout: DEFAULT_ACTION_TIMEOUT,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            visibility_timeout: DEFAULT_VISIBILITY_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl SuiteConfig {
    /// Create a config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from the process environment.
    ///
    /// Recognizes `BASE_URL`, `HEADLESS` (anything but `"false"` is true)
    /// and `CI` (presence is true). Unset variables fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("BASE_URL") {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        if let Ok(headless) = std::env::var("HEADLESS") {
            config.headless = headless != "false";
        }
        config.ci = std::env::var("CI").is_ok();
        config
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override headless mode.
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Override the action timeout.
    #[must_use]
    pub const fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    /// Override the navigation/fixture timeout.
    #[must_use]
    pub const fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Override the load-check timeout.
    #[must_use]
    pub const fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Override the existence-check timeout.
    #[must_use]
    pub const fn with_visibility_timeout(mut self, timeout: Duration) -> Self {
        self.visibility_timeout = timeout;
        self
    }

    /// Override the polling interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Resolve a relative route path against the base URL.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
