//! Dashboard screen.

use async_trait::async_trait;
use tracing::info;

use crate::config::SuiteConfig;
use crate::data::routes;
use crate::interact::Interactor;
use crate::locator::Locator;
use crate::result::SuiteResult;
use crate::selectors::DashboardSelectors;
use crate::session::Session;

use super::Screen;

/// Page object for the landing dashboard.
#[derive(Debug)]
pub struct DashboardScreen<'s, S: Session + ?Sized> {
    ui: Interactor<'s, S>,
    heading: Locator,
    sidebar_menu: Locator,
    quick_launch: Locator,
    menu_item: Locator,
    load_check: Locator,
}

impl<'s, S: Session + ?Sized> DashboardScreen<'s, S> {
    /// Bind a dashboard screen to a session.
    #[must_use]
    pub fn new(session: &'s S, config: &SuiteConfig, selectors: &DashboardSelectors) -> Self {
        Self {
            ui: Interactor::new(session, config),
            heading: Locator::new(&selectors.heading),
            sidebar_menu: Locator::new(&selectors.sidebar_menu),
            quick_launch: Locator::new(&selectors.quick_launch),
            menu_item: Locator::new(&selectors.menu_item),
            // Load-check gets the generous post-navigation budget.
            load_check: Locator::new(&selectors.heading).with_timeout(config.load_timeout),
        }
    }

    /// Activate a module by the visible text of its sidebar menu entry,
    /// then wait for the new screen's heading to render.
    pub async fn navigate_to_module(&self, name: &str) -> SuiteResult<()> {
        info!(module = %name, "navigating to module");
        let entry = self.menu_item.clone().with_text(name);
        self.ui.click(&entry).await?;
        self.ui.wait_until_visible(&self.load_check).await?;
        Ok(())
    }

    /// Text of the page heading (e.g. "Dashboard").
    pub async fn heading_text(&self) -> SuiteResult<String> {
        self.ui.text(&self.heading).await
    }

    /// Whether the sidebar menu is visible.
    pub async fn is_sidebar_visible(&self) -> SuiteResult<bool> {
        self.ui.is_visible(&self.sidebar_menu).await
    }

    /// Whether the quick-launch widget is visible.
    pub async fn is_quick_launch_visible(&self) -> SuiteResult<bool> {
        self.ui.is_visible(&self.quick_launch).await
    }
}

#[async_trait]
impl<S: Session + ?Sized> Screen for DashboardScreen<'_, S> {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    fn url_pattern(&self) -> &'static str {
        routes::DASHBOARD
    }

    async fn is_loaded(&self) -> SuiteResult<bool> {
        let heading = self
            .ui
            .is_visible(&self.load_check)
            .await?;
        let sidebar = self.ui.is_visible(&self.sidebar_menu).await?;
        Ok(heading && sidebar)
    }
}
