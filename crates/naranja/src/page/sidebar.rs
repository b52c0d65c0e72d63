//! Sidebar filter widget.

use async_trait::async_trait;
use tracing::info;

use crate::config::SuiteConfig;
use crate::data::routes;
use crate::interact::Interactor;
use crate::locator::Locator;
use crate::result::SuiteResult;
use crate::selectors::SidebarSelectors;
use crate::session::Session;

use super::Screen;

/// Page object for the sidebar menu filter.
///
/// The filter offers no "filtering complete" signal, so after writing a
/// term the widget polls the visible-item count until it settles (two
/// consecutive equal samples) rather than sleeping a fixed delay.
#[derive(Debug)]
pub struct SidebarSearch<'s, S: Session + ?Sized> {
    ui: Interactor<'s, S>,
    search_input: Locator,
    menu_items: Locator,
}

impl<'s, S: Session + ?Sized> SidebarSearch<'s, S> {
    /// Bind the sidebar filter to a session.
    #[must_use]
    pub fn new(session: &'s S, config: &SuiteConfig, selectors: &SidebarSelectors) -> Self {
        Self {
            ui: Interactor::new(session, config),
            search_input: Locator::new(&selectors.search_input)
                .with_timeout(config.visibility_timeout * 2),
            menu_items: Locator::new(&selectors.visible_menu_item),
        }
    }

    /// Write `term` into the filter input and wait for the results to
    /// settle.
    pub async fn search(&self, term: &str) -> SuiteResult<()> {
        info!(%term, "sidebar search");
        self.ui.fill(&self.search_input, term).await?;
        self.ui.settled_count(&self.menu_items).await?;
        Ok(())
    }

    /// Reset the filter.
    pub async fn clear_search(&self) -> SuiteResult<()> {
        info!("clearing sidebar search");
        self.ui.fill(&self.search_input, "").await?;
        self.ui.settled_count(&self.menu_items).await?;
        Ok(())
    }

    /// Labels of the menu items currently passing the filter, in order.
    ///
    /// No waiting: `search`/`clear_search` already settled the widget.
    /// Empty is a valid result.
    pub async fn visible_menu_items(&self) -> SuiteResult<Vec<String>> {
        let snapshots = self
            .ui
            .session()
            .query(self.menu_items.selector())
            .await?;
        Ok(snapshots
            .into_iter()
            .filter(|s| s.visible)
            .map(|s| s.text)
            .collect())
    }

    /// Number of menu items currently passing the filter.
    pub async fn visible_menu_item_count(&self) -> SuiteResult<usize> {
        Ok(self.visible_menu_items().await?.len())
    }

    /// Whether any menu item passes the filter.
    pub async fn has_results(&self) -> SuiteResult<bool> {
        Ok(self.visible_menu_item_count().await? > 0)
    }
}

#[async_trait]
impl<S: Session + ?Sized> Screen for SidebarSearch<'_, S> {
    fn name(&self) -> &'static str {
        "sidebar-search"
    }

    fn url_pattern(&self) -> &'static str {
        routes::DASHBOARD
    }

    async fn is_loaded(&self) -> SuiteResult<bool> {
        self.ui.is_visible(&self.search_input).await
    }
}
