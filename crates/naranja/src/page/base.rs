//! Common screen contract.

use async_trait::async_trait;

use crate::result::SuiteResult;

/// Contract shared by every screen variant.
///
/// A screen is a bundle of locators plus semantic operations for one
/// logical region of the UI. The contract is deliberately small: a name for
/// logs, the route pattern the screen lives under, and a readiness
/// predicate. Composition over an [`crate::interact::Interactor`] replaces
/// base-class inheritance, so unrelated screens stay uncoupled.
#[async_trait]
pub trait Screen {
    /// Short name for log lines.
    fn name(&self) -> &'static str;

    /// Route path (relative to the base URL) this screen lives under.
    fn url_pattern(&self) -> &'static str;

    /// Whether the screen's defining elements are present.
    ///
    /// Built from visibility polling with a generous bound; used to gate
    /// dependent steps, never as an assertion by itself.
    async fn is_loaded(&self) -> SuiteResult<bool>;
}
