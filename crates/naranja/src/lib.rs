//! # Naranja
//!
//! Page-object end-to-end test harness for the OrangeHRM web application.
//!
//! The crate is layered: a [`Session`] capability trait abstracts the
//! browser, an [`Interactor`] adds wait-then-act semantics on top of it,
//! and page objects ([`LoginScreen`], [`DashboardScreen`], [`SidebarSearch`])
//! expose user-level operations. [`Fixtures`] assembles page objects over
//! one session and provides the pre-authenticated entry point.
//!
//! ## Quick start
//!
//! ```
//! use naranja::{FakeSession, Fixtures, SuiteConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> naranja::SuiteResult<()> {
//! let session = FakeSession::new();
//! let config = SuiteConfig::default().with_base_url(session.base_url());
//! let fixtures = Fixtures::new(&session, config);
//!
//! let dashboard = fixtures.authenticated().await?;
//! assert!(dashboard.is_sidebar_visible().await?);
//! # Ok(())
//! # }
//! ```
//!
//! Scenario tests run hermetically against [`FakeSession`]; enable the
//! `browser` feature to drive a real Chromium instance through
//! [`cdp::CdpSession`] instead.

#![warn(missing_docs)]

pub mod config;
pub mod data;
pub mod fixture;
pub mod interact;
pub mod locator;
pub mod mock;
pub mod page;
pub mod report;
pub mod result;
pub mod selectors;
pub mod session;
pub mod wait;

#[cfg(feature = "browser")]
pub mod cdp;

pub use config::SuiteConfig;
pub use fixture::Fixtures;
pub use interact::Interactor;
pub use locator::{Locator, Selector};
pub use mock::FakeSession;
pub use page::{DashboardScreen, LoginScreen, Screen, SidebarSearch};
pub use report::Artifacts;
pub use result::{SuiteError, SuiteResult};
pub use selectors::SelectorTable;
pub use session::{ElementSnapshot, Session};
pub use wait::WaitOptions;

/// Install a `tracing` subscriber honoring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
