//! Page abstractions.
//!
//! One module per logical screen. Each screen bundles the locators it owns
//! with semantic operations built from the interaction layer, and exposes a
//! load-check gating dependent steps. Screens borrow their session; the
//! borrow checker enforces that no screen outlives it.

mod base;
mod dashboard;
mod login;
mod sidebar;

pub use base::Screen;
pub use dashboard::DashboardScreen;
pub use login::LoginScreen;
pub use sidebar::SidebarSearch;
