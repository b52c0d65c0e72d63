//! Selector tables.
//!
//! Selectors live in configuration keyed by semantic element name, not as
//! strings embedded in page logic, so a UI markup change is a data edit.
//! [`SelectorTable::default`] matches the stock OrangeHRM skin; a JSON file
//! can override any entry.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::result::SuiteResult;

/// Default selector strings for the stock OrangeHRM skin.
pub mod css {
    /// Username input on the login form
    pub const USERNAME_INPUT: &str = "input[name='username']";
    /// Password input on the login form
    pub const PASSWORD_INPUT: &str = "input[name='password']";
    /// Login submit button
    pub const SUBMIT_BUTTON: &str = "button[type='submit']";
    /// Credential error alert (e.g. "Invalid credentials")
    pub const ERROR_ALERT: &str = ".oxd-alert-content-text";
    /// Field-level validation message (e.g. "Required")
    pub const VALIDATION_MESSAGE: &str = ".oxd-input-field-error-message";
    /// Page heading in the top bar breadcrumb
    pub const PAGE_HEADING: &str = ".oxd-topbar-header-breadcrumb h6";
    /// Sidebar main menu container
    pub const SIDEBAR_MENU: &str = "ul.oxd-main-menu";
    /// Quick-launch widget on the dashboard
    pub const QUICK_LAUNCH: &str = ".orangehrm-quick-launch";
    /// Any sidebar menu entry
    pub const MENU_ITEM: &str = ".oxd-main-menu-item";
    /// Sidebar search/filter input
    pub const SEARCH_INPUT: &str = ".oxd-main-menu-search input";
    /// Sidebar menu entries currently passing the filter
    pub const VISIBLE_MENU_ITEM: &str = "a.oxd-main-menu-item:visible";
}

/// Selectors owned by the login screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSelectors {
    /// Username field
    pub username_input: String,
    /// Password field
    pub password_input: String,
    /// Submit button
    pub submit_button: String,
    /// Credential error alert
    pub error_alert: String,
    /// Field validation message
    pub validation_message: String,
}

impl Default for LoginSelectors {
    fn default() -> Self {
        Self {
            username_input: css::USERNAME_INPUT.to_string(),
            password_input: css::PASSWORD_INPUT.to_string(),
            submit_button: css::SUBMIT_BUTTON.to_string(),
            error_alert: css::ERROR_ALERT.to_string(),
            validation_message: css::VALIDATION_MESSAGE.to_string(),
        }
    }
}

/// Selectors owned by the dashboard screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSelectors {
    /// Page heading
    pub heading: String,
    /// Sidebar menu container
    pub sidebar_menu: String,
    /// Quick-launch widget
    pub quick_launch: String,
    /// Menu entry (narrowed by text when navigating)
    pub menu_item: String,
}

impl Default for DashboardSelectors {
    fn default() -> Self {
        Self {
            heading: css::PAGE_HEADING.to_string(),
            sidebar_menu: css::SIDEBAR_MENU.to_string(),
            quick_launch: css::QUICK_LAUNCH.to_string(),
            menu_item: css::MENU_ITEM.to_string(),
        }
    }
}

/// Selectors owned by the sidebar filter widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarSelectors {
    /// Filter input
    pub search_input: String,
    /// Menu entries currently passing the filter
    pub visible_menu_item: String,
}

impl Default for SidebarSelectors {
    fn default() -> Self {
        Self {
            search_input: css::SEARCH_INPUT.to_string(),
            visible_menu_item: css::VISIBLE_MENU_ITEM.to_string(),
        }
    }
}

/// Full selector table for the application under test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorTable {
    /// Login screen selectors
    pub login: LoginSelectors,
    /// Dashboard screen selectors
    pub dashboard: DashboardSelectors,
    /// Sidebar filter selectors
    pub sidebar: SidebarSelectors,
}

impl SelectorTable {
    /// Parse a table from JSON. Missing groups keep their defaults.
    pub fn from_json(json: &str) -> SuiteResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a table from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> SuiteResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
