//! Static test data.
//!
//! Credentials, expected messages, routes and search terms used across the
//! scenario suites. Read-only, process-wide, never computed.

/// A username/password pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    /// Account username
    pub username: &'static str,
    /// Account password
    pub password: &'static str,
}

/// Valid admin credentials (demo site default)
pub const VALID_CREDENTIALS: Credentials = Credentials {
    username: "Admin",
    password: "admin123",
};

/// Known-invalid credentials for negative scenarios
pub const INVALID_CREDENTIALS: Credentials = Credentials {
    username: "InvalidUser",
    password: "WrongPassword",
};

/// Expected UI messages
pub mod messages {
    /// Alert shown for a failed credential check
    pub const INVALID_LOGIN: &str = "Invalid credentials";
    /// Field-level validation message for an empty required field
    pub const REQUIRED_FIELD: &str = "Required";
}

/// Application routes, appended to the base URL
pub mod routes {
    /// Login screen
    pub const LOGIN: &str = "/web/index.php/auth/login";
    /// Dashboard screen
    pub const DASHBOARD: &str = "/web/index.php/dashboard/index";
    /// PIM employee list
    pub const EMPLOYEE_LIST: &str = "/web/index.php/pim/viewEmployeeList";
}

/// Search terms for the sidebar filter scenarios
pub mod search {
    /// Partial term guaranteed to match at least one menu item
    pub const EXISTING_PARTIAL: &str = "a";
    /// Term guaranteed to match nothing
    pub const NO_MATCH: &str = "ZZZNOTEXIST999";
}
