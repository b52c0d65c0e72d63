//! Session capability trait.
//!
//! A [`Session`] is one isolated browser context/tab. The trait exposes the
//! raw act/query primitives the interaction layer builds on; every method is
//! instantaneous, with no waiting or retry at this seam. Implementations
//! must fail loudly with
//! [`SessionClosed`](crate::result::SuiteError::SessionClosed) once the
//! session has been closed; silently no-opping on a stale session is a bug.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::locator::Selector;
use crate::result::SuiteResult;

/// Point-in-time observation of one matching DOM node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Rendered text content (empty string is valid)
    #[serde(default)]
    pub text: String,
    /// Current input value, for form fields
    #[serde(default)]
    pub value: String,
    /// Whether the node is visible
    #[serde(default)]
    pub visible: bool,
}

impl ElementSnapshot {
    /// A visible node with the given text.
    #[must_use]
    pub fn visible(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: String::new(),
            visible: true,
        }
    }

    /// A node present in the DOM but not visible.
    #[must_use]
    pub fn hidden(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: String::new(),
            visible: false,
        }
    }

    /// Attach an input value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// One isolated browser context/tab under test.
///
/// Page objects borrow a session; they never own one. All waiting policy
/// lives in [`crate::interact::Interactor`], so implementations of this
/// trait stay thin: resolve, act, report.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigate to an absolute URL.
    async fn navigate(&self, url: &str) -> SuiteResult<()>;

    /// Current URL of the session.
    async fn current_url(&self) -> SuiteResult<String>;

    /// Current document title.
    async fn title(&self) -> SuiteResult<String>;

    /// Resolve a selector to the nodes matching it right now.
    ///
    /// Lazy by contract: callers re-query on every use. Zero matches is a
    /// valid result, not an error.
    async fn query(&self, selector: &Selector) -> SuiteResult<Vec<ElementSnapshot>>;

    /// Click the first visible node matching the selector.
    ///
    /// # Errors
    ///
    /// [`Action`](crate::result::SuiteError::Action) if no visible node matches or the target
    /// rejects the click. Visibility waiting is the caller's job.
    async fn click_now(&self, selector: &Selector) -> SuiteResult<()>;

    /// Replace the content of the first visible matching field with `text`.
    ///
    /// Clear-then-write semantics: afterwards the field contains exactly
    /// `text`, never an appended suffix.
    async fn fill_now(&self, selector: &Selector, text: &str) -> SuiteResult<()>;

    /// Capture a full-page screenshot as PNG bytes.
    async fn screenshot(&self) -> SuiteResult<Vec<u8>>;

    /// Close the session. Subsequent operations must fail with
    /// [`SessionClosed`](crate::result::SuiteError::SessionClosed).
    async fn close(&self) -> SuiteResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_constructors() {
        let shown = ElementSnapshot::visible("Dashboard");
        assert!(shown.visible);
        assert_eq!(shown.text, "Dashboard");

        let hidden = ElementSnapshot::hidden("Admin");
        assert!(!hidden.visible);
    }

    #[test]
    fn test_snapshot_value_roundtrip() {
        let field = ElementSnapshot::visible("").with_value("admin123");
        assert_eq!(field.value, "admin123");
    }

    #[test]
    fn test_snapshot_deserializes_from_sparse_json() {
        // CDP probes may omit fields for nodes without values.
        let snap: ElementSnapshot = serde_json::from_str(r#"{"text":"PIM","visible":true}"#).unwrap();
        assert_eq!(snap.text, "PIM");
        assert!(snap.visible);
        assert!(snap.value.is_empty());
    }
}
