//! Locator abstraction for element selection.
//!
//! A [`Locator`] is a lazily-resolved reference to zero or more DOM nodes,
//! identified by a selector expression. Resolution happens on every use; a
//! locator is never a cached element handle. Waiting policy lives in the
//! interaction layer, not here.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Selector expression for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., `button[type='submit']`)
    Css(String),
    /// CSS selector narrowed to elements whose text contains a substring
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector.
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// The base CSS expression of this selector.
    #[must_use]
    pub fn as_css(&self) -> &str {
        match self {
            Self::Css(css) | Self::CssWithText { css, .. } => css,
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(css) => write!(f, "{css}"),
            Self::CssWithText { css, text } => write!(f, "{css} :has-text({text:?})"),
        }
    }
}

/// A lazily-resolved reference to matching DOM nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    timeout: Option<Duration>,
}

impl Locator {
    /// Create a locator from a CSS selector.
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::Css(selector.into()),
            timeout: None,
        }
    }

    /// Narrow to elements whose visible text contains `text`.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        let css = match self.selector {
            Selector::Css(css) | Selector::CssWithText { css, .. } => css,
        };
        Self {
            selector: Selector::CssWithText {
                css,
                text: text.into(),
            },
            timeout: self.timeout,
        }
    }

    /// Override the wait timeout for operations on this locator.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The selector expression.
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// The per-locator timeout override, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.selector)
    }
}
