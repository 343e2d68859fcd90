//! Error types for the embed resizer.
//!
//! The protocol's error taxonomy is deliberately narrow: nothing here is
//! fatal. Attach failures are recoverable (embedding code may race with DOM
//! readiness), and everything that happens after attach degrades to "no
//! resize happens" rather than an error.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use embed_resizer::{Resizer, Result};
//!
//! fn example(resizer: &Resizer) -> Result<()> {
//!     let handle = resizer.attach("#testimonials")?;
//!     handle.resize()?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Target resolution | [`Error::TargetNotFound`], [`Error::NotAnIframe`] |
//! | Lifecycle | [`Error::BindingTornDown`] |
//! | External | [`Error::Json`] |
//!
//! Malformed or untrusted signals are *not* errors: they are silently
//! dropped on receive, since cross-origin noise from unrelated messages
//! must not break the widget.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::BindingId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Target Resolution Errors
    // ========================================================================
    /// Target selector matched no element in the host document.
    ///
    /// Recoverable: embedding code may run before the iframe exists.
    #[error("Target not found: {selector}")]
    TargetNotFound {
        /// Selector that matched nothing.
        selector: String,
    },

    /// Target element exists but is not an iframe.
    ///
    /// Returned when the resolved element has the wrong tag name.
    #[error("Element is not a valid iframe: {selector} (tag: {tag})")]
    NotAnIframe {
        /// Selector or description of the target.
        selector: String,
        /// Actual tag name of the resolved element.
        tag: String,
    },

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================
    /// Operation on a binding that has already been torn down.
    ///
    /// Returned when a handle is used after `remove_listeners()`.
    /// A fresh attach is required to manage the iframe again.
    #[error("Binding torn down: {binding_id}")]
    BindingTornDown {
        /// The torn-down binding's ID.
        binding_id: BindingId,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a target not found error.
    #[inline]
    pub fn target_not_found(selector: impl Into<String>) -> Self {
        Self::TargetNotFound {
            selector: selector.into(),
        }
    }

    /// Creates a not-an-iframe error.
    #[inline]
    pub fn not_an_iframe(selector: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::NotAnIframe {
            selector: selector.into(),
            tag: tag.into(),
        }
    }

    /// Creates a binding torn down error.
    #[inline]
    pub fn torn_down(binding_id: BindingId) -> Self {
        Self::BindingTornDown { binding_id }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a target resolution error.
    ///
    /// Target resolution errors are reported at attach time and leave the
    /// element unmanaged.
    #[inline]
    #[must_use]
    pub fn is_attach_error(&self) -> bool {
        matches!(
            self,
            Self::TargetNotFound { .. } | Self::NotAnIframe { .. }
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors may succeed on retry, e.g. once the iframe has
    /// been inserted into the document or after a fresh attach.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TargetNotFound { .. }
                | Self::NotAnIframe { .. }
                | Self::BindingTornDown { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
