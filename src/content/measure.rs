//! Height calculation strategies.
//!
//! The embedded side computes its own height before signaling the host.
//! Which measurement is right depends on the widget's layout: full scroll
//! height over-reports when the document has trailing margins, while the
//! lowest element's bottom edge ignores overflowed decoration.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// HeightCalculationMethod
// ============================================================================

/// Strategy used by the embedded side to compute content height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeightCalculationMethod {
    /// Full document scroll height (default).
    #[default]
    ScrollHeight,

    /// Bottom edge of the lowest rendered element.
    LowestElement,
}

impl HeightCalculationMethod {
    /// Returns the configuration name of this strategy.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScrollHeight => "scrollHeight",
            Self::LowestElement => "lowestElement",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
