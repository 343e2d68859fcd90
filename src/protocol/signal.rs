//! Sizing signal message types.
//!
//! A [`SizingSignal`] is the only payload that crosses the channel. It is a
//! tagged union discriminated by `type`, so both ends validate structurally
//! rather than by ad hoc field probing.
//!
//! # Wire Format
//!
//! ```json
//! { "type": "resize", "height": 742 }
//! { "type": "requestResize" }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// SizingSignal
// ============================================================================

/// A sizing message exchanged between embedded content and host.
///
/// Ephemeral: one per content-size change, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SizingSignal {
    /// Content height changed; the host should apply the new height.
    #[serde(rename = "resize")]
    Resize {
        /// Requested iframe height in CSS pixels.
        height: f64,
    },

    /// Host asks the content to re-measure and resend its height.
    ///
    /// Used for host-initiated re-sync, e.g. after a window resize.
    #[serde(rename = "requestResize")]
    RequestResize,
}

impl SizingSignal {
    /// Creates a `resize` signal.
    #[inline]
    #[must_use]
    pub fn resize(height: f64) -> Self {
        Self::Resize { height }
    }

    /// Creates a `requestResize` signal.
    #[inline]
    #[must_use]
    pub fn request_resize() -> Self {
        Self::RequestResize
    }

    /// Returns the discriminant tag as it appears on the wire.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Resize { .. } => "resize",
            Self::RequestResize => "requestResize",
        }
    }

    /// Validates and truncates the height of a `resize` signal.
    ///
    /// Returns the height in whole CSS pixels, or `None` when the signal
    /// carries no usable height:
    ///
    /// - `requestResize` signals have no height
    /// - non-finite heights (NaN, infinity) are rejected
    /// - heights that truncate to zero or below are rejected
    ///
    /// Fractional pixels are truncated toward zero before the positivity
    /// check, matching `parseInt` semantics on the receiving end.
    #[must_use]
    pub fn validated_height(&self) -> Option<u32> {
        match *self {
            Self::Resize { height } => {
                if !height.is_finite() {
                    return None;
                }
                let px = height.trunc();
                if px <= 0.0 || px > f64::from(u32::MAX) {
                    return None;
                }
                Some(px as u32)
            }
            Self::RequestResize => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
