//! Resizer configuration options.
//!
//! One configuration object covers both sides of the widget: the host
//! reads `log` and `check_origin`, the embedded side reads `log` and
//! `height_calculation_method`.

// ============================================================================
// Imports
// ============================================================================

use crate::content::HeightCalculationMethod;
use crate::protocol::OriginPolicy;

// ============================================================================
// ResizerOptions
// ============================================================================

/// Recognized widget configuration options.
///
/// # Defaults
///
/// | Option | Default |
/// |--------|---------|
/// | `log` | `false` |
/// | `check_origin` | `true` (strict) |
/// | `height_calculation_method` | `scrollHeight` |
#[derive(Debug, Clone)]
pub struct ResizerOptions {
    /// Enable per-signal diagnostics.
    ///
    /// Dropped signals are only logged when this is set; by default they
    /// are discarded without a trace, since cross-origin noise is
    /// expected.
    pub log: bool,

    /// Verify sender origins against the iframe's source URL.
    ///
    /// Disabling this accepts signals from any origin; use it only when
    /// the iframe's effective origin cannot be known in advance.
    pub check_origin: bool,

    /// Strategy used by the embedded side to compute its height.
    pub height_calculation_method: HeightCalculationMethod,
}

impl Default for ResizerOptions {
    fn default() -> Self {
        Self {
            log: false,
            check_origin: true,
            height_calculation_method: HeightCalculationMethod::default(),
        }
    }
}

impl ResizerOptions {
    /// Creates options with all defaults.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `log` option.
    #[inline]
    #[must_use]
    pub fn log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    /// Sets the `check_origin` option.
    #[inline]
    #[must_use]
    pub fn check_origin(mut self, check_origin: bool) -> Self {
        self.check_origin = check_origin;
        self
    }

    /// Sets the height calculation method.
    #[inline]
    #[must_use]
    pub fn height_calculation_method(mut self, method: HeightCalculationMethod) -> Self {
        self.height_calculation_method = method;
        self
    }

    /// Returns the origin policy implied by `check_origin`.
    #[inline]
    #[must_use]
    pub fn origin_policy(&self) -> OriginPolicy {
        OriginPolicy::from_check_origin(self.check_origin)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ResizerOptions::default();
        assert!(!options.log);
        assert!(options.check_origin);
        assert_eq!(
            options.height_calculation_method,
            HeightCalculationMethod::ScrollHeight
        );
    }

    #[test]
    fn test_builder_methods() {
        let options = ResizerOptions::new()
            .log(true)
            .check_origin(false)
            .height_calculation_method(HeightCalculationMethod::LowestElement);

        assert!(options.log);
        assert!(!options.check_origin);
        assert_eq!(
            options.height_calculation_method,
            HeightCalculationMethod::LowestElement
        );
    }

    #[test]
    fn test_origin_policy_mapping() {
        assert_eq!(
            ResizerOptions::new().origin_policy(),
            OriginPolicy::Strict
        );
        assert_eq!(
            ResizerOptions::new().check_origin(false).origin_policy(),
            OriginPolicy::Permissive
        );
    }
}
