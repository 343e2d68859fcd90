//! Origin-check policies.
//!
//! The host decides whether to trust a sizing signal based on the sender's
//! origin. Two policies exist:
//!
//! - [`OriginPolicy::Strict`]: the sender origin must be a prefix of the
//!   target iframe's configured `src` URL. Signals from any other origin
//!   are dropped.
//! - [`OriginPolicy::Permissive`]: signals are accepted regardless of
//!   sender origin. Offered for embeddings where the iframe's effective
//!   origin cannot be predicted in advance (e.g. redirects). This is a
//!   deliberate security/usability trade-off, not an oversight.

// ============================================================================
// Imports
// ============================================================================

use url::Url;

// ============================================================================
// OriginPolicy
// ============================================================================

/// Policy applied to the sender origin of incoming sizing signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OriginPolicy {
    /// Sender origin must be a prefix of the iframe's `src` URL.
    #[default]
    Strict,

    /// Accept signals from any origin (`check_origin: false`).
    Permissive,
}

impl OriginPolicy {
    /// Maps the `check_origin` option to a policy.
    #[inline]
    #[must_use]
    pub fn from_check_origin(check_origin: bool) -> Self {
        if check_origin {
            Self::Strict
        } else {
            Self::Permissive
        }
    }

    /// Returns `true` if a signal from `sender_origin` may act on an
    /// iframe whose configured source is `frame_src`.
    ///
    /// Strict matching means `frame_src` starts with `sender_origin`, so
    /// `https://widget.example` is trusted for an iframe pointing at
    /// `https://widget.example/embed?tag=support`. An empty sender origin
    /// never matches.
    #[must_use]
    pub fn allows(&self, sender_origin: &str, frame_src: &str) -> bool {
        match self {
            Self::Permissive => true,
            Self::Strict => !sender_origin.is_empty() && frame_src.starts_with(sender_origin),
        }
    }
}

// ============================================================================
// Origin Helpers
// ============================================================================

/// Derives the origin of an iframe `src` URL.
///
/// Returns `None` when the source is not an absolute, parseable URL.
/// Used for diagnostics when a strict check drops a signal.
#[must_use]
pub fn source_origin(frame_src: &str) -> Option<String> {
    let url = Url::parse(frame_src).ok()?;
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

// ============================================================================
// Tests
// ============================================================================
