//! Type-safe identifiers for protocol entities.
//!
//! Newtype wrappers around UUIDs prevent mixing incompatible IDs at
//! compile time. A [`BindingId`] names one host-side iframe binding;
//! a [`ContentId`] names one embedded content box instance.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// BindingId
// ============================================================================

/// Identifier for a host-side iframe binding.
///
/// A fresh ID is generated per successful attach; re-attach after teardown
/// yields a new, independent binding ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingId(Uuid);

impl BindingId {
    /// Generates a new random binding ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// ContentId
// ============================================================================

/// Identifier for an embedded content box instance.
///
/// One per embedded page instance; lifecycle bound to the iframe's
/// document lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(Uuid);

impl ContentId {
    /// Generates a new random content ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_ids_are_unique() {
        let a = BindingId::generate();
        let b = BindingId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_content_ids_are_unique() {
        let a = ContentId::generate();
        let b = ContentId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_binding_id_display_roundtrip() {
        let id = BindingId::generate();
        let text = id.to_string();
        assert_eq!(text.len(), 36);
    }

    #[test]
    fn test_binding_id_serde() {
        let id = BindingId::generate();
        let json = serde_json::to_string(&id).expect("serialize");
        let back: BindingId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, back);
    }
}
