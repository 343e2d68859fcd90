//! Simulated DOM surfaces for both browsing contexts.
//!
//! The protocol is exercised headlessly against small in-memory models of
//! the pieces of DOM it touches:
//!
//! - [`HostDocument`]: selector-addressable registry of host-page elements
//! - [`FrameElement`]: an element with a tag name, a source URL, and a
//!   mutable style map (the resizer only ever touches its styles)
//! - [`ContentBox`]: the embedded document's root content element, the
//!   thing the content observer measures and watches for mutations
//!
//! # Isolation Boundary
//!
//! The iframe element's height style is mutated only by the host-side
//! resizer. The content side never holds a [`FrameElement`]; it only sees
//! its own [`ContentBox`].

// ============================================================================
// Submodules
// ============================================================================

/// Embedded content box model.
pub mod content;

/// Host document and frame element models.
pub mod frame;

// ============================================================================
// Re-exports
// ============================================================================

pub use content::ContentBox;
pub use frame::{FrameElement, HostDocument, Target};
