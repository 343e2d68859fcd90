//! Sizing signal message types and origin policy.
//!
//! This module defines the message format exchanged between the embedded
//! widget (content side) and the host page (resizer side).
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `resize` | Content → Host | Apply a new iframe height |
//! | `requestResize` | Host → Content | Re-measure and resend height |
//!
//! Delivery is fire-and-forget: no acknowledgments, no retries, no
//! sequence numbers. The host treats every validated `resize` as
//! authoritative for "most recent known height".
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `envelope` | Delivered message with sender origin stamp |
//! | `origin` | Origin-check policy (strict / permissive) |
//! | `signal` | `SizingSignal` tagged union and height validation |

// ============================================================================
// Submodules
// ============================================================================

/// Delivered message envelopes.
pub mod envelope;

/// Origin-check policies.
pub mod origin;

/// Sizing signal definitions.
pub mod signal;

// ============================================================================
// Re-exports
// ============================================================================

pub use envelope::Envelope;
pub use origin::{OriginPolicy, source_origin};
pub use signal::SizingSignal;
