//! Host-side resizer and binding lifecycle.
//!
//! The host page's half of the protocol: resolve the target iframe, apply
//! the sizing baseline, validate incoming signals, and keep the iframe's
//! height synced to content. The host never reaches into the embedded
//! document; the only inbound surface is the message channel.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `binding` | Per-iframe binding state machine |
//! | `options` | Resizer configuration |
//! | `resizer` | Resizer factory and handle |

// ============================================================================
// Submodules
// ============================================================================

/// Binding lifecycle state machine.
pub mod binding;

/// Resizer configuration options.
pub mod options;

/// Resizer factory and handle.
pub mod resizer;

// ============================================================================
// Re-exports
// ============================================================================

pub use binding::BindingState;
pub use options::ResizerOptions;
pub use resizer::{Resizer, ResizerHandle};
