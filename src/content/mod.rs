//! Content-side observer and height measurement.
//!
//! The embedded widget's half of the protocol: watch the content box for
//! mutations, measure the rendered height, and emit `resize` signals to
//! the host. The content side never touches host DOM; the only way it can
//! influence the iframe is through the message channel.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `measure` | Height calculation strategies |
//! | `observer` | Mutation observer and signal emitter |

// ============================================================================
// Submodules
// ============================================================================

/// Height calculation strategies.
pub mod measure;

/// Content observer.
pub mod observer;

// ============================================================================
// Re-exports
// ============================================================================

pub use measure::HeightCalculationMethod;
pub use observer::ContentObserver;
