//! Embed Resizer - cross-context iframe auto-resize protocol.
//!
//! This library implements the sizing protocol between a host page that
//! embeds a testimonial widget in an iframe and the widget content running
//! inside that iframe. The two sides live in different trust domains and
//! communicate exclusively through an asynchronous message channel.
//!
//! # Architecture
//!
//! The protocol follows a producer/consumer model:
//!
//! - **Content side**: observes its own content box for mutations, measures
//!   the rendered height, and emits `resize` signals.
//! - **Host side**: owns the iframe element's displayed height, validates
//!   incoming signals against an origin policy, and applies the most
//!   recently validated height (last-write-wins).
//!
//! Key design principles:
//!
//! - Each [`ResizerHandle`] owns: one iframe binding + listener task + applier task
//! - Signals cross the channel as JSON text and are re-parsed on receive
//! - Malformed or untrusted signals are dropped, never raised
//! - Fire-and-forget delivery (no acknowledgment, no retry)
//!
//! # Quick Start
//!
//! ```no_run
//! use embed_resizer::{
//!     ContentBox, ContentObserver, FrameElement, HostDocument, MessageChannel, Resizer,
//!     ResizerOptions, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Two browsing contexts joined by a message channel.
//!     let (host_ctx, widget_ctx) =
//!         MessageChannel::pair("https://blog.example", "https://testimonials.example");
//!
//!     // Host page: an iframe pointing at the widget.
//!     let document = HostDocument::new();
//!     document.insert(
//!         "#testimonials",
//!         FrameElement::iframe("https://testimonials.example/embed"),
//!     );
//!
//!     // Widget content: one observed content box per embedded page.
//!     let content = ContentBox::new();
//!     let _observer = ContentObserver::attach(&content, &widget_ctx, ResizerOptions::default());
//!
//!     // Attach the resizer and request an initial sync.
//!     let handle = Resizer::new(document, host_ctx).attach("#testimonials")?;
//!     handle.resize()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`channel`] | Cross-context message channel between browsing contexts |
//! | [`content`] | Content-side observer and height measurement |
//! | [`dom`] | Simulated host document, iframe element, and content box |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`host`] | Host-side resizer, options, and binding lifecycle |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Sizing signal contract and origin policy |
//!
//! # Failure Model
//!
//! Every failure in this protocol is non-fatal: target resolution failures
//! are warnings the caller can retry, untrusted signals are silently
//! discarded, and measurement failures stall sizing until the next
//! mutation. The iframe always retains its last applied (or default)
//! height.

// ============================================================================
// Modules
// ============================================================================

/// Cross-context message channel.
///
/// Models the asynchronous messaging surface between the host page and the
/// embedded widget, including origin stamping on every delivered envelope.
pub mod channel;

/// Content-side observer and measurement strategies.
///
/// - [`ContentObserver`] - watches a content box and emits sizing signals
/// - [`HeightCalculationMethod`] - strategy for computing content height
pub mod content;

/// Simulated DOM surfaces for both browsing contexts.
///
/// - [`HostDocument`] - selector-addressable element registry
/// - [`FrameElement`] - iframe element with a mutable style map
/// - [`ContentBox`] - the embedded document's observed root element
pub mod dom;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Host-side resizer factory and binding lifecycle.
///
/// Use [`Resizer::new`] then [`Resizer::attach`] to obtain a
/// [`ResizerHandle`] for a target iframe.
pub mod host;

/// Type-safe identifiers for protocol entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Sizing signal message types and origin policy.
///
/// Internal wire contract shared by both sides of the channel.
pub mod protocol;

// ============================================================================
// Re-exports
// ============================================================================

// Channel types
pub use channel::{ContextHandle, MessageChannel};

// Content types
pub use content::{ContentObserver, HeightCalculationMethod};

// DOM types
pub use dom::{ContentBox, FrameElement, HostDocument, Target};

// Error types
pub use error::{Error, Result};

// Host types
pub use host::{BindingState, Resizer, ResizerHandle, ResizerOptions};

// Identifier types
pub use identifiers::{BindingId, ContentId};

// Protocol types
pub use protocol::{Envelope, OriginPolicy, SizingSignal};
