//! Cross-context message channel.
//!
//! Models the asynchronous messaging surface between two browsing
//! contexts: the host page and the embedded widget. Each context gets a
//! [`ContextHandle`]; posting from one side delivers an [`Envelope`] to
//! every listener on the other side, stamped with the sender's origin.
//!
//! # Delivery Semantics
//!
//! - Fire-and-forget: posting with no listener attached loses the message.
//!   A lost signal is recovered only by the next mutation or an explicit
//!   `requestResize`.
//! - No cross-context ordering guarantee; within one sender, messages are
//!   delivered in post order.
//! - Listeners subscribe independently; dropping a receiver detaches that
//!   listener without affecting others.

// ============================================================================
// Imports
// ============================================================================

use tokio::sync::broadcast;
use tracing::trace;

use crate::error::Result;
use crate::protocol::{Envelope, SizingSignal};

// ============================================================================
// Constants
// ============================================================================

/// Per-direction delivery buffer.
///
/// Sizing bursts are small; a listener that falls this far behind is
/// lagging and will observe a `Lagged` receive error.
const DELIVERY_BUFFER: usize = 64;

// ============================================================================
// MessageChannel
// ============================================================================

/// Factory for a connected pair of browsing contexts.
pub struct MessageChannel;

impl MessageChannel {
    /// Creates a connected host/content context pair.
    ///
    /// `host_origin` and `content_origin` are the origins stamped onto
    /// envelopes posted by the respective side.
    #[must_use]
    pub fn pair(
        host_origin: impl Into<String>,
        content_origin: impl Into<String>,
    ) -> (ContextHandle, ContextHandle) {
        let (into_host, _) = broadcast::channel(DELIVERY_BUFFER);
        let (into_content, _) = broadcast::channel(DELIVERY_BUFFER);

        let host = ContextHandle {
            origin: host_origin.into(),
            inbound: into_host.clone(),
            outbound: into_content.clone(),
        };

        let content = ContextHandle {
            origin: content_origin.into(),
            inbound: into_content,
            outbound: into_host,
        };

        (host, content)
    }
}

// ============================================================================
// ContextHandle
// ============================================================================

/// One browsing context's view of the message channel.
///
/// Cloning yields another handle onto the same context, like holding a
/// second reference to the same `window`.
#[derive(Debug, Clone)]
pub struct ContextHandle {
    /// Origin of this context.
    origin: String,
    /// Delivery queue for messages addressed to this context.
    inbound: broadcast::Sender<Envelope>,
    /// Delivery queue of the peer context.
    outbound: broadcast::Sender<Envelope>,
}

impl ContextHandle {
    /// Returns this context's origin.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Posts a sizing signal to the peer context.
    ///
    /// `target_origin` is the sender's declared restriction on who may
    /// receive the message (`"*"` for no restriction); it is recorded for
    /// diagnostics. Delivery is fire-and-forget: a peer with no listener
    /// simply misses the signal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the signal cannot be
    /// serialized.
    pub fn post(&self, signal: &SizingSignal, target_origin: &str) -> Result<()> {
        let envelope = Envelope::new(self.origin.clone(), signal)?;

        trace!(
            origin = %self.origin,
            target_origin,
            kind = signal.kind(),
            "Posting signal"
        );

        // No listener attached is not an error.
        let _ = self.outbound.send(envelope);
        Ok(())
    }

    /// Posts an arbitrary raw payload to the peer context.
    ///
    /// Models unrelated scripts sharing the message surface.
    pub fn post_raw(&self, payload: impl Into<String>) {
        let _ = self
            .outbound
            .send(Envelope::raw(self.origin.clone(), payload.into()));
    }

    /// Injects an envelope into *this* context's delivery queue.
    ///
    /// Simulation hook for messages posted by arbitrary third-party
    /// windows, whose origin stamp is outside this channel pair.
    pub fn deliver(&self, envelope: Envelope) {
        let _ = self.inbound.send(envelope);
    }

    /// Subscribes a listener to messages addressed to this context.
    ///
    /// Messages posted before subscription are not replayed.
    #[must_use]
    pub fn listen(&self) -> broadcast::Receiver<Envelope> {
        self.inbound.subscribe()
    }

    /// Returns the number of listeners currently attached to this context.
    #[inline]
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inbound.receiver_count()
    }
}

// ============================================================================
// Tests
// ============================================================================
