//! Binding lifecycle state machine.
//!
//! An [`IframeBinding`] is the runtime association between one iframe
//! element and the listener state attached to it. Its lifecycle is
//! strictly forward:
//!
//! ```text
//! Uninitialized → Attached → Listening → TornDown
//! ```
//!
//! There is no transition out of `TornDown`; managing the iframe again
//! requires a fresh attach, which creates an independent binding.
//!
//! # Teardown Guarantee
//!
//! Height application and teardown contend on the same state lock, and
//! teardown flips the state before returning. Once `teardown` has
//! returned, no signal can be applied through this binding.

// ============================================================================
// Imports
// ============================================================================

use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::trace;

use crate::dom::FrameElement;
use crate::identifiers::BindingId;

// ============================================================================
// BindingState
// ============================================================================

/// Lifecycle state of an iframe binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// Created, baseline not yet applied.
    Uninitialized,

    /// Sizing baseline applied to the iframe.
    Attached,

    /// Receiving signals; height updated repeatedly.
    Listening,

    /// Terminal. The iframe is unmanaged again.
    TornDown,
}

// ============================================================================
// IframeBinding
// ============================================================================

/// State attached to one managed iframe element.
#[derive(Debug)]
pub(crate) struct IframeBinding {
    id: BindingId,
    /// Element epoch this binding was created under; the element side of
    /// the same ownership check.
    epoch: u64,
    state: Mutex<BindingState>,
    /// Wakes the listener task on teardown.
    shutdown: Notify,
}

impl IframeBinding {
    /// Creates a binding for the given element epoch.
    pub(crate) fn new(epoch: u64) -> Self {
        Self {
            id: BindingId::generate(),
            epoch,
            state: Mutex::new(BindingState::Uninitialized),
            shutdown: Notify::new(),
        }
    }

    /// Returns the binding ID.
    #[inline]
    pub(crate) fn id(&self) -> BindingId {
        self.id
    }

    /// Returns the element epoch this binding owns.
    #[inline]
    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns the current lifecycle state.
    pub(crate) fn state(&self) -> BindingState {
        *self.state.lock()
    }

    /// Returns `true` while signals may be processed.
    pub(crate) fn is_listening(&self) -> bool {
        *self.state.lock() == BindingState::Listening
    }

    /// Returns `true` once the binding can never apply a height again:
    /// torn down, or the element was re-bound by a newer attach.
    pub(crate) fn is_defunct(&self, element: &FrameElement) -> bool {
        *self.state.lock() == BindingState::TornDown || element.binding_epoch() != self.epoch
    }

    /// Marks the sizing baseline as applied.
    pub(crate) fn mark_attached(&self) {
        let mut state = self.state.lock();
        if *state == BindingState::Uninitialized {
            *state = BindingState::Attached;
        }
    }

    /// Marks the listener as subscribed.
    pub(crate) fn mark_listening(&self) {
        let mut state = self.state.lock();
        if *state == BindingState::Attached {
            *state = BindingState::Listening;
        }
    }

    /// Applies a validated height to the element.
    ///
    /// Returns `false` without touching the element when the binding is
    /// not listening or no longer owns the element.
    pub(crate) fn apply_height(&self, element: &FrameElement, px: u32) -> bool {
        let state = self.state.lock();
        if *state != BindingState::Listening || element.binding_epoch() != self.epoch {
            return false;
        }

        element.set_style("height", format!("{px}px"));
        trace!(binding_id = %self.id, px, "Applied height");
        true
    }

    /// Tears the binding down. Idempotent.
    ///
    /// Returns `true` on the transition into `TornDown`, `false` when the
    /// binding was already torn down.
    pub(crate) fn teardown(&self, element: &FrameElement) -> bool {
        {
            let mut state = self.state.lock();
            if *state == BindingState::TornDown {
                return false;
            }
            *state = BindingState::TornDown;
        }

        element.release_binding(self.epoch);
        self.shutdown.notify_one();
        true
    }

    /// Returns the teardown wakeup for the listener task.
    pub(crate) fn shutdown_signal(&self) -> &Notify {
        &self.shutdown
    }
}

// ============================================================================
// Tests
// ============================================================================
