//! Resizer factory and handle.
//!
//! [`Resizer`] is the host page's entry point: it resolves a target
//! iframe, applies the sizing baseline, and wires up two tasks per
//! binding:
//!
//! - a **listener** that validates incoming envelopes (origin policy,
//!   signal shape, height range) and publishes accepted heights into a
//!   single-slot latest-height channel
//! - an **applier** that consumes only the most recently published height
//!   and writes it to the iframe's style, yielding last-write-wins
//!   semantics without sequence numbers
//!
//! Each successful attach returns an independent [`ResizerHandle`]; there
//! is no shared registry beyond the per-element binding epoch.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::channel::ContextHandle;
use crate::dom::{FrameElement, HostDocument, Target};
use crate::error::{Error, Result};
use crate::host::binding::{BindingState, IframeBinding};
use crate::host::options::ResizerOptions;
use crate::identifiers::BindingId;
use crate::protocol::{Envelope, OriginPolicy, SizingSignal, source_origin};

// ============================================================================
// Constants
// ============================================================================

/// Baseline width: fill the container.
const BASELINE_WIDTH: &str = "1px";

/// Baseline minimum width.
const BASELINE_MIN_WIDTH: &str = "100%";

/// Baseline border.
const BASELINE_BORDER: &str = "none";

/// Default height until the first signal arrives.
const DEFAULT_HEIGHT: &str = "500px";

// ============================================================================
// Resizer
// ============================================================================

/// Host-side resizer factory.
///
/// Holds the host document, the host's channel context, and the widget
/// configuration; each [`attach`](Self::attach) call produces an
/// independent binding.
#[derive(Debug, Clone)]
pub struct Resizer {
    document: HostDocument,
    channel: ContextHandle,
    options: ResizerOptions,
}

impl Resizer {
    /// Creates a resizer with default options.
    #[inline]
    #[must_use]
    pub fn new(document: HostDocument, channel: ContextHandle) -> Self {
        Self {
            document,
            channel,
            options: ResizerOptions::default(),
        }
    }

    /// Replaces the widget configuration.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: ResizerOptions) -> Self {
        self.options = options;
        self
    }

    /// Attaches to a target iframe and starts listening for signals.
    ///
    /// On success the iframe carries the sizing baseline (full-width,
    /// borderless, default height) and every validated `resize` signal
    /// updates its height until teardown. Attaching to an element that is
    /// already managed supersedes the previous binding.
    ///
    /// # Errors
    ///
    /// Both failures are recoverable and leave the element unmanaged:
    ///
    /// - [`Error::TargetNotFound`] if the selector matches nothing
    /// - [`Error::NotAnIframe`] if the element has the wrong tag
    pub fn attach(&self, target: impl Into<Target>) -> Result<ResizerHandle> {
        let target = target.into();
        let described = target.describe();

        let element = match &target {
            Target::Selector(selector) => match self.document.query(selector) {
                Some(element) => element,
                None => {
                    warn!(selector = %selector, "Resize target matched no element");
                    return Err(Error::target_not_found(selector.clone()));
                }
            },
            Target::Element(element) => element.clone(),
        };

        if !element.is_iframe() {
            warn!(target = %described, tag = element.tag_name(), "Resize target is not an iframe");
            return Err(Error::not_an_iframe(described, element.tag_name()));
        }

        // Sizing baseline, applied before any signal arrives.
        element.set_style("width", BASELINE_WIDTH);
        element.set_style("min-width", BASELINE_MIN_WIDTH);
        element.set_style("border", BASELINE_BORDER);
        element.set_style("height", DEFAULT_HEIGHT);

        let epoch = element.begin_binding();
        let binding = Arc::new(IframeBinding::new(epoch));
        binding.mark_attached();

        // Subscribe and reach Listening before spawning, so a signal
        // posted the instant attach returns is neither missed nor seen by
        // the listener in a pre-listening state.
        let inbound = self.channel.listen();
        let (height_tx, height_rx) = watch::channel::<Option<u32>>(None);
        binding.mark_listening();

        tokio::spawn(run_listener(
            inbound,
            Arc::clone(&binding),
            element.clone(),
            self.options.origin_policy(),
            height_tx,
            self.options.log,
        ));
        tokio::spawn(run_applier(height_rx, Arc::clone(&binding), element.clone()));

        debug!(
            binding_id = %binding.id(),
            target = %described,
            policy = ?self.options.origin_policy(),
            "Resizer attached"
        );

        Ok(ResizerHandle {
            binding,
            element,
            channel: self.channel.clone(),
        })
    }
}

// ============================================================================
// ResizerHandle
// ============================================================================

/// Handle to one managed iframe binding.
///
/// Dropping the handle tears the binding down, modeling the host page
/// unloading.
#[derive(Debug)]
pub struct ResizerHandle {
    binding: Arc<IframeBinding>,
    element: FrameElement,
    channel: ContextHandle,
}

impl ResizerHandle {
    /// Returns the binding ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> BindingId {
        self.binding.id()
    }

    /// Returns the binding's lifecycle state.
    ///
    /// A binding superseded by a newer attach on the same element reports
    /// [`BindingState::TornDown`]: it will never apply a height again.
    #[inline]
    #[must_use]
    pub fn state(&self) -> BindingState {
        if self.binding.is_defunct(&self.element) {
            return BindingState::TornDown;
        }
        self.binding.state()
    }

    /// Returns the managed iframe element.
    #[inline]
    #[must_use]
    pub fn element(&self) -> &FrameElement {
        &self.element
    }

    /// Asks the embedded content to re-measure and resend its height.
    ///
    /// Used after host-side layout changes. Fire-and-forget: the reply,
    /// if any, arrives as an ordinary `resize` signal.
    ///
    /// # Errors
    ///
    /// - [`Error::BindingTornDown`] if called after teardown or after a
    ///   newer attach superseded this binding
    pub fn resize(&self) -> Result<()> {
        if self.binding.is_defunct(&self.element) {
            return Err(Error::torn_down(self.binding.id()));
        }

        // The widget's effective origin may have changed since embedding
        // (redirects), so the request is not origin-restricted.
        self.channel.post(&SizingSignal::request_resize(), "*")
    }

    /// Detaches the listener and returns the iframe to an unmanaged
    /// state. Idempotent and safe to call multiple times.
    ///
    /// No signal is processed through this binding after this returns;
    /// the iframe retains its last applied height.
    pub fn remove_listeners(&self) {
        if self.binding.teardown(&self.element) {
            debug!(binding_id = %self.binding.id(), "Resizer torn down");
        }
    }
}

impl Drop for ResizerHandle {
    fn drop(&mut self) {
        self.binding.teardown(&self.element);
    }
}

// ============================================================================
// Listener Task
// ============================================================================

/// Receives envelopes, validates them, and publishes accepted heights.
async fn run_listener(
    mut inbound: broadcast::Receiver<Envelope>,
    binding: Arc<IframeBinding>,
    element: FrameElement,
    policy: OriginPolicy,
    height_tx: watch::Sender<Option<u32>>,
    log: bool,
) {
    loop {
        tokio::select! {
            _ = binding.shutdown_signal().notified() => break,

            received = inbound.recv() => match received {
                Ok(envelope) => {
                    if binding.is_defunct(&element) {
                        break;
                    }
                    // Not yet listening: drop the envelope, keep the loop.
                    if !binding.is_listening() {
                        continue;
                    }
                    if let Some(px) = validate_envelope(&envelope, policy, &element, log) {
                        // Single-slot latest-height channel: an unapplied
                        // older value is simply overwritten.
                        height_tx.send_replace(Some(px));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(binding_id = %binding.id(), skipped, "Listener lagged behind channel");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    trace!(binding_id = %binding.id(), "Listener exited");
}

/// Validates one envelope down to an applicable height.
///
/// Every rejection is silent by default; `log` enables diagnostics.
fn validate_envelope(
    envelope: &Envelope,
    policy: OriginPolicy,
    element: &FrameElement,
    log: bool,
) -> Option<u32> {
    if !policy.allows(&envelope.origin, element.src()) {
        if log {
            debug!(
                origin = %envelope.origin,
                expected = ?source_origin(element.src()),
                "Dropped signal: origin mismatch"
            );
        }
        return None;
    }

    let Some(signal) = envelope.signal() else {
        if log {
            trace!(origin = %envelope.origin, "Dropped message: not a sizing signal");
        }
        return None;
    };

    match signal.validated_height() {
        Some(px) => Some(px),
        None => {
            // requestResize addressed at the host is not an error, it
            // just carries nothing to apply.
            if log && signal.kind() == "resize" {
                debug!(origin = %envelope.origin, "Dropped resize: unusable height");
            }
            None
        }
    }
}

// ============================================================================
// Applier Task
// ============================================================================

/// Applies the most recently validated height to the iframe.
async fn run_applier(
    mut height_rx: watch::Receiver<Option<u32>>,
    binding: Arc<IframeBinding>,
    element: FrameElement,
) {
    while height_rx.changed().await.is_ok() {
        let latest = *height_rx.borrow_and_update();
        if binding.is_defunct(&element) {
            break;
        }
        if let Some(px) = latest {
            binding.apply_height(&element, px);
        }
    }

    trace!(binding_id = %binding.id(), "Applier exited");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::channel::MessageChannel;

    const WIDGET_SRC: &str = "https://testimonials.example/embed";

    fn host_setup() -> (HostDocument, ContextHandle, ContextHandle, FrameElement) {
        let (host_ctx, widget_ctx) =
            MessageChannel::pair("https://blog.example", "https://testimonials.example");
        let document = HostDocument::new();
        let element = FrameElement::iframe(WIDGET_SRC);
        document.insert("#testimonials", element.clone());
        (document, host_ctx, widget_ctx, element)
    }

    #[test]
    fn test_attach_unknown_selector_fails() {
        let (document, host_ctx, _widget_ctx, _element) = host_setup();
        let resizer = Resizer::new(document, host_ctx);

        let err = resizer.attach("#missing").unwrap_err();
        assert!(matches!(err, Error::TargetNotFound { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_attach_non_iframe_fails() {
        let (document, host_ctx, _widget_ctx, _element) = host_setup();
        document.insert("#banner", FrameElement::with_tag("div", ""));
        let resizer = Resizer::new(document, host_ctx);

        let err = resizer.attach("#banner").unwrap_err();
        assert!(matches!(err, Error::NotAnIframe { .. }));
    }

    #[tokio::test]
    async fn test_attach_applies_baseline() {
        let (document, host_ctx, _widget_ctx, element) = host_setup();
        let resizer = Resizer::new(document, host_ctx);

        let handle = resizer.attach("#testimonials").expect("attach");

        assert_eq!(element.style("width").as_deref(), Some("1px"));
        assert_eq!(element.style("min-width").as_deref(), Some("100%"));
        assert_eq!(element.style("border").as_deref(), Some("none"));
        assert_eq!(element.height().as_deref(), Some("500px"));
        assert_eq!(handle.state(), BindingState::Listening);
    }

    #[tokio::test]
    async fn test_attach_by_element_reference() {
        let (_document, host_ctx, _widget_ctx, element) = host_setup();
        let resizer = Resizer::new(HostDocument::new(), host_ctx);

        let handle = resizer.attach(element.clone()).expect("attach");
        assert!(handle.element().same_element(&element));
    }

    #[tokio::test]
    async fn test_resize_after_teardown_fails() {
        let (document, host_ctx, _widget_ctx, _element) = host_setup();
        let handle = Resizer::new(document, host_ctx)
            .attach("#testimonials")
            .expect("attach");

        handle.remove_listeners();
        assert_eq!(handle.state(), BindingState::TornDown);

        let err = handle.resize().unwrap_err();
        assert!(matches!(err, Error::BindingTornDown { .. }));

        // Idempotent.
        handle.remove_listeners();
        assert_eq!(handle.state(), BindingState::TornDown);
    }

    #[tokio::test]
    async fn test_resize_posts_request_to_widget() {
        let (document, host_ctx, widget_ctx, _element) = host_setup();
        let mut widget_rx = widget_ctx.listen();

        let handle = Resizer::new(document, host_ctx)
            .attach("#testimonials")
            .expect("attach");
        handle.resize().expect("resize");

        let envelope = widget_rx.recv().await.expect("request");
        assert_eq!(envelope.signal(), Some(SizingSignal::request_resize()));
        assert_eq!(envelope.origin, "https://blog.example");
    }

    #[tokio::test]
    async fn test_signal_before_listening_does_not_kill_listener() {
        let (_document, host_ctx, _widget_ctx, element) = host_setup();
        let epoch = element.begin_binding();
        let binding = Arc::new(IframeBinding::new(epoch));
        binding.mark_attached();

        let inbound = host_ctx.listen();
        let (height_tx, height_rx) = watch::channel::<Option<u32>>(None);
        let listener = tokio::spawn(run_listener(
            inbound,
            Arc::clone(&binding),
            element.clone(),
            OriginPolicy::Strict,
            height_tx,
            false,
        ));
        tokio::spawn(run_applier(height_rx, Arc::clone(&binding), element.clone()));

        // A valid signal lands while the binding is still Attached. It is
        // dropped, and the listener survives to serve later signals.
        host_ctx.deliver(Envelope::raw(
            "https://testimonials.example",
            r#"{"type":"resize","height":700}"#,
        ));
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!listener.is_finished());
        assert_eq!(element.height(), None);

        binding.mark_listening();
        host_ctx.deliver(Envelope::raw(
            "https://testimonials.example",
            r#"{"type":"resize","height":742}"#,
        ));
        for _ in 0..50 {
            if element.height().is_some() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(element.height().as_deref(), Some("742px"));
    }

    #[tokio::test]
    async fn test_superseded_handle_reports_torn_down() {
        let (document, host_ctx, _widget_ctx, _element) = host_setup();
        let resizer = Resizer::new(document, host_ctx);

        let first = resizer.attach("#testimonials").expect("first attach");
        let second = resizer.attach("#testimonials").expect("second attach");

        assert_eq!(first.state(), BindingState::TornDown);
        assert_eq!(second.state(), BindingState::Listening);

        let err = first.resize().unwrap_err();
        assert!(matches!(err, Error::BindingTornDown { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_validate_envelope_origin_and_shape() {
        let element = FrameElement::iframe(WIDGET_SRC);

        let good = Envelope::raw(
            "https://testimonials.example",
            r#"{"type":"resize","height":742}"#,
        );
        let foreign = Envelope::raw("https://evil.example", r#"{"type":"resize","height":9999}"#);
        let noise = Envelope::raw("https://testimonials.example", r#"{"hello":"world"}"#);
        let bad_height = Envelope::raw(
            "https://testimonials.example",
            r#"{"type":"resize","height":-1}"#,
        );

        let strict = OriginPolicy::Strict;
        assert_eq!(validate_envelope(&good, strict, &element, false), Some(742));
        assert_eq!(validate_envelope(&foreign, strict, &element, false), None);
        assert_eq!(validate_envelope(&noise, strict, &element, false), None);
        assert_eq!(validate_envelope(&bad_height, strict, &element, false), None);

        let permissive = OriginPolicy::Permissive;
        assert_eq!(
            validate_envelope(&foreign, permissive, &element, false),
            Some(9999)
        );
    }
}
