//! Content observer.
//!
//! The [`ContentObserver`] is the embedded widget's sizing producer. It
//! sends one `resize` signal on attach (the host knows no height yet),
//! then re-measures on every mutation burst and on every `requestResize`
//! from the host.
//!
//! # Batching
//!
//! Mutation wakeups are coalesced by the content box, and the observer
//! additionally skips sends when the measured height has not changed, so
//! one mutation burst yields at most one signal. An explicit
//! `requestResize` always resends, even at an unchanged height, since the
//! host asked precisely because it no longer trusts its own state.

// ============================================================================
// Imports
// ============================================================================

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, trace, warn};

use crate::channel::ContextHandle;
use crate::content::measure::HeightCalculationMethod;
use crate::dom::ContentBox;
use crate::host::ResizerOptions;
use crate::protocol::SizingSignal;

// ============================================================================
// ContentObserver
// ============================================================================

/// Watches a content box and emits sizing signals to the host.
///
/// At most one observer is active per content box: attaching a new one
/// supersedes any prior observer, which wakes and exits. The observer
/// task also exits when the channel closes or [`detach`](Self::detach)
/// is called.
#[derive(Debug)]
pub struct ContentObserver {
    content: ContentBox,
    generation: u64,
}

impl ContentObserver {
    /// Attaches an observer to a content box.
    ///
    /// Subscribes to the channel before returning, so a `requestResize`
    /// posted immediately after attach is not missed. The initial sizing
    /// signal is emitted asynchronously once the observer task runs.
    ///
    /// The observer reads `height_calculation_method` and `log` from the
    /// shared widget configuration; the remaining options only concern
    /// the host side.
    #[must_use]
    pub fn attach(content: &ContentBox, channel: &ContextHandle, options: ResizerOptions) -> Self {
        let generation = content.begin_observation();
        let mut inbound = channel.listen();

        let task_content = content.clone();
        let task_channel = channel.clone();
        let method = options.height_calculation_method;
        let log = options.log;

        debug!(
            content_id = %content.id(),
            generation,
            method = method.as_str(),
            "Content observer attached"
        );

        tokio::spawn(async move {
            let mut last_sent: Option<f64> = None;

            // Initial sizing: no height is known to the host yet. A task
            // superseded before it first ran stays silent.
            if !task_content.observation_current(generation) {
                debug!(
                    content_id = %task_content.id(),
                    generation,
                    "Content observer superseded before start"
                );
                return;
            }
            emit(&task_content, &task_channel, method, &mut last_sent, true, log);

            loop {
                tokio::select! {
                    _ = task_content.mutation_signal().notified() => {
                        if !task_content.observation_current(generation) {
                            break;
                        }
                        emit(&task_content, &task_channel, method, &mut last_sent, false, log);
                    }

                    received = inbound.recv() => match received {
                        Ok(envelope) => {
                            if !task_content.observation_current(generation) {
                                break;
                            }
                            if matches!(envelope.signal(), Some(SizingSignal::RequestResize)) {
                                trace!(origin = %envelope.origin, "Resize requested by host");
                                emit(&task_content, &task_channel, method, &mut last_sent, true, log);
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Observer lagged behind channel");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }

            debug!(
                content_id = %task_content.id(),
                generation,
                "Content observer exited"
            );
        });

        Self {
            content: content.clone(),
            generation,
        }
    }

    /// Returns `true` while this observer is the box's active observer.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.content.observation_current(self.generation)
    }

    /// Detaches the observer. Idempotent.
    ///
    /// A superseded observer (another attach happened since) is already
    /// inactive; detaching it is a no-op.
    pub fn detach(&self) {
        self.content.end_observation(self.generation);
    }
}

// ============================================================================
// Signal Emission
// ============================================================================

/// Measures the content box and posts a `resize` signal.
///
/// Measurement failure stalls sizing silently. Unchanged heights are
/// skipped unless `force` is set.
fn emit(
    content: &ContentBox,
    channel: &ContextHandle,
    method: HeightCalculationMethod,
    last_sent: &mut Option<f64>,
    force: bool,
    log: bool,
) {
    let Some(height) = content.measure(method) else {
        if log {
            debug!(content_id = %content.id(), "Content box unmeasurable; sizing stalls");
        }
        return;
    };

    if !force && *last_sent == Some(height) {
        return;
    }
    *last_sent = Some(height);

    if log {
        debug!(content_id = %content.id(), height, "Emitting resize signal");
    }

    // One-way send; the content side never learns whether the host
    // applied the height.
    let _ = channel.post(&SizingSignal::resize(height), "*");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::channel::MessageChannel;

    fn widget_channel() -> (ContextHandle, ContextHandle) {
        MessageChannel::pair("https://host.example", "https://widget.example")
    }

    #[tokio::test]
    async fn test_initial_signal_on_attach() {
        let (host, widget) = widget_channel();
        let mut host_rx = host.listen();

        let content = ContentBox::new();
        content.set_scroll_height(600.0);

        let _observer = ContentObserver::attach(&content, &widget, ResizerOptions::default());

        let envelope = host_rx.recv().await.expect("initial signal");
        assert_eq!(envelope.signal(), Some(SizingSignal::resize(600.0)));
    }

    #[tokio::test]
    async fn test_no_initial_signal_when_unmeasurable() {
        let (host, widget) = widget_channel();
        let mut host_rx = host.listen();

        // Zero-sized box: initial measurement fails, sizing stalls.
        let content = ContentBox::new();
        let _observer = ContentObserver::attach(&content, &widget, ResizerOptions::default());
        tokio::task::yield_now().await;

        assert!(host_rx.try_recv().is_err());

        // The next successful mutation recovers.
        content.set_scroll_height(480.0);
        let envelope = host_rx.recv().await.expect("recovered signal");
        assert_eq!(envelope.signal(), Some(SizingSignal::resize(480.0)));
    }

    #[tokio::test]
    async fn test_responds_to_request_resize() {
        let (host, widget) = widget_channel();
        let mut host_rx = host.listen();

        let content = ContentBox::new();
        content.set_scroll_height(742.0);
        let _observer = ContentObserver::attach(&content, &widget, ResizerOptions::default());

        // Drain the initial signal.
        let _ = host_rx.recv().await.expect("initial signal");

        host.post(&SizingSignal::request_resize(), "*").expect("post");

        let envelope = host_rx.recv().await.expect("response signal");
        assert_eq!(envelope.signal(), Some(SizingSignal::resize(742.0)));
    }

    #[tokio::test]
    async fn test_detach_stops_signals() {
        let (host, widget) = widget_channel();
        let mut host_rx = host.listen();

        let content = ContentBox::new();
        content.set_scroll_height(500.0);
        let observer = ContentObserver::attach(&content, &widget, ResizerOptions::default());

        let _ = host_rx.recv().await.expect("initial signal");
        assert!(observer.is_active());

        observer.detach();
        assert!(!observer.is_active());
        tokio::task::yield_now().await;

        content.set_scroll_height(900.0);
        tokio::task::yield_now().await;
        assert!(host_rx.try_recv().is_err());

        // Idempotent.
        observer.detach();
    }

    #[tokio::test]
    async fn test_new_observer_supersedes_old() {
        let (host, widget) = widget_channel();
        let mut host_rx = host.listen();

        let content = ContentBox::new();
        content.set_scroll_height(500.0);

        let first = ContentObserver::attach(&content, &widget, ResizerOptions::default());
        let _ = host_rx.recv().await.expect("first initial signal");

        let second = ContentObserver::attach(&content, &widget, ResizerOptions::default());
        let _ = host_rx.recv().await.expect("second initial signal");

        assert!(!first.is_active());
        assert!(second.is_active());

        // Only the new observer reacts to mutations: exactly one signal.
        content.set_scroll_height(650.0);
        let envelope = host_rx.recv().await.expect("mutation signal");
        assert_eq!(envelope.signal(), Some(SizingSignal::resize(650.0)));

        tokio::task::yield_now().await;
        assert!(host_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_superseded_before_first_run_stays_silent() {
        let (host, widget) = widget_channel();
        let mut host_rx = host.listen();

        let content = ContentBox::new();
        content.set_scroll_height(500.0);

        // Back-to-back attaches: the first task is superseded before it
        // ever runs and must not send its initial signal.
        let first = ContentObserver::attach(&content, &widget, ResizerOptions::default());
        let second = ContentObserver::attach(&content, &widget, ResizerOptions::default());
        assert!(!first.is_active());
        assert!(second.is_active());

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let mut signals = 0;
        while let Ok(envelope) = host_rx.try_recv() {
            if envelope.signal().is_some() {
                signals += 1;
            }
        }
        assert_eq!(signals, 1, "only the active observer sends on attach");
    }

    #[tokio::test]
    async fn test_unchanged_height_not_resent_on_mutation() {
        let (host, widget) = widget_channel();
        let mut host_rx = host.listen();

        let content = ContentBox::new();
        content.set_scroll_height(600.0);
        let _observer = ContentObserver::attach(&content, &widget, ResizerOptions::default());

        let _ = host_rx.recv().await.expect("initial signal");

        // Attribute-only mutation: height unchanged, no new signal.
        content.set_scroll_height(600.0);
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert!(host_rx.try_recv().is_err());
    }
}
