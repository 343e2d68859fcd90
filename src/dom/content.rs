//! Embedded content box model.
//!
//! A [`ContentBox`] is the embedded document's root content element: the
//! thing the widget renders testimonials into, the content observer
//! measures, and DOM mutations land on. One per embedded page instance.
//!
//! Mutations are coalesced: writes raise a single pending wakeup, so an
//! observer parked on the box sees one wakeup per mutation burst rather
//! than one per individual DOM write.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::content::HeightCalculationMethod;
use crate::identifiers::ContentId;

// ============================================================================
// ContentBox
// ============================================================================

/// The embedded document's observed root element.
///
/// Clones share the same underlying box.
#[derive(Debug, Clone)]
pub struct ContentBox {
    inner: Arc<ContentInner>,
}

#[derive(Debug)]
struct ContentInner {
    id: ContentId,
    state: Mutex<ContentState>,
    /// Coalesced mutation wakeup for the attached observer.
    mutations: Notify,
    /// Observation generation; only the newest observer is current.
    observation: Mutex<u64>,
}

#[derive(Debug)]
struct ContentState {
    /// Full scroll height of the document, in CSS pixels.
    scroll_height: f64,
    /// Bottom edge of the lowest rendered element, in CSS pixels.
    lowest_element_bottom: f64,
    /// False once the box is detached from its document.
    attached: bool,
}

impl Default for ContentBox {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentBox {
    /// Creates an attached, empty content box.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ContentInner {
                id: ContentId::generate(),
                state: Mutex::new(ContentState {
                    scroll_height: 0.0,
                    lowest_element_bottom: 0.0,
                    attached: true,
                }),
                mutations: Notify::new(),
                observation: Mutex::new(0),
            }),
        }
    }

    /// Returns this box's content ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ContentId {
        self.inner.id
    }

    /// Measures the content height using the given strategy.
    ///
    /// Returns `None` when the box cannot be measured: detached from its
    /// document, zero-sized, or carrying a nonsensical measurement. A
    /// `None` here means sizing stalls; it is never surfaced as an error.
    #[must_use]
    pub fn measure(&self, method: HeightCalculationMethod) -> Option<f64> {
        let state = self.inner.state.lock();
        if !state.attached {
            return None;
        }

        let height = match method {
            HeightCalculationMethod::ScrollHeight => state.scroll_height,
            HeightCalculationMethod::LowestElement => state.lowest_element_bottom,
        };

        (height.is_finite() && height > 0.0).then_some(height)
    }

    /// Returns the current scroll height.
    #[must_use]
    pub fn scroll_height(&self) -> f64 {
        self.inner.state.lock().scroll_height
    }

    /// Sets the document scroll height. Counts as a DOM mutation.
    pub fn set_scroll_height(&self, px: f64) {
        self.inner.state.lock().scroll_height = px;
        self.record_mutation();
    }

    /// Sets the lowest element's bottom edge. Counts as a DOM mutation.
    pub fn set_lowest_element(&self, px: f64) {
        self.inner.state.lock().lowest_element_bottom = px;
        self.record_mutation();
    }

    /// Grows the content by `px`, as when a new testimonial card is
    /// rendered. Counts as a DOM mutation.
    pub fn append_content(&self, px: f64) {
        {
            let mut state = self.inner.state.lock();
            state.scroll_height += px;
            state.lowest_element_bottom += px;
        }
        self.record_mutation();
    }

    /// Detaches the box from its document; measurement fails afterwards.
    pub fn detach(&self) {
        self.inner.state.lock().attached = false;
        self.record_mutation();
    }

    /// Re-attaches the box to its document.
    pub fn reattach(&self) {
        self.inner.state.lock().attached = true;
        self.record_mutation();
    }

    /// Registers a mutation, waking the attached observer at most once
    /// per burst.
    fn record_mutation(&self) {
        self.inner.mutations.notify_one();
    }

    /// Returns the coalesced mutation wakeup.
    pub(crate) fn mutation_signal(&self) -> &Notify {
        &self.inner.mutations
    }

    /// Starts a new observation generation and returns it.
    ///
    /// Any previously attached observer becomes stale and is woken so it
    /// can exit, keeping at most one active observer per box.
    pub(crate) fn begin_observation(&self) -> u64 {
        let generation = {
            let mut current = self.inner.observation.lock();
            *current += 1;
            *current
        };
        self.inner.mutations.notify_one();
        generation
    }

    /// Returns `true` if `generation` is still the active observation.
    pub(crate) fn observation_current(&self, generation: u64) -> bool {
        *self.inner.observation.lock() == generation
    }

    /// Ends an observation if it is still the active one.
    pub(crate) fn end_observation(&self, generation: u64) {
        {
            let mut current = self.inner.observation.lock();
            if *current == generation {
                *current += 1;
            }
        }
        self.inner.mutations.notify_one();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_scroll_height() {
        let content = ContentBox::new();
        content.set_scroll_height(742.0);
        content.set_lowest_element(700.0);

        assert_eq!(
            content.measure(HeightCalculationMethod::ScrollHeight),
            Some(742.0)
        );
        assert_eq!(
            content.measure(HeightCalculationMethod::LowestElement),
            Some(700.0)
        );
    }

    #[test]
    fn test_measure_zero_sized_fails() {
        let content = ContentBox::new();
        assert_eq!(content.measure(HeightCalculationMethod::ScrollHeight), None);
    }

    #[test]
    fn test_measure_detached_fails() {
        let content = ContentBox::new();
        content.set_scroll_height(600.0);
        content.detach();

        assert_eq!(content.measure(HeightCalculationMethod::ScrollHeight), None);

        content.reattach();
        assert_eq!(
            content.measure(HeightCalculationMethod::ScrollHeight),
            Some(600.0)
        );
    }

    #[test]
    fn test_append_content_grows_both_metrics() {
        let content = ContentBox::new();
        content.set_scroll_height(600.0);
        content.set_lowest_element(580.0);

        content.append_content(290.0);

        assert_eq!(content.scroll_height(), 890.0);
        assert_eq!(
            content.measure(HeightCalculationMethod::LowestElement),
            Some(870.0)
        );
    }

    #[test]
    fn test_observation_generations() {
        let content = ContentBox::new();

        let first = content.begin_observation();
        assert!(content.observation_current(first));

        let second = content.begin_observation();
        assert!(!content.observation_current(first));
        assert!(content.observation_current(second));

        // Ending a stale observation leaves the active one untouched.
        content.end_observation(first);
        assert!(content.observation_current(second));

        content.end_observation(second);
        assert!(!content.observation_current(second));
    }

    #[test]
    fn test_clones_share_state() {
        let content = ContentBox::new();
        let clone = content.clone();

        content.set_scroll_height(500.0);
        assert_eq!(clone.scroll_height(), 500.0);
        assert_eq!(content.id(), clone.id());
    }
}
