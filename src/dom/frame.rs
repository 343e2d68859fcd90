//! Host document and frame element models.
//!
//! [`HostDocument`] stands in for the embedding page's DOM: a registry of
//! elements addressable by selector. [`FrameElement`] is the only element
//! shape the resizer cares about: a tag name, a source URL, and a style
//! map. Both are cheap cloneable handles onto shared state, so a resolved
//! element and the document's copy observe the same styles.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

// ============================================================================
// Constants
// ============================================================================

/// Tag name that qualifies an element as an attach target.
pub(crate) const IFRAME_TAG: &str = "IFRAME";

// ============================================================================
// Target
// ============================================================================

/// Attach target: a selector to resolve or a direct element reference.
#[derive(Debug, Clone)]
pub enum Target {
    /// Resolve against the host document at attach time.
    Selector(String),

    /// Use a live element reference directly.
    Element(FrameElement),
}

impl Target {
    /// Returns a human-readable description for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Selector(selector) => selector.clone(),
            Self::Element(element) => format!("<{} src={}>", element.tag_name(), element.src()),
        }
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<FrameElement> for Target {
    fn from(element: FrameElement) -> Self {
        Self::Element(element)
    }
}

// ============================================================================
// FrameElement
// ============================================================================

/// A host-page element handle.
///
/// Clones share the same underlying element, mirroring how multiple
/// references to one DOM node behave.
#[derive(Debug, Clone)]
pub struct FrameElement {
    inner: Arc<ElementInner>,
}

#[derive(Debug)]
struct ElementInner {
    /// Upper-case tag name, e.g. `IFRAME`.
    tag: String,
    /// Configured source URL (`src` attribute).
    src: String,
    /// Inline style map, property name to value.
    styles: Mutex<FxHashMap<String, String>>,
    /// Binding epoch; bumped whenever a resizer takes or releases
    /// ownership, so stale bindings stop applying heights.
    binding_epoch: Mutex<u64>,
}

impl FrameElement {
    /// Creates an iframe element with the given source URL.
    #[must_use]
    pub fn iframe(src: impl Into<String>) -> Self {
        Self::with_tag(IFRAME_TAG, src)
    }

    /// Creates an element with an arbitrary tag name.
    ///
    /// Non-iframe elements are rejected at attach time; this exists so a
    /// host page can contain them.
    #[must_use]
    pub fn with_tag(tag: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ElementInner {
                tag: tag.into().to_uppercase(),
                src: src.into(),
                styles: Mutex::new(FxHashMap::default()),
                binding_epoch: Mutex::new(0),
            }),
        }
    }

    /// Returns the upper-case tag name.
    #[inline]
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.inner.tag
    }

    /// Returns `true` if this element is an iframe.
    #[inline]
    #[must_use]
    pub fn is_iframe(&self) -> bool {
        self.inner.tag == IFRAME_TAG
    }

    /// Returns the configured source URL.
    #[inline]
    #[must_use]
    pub fn src(&self) -> &str {
        &self.inner.src
    }

    /// Sets an inline style property.
    pub fn set_style(&self, property: impl Into<String>, value: impl Into<String>) {
        self.inner.styles.lock().insert(property.into(), value.into());
    }

    /// Returns an inline style property, if set.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.inner.styles.lock().get(property).cloned()
    }

    /// Returns the applied height style, if any.
    #[inline]
    #[must_use]
    pub fn height(&self) -> Option<String> {
        self.style("height")
    }

    /// Returns `true` if both handles refer to the same element.
    #[inline]
    #[must_use]
    pub fn same_element(&self, other: &FrameElement) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Starts a new binding epoch and returns it.
    ///
    /// Any binding created under an earlier epoch becomes stale, which is
    /// what makes re-attach idempotent per element.
    pub(crate) fn begin_binding(&self) -> u64 {
        let mut epoch = self.inner.binding_epoch.lock();
        *epoch += 1;
        *epoch
    }

    /// Returns the current binding epoch.
    pub(crate) fn binding_epoch(&self) -> u64 {
        *self.inner.binding_epoch.lock()
    }

    /// Releases a binding, leaving the element unmanaged.
    ///
    /// Only the binding that currently owns the element advances the
    /// epoch; a stale binding releasing is a no-op.
    pub(crate) fn release_binding(&self, epoch: u64) {
        let mut current = self.inner.binding_epoch.lock();
        if *current == epoch {
            *current += 1;
        }
    }
}

// ============================================================================
// HostDocument
// ============================================================================

/// The embedding page's element registry.
///
/// Clones share the same document. Elements are registered under the
/// selector that would match them.
#[derive(Debug, Clone, Default)]
pub struct HostDocument {
    elements: Arc<Mutex<FxHashMap<String, FrameElement>>>,
}

impl HostDocument {
    /// Creates an empty document.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an element under a selector.
    pub fn insert(&self, selector: impl Into<String>, element: FrameElement) {
        self.elements.lock().insert(selector.into(), element);
    }

    /// Resolves a selector to an element handle.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<FrameElement> {
        self.elements.lock().get(selector).cloned()
    }
}

// ============================================================================
// Tests
// ============================================================================
