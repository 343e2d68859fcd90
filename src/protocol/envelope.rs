//! Delivered message envelopes.
//!
//! An [`Envelope`] is what a listener actually receives from the channel:
//! the raw payload text plus the sender's origin, stamped by the channel at
//! delivery time. The receiver decides whether to trust the payload by
//! checking the origin first and only then parsing the payload.
//!
//! Payloads travel as JSON text. Anything that fails to parse as a
//! [`SizingSignal`] is unrelated cross-context noise and is dropped
//! without error.

// ============================================================================
// Imports
// ============================================================================

use crate::error::Result;
use crate::protocol::signal::SizingSignal;

// ============================================================================
// Envelope
// ============================================================================

/// A message as delivered to a listening context.
///
/// # Trust Boundary
///
/// The `origin` field is stamped by the channel, not by the sender's
/// payload, so receivers can rely on it for origin checks.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Origin of the sending context, e.g. `https://testimonials.example`.
    pub origin: String,

    /// Raw payload text (JSON for protocol messages).
    pub payload: String,
}

impl Envelope {
    /// Creates an envelope carrying a serialized sizing signal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the signal cannot be
    /// serialized.
    pub fn new(origin: impl Into<String>, signal: &SizingSignal) -> Result<Self> {
        Ok(Self {
            origin: origin.into(),
            payload: serde_json::to_string(signal)?,
        })
    }

    /// Creates an envelope with an arbitrary raw payload.
    ///
    /// Models messages posted by unrelated scripts sharing the channel;
    /// such payloads typically fail to parse as sizing signals.
    #[inline]
    #[must_use]
    pub fn raw(origin: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            payload: payload.into(),
        }
    }

    /// Parses the payload as a sizing signal.
    ///
    /// Returns `None` for malformed payloads; malformed messages are not
    /// an error condition at this layer.
    #[must_use]
    pub fn signal(&self) -> Option<SizingSignal> {
        serde_json::from_str(&self.payload).ok()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_carries_signal() {
        let envelope = Envelope::new("https://widget.example", &SizingSignal::resize(600.0))
            .expect("envelope");

        assert_eq!(envelope.origin, "https://widget.example");
        assert_eq!(envelope.signal(), Some(SizingSignal::resize(600.0)));
    }

    #[test]
    fn test_raw_noise_is_not_a_signal() {
        let envelope = Envelope::raw("https://ads.example", r#"{"event":"impression"}"#);
        assert_eq!(envelope.signal(), None);
    }

    #[test]
    fn test_non_json_payload_is_not_a_signal() {
        let envelope = Envelope::raw("https://ads.example", "not json at all");
        assert_eq!(envelope.signal(), None);
    }

    #[test]
    fn test_request_resize_roundtrip() {
        let envelope =
            Envelope::new("https://host.example", &SizingSignal::request_resize()).expect("envelope");
        assert_eq!(envelope.signal(), Some(SizingSignal::request_resize()));
    }
}
