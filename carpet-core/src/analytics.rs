//! Analytics event records and the sink seam for the transport layer.
//!
//! The session only produces [`TrackedEvent`] values and records them to
//! whatever sink the host hands it. It never reads consent.
//!
//! [`ConsentPreferences`] and [`ConsentGatedSink`] are host-side helpers,
//! re-exported here for convenience: the host owns the stored cookie choice
//! and wraps its transport in the gate.

use serde::{Deserialize, Serialize};

use crate::constants::{ANALYTICS_CATEGORY, PREMIUM_CTA_LABEL};
use crate::dimension::Dimension;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub category: String,
    pub action: String,
    pub label: String,
}

impl TrackedEvent {
    fn customizer(action: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            category: ANALYTICS_CATEGORY.to_string(),
            action: action.into(),
            label: label.into(),
        }
    }

    /// Option click, tagged free or premium by the option's catalog flag.
    #[must_use]
    pub fn option_click(dimension: Dimension, key: &str, premium: bool) -> Self {
        let tier = if premium { "premium" } else { "free" };
        Self::customizer(
            format!("{tier}_{}_click", dimension.action_key()),
            format!("{} {key}", dimension.label()),
        )
    }

    #[must_use]
    pub fn update_visual(pattern: &str, color: &str) -> Self {
        Self::customizer("update_visual", format!("Pattern {pattern}, Color {color}"))
    }

    #[must_use]
    pub fn premium_cta() -> Self {
        Self::customizer("premium_cta_click", PREMIUM_CTA_LABEL)
    }

    #[must_use]
    pub fn journey_advance(node: u32) -> Self {
        Self::customizer("journey_advance", format!("Node {node}"))
    }

    #[must_use]
    pub fn streak_increment(streak: u32) -> Self {
        Self::customizer("streak_increment", format!("Streak {streak}"))
    }

    #[must_use]
    pub fn gem_increment(gems: u32) -> Self {
        Self::customizer("gem_increment", format!("Gems {gems}"))
    }
}

/// Receiver for tracked events. Implemented by the analytics transport.
pub trait EventSink {
    fn record(&mut self, event: TrackedEvent);
}

/// In-memory sink; the session buffers into one until drained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<TrackedEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[TrackedEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<TrackedEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand every buffered event to `sink`, oldest first.
    pub fn flush_into<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        for event in self.drain() {
            sink.record(event);
        }
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: TrackedEvent) {
        self.events.push(event);
    }
}

/// Stored cookie choice. Essential cookies are always on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPreferences {
    pub essential: bool,
    pub analytics: bool,
    pub marketing: bool,
}

impl Default for ConsentPreferences {
    fn default() -> Self {
        Self::reject_all()
    }
}

impl ConsentPreferences {
    /// Storage key the page keeps the serialized preferences under.
    pub const STORAGE_KEY: &'static str = "cookie_consent_status";

    #[must_use]
    pub const fn accept_all() -> Self {
        Self {
            essential: true,
            analytics: true,
            marketing: true,
        }
    }

    #[must_use]
    pub const fn reject_all() -> Self {
        Self {
            essential: true,
            analytics: false,
            marketing: false,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the stored value is not valid preferences JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Forwards events to `inner` only while analytics consent is granted.
#[derive(Debug, Clone)]
pub struct ConsentGatedSink<S> {
    inner: S,
    consent: ConsentPreferences,
    dropped: usize,
}

impl<S: EventSink> ConsentGatedSink<S> {
    pub const fn new(inner: S, consent: ConsentPreferences) -> Self {
        Self {
            inner,
            consent,
            dropped: 0,
        }
    }

    pub const fn set_consent(&mut self, consent: ConsentPreferences) {
        self.consent = consent;
    }

    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    pub const fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EventSink> EventSink for ConsentGatedSink<S> {
    fn record(&mut self, event: TrackedEvent) {
        if self.consent.analytics {
            self.inner.record(event);
        } else {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_click_names_follow_customizer_scheme() {
        let event = TrackedEvent::option_click(Dimension::Pattern, "royal", true);
        assert_eq!(event.category, "carpet_customizer");
        assert_eq!(event.action, "premium_pattern_click");
        assert_eq!(event.label, "Pattern royal");

        let event = TrackedEvent::option_click(Dimension::LearningStyle, "visual", false);
        assert_eq!(event.action, "free_learning_style_click");
        assert_eq!(event.label, "Learning style visual");

        assert_eq!(
            TrackedEvent::update_visual("floral", "green").label,
            "Pattern floral, Color green"
        );
        assert_eq!(TrackedEvent::premium_cta().label, "Unlock Premium");
    }

    #[test]
    fn consent_gate_drops_without_analytics() {
        let mut sink = ConsentGatedSink::new(EventLog::new(), ConsentPreferences::reject_all());
        sink.record(TrackedEvent::premium_cta());
        assert!(sink.inner().is_empty());
        assert_eq!(sink.dropped(), 1);

        sink.set_consent(ConsentPreferences::accept_all());
        sink.record(TrackedEvent::premium_cta());
        assert_eq!(sink.into_inner().len(), 1);
    }

    #[test]
    fn flush_preserves_order() {
        let mut buffer = EventLog::new();
        buffer.record(TrackedEvent::journey_advance(3));
        buffer.record(TrackedEvent::gem_increment(155));
        let mut downstream = EventLog::new();
        buffer.flush_into(&mut downstream);
        assert!(buffer.is_empty());
        let actions: Vec<&str> = downstream
            .events()
            .iter()
            .map(|event| event.action.as_str())
            .collect();
        assert_eq!(actions, ["journey_advance", "gem_increment"]);
    }

    #[test]
    fn consent_roundtrips_through_storage_json() {
        let stored = ConsentPreferences::accept_all().to_json().unwrap();
        assert_eq!(
            stored,
            r#"{"essential":true,"analytics":true,"marketing":true}"#
        );
        assert_eq!(
            ConsentPreferences::from_json(&stored).unwrap(),
            ConsentPreferences::accept_all()
        );
        assert!(ConsentPreferences::from_json("accepted").is_err());
    }
}
