use std::sync::Arc;

use crate::analytics::{EventLog, EventSink, TrackedEvent};
use crate::catalog::{CatalogError, OptionCatalog};
use crate::decor_rng::DecorRng;
use crate::dimension::{Dimension, FeatureCategory};
use crate::directives::{Directive, DirectiveSet};
use crate::gate::{self, GateDecision};
use crate::interaction::{self, PointerSample};
use crate::journey::{AdvanceRejection, JourneyNode, node_views};
use crate::reconciler;
use crate::state::SelectionState;
use crate::transient::{TransientKind, TransientScheduler};
use crate::upsell::{UpsellPrompt, UpsellSignal};

/// Result of a selection request.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    Applied(DirectiveSet),
    Upsell(UpsellPrompt),
}

/// Result of a journey node click.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    Advanced(DirectiveSet),
    Upsell(UpsellPrompt),
    Ignored(AdvanceRejection),
}

/// Single owner of the selection state and the only place it changes.
///
/// Event handlers call into the session; the session gates, reconciles,
/// buffers analytics, and tracks transient timers.
#[derive(Debug, Clone)]
pub struct CarpetSession {
    catalog: Arc<OptionCatalog>,
    state: SelectionState,
    nodes: Vec<JourneyNode>,
    rng: DecorRng,
    transients: TransientScheduler,
    events: EventLog,
    upsell_open: Option<FeatureCategory>,
    clock_ms: u64,
}

impl CarpetSession {
    /// Build a session around an existing state.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if `state` selects an option the
    /// catalog does not list.
    pub fn new(
        catalog: Arc<OptionCatalog>,
        state: SelectionState,
        nodes: Vec<JourneyNode>,
        rng: DecorRng,
    ) -> Result<Self, CatalogError> {
        for dimension in Dimension::ALL {
            catalog.lookup(dimension, state.selection(dimension))?;
        }
        Ok(Self {
            catalog,
            state,
            nodes,
            rng,
            transients: TransientScheduler::new(),
            events: EventLog::new(),
            upsell_open: None,
            clock_ms: 0,
        })
    }

    /// Default widget start on the process-wide catalog with entropy jitter.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog lacks a default option.
    pub fn with_defaults(nodes: Vec<JourneyNode>) -> Result<Self, CatalogError> {
        Self::new(
            OptionCatalog::shared(),
            SelectionState::default(),
            nodes,
            DecorRng::from_entropy(),
        )
    }

    #[must_use]
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> SelectionState {
        self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn nodes(&self) -> &[JourneyNode] {
        &self.nodes
    }

    #[must_use]
    pub const fn transients(&self) -> &TransientScheduler {
        &self.transients
    }

    #[must_use]
    pub const fn upsell_open(&self) -> Option<FeatureCategory> {
        self.upsell_open
    }

    /// Random draws spent on decorations so far.
    #[must_use]
    pub const fn decor_draws(&self) -> u64 {
        self.rng.draws()
    }

    /// Paint the preview from the current state.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the state references an unknown key.
    pub fn initialize(&mut self) -> Result<DirectiveSet, CatalogError> {
        let directives =
            reconciler::initial_directives(&self.state, &self.catalog, &self.nodes, &mut self.rng)?;
        self.schedule(&directives);
        Ok(directives)
    }

    /// Request `key` for `dimension`, gating premium options.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for keys outside the catalog; the
    /// state is unchanged.
    pub fn select(
        &mut self,
        dimension: Dimension,
        key: &str,
    ) -> Result<SelectionOutcome, CatalogError> {
        let premium = self.catalog.is_premium(dimension, key)?;
        let click = TrackedEvent::option_click(dimension, key, premium);

        match gate::decide(&self.catalog, dimension, key, self.state.is_premium)? {
            GateDecision::DenyWithPrompt(category) => {
                self.events.record(click);
                Ok(SelectionOutcome::Upsell(self.open_prompt(category)))
            }
            GateDecision::Allow => {
                let (next, directives) =
                    reconciler::apply(&self.state, &self.catalog, dimension, key, &mut self.rng)?;
                self.state = next;
                self.upsell_open = None;
                // The visual refresh is reported ahead of the click.
                if matches!(dimension, Dimension::Pattern | Dimension::Color) {
                    self.events.record(TrackedEvent::update_visual(
                        &self.state.pattern,
                        &self.state.color,
                    ));
                }
                self.events.record(click);
                self.schedule(&directives);
                Ok(SelectionOutcome::Applied(directives))
            }
        }
    }

    /// Click on journey node `node_id`.
    pub fn advance_node(&mut self, node_id: u32) -> AdvanceOutcome {
        match reconciler::advance(&self.state, &self.nodes, node_id, &mut self.rng) {
            Ok((next, directives)) => {
                self.state = next;
                self.events
                    .record(TrackedEvent::journey_advance(self.state.current_journey_node));
                self.schedule(&directives);
                AdvanceOutcome::Advanced(directives)
            }
            Err(AdvanceRejection::PremiumLocked { node }) => {
                log::debug!("journey node {node} is premium-locked");
                AdvanceOutcome::Upsell(self.open_prompt(FeatureCategory::Journey))
            }
            Err(rejection) => {
                log::debug!("ignored journey click: {rejection}");
                AdvanceOutcome::Ignored(rejection)
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the current thread is unknown.
    pub fn increment_streak(&mut self) -> Result<DirectiveSet, CatalogError> {
        let (next, directives) =
            reconciler::increment_streak(&self.state, &self.catalog, &mut self.rng)?;
        self.state = next;
        self.events
            .record(TrackedEvent::streak_increment(self.state.streak));
        self.schedule(&directives);
        Ok(directives)
    }

    pub fn increment_gems(&mut self) -> DirectiveSet {
        let (next, directives) = reconciler::increment_gems(&self.state, &mut self.rng);
        self.state = next;
        self.events.record(TrackedEvent::gem_increment(self.state.gems));
        self.schedule(&directives);
        directives
    }

    /// Flip premium status (after a purchase, or for previews) and refresh
    /// the journey locks.
    pub fn set_premium(&mut self, is_premium: bool) -> Directive {
        self.state.is_premium = is_premium;
        if is_premium {
            self.upsell_open = None;
        }
        Directive::JourneyNodes {
            nodes: node_views(&self.nodes, &self.state),
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the state references an unknown key.
    pub fn pointer_move(&mut self, pointer: PointerSample) -> Result<DirectiveSet, CatalogError> {
        interaction::tilt(&self.state, &self.catalog, pointer, self.rng.particles())
    }

    #[must_use]
    pub const fn pointer_leave(&self) -> Directive {
        interaction::reset_tilt()
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the current color is unknown.
    pub fn pointer_click(&mut self, x: f32, y: f32) -> Result<Directive, CatalogError> {
        interaction::burst(&self.state, &self.catalog, x, y, self.rng.particles())
    }

    /// Open the modal directly, e.g. from a standalone premium badge.
    pub fn open_upsell(&mut self, category: FeatureCategory) -> UpsellSignal {
        UpsellSignal::Open(self.open_prompt(category))
    }

    pub fn close_upsell(&mut self) -> Option<UpsellSignal> {
        self.upsell_open.take().map(|_| UpsellSignal::Close)
    }

    /// The visitor clicked the modal's call to action.
    pub fn upsell_cta_clicked(&mut self) {
        self.events.record(TrackedEvent::premium_cta());
    }

    /// Advance the session clock and return effects whose flags must drop.
    pub fn tick(&mut self, now_ms: u64) -> Vec<TransientKind> {
        self.clock_ms = self.clock_ms.max(now_ms);
        self.transients.expire(self.clock_ms)
    }

    pub fn drain_events(&mut self) -> Vec<TrackedEvent> {
        self.events.drain()
    }

    pub fn flush_events<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        self.events.flush_into(sink);
    }

    fn open_prompt(&mut self, category: FeatureCategory) -> UpsellPrompt {
        log::debug!("opening upsell for {category}");
        self.upsell_open = Some(category);
        UpsellPrompt::for_category(&self.catalog, category)
    }

    fn schedule(&mut self, directives: &[Directive]) {
        for directive in directives {
            if let Directive::Transient {
                effect, delay_ms, ..
            } = directive
            {
                let start = self.clock_ms.saturating_add(u64::from(*delay_ms));
                self.transients.trigger(*effect, start);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{ConsentGatedSink, ConsentPreferences};

    fn nodes() -> Vec<JourneyNode> {
        vec![
            JourneyNode::free(1),
            JourneyNode::free(2),
            JourneyNode::free(3),
            JourneyNode::premium(4),
        ]
    }

    fn session() -> CarpetSession {
        CarpetSession::new(
            OptionCatalog::shared(),
            SelectionState::default(),
            nodes(),
            DecorRng::from_user_seed(1337),
        )
        .unwrap()
    }

    #[test]
    fn rejects_states_outside_catalog() {
        let state = SelectionState {
            color: String::from("teal"),
            ..SelectionState::default()
        };
        let err = CarpetSession::new(OptionCatalog::shared(), state, nodes(), DecorRng::from_user_seed(1));
        assert!(matches!(err, Err(CatalogError::NotFound { .. })));
    }

    #[test]
    fn premium_pattern_opens_upsell_and_keeps_state() {
        let mut session = session();
        let outcome = session.select(Dimension::Pattern, "royal").unwrap();
        let SelectionOutcome::Upsell(prompt) = outcome else {
            panic!("expected upsell");
        };
        assert_eq!(prompt.category, FeatureCategory::Pattern);
        assert_eq!(session.state().pattern, "geometric");
        assert_eq!(session.upsell_open(), Some(FeatureCategory::Pattern));
        assert_eq!(session.close_upsell(), Some(UpsellSignal::Close));
        assert_eq!(session.close_upsell(), None);

        let events = session.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, "premium_pattern_click");
    }

    #[test]
    fn free_selection_applies_and_tracks_visual_update() {
        let mut session = session();
        let outcome = session.select(Dimension::Pattern, "floral").unwrap();
        assert!(matches!(outcome, SelectionOutcome::Applied(_)));
        assert_eq!(session.state().pattern, "floral");
        assert!(session.transients().is_active(TransientKind::MagicalTransition));

        let actions: Vec<String> = session
            .drain_events()
            .into_iter()
            .map(|event| event.action)
            .collect();
        assert_eq!(actions, ["update_visual", "free_pattern_click"]);
    }

    #[test]
    fn free_selection_dismisses_open_upsell() {
        let mut session = session();
        session.select(Dimension::Pattern, "royal").unwrap();
        assert_eq!(session.upsell_open(), Some(FeatureCategory::Pattern));

        session.select(Dimension::Pattern, "floral").unwrap();
        assert_eq!(session.upsell_open(), None);
        assert_eq!(session.close_upsell(), None);
    }

    #[test]
    fn thread_selection_reports_click_only() {
        let mut session = session();
        session.select(Dimension::Thread, "silver").unwrap();
        let actions: Vec<String> = session
            .drain_events()
            .into_iter()
            .map(|event| event.action)
            .collect();
        assert_eq!(actions.len(), 1);
        assert!(actions[0].ends_with("_click"), "{actions:?}");
    }

    #[test]
    fn plain_event_log_receives_events_without_consent() {
        let mut session = session();
        session.increment_streak().unwrap();
        session.upsell_cta_clicked();

        let mut log = EventLog::new();
        session.flush_events(&mut log);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn unknown_key_leaves_everything_untouched() {
        let mut session = session();
        assert!(session.select(Dimension::Thread, "copper").is_err());
        assert_eq!(session.state(), &SelectionState::default());
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn journey_clicks_route_through_gate_and_order() {
        let mut session = session();
        assert!(matches!(
            session.advance_node(4),
            AdvanceOutcome::Upsell(UpsellPrompt {
                category: FeatureCategory::Journey,
                ..
            })
        ));
        assert!(matches!(
            session.advance_node(1),
            AdvanceOutcome::Ignored(AdvanceRejection::OutOfOrder { .. })
        ));
        assert!(matches!(session.advance_node(3), AdvanceOutcome::Advanced(_)));
        assert_eq!(session.state().gems, 170);

        session.set_premium(true);
        assert!(matches!(session.advance_node(4), AdvanceOutcome::Advanced(_)));
        assert_eq!(session.state().current_journey_node, 4);
        assert_eq!(session.state().gems, 195);
    }

    #[test]
    fn transients_expire_on_tick() {
        let mut session = session();
        session.tick(10_000);
        session.increment_gems();
        assert!(session.transients().is_active(TransientKind::GemsIncreased));
        assert_eq!(session.tick(10_500), vec![TransientKind::GemCounterUpdated]);
        assert_eq!(session.tick(11_500), vec![TransientKind::GemsIncreased]);
    }

    #[test]
    fn initialize_schedules_delayed_welcome() {
        let mut session = session();
        session.initialize().unwrap();
        assert_eq!(
            session.transients().deadline(TransientKind::Welcome),
            Some(2_500)
        );
    }

    #[test]
    fn events_flush_through_consent_gate() {
        let mut session = session();
        session.increment_streak().unwrap();
        session.upsell_cta_clicked();

        let mut sink = ConsentGatedSink::new(EventLog::new(), ConsentPreferences::reject_all());
        session.flush_events(&mut sink);
        assert_eq!(sink.dropped(), 2);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn seeded_sessions_decorate_identically() {
        let mut a = session();
        let mut b = session();
        assert_eq!(a.initialize().unwrap(), b.initialize().unwrap());
        assert_eq!(a.increment_streak().unwrap(), b.increment_streak().unwrap());
        assert!(a.decor_draws() > 0);
    }
}
