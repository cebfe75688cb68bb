//! Magic Carpet customizer engine
//!
//! Platform-agnostic core for the carpet customization widget: the option
//! catalog, the premium gate, the selection reconciler, and the procedural
//! placeholder artwork. This crate has no UI or platform dependencies.

pub mod analytics;
pub mod catalog;
pub mod constants;
pub mod decor_rng;
pub mod dimension;
pub mod directives;
pub mod gate;
pub mod interaction;
pub mod journey;
pub mod reconciler;
pub mod resolver;
pub mod session;
pub mod state;
pub mod transient;
pub mod upsell;

use std::sync::Arc;

// Re-export commonly used types
pub use analytics::{ConsentGatedSink, ConsentPreferences, EventLog, EventSink, TrackedEvent};
pub use catalog::{
    CatalogEntry, CatalogError, ColorSpec, LeagueSpec, LearningStyleSpec, OptionCatalog,
    PatternSpec, PremiumFeatureDescriptor, ThreadSpec,
};
pub use decor_rng::DecorRng;
pub use dimension::{Dimension, FeatureCategory};
pub use directives::{Directive, DirectiveSet};
pub use gate::{GateDecision, decide};
pub use interaction::PointerSample;
pub use journey::{AdvanceRejection, JourneyNode, NodeStatus, NodeView};
pub use resolver::{
    GeneratedGraphic, GraphicKind, Palette, PlaceholderRequest, Rule, SvgDocument, resolve,
    resolve_request, resolve_with_palette,
};
pub use session::{AdvanceOutcome, CarpetSession, SelectionOutcome};
pub use state::SelectionState;
pub use transient::{TransientKind, TransientScheduler};
pub use upsell::{UpsellPrompt, UpsellSignal};

/// Source of the option catalog.
/// Hosts that ship their own tables implement this
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produce a validated catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or fails validation.
    fn load_catalog(&self) -> Result<OptionCatalog, Self::Error>;
}

/// Loader for the catalog compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl CatalogLoader for EmbeddedCatalog {
    type Error = CatalogError;

    fn load_catalog(&self) -> Result<OptionCatalog, Self::Error> {
        Ok(OptionCatalog::default_catalog().clone())
    }
}

/// Loader over a JSON document held in memory.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    json: String,
}

impl JsonCatalog {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl CatalogLoader for JsonCatalog {
    type Error = CatalogError;

    fn load_catalog(&self) -> Result<OptionCatalog, Self::Error> {
        OptionCatalog::from_json(&self.json)
    }
}

/// Creates customizer sessions over one loaded catalog.
pub struct CarpetEngine<L>
where
    L: CatalogLoader,
{
    loader: L,
}

impl<L> CarpetEngine<L>
where
    L: CatalogLoader,
    L::Error: From<CatalogError>,
{
    pub const fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Load the catalog and wrap it for sharing between sessions
    ///
    /// # Errors
    ///
    /// Returns an error if the loader fails.
    pub fn catalog(&self) -> Result<Arc<OptionCatalog>, L::Error> {
        self.loader.load_catalog().map(Arc::new)
    }

    /// Start a session from the default selection.
    ///
    /// A `seed` makes decoration jitter reproducible; `None` draws from
    /// entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or lacks a default
    /// option.
    pub fn create_session(
        &self,
        nodes: Vec<JourneyNode>,
        seed: Option<u64>,
    ) -> Result<CarpetSession, L::Error> {
        self.create_session_from(SelectionState::default(), nodes, seed)
    }

    /// Start a session from a previously captured state.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or `state` selects an
    /// unknown option.
    pub fn create_session_from(
        &self,
        state: SelectionState,
        nodes: Vec<JourneyNode>,
        seed: Option<u64>,
    ) -> Result<CarpetSession, L::Error> {
        let catalog = self.catalog()?;
        let rng = seed.map_or_else(DecorRng::from_entropy, DecorRng::from_user_seed);
        CarpetSession::new(catalog, state, nodes, rng).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r##"{
        "patterns": [
            { "key": "geometric", "premium": false, "imageRef": "images/patterns/geometric.svg" },
            { "key": "royal", "premium": true, "imageRef": "images/patterns/royal.svg" }
        ],
        "colors": [
            { "key": "blue", "premium": false, "primary": "#1CB0F6", "secondary": "#0F8BC0" }
        ],
        "threads": [
            { "key": "standard", "premium": false, "imageRef": "images/threads/standard.svg" }
        ],
        "learningStyles": [
            { "key": "visual", "premium": false, "effect": "visualLearnerEffect" }
        ],
        "leagues": [
            { "key": "bronze", "premium": false, "height": 0, "flyAnimation": "float 3s ease-in-out infinite" }
        ],
        "premiumFeatures": []
    }"##;

    #[test]
    fn embedded_engine_starts_default_session() {
        let engine = CarpetEngine::new(EmbeddedCatalog);
        let session = engine
            .create_session(vec![JourneyNode::free(1), JourneyNode::free(2)], Some(11))
            .unwrap();
        assert_eq!(session.state(), &SelectionState::default());
        assert_eq!(session.nodes().len(), 2);
        assert_eq!(session.catalog().keys(Dimension::Pattern).len(), 5);
    }

    #[test]
    fn json_loader_drives_session_catalog() {
        let engine = CarpetEngine::new(JsonCatalog::new(FIXTURE));
        let mut session = engine.create_session(Vec::new(), Some(3)).unwrap();
        assert_eq!(session.catalog().keys(Dimension::Pattern), ["geometric", "royal"]);
        let outcome = session.select(Dimension::Pattern, "royal").unwrap();
        assert!(matches!(outcome, SelectionOutcome::Upsell(_)));
        assert_eq!(session.state().pattern, "geometric");
    }

    #[test]
    fn broken_json_surfaces_parse_error() {
        let engine = CarpetEngine::new(JsonCatalog::new("{ not json"));
        assert!(matches!(
            engine.create_session(Vec::new(), None),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn captured_state_must_exist_in_catalog() {
        let engine = CarpetEngine::new(JsonCatalog::new(FIXTURE));
        let state = SelectionState {
            pattern: String::from("floral"),
            ..SelectionState::default()
        };
        assert!(matches!(
            engine.create_session_from(state, Vec::new(), Some(1)),
            Err(CatalogError::NotFound { .. })
        ));
    }
}
