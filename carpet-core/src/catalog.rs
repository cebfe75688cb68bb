//! Option catalog: the static tables behind every selectable dimension.
//!
//! The catalog ships as embedded JSON and is parsed once per process. Hosts
//! that want different tables can hand their own JSON to
//! [`OptionCatalog::from_json`], which validates before returning.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

use crate::dimension::{Dimension, FeatureCategory};
use crate::state::SelectionState;

const DEFAULT_CATALOG_DATA: &str = include_str!("../assets/catalog.json");

/// Errors raised while loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A key that is not in the catalog was requested. Callers only ever
    /// offer catalog keys, so this indicates a wiring bug.
    #[error("unknown {dimension} option `{key}`")]
    NotFound { dimension: Dimension, key: String },
    #[error("catalog JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

impl CatalogError {
    fn not_found(dimension: Dimension, key: &str) -> Self {
        log::error!("catalog lookup failed for {dimension} option `{key}`");
        Self::NotFound {
            dimension,
            key: key.to_string(),
        }
    }
}

/// One row of a dimension table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry<S> {
    pub key: String,
    #[serde(default)]
    pub premium: bool,
    #[serde(flatten)]
    pub spec: S,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSpec {
    pub image_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub primary: String,
    pub secondary: String,
}

/// Styling class applied to individual streak threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadTier {
    Golden,
    Silver,
}

impl ThreadTier {
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Golden => "golden-thread",
            Self::Silver => "silver-thread",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSpec {
    pub image_ref: String,
    #[serde(default)]
    pub animation: Option<String>,
    #[serde(default)]
    pub tier: Option<ThreadTier>,
}

/// Animated image layered over the carpet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySpec {
    pub image_ref: String,
    pub animation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStyleSpec {
    pub effect: String,
    #[serde(default)]
    pub saturation: Option<f32>,
    #[serde(default)]
    pub overlay: Option<OverlaySpec>,
    #[serde(default)]
    pub tilt_interactive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSpec {
    pub height: u32,
    pub fly_animation: String,
    #[serde(default)]
    pub ambient: Option<OverlaySpec>,
}

/// Borrowed view of the rendering metadata for one option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "dimension", rename_all = "camelCase")]
pub enum RenderSpec<'a> {
    Pattern(&'a PatternSpec),
    Color(&'a ColorSpec),
    Thread(&'a ThreadSpec),
    LearningStyle(&'a LearningStyleSpec),
    League(&'a LeagueSpec),
}

/// Artwork and copy shown when a premium gate denies a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumFeatureDescriptor {
    pub category: FeatureCategory,
    pub image_ref: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionCatalog {
    #[serde(default)]
    pub patterns: Vec<CatalogEntry<PatternSpec>>,
    #[serde(default)]
    pub colors: Vec<CatalogEntry<ColorSpec>>,
    #[serde(default)]
    pub threads: Vec<CatalogEntry<ThreadSpec>>,
    #[serde(default)]
    pub learning_styles: Vec<CatalogEntry<LearningStyleSpec>>,
    #[serde(default)]
    pub leagues: Vec<CatalogEntry<LeagueSpec>>,
    #[serde(default)]
    pub premium_features: Vec<PremiumFeatureDescriptor>,
}

fn find<'a, S>(
    entries: &'a [CatalogEntry<S>],
    dimension: Dimension,
    key: &str,
) -> Result<&'a CatalogEntry<S>, CatalogError> {
    entries
        .iter()
        .find(|entry| entry.key == key)
        .ok_or_else(|| CatalogError::not_found(dimension, key))
}

fn entry_keys<S>(entries: &[CatalogEntry<S>]) -> Vec<&str> {
    entries.iter().map(|entry| entry.key.as_str()).collect()
}

impl OptionCatalog {
    /// Parse the embedded catalog, logging and falling back to an empty
    /// catalog if the asset is malformed.
    #[must_use]
    pub fn load_from_static() -> Self {
        match Self::from_json(DEFAULT_CATALOG_DATA) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::error!("embedded option catalog rejected: {err}");
                Self::default()
            }
        }
    }

    /// Process-wide catalog, parsed on first use.
    #[must_use]
    pub fn default_catalog() -> &'static Self {
        Self::shared_default_ref().as_ref()
    }

    /// Shared handle to the process-wide catalog.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(Self::shared_default_ref())
    }

    fn shared_default_ref() -> &'static Arc<Self> {
        static CATALOG: OnceLock<Arc<OptionCatalog>> = OnceLock::new();
        CATALOG.get_or_init(|| Arc::new(Self::load_from_static()))
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or the resulting tables
    /// fail [`OptionCatalog::validate`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check table-level invariants: no empty dimension, no duplicate keys,
    /// and every default selection resolves.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] describing the first violation found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for dimension in Dimension::ALL {
            let keys = self.keys(dimension);
            if keys.is_empty() {
                return Err(CatalogError::Invalid(format!("{dimension} table is empty")));
            }
            let mut seen = HashSet::new();
            if let Some(dupe) = keys.iter().find(|key| !seen.insert(**key)) {
                return Err(CatalogError::Invalid(format!(
                    "{dimension} table lists `{dupe}` twice"
                )));
            }
        }
        let defaults = SelectionState::default();
        for dimension in Dimension::ALL {
            let key = defaults.selection(dimension);
            if !self.contains(dimension, key) {
                return Err(CatalogError::Invalid(format!(
                    "default {dimension} `{key}` is missing"
                )));
            }
        }
        Ok(())
    }

    /// Option keys for a dimension, in display order.
    #[must_use]
    pub fn keys(&self, dimension: Dimension) -> Vec<&str> {
        match dimension {
            Dimension::Pattern => entry_keys(&self.patterns),
            Dimension::Color => entry_keys(&self.colors),
            Dimension::Thread => entry_keys(&self.threads),
            Dimension::LearningStyle => entry_keys(&self.learning_styles),
            Dimension::League => entry_keys(&self.leagues),
        }
    }

    #[must_use]
    pub fn contains(&self, dimension: Dimension, key: &str) -> bool {
        self.keys(dimension).contains(&key)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if `key` is not in the table.
    pub fn lookup(&self, dimension: Dimension, key: &str) -> Result<RenderSpec<'_>, CatalogError> {
        Ok(match dimension {
            Dimension::Pattern => RenderSpec::Pattern(&self.pattern(key)?.spec),
            Dimension::Color => RenderSpec::Color(&self.color(key)?.spec),
            Dimension::Thread => RenderSpec::Thread(&self.thread(key)?.spec),
            Dimension::LearningStyle => {
                RenderSpec::LearningStyle(&self.learning_style(key)?.spec)
            }
            Dimension::League => RenderSpec::League(&self.league(key)?.spec),
        })
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if `key` is not in the table.
    pub fn is_premium(&self, dimension: Dimension, key: &str) -> Result<bool, CatalogError> {
        Ok(match dimension {
            Dimension::Pattern => self.pattern(key)?.premium,
            Dimension::Color => self.color(key)?.premium,
            Dimension::Thread => self.thread(key)?.premium,
            Dimension::LearningStyle => self.learning_style(key)?.premium,
            Dimension::League => self.league(key)?.premium,
        })
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown pattern keys.
    pub fn pattern(&self, key: &str) -> Result<&CatalogEntry<PatternSpec>, CatalogError> {
        find(&self.patterns, Dimension::Pattern, key)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown color keys.
    pub fn color(&self, key: &str) -> Result<&CatalogEntry<ColorSpec>, CatalogError> {
        find(&self.colors, Dimension::Color, key)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown thread keys.
    pub fn thread(&self, key: &str) -> Result<&CatalogEntry<ThreadSpec>, CatalogError> {
        find(&self.threads, Dimension::Thread, key)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown learning style keys.
    pub fn learning_style(
        &self,
        key: &str,
    ) -> Result<&CatalogEntry<LearningStyleSpec>, CatalogError> {
        find(&self.learning_styles, Dimension::LearningStyle, key)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown league keys.
    pub fn league(&self, key: &str) -> Result<&CatalogEntry<LeagueSpec>, CatalogError> {
        find(&self.leagues, Dimension::League, key)
    }

    /// Upsell artwork for a category. `journey` has no artwork of its own and
    /// borrows the pattern descriptor.
    #[must_use]
    pub fn descriptor(&self, category: FeatureCategory) -> Option<&PremiumFeatureDescriptor> {
        let wanted = match category {
            FeatureCategory::Journey => FeatureCategory::Pattern,
            other => other,
        };
        self.premium_features
            .iter()
            .find(|descriptor| descriptor.category == wanted)
    }
}
