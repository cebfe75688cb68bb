//! Premium gate: decides whether a requested option may be applied.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, OptionCatalog};
use crate::dimension::{Dimension, FeatureCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "category", rename_all = "camelCase")]
pub enum GateDecision {
    Allow,
    DenyWithPrompt(FeatureCategory),
}

impl GateDecision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Decision for an option whose premium flag is already known.
    #[must_use]
    pub const fn for_flag(category: FeatureCategory, premium: bool, user_premium: bool) -> Self {
        if !premium || user_premium {
            Self::Allow
        } else {
            Self::DenyWithPrompt(category)
        }
    }
}

/// Allow iff the option is free or the user is premium. Performs no mutation.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if `key` is not a catalog option.
pub fn decide(
    catalog: &OptionCatalog,
    dimension: Dimension,
    key: &str,
    user_premium: bool,
) -> Result<GateDecision, CatalogError> {
    let premium = catalog.is_premium(dimension, key)?;
    let decision = GateDecision::for_flag(dimension.into(), premium, user_premium);
    if !decision.is_allowed() {
        log::debug!("premium gate denied {dimension} `{key}`");
    }
    Ok(decision)
}
