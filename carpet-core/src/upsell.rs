use serde::{Deserialize, Serialize};

use crate::catalog::OptionCatalog;
use crate::dimension::FeatureCategory;

/// Content for the upsell modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsellPrompt {
    pub category: FeatureCategory,
    pub image_ref: Option<String>,
    pub description: Option<String>,
}

impl UpsellPrompt {
    /// Prompt for `category` with the catalog's artwork, if it has any.
    #[must_use]
    pub fn for_category(catalog: &OptionCatalog, category: FeatureCategory) -> Self {
        let descriptor = catalog.descriptor(category);
        Self {
            category,
            image_ref: descriptor.map(|descriptor| descriptor.image_ref.clone()),
            description: descriptor.map(|descriptor| descriptor.description.clone()),
        }
    }
}

/// Signals sent to the upsell modal collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", content = "prompt", rename_all = "camelCase")]
pub enum UpsellSignal {
    Open(UpsellPrompt),
    Close,
}
