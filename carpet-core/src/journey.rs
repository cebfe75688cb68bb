//! Journey path: node status views and the advance rule.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::JOURNEY_GEM_REWARD;
use crate::dimension::FeatureCategory;
use crate::gate::GateDecision;
use crate::state::SelectionState;

/// A node on the journey path, as enumerated by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyNode {
    pub id: u32,
    #[serde(default)]
    pub premium: bool,
}

impl JourneyNode {
    #[must_use]
    pub const fn free(id: u32) -> Self {
        Self { id, premium: false }
    }

    #[must_use]
    pub const fn premium(id: u32) -> Self {
        Self { id, premium: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Completed,
    Active,
    Next,
    Dormant,
}

impl NodeStatus {
    #[must_use]
    pub const fn for_node(node_id: u32, current: u32) -> Self {
        if node_id < current {
            Self::Completed
        } else if node_id == current {
            Self::Active
        } else if node_id == current.saturating_add(1) {
            Self::Next
        } else {
            Self::Dormant
        }
    }

    #[must_use]
    pub const fn class_name(self) -> Option<&'static str> {
        match self {
            Self::Completed => Some("completed"),
            Self::Active => Some("active"),
            Self::Next => Some("next"),
            Self::Dormant => None,
        }
    }
}

/// Derived presentation of one node. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: u32,
    pub status: NodeStatus,
    pub premium: bool,
    pub locked: bool,
}

#[must_use]
pub fn node_views(nodes: &[JourneyNode], state: &SelectionState) -> Vec<NodeView> {
    nodes
        .iter()
        .map(|node| NodeView {
            id: node.id,
            status: NodeStatus::for_node(node.id, state.current_journey_node),
            premium: node.premium,
            locked: node.premium && !state.is_premium,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AdvanceRejection {
    #[error("journey node {node} requires premium")]
    PremiumLocked { node: u32 },
    #[error("journey node {requested} is out of order (next is {expected})")]
    OutOfOrder { requested: u32, expected: u32 },
    #[error("journey node {requested} does not exist")]
    UnknownNode { requested: u32 },
}

/// Move to `requested` if it is the next node and not premium-locked.
///
/// The premium check runs before the ordering check, so clicking any locked
/// node while free prompts the upsell even when it is not next.
///
/// # Errors
///
/// Returns an [`AdvanceRejection`] and leaves `state` untouched when the node
/// is unknown, premium-locked, or not `current + 1`.
pub fn advance(
    state: &SelectionState,
    nodes: &[JourneyNode],
    requested: u32,
) -> Result<SelectionState, AdvanceRejection> {
    let node = nodes
        .iter()
        .find(|node| node.id == requested)
        .ok_or(AdvanceRejection::UnknownNode { requested })?;

    if let GateDecision::DenyWithPrompt(_) =
        GateDecision::for_flag(FeatureCategory::Journey, node.premium, state.is_premium)
    {
        return Err(AdvanceRejection::PremiumLocked { node: requested });
    }

    let expected = state.current_journey_node.saturating_add(1);
    if requested != expected {
        return Err(AdvanceRejection::OutOfOrder {
            requested,
            expected,
        });
    }

    let mut next = state.clone();
    next.current_journey_node = requested;
    next.gems = next.gems.saturating_add(JOURNEY_GEM_REWARD);
    Ok(next)
}
