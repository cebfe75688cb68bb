use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;

/// Current carpet configuration plus progress counters.
///
/// Owned by [`crate::CarpetSession`]; the reconciler hands back a new value
/// for every accepted transition rather than editing it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub pattern: String,
    pub color: String,
    pub thread: String,
    pub learning_style: String,
    pub league: String,
    pub streak: u32,
    pub gems: u32,
    pub current_journey_node: u32,
    pub is_premium: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            pattern: String::from("geometric"),
            color: String::from("blue"),
            thread: String::from("standard"),
            learning_style: String::from("visual"),
            league: String::from("bronze"),
            streak: 7,
            gems: 145,
            current_journey_node: 2,
            is_premium: false,
        }
    }
}

impl SelectionState {
    /// Key currently selected for `dimension`.
    #[must_use]
    pub fn selection(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Pattern => &self.pattern,
            Dimension::Color => &self.color,
            Dimension::Thread => &self.thread,
            Dimension::LearningStyle => &self.learning_style,
            Dimension::League => &self.league,
        }
    }

    pub(crate) fn set_selection(&mut self, dimension: Dimension, key: &str) {
        let slot = match dimension {
            Dimension::Pattern => &mut self.pattern,
            Dimension::Color => &mut self.color,
            Dimension::Thread => &mut self.thread,
            Dimension::LearningStyle => &mut self.learning_style,
            Dimension::League => &mut self.league,
        };
        key.clone_into(slot);
    }

    #[must_use]
    pub fn with_premium(mut self, is_premium: bool) -> Self {
        self.is_premium = is_premium;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_start() {
        let state = SelectionState::default();
        assert_eq!(state.selection(Dimension::Pattern), "geometric");
        assert_eq!(state.selection(Dimension::Color), "blue");
        assert_eq!(state.selection(Dimension::Thread), "standard");
        assert_eq!(state.selection(Dimension::LearningStyle), "visual");
        assert_eq!(state.selection(Dimension::League), "bronze");
        assert_eq!((state.streak, state.gems, state.current_journey_node), (7, 145, 2));
        assert!(!state.is_premium);
    }

    #[test]
    fn set_selection_touches_one_field() {
        let mut state = SelectionState::default();
        state.set_selection(Dimension::League, "gold");
        let expected = SelectionState {
            league: String::from("gold"),
            ..SelectionState::default()
        };
        assert_eq!(state, expected);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(SelectionState::default().with_premium(true)).unwrap();
        assert_eq!(json["learningStyle"], "visual");
        assert_eq!(json["currentJourneyNode"], 2);
        assert_eq!(json["isPremium"], true);
    }
}
