//! Time-boxed visual flags (`magical-transition`, `level-up`, ...).
//!
//! The rendering collaborator owns the clock. It reports `now_ms` when an
//! effect starts and asks [`TransientScheduler::expire`] which flags to drop.
//! Re-triggering an active effect moves its deadline instead of queueing a
//! second reversion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{
    COUNTER_UPDATED_MS, GEMS_INCREASED_MS, LEVEL_UP_MS, MAGICAL_TRANSITION_MS,
    STREAK_INCREASED_MS, WELCOME_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransientKind {
    MagicalTransition,
    StreakCounterUpdated,
    GemCounterUpdated,
    StreakIncreased,
    GemsIncreased,
    LevelUp,
    Welcome,
}

impl TransientKind {
    /// CSS class toggled on the target element.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::MagicalTransition => "magical-transition",
            Self::StreakCounterUpdated | Self::GemCounterUpdated => "counter-updated",
            Self::StreakIncreased => "streak-increased",
            Self::GemsIncreased => "gems-increased",
            Self::LevelUp => "level-up",
            Self::Welcome => "welcome-animation",
        }
    }

    #[must_use]
    pub const fn duration_ms(self) -> u32 {
        match self {
            Self::MagicalTransition => MAGICAL_TRANSITION_MS,
            Self::StreakCounterUpdated | Self::GemCounterUpdated => COUNTER_UPDATED_MS,
            Self::StreakIncreased => STREAK_INCREASED_MS,
            Self::GemsIncreased => GEMS_INCREASED_MS,
            Self::LevelUp => LEVEL_UP_MS,
            Self::Welcome => WELCOME_MS,
        }
    }
}

/// Tracks one deadline per active effect kind.
#[derive(Debug, Clone, Default)]
pub struct TransientScheduler {
    deadlines: BTreeMap<TransientKind, u64>,
}

impl TransientScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) `kind` at `now_ms`. Returns the new deadline.
    pub fn trigger(&mut self, kind: TransientKind, now_ms: u64) -> u64 {
        let deadline = now_ms.saturating_add(u64::from(kind.duration_ms()));
        self.deadlines.insert(kind, deadline);
        deadline
    }

    /// Remove and return every effect whose deadline is at or before `now_ms`.
    pub fn expire(&mut self, now_ms: u64) -> Vec<TransientKind> {
        let expired: Vec<TransientKind> = self
            .deadlines
            .iter()
            .filter(|&(_, &deadline)| deadline <= now_ms)
            .map(|(&kind, _)| kind)
            .collect();
        for kind in &expired {
            self.deadlines.remove(kind);
        }
        expired
    }

    #[must_use]
    pub fn is_active(&self, kind: TransientKind) -> bool {
        self.deadlines.contains_key(&kind)
    }

    #[must_use]
    pub fn deadline(&self, kind: TransientKind) -> Option<u64> {
        self.deadlines.get(&kind).copied()
    }

    /// Earliest pending deadline, for hosts that arm a single timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadlines.values().copied().min()
    }
}
