//! Visual directives handed to the rendering collaborator.
//!
//! Directives describe *what* the preview should show. They carry no DOM
//! handles and serialize to tagged JSON so a host can forward them as-is.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::{OverlaySpec, ThreadTier};
use crate::dimension::Dimension;
use crate::journey::NodeView;
use crate::transient::TransientKind;

/// Directives produced by one transition. Most transitions emit a handful.
pub type DirectiveSet = SmallVec<[Directive; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterKind {
    Streak,
    Gems,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GemColor {
    Blue,
    Green,
    Purple,
    Gold,
}

impl GemColor {
    pub const ALL: [Self; 4] = [Self::Blue, Self::Green, Self::Purple, Self::Gold];

    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Blue => "gem-blue",
            Self::Green => "gem-green",
            Self::Purple => "gem-purple",
            Self::Gold => "gem-gold",
        }
    }
}

/// One streak thread drawn across the carpet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDecoration {
    pub left_pct: f32,
    pub top_pct: f32,
    pub rotation_deg: f32,
    pub width_px: f32,
    pub height_px: f32,
    pub delay_s: f32,
    pub tier: Option<ThreadTier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GemDecoration {
    pub left_pct: f32,
    pub top_pct: f32,
    pub color: GemColor,
    pub delay_s: f32,
}

/// Particle flung outward from a click, relative to the burst origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurstParticle {
    pub end_x: f32,
    pub end_y: f32,
    pub size_px: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Directive {
    #[serde(rename_all = "camelCase")]
    PatternLayer {
        image_ref: String,
        class: String,
        opacity: f32,
    },
    /// Base fill plus the drop shadow filter applied to the pattern layer.
    #[serde(rename_all = "camelCase")]
    BaseColor {
        primary: String,
        pattern_shadow: String,
    },
    #[serde(rename_all = "camelCase")]
    ThreadLayer {
        image_ref: String,
        animation: Option<String>,
    },
    ThreadDecorations {
        decorations: Vec<ThreadDecoration>,
    },
    /// Replaces every learning-style effect that was active before.
    #[serde(rename_all = "camelCase")]
    LearningEffect {
        class: String,
        saturation: Option<f32>,
        overlay: Option<OverlaySpec>,
        tilt_interactive: bool,
    },
    /// Carpet lift for the league tier. Clears any ambient league layer; a
    /// following [`Directive::AmbientEffect`] re-applies one when the tier
    /// has it.
    #[serde(rename_all = "camelCase")]
    LeagueLift {
        height: u32,
        fly_animation: String,
        shadow_opacity: f32,
        shadow_scale: f32,
    },
    AmbientEffect {
        overlay: OverlaySpec,
    },
    GemDecorations {
        decorations: Vec<GemDecoration>,
    },
    Counter {
        counter: CounterKind,
        value: u32,
    },
    JourneyNodes {
        nodes: Vec<NodeView>,
    },
    /// Move the "active" highlight in the option list.
    ActiveOption {
        dimension: Dimension,
        key: String,
    },
    #[serde(rename_all = "camelCase")]
    Transient {
        effect: TransientKind,
        class: String,
        duration_ms: u32,
        delay_ms: u32,
    },
    #[serde(rename_all = "camelCase")]
    Tilt {
        perspective_px: u32,
        rotate_x_deg: f32,
        rotate_y_deg: f32,
    },
    #[serde(rename_all = "camelCase")]
    InteractiveParticle {
        x: f32,
        y: f32,
        size_px: f32,
        color: String,
        lifetime_ms: u32,
    },
    #[serde(rename_all = "camelCase")]
    MagicalBurst {
        x: f32,
        y: f32,
        color: String,
        particles: Vec<BurstParticle>,
        lifetime_ms: u32,
    },
    CompanionFloat {
        animation: String,
    },
}

impl Directive {
    #[must_use]
    pub fn transient(effect: TransientKind) -> Self {
        Self::delayed_transient(effect, 0)
    }

    #[must_use]
    pub fn delayed_transient(effect: TransientKind, delay_ms: u32) -> Self {
        Self::Transient {
            effect,
            class: effect.class_name().to_string(),
            duration_ms: effect.duration_ms(),
            delay_ms,
        }
    }

    /// Short tag for logs and reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PatternLayer { .. } => "patternLayer",
            Self::BaseColor { .. } => "baseColor",
            Self::ThreadLayer { .. } => "threadLayer",
            Self::ThreadDecorations { .. } => "threadDecorations",
            Self::LearningEffect { .. } => "learningEffect",
            Self::LeagueLift { .. } => "leagueLift",
            Self::AmbientEffect { .. } => "ambientEffect",
            Self::GemDecorations { .. } => "gemDecorations",
            Self::Counter { .. } => "counter",
            Self::JourneyNodes { .. } => "journeyNodes",
            Self::ActiveOption { .. } => "activeOption",
            Self::Transient { .. } => "transient",
            Self::Tilt { .. } => "tilt",
            Self::InteractiveParticle { .. } => "interactiveParticle",
            Self::MagicalBurst { .. } => "magicalBurst",
            Self::CompanionFloat { .. } => "companionFloat",
        }
    }
}
