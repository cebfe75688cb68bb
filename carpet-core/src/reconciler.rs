//! Reconciler: maps an accepted transition to a new state and the visual
//! directives derived from it.
//!
//! Every function here takes the current state by reference and returns the
//! next one by value. Premium gating happens before these are called; see
//! [`crate::gate::decide`].

use rand::Rng;

use crate::catalog::{CatalogError, OptionCatalog, ThreadTier};
use crate::constants::{
    GEM_INCREMENT, GEM_POSITION_MIN_PCT, GEM_POSITION_SPAN_PCT, GEM_STAGGER_S,
    GEMS_PER_DECORATION, LIFT_DIVISOR, MAX_GEM_DECORATIONS, MAX_THREAD_DECORATIONS,
    SHADOW_BASE_OPACITY, SHADOW_MIN_OPACITY, STREAK_INCREMENT, THREAD_HEIGHT_MIN_PX,
    THREAD_HEIGHT_SPAN_PX, THREAD_STAGGER_S, THREAD_WIDTH_MIN_PX, THREAD_WIDTH_SPAN_PX,
    WELCOME_DELAY_MS,
};
use crate::decor_rng::DecorRng;
use crate::dimension::Dimension;
use crate::directives::{
    CounterKind, Directive, DirectiveSet, GemColor, GemDecoration, ThreadDecoration,
};
use crate::journey::{self, AdvanceRejection, JourneyNode, node_views};
use crate::state::SelectionState;
use crate::transient::TransientKind;

const COMPANION_FLOAT_ANIMATION: &str = "duoFloat 5s infinite ease-in-out";

/// Apply an already-allowed selection.
///
/// Only the field for `dimension` changes. The returned directives cover
/// that dimension, the active-option highlight, and the magical transition.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if `key` is not in the catalog; the
/// input state is left as it was.
pub fn apply(
    state: &SelectionState,
    catalog: &OptionCatalog,
    dimension: Dimension,
    key: &str,
    rng: &mut DecorRng,
) -> Result<(SelectionState, DirectiveSet), CatalogError> {
    catalog.lookup(dimension, key)?;
    let mut next = state.clone();
    next.set_selection(dimension, key);

    let mut directives = dimension_directives(&next, catalog, dimension, rng)?;
    directives.push(Directive::ActiveOption {
        dimension,
        key: key.to_string(),
    });
    directives.push(Directive::transient(TransientKind::MagicalTransition));
    log::debug!("applied {dimension} `{key}` ({} directives)", directives.len());
    Ok((next, directives))
}

/// Directives that render `dimension` for `state`.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the state references an unknown key.
pub fn dimension_directives(
    state: &SelectionState,
    catalog: &OptionCatalog,
    dimension: Dimension,
    rng: &mut DecorRng,
) -> Result<DirectiveSet, CatalogError> {
    let mut directives = DirectiveSet::new();
    match dimension {
        Dimension::Pattern => {
            let entry = catalog.pattern(&state.pattern)?;
            directives.push(Directive::PatternLayer {
                image_ref: entry.spec.image_ref.clone(),
                class: format!("pattern-{}", entry.key),
                opacity: 1.0,
            });
        }
        Dimension::Color => {
            let entry = catalog.color(&state.color)?;
            directives.push(Directive::BaseColor {
                primary: entry.spec.primary.clone(),
                pattern_shadow: format!("drop-shadow(0 0 3px {})", entry.spec.secondary),
            });
        }
        Dimension::Thread => {
            directives.extend(thread_directives(state, catalog, rng)?);
        }
        Dimension::LearningStyle => {
            let entry = catalog.learning_style(&state.learning_style)?;
            directives.push(Directive::LearningEffect {
                class: entry.spec.effect.clone(),
                saturation: entry.spec.saturation,
                overlay: entry.spec.overlay.clone(),
                tilt_interactive: entry.spec.tilt_interactive,
            });
        }
        Dimension::League => {
            let entry = catalog.league(&state.league)?;
            let (shadow_opacity, shadow_scale) = shadow_for_height(entry.spec.height);
            directives.push(Directive::LeagueLift {
                height: entry.spec.height,
                fly_animation: entry.spec.fly_animation.clone(),
                shadow_opacity,
                shadow_scale,
            });
            if let Some(overlay) = &entry.spec.ambient {
                directives.push(Directive::AmbientEffect {
                    overlay: overlay.clone(),
                });
            }
        }
    }
    Ok(directives)
}

fn thread_directives(
    state: &SelectionState,
    catalog: &OptionCatalog,
    rng: &mut DecorRng,
) -> Result<[Directive; 2], CatalogError> {
    let entry = catalog.thread(&state.thread)?;
    Ok([
        Directive::ThreadLayer {
            image_ref: entry.spec.image_ref.clone(),
            animation: entry.spec.animation.clone(),
        },
        Directive::ThreadDecorations {
            decorations: thread_decorations(state.streak, entry.spec.tier, rng.threads()),
        },
    ])
}

/// Shadow opacity and scale under a carpet lifted `height` units.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn shadow_for_height(height: u32) -> (f32, f32) {
    let lift = height as f32 / LIFT_DIVISOR;
    let opacity = (SHADOW_BASE_OPACITY - lift).max(SHADOW_MIN_OPACITY);
    (opacity, 1.0 + lift)
}

#[must_use]
pub fn thread_decoration_count(streak: u32) -> u32 {
    streak.min(MAX_THREAD_DECORATIONS)
}

#[must_use]
pub fn gem_decoration_count(gems: u32) -> u32 {
    (gems / GEMS_PER_DECORATION).min(MAX_GEM_DECORATIONS)
}

/// One decoration per streak day, capped, with random placement.
pub fn thread_decorations<R>(
    streak: u32,
    tier: Option<ThreadTier>,
    rng: &mut R,
) -> Vec<ThreadDecoration>
where
    R: Rng + ?Sized,
{
    let count = u8::try_from(thread_decoration_count(streak)).unwrap_or(u8::MAX);
    (0..count)
        .map(|i| ThreadDecoration {
            left_pct: rng.r#gen::<f32>() * 100.0,
            top_pct: rng.r#gen::<f32>() * 100.0,
            rotation_deg: rng.r#gen::<f32>() * 360.0,
            width_px: THREAD_WIDTH_MIN_PX + rng.r#gen::<f32>() * THREAD_WIDTH_SPAN_PX,
            height_px: THREAD_HEIGHT_MIN_PX + rng.r#gen::<f32>() * THREAD_HEIGHT_SPAN_PX,
            delay_s: f32::from(i) * THREAD_STAGGER_S,
            tier,
        })
        .collect()
}

/// One gem per ten collected, capped, placed inside the carpet margins.
pub fn gem_decorations<R>(gems: u32, rng: &mut R) -> Vec<GemDecoration>
where
    R: Rng + ?Sized,
{
    let count = u8::try_from(gem_decoration_count(gems)).unwrap_or(u8::MAX);
    (0..count)
        .map(|i| GemDecoration {
            left_pct: GEM_POSITION_MIN_PCT + rng.r#gen::<f32>() * GEM_POSITION_SPAN_PCT,
            top_pct: GEM_POSITION_MIN_PCT + rng.r#gen::<f32>() * GEM_POSITION_SPAN_PCT,
            color: GemColor::ALL[rng.gen_range(0..GemColor::ALL.len())],
            delay_s: f32::from(i) * GEM_STAGGER_S,
        })
        .collect()
}

fn gem_display(state: &SelectionState, rng: &mut DecorRng) -> [Directive; 3] {
    [
        Directive::Counter {
            counter: CounterKind::Gems,
            value: state.gems,
        },
        Directive::transient(TransientKind::GemCounterUpdated),
        Directive::GemDecorations {
            decorations: gem_decorations(state.gems, rng.gems()),
        },
    ]
}

/// Everything needed to paint the preview from scratch.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the state references an unknown key.
pub fn initial_directives(
    state: &SelectionState,
    catalog: &OptionCatalog,
    nodes: &[JourneyNode],
    rng: &mut DecorRng,
) -> Result<DirectiveSet, CatalogError> {
    let mut directives = DirectiveSet::new();
    for dimension in Dimension::ALL {
        directives.extend(dimension_directives(state, catalog, dimension, rng)?);
    }
    directives.push(Directive::Counter {
        counter: CounterKind::Streak,
        value: state.streak,
    });
    directives.push(Directive::transient(TransientKind::StreakCounterUpdated));
    directives.extend(gem_display(state, rng));
    directives.push(Directive::JourneyNodes {
        nodes: node_views(nodes, state),
    });
    directives.push(Directive::CompanionFloat {
        animation: COMPANION_FLOAT_ANIMATION.to_string(),
    });
    directives.push(Directive::delayed_transient(
        TransientKind::Welcome,
        WELCOME_DELAY_MS,
    ));
    Ok(directives)
}

/// Bump the streak and regrow the thread decorations.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the current thread is unknown.
pub fn increment_streak(
    state: &SelectionState,
    catalog: &OptionCatalog,
    rng: &mut DecorRng,
) -> Result<(SelectionState, DirectiveSet), CatalogError> {
    let mut next = state.clone();
    next.streak = next.streak.saturating_add(STREAK_INCREMENT);

    let mut directives = DirectiveSet::new();
    directives.push(Directive::Counter {
        counter: CounterKind::Streak,
        value: next.streak,
    });
    directives.push(Directive::transient(TransientKind::StreakCounterUpdated));
    directives.extend(thread_directives(&next, catalog, rng)?);
    directives.push(Directive::transient(TransientKind::StreakIncreased));
    Ok((next, directives))
}

/// Add the counter-click gem bonus and regrow the gem decorations.
pub fn increment_gems(state: &SelectionState, rng: &mut DecorRng) -> (SelectionState, DirectiveSet) {
    let mut next = state.clone();
    next.gems = next.gems.saturating_add(GEM_INCREMENT);

    let mut directives = DirectiveSet::new();
    directives.extend(gem_display(&next, rng));
    directives.push(Directive::transient(TransientKind::GemsIncreased));
    (next, directives)
}

/// Advance the journey and emit the reward feedback.
///
/// # Errors
///
/// Propagates the [`AdvanceRejection`] from [`journey::advance`].
pub fn advance(
    state: &SelectionState,
    nodes: &[JourneyNode],
    requested: u32,
    rng: &mut DecorRng,
) -> Result<(SelectionState, DirectiveSet), AdvanceRejection> {
    let next = journey::advance(state, nodes, requested)?;

    let mut directives = DirectiveSet::new();
    directives.push(Directive::JourneyNodes {
        nodes: node_views(nodes, &next),
    });
    directives.extend(gem_display(&next, rng));
    directives.push(Directive::transient(TransientKind::LevelUp));
    Ok((next, directives))
}
