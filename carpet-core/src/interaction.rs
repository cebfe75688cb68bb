//! Pointer-driven flourishes on the carpet preview: tilt, trailing
//! particles, and the click burst.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::catalog::{CatalogError, OptionCatalog};
use crate::constants::{
    BURST_DISTANCE_MIN, BURST_DISTANCE_SPAN, BURST_PARTICLES, BURST_SIZE_MIN_PX,
    BURST_SIZE_SPAN_PX, GOLD_SPARK_COLOR, PARTICLE_LIFETIME_MS, TILT_MAX_DEG,
    TILT_PARTICLE_CHANCE, TILT_PARTICLE_SIZE_MIN_PX, TILT_PARTICLE_SIZE_SPAN_PX,
    TILT_PERSPECTIVE_PX,
};
use crate::directives::{BurstParticle, Directive, DirectiveSet};
use crate::state::SelectionState;

/// Pointer position relative to the carpet's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Tilt toward the pointer, for learning styles that opt in.
///
/// Returns no directives when the active style is not interactive or the
/// box is degenerate.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the state references an unknown key.
pub fn tilt<R>(
    state: &SelectionState,
    catalog: &OptionCatalog,
    pointer: PointerSample,
    rng: &mut R,
) -> Result<DirectiveSet, CatalogError>
where
    R: Rng + ?Sized,
{
    let mut directives = DirectiveSet::new();
    let style = catalog.learning_style(&state.learning_style)?;
    if !style.spec.tilt_interactive || pointer.width <= 0.0 || pointer.height <= 0.0 {
        return Ok(directives);
    }

    let span = TILT_MAX_DEG * 2.0;
    directives.push(Directive::Tilt {
        perspective_px: TILT_PERSPECTIVE_PX,
        rotate_x_deg: (pointer.y / pointer.height - 0.5) * span,
        rotate_y_deg: (pointer.x / pointer.width - 0.5) * -span,
    });

    if rng.gen_bool(TILT_PARTICLE_CHANCE) {
        let color = catalog.color(&state.color)?;
        directives.push(Directive::InteractiveParticle {
            x: pointer.x,
            y: pointer.y,
            size_px: TILT_PARTICLE_SIZE_MIN_PX + rng.r#gen::<f32>() * TILT_PARTICLE_SIZE_SPAN_PX,
            color: color.spec.primary.clone(),
            lifetime_ms: PARTICLE_LIFETIME_MS,
        });
    }
    Ok(directives)
}

#[must_use]
pub const fn reset_tilt() -> Directive {
    Directive::Tilt {
        perspective_px: TILT_PERSPECTIVE_PX,
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
    }
}

/// Ring of particles thrown out from a click at `(x, y)`.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the current color is unknown.
pub fn burst<R>(
    state: &SelectionState,
    catalog: &OptionCatalog,
    x: f32,
    y: f32,
    rng: &mut R,
) -> Result<Directive, CatalogError>
where
    R: Rng + ?Sized,
{
    let color = if state.color == "gold" || state.thread == "gold" {
        GOLD_SPARK_COLOR.to_string()
    } else {
        catalog.color(&state.color)?.spec.primary.clone()
    };
    let particles = (0..BURST_PARTICLES)
        .map(|_| {
            let angle = rng.r#gen::<f32>() * TAU;
            let distance = BURST_DISTANCE_MIN + rng.r#gen::<f32>() * BURST_DISTANCE_SPAN;
            BurstParticle {
                end_x: angle.cos() * distance,
                end_y: angle.sin() * distance,
                size_px: BURST_SIZE_MIN_PX + rng.r#gen::<f32>() * BURST_SIZE_SPAN_PX,
            }
        })
        .collect();
    Ok(Directive::MagicalBurst {
        x,
        y,
        color,
        particles,
        lifetime_ms: PARTICLE_LIFETIME_MS,
    })
}
