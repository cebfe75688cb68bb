//! Centralized tuning constants for the carpet customizer.
//!
//! Decoration caps, rewards, and effect timings live here so the preview
//! math can only change through reviewed code, not through catalog JSON.

// Decorations ---------------------------------------------------------------
pub(crate) const MAX_THREAD_DECORATIONS: u32 = 30;
pub(crate) const MAX_GEM_DECORATIONS: u32 = 20;
pub(crate) const GEMS_PER_DECORATION: u32 = 10;
pub(crate) const THREAD_STAGGER_S: f32 = 0.1;
pub(crate) const GEM_STAGGER_S: f32 = 0.2;
pub(crate) const THREAD_WIDTH_MIN_PX: f32 = 2.0;
pub(crate) const THREAD_WIDTH_SPAN_PX: f32 = 3.0;
pub(crate) const THREAD_HEIGHT_MIN_PX: f32 = 20.0;
pub(crate) const THREAD_HEIGHT_SPAN_PX: f32 = 30.0;
pub(crate) const GEM_POSITION_MIN_PCT: f32 = 10.0;
pub(crate) const GEM_POSITION_SPAN_PCT: f32 = 80.0;

// Progress ------------------------------------------------------------------
pub(crate) const JOURNEY_GEM_REWARD: u32 = 25;
pub(crate) const GEM_INCREMENT: u32 = 10;
pub(crate) const STREAK_INCREMENT: u32 = 1;

// League lift ---------------------------------------------------------------
pub(crate) const SHADOW_BASE_OPACITY: f32 = 0.5;
pub(crate) const SHADOW_MIN_OPACITY: f32 = 0.1;
pub(crate) const LIFT_DIVISOR: f32 = 100.0;

// Transient effect durations (ms) -------------------------------------------
pub(crate) const MAGICAL_TRANSITION_MS: u32 = 1_000;
pub(crate) const COUNTER_UPDATED_MS: u32 = 500;
pub(crate) const STREAK_INCREASED_MS: u32 = 1_500;
pub(crate) const GEMS_INCREASED_MS: u32 = 1_500;
pub(crate) const LEVEL_UP_MS: u32 = 1_500;
pub(crate) const WELCOME_MS: u32 = 2_000;
pub(crate) const WELCOME_DELAY_MS: u32 = 500;

// Pointer effects -----------------------------------------------------------
pub(crate) const TILT_MAX_DEG: f32 = 5.0;
pub(crate) const TILT_PERSPECTIVE_PX: u32 = 1_000;
pub(crate) const TILT_PARTICLE_CHANCE: f64 = 0.3;
pub(crate) const TILT_PARTICLE_SIZE_MIN_PX: f32 = 2.0;
pub(crate) const TILT_PARTICLE_SIZE_SPAN_PX: f32 = 8.0;
pub(crate) const BURST_PARTICLES: usize = 20;
pub(crate) const BURST_DISTANCE_MIN: f32 = 20.0;
pub(crate) const BURST_DISTANCE_SPAN: f32 = 30.0;
pub(crate) const BURST_SIZE_MIN_PX: f32 = 2.0;
pub(crate) const BURST_SIZE_SPAN_PX: f32 = 6.0;
pub(crate) const PARTICLE_LIFETIME_MS: u32 = 2_000;
pub(crate) const GOLD_SPARK_COLOR: &str = "#FFD900";

// Analytics -----------------------------------------------------------------
pub(crate) const ANALYTICS_CATEGORY: &str = "carpet_customizer";
pub(crate) const PREMIUM_CTA_LABEL: &str = "Unlock Premium";
