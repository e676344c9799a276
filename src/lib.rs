//! Neon Ripple - touch-reactive ripple scene
//!
//! Core modules:
//! - `sim`: Deterministic ripple simulation (physics, store, gestures, frame build)
//! - `renderer`: Draw commands, surfaces and CPU tessellation
//! - `scene`: Embeddable ripple component with its identification surface
//! - `platform`: Frame clock, pointer event queue and the cooperative frame loop
//! - `settings`: Persisted preferences and feature flags

pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use renderer::{Color, DrawCommand, DrawSurface, RecordingSurface};
pub use scene::{NeonRippleScene, RIPPLE_CANVAS_TAG};
pub use settings::{FeatureFlags, QualityPreset, Settings, SettingsError};

/// Ripple configuration constants (milliseconds unless noted)
pub mod consts {
    /// Lifetime of a ripple with no press bonus and no velocity
    pub const RIPPLE_BASE_DURATION: u64 = 1600;
    /// Press duration beyond this adds no further lifetime
    pub const MAX_PRESS_BONUS_MS: u64 = 1200;
    /// Fraction of the (capped) press duration added to the lifetime
    pub const PRESS_BONUS_FACTOR: f32 = 0.6;
    /// Lifetime added per unit of velocity magnitude (px/ms)
    pub const VELOCITY_BONUS_SCALE: f32 = 420.0;
    /// Ceiling for velocity magnitude, bounds noisy pointer bursts
    pub const MAX_VELOCITY_MAGNITUDE: f32 = 2.2;
    /// Decay tail drawn after the main lifetime, before eviction
    pub const AFTERGLOW_DURATION: u64 = 700;

    /// Trail particle lifetime
    pub const TRAIL_PARTICLE_LIFETIME: u64 = 520;
    /// Trail particle radius at birth (shrinks to half)
    pub const TRAIL_PARTICLE_BASE_RADIUS: f32 = 36.0;
    /// Fill alpha multiplier for trail particles
    pub const TRAIL_PARTICLE_ALPHA: f32 = 0.45;

    /// Radius growth: `0.6 + magnitude * 0.4` of the largest canvas dimension
    pub const RIPPLE_RADIUS_BASE: f32 = 0.6;
    pub const RIPPLE_RADIUS_VELOCITY: f32 = 0.4;
    /// Radius boost at full audio level
    pub const AUDIO_RADIUS_BOOST: f32 = 0.65;
    /// Ripple alpha easing exponent
    pub const RIPPLE_ALPHA_EXPONENT: f32 = 1.25;
    /// Trail alpha easing exponent
    pub const TRAIL_ALPHA_EXPONENT: f32 = 1.5;
    /// Gradient centre alpha: `intensity * (1.1 + level * 0.5)`
    pub const GLOW_CENTER_BASE: f32 = 1.1;
    pub const GLOW_CENTER_AUDIO: f32 = 0.5;
    /// Gradient midpoint alpha multiplier
    pub const GLOW_MID_ALPHA: f32 = 0.6;

    /// Default frame interval for the headless ticker (~60 Hz)
    pub const FRAME_INTERVAL_MS: u64 = 16;
}
