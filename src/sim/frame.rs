//! Per-frame ripple update
//!
//! One call per display refresh: evict, then build the draw list. Eviction always
//! precedes drawing so nothing past its afterglow is ever drawn.

use super::physics::{clamp_unit, trail_alpha};
use super::state::{Ripple, RippleStore, TrailParticle};
use crate::consts::*;
use crate::renderer::{Color, DrawCommand, GradientStop};

/// Inputs sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Frame timestamp (ms)
    pub now: u64,
    /// Canvas size in the same units as pointer positions
    pub width: f32,
    pub height: f32,
    /// Audio energy in `[0, 1]`; out-of-range values are clamped
    pub audio_level: f32,
    /// Glow intensity of the ripple centre
    pub glow_intensity: f32,
}

impl FrameInput {
    pub fn new(now: u64, width: f32, height: f32) -> Self {
        Self {
            now,
            width,
            height,
            audio_level: 0.0,
            glow_intensity: 0.75,
        }
    }

    fn max_dimension(&self) -> f32 {
        let max = self.width.max(self.height);
        if max.is_finite() { max.max(0.0) } else { 0.0 }
    }
}

/// Evict expired entries, then produce this frame's draw commands.
///
/// Trail particles are drawn first, ripples on top, each in creation order.
pub fn render_frame(store: &mut RippleStore, input: &FrameInput) -> Vec<DrawCommand> {
    store.evict_expired(input.now);

    let mut commands = Vec::with_capacity(store.particle_count() + store.ripple_count());
    commands.extend(store.particles().iter().map(|p| particle_command(p, input.now)));
    commands.extend(store.ripples().iter().filter_map(|r| ripple_command(r, input)));
    commands
}

/// Shrinking, fading circle for a trail particle
fn particle_command(particle: &TrailParticle, now: u64) -> DrawCommand {
    let progress = clamp_unit(particle.age(now) as f32 / TRAIL_PARTICLE_LIFETIME as f32);
    let alpha = trail_alpha(progress);
    DrawCommand::FillCircle {
        center: particle.position,
        radius: TRAIL_PARTICLE_BASE_RADIUS * (1.0 - 0.5 * progress),
        color: particle.color.with_alpha(TRAIL_PARTICLE_ALPHA * alpha),
    }
}

/// Radial glow for a ripple; `None` while it still has no visible radius
fn ripple_command(ripple: &Ripple, input: &FrameInput) -> Option<DrawCommand> {
    let elapsed = ripple.elapsed(input.now);
    let magnitude = ripple.velocity_magnitude();
    let lifetime = ripple.lifetime();
    let afterglow = elapsed.saturating_sub(lifetime);

    let main_progress = clamp_unit(elapsed as f32 / lifetime as f32);
    let afterglow_factor = 1.0 - clamp_unit(afterglow as f32 / AFTERGLOW_DURATION as f32);
    let level = clamp_unit(input.audio_level);
    let audio_boost = 1.0 + level * AUDIO_RADIUS_BOOST;

    let radius = main_progress
        * input.max_dimension()
        * (RIPPLE_RADIUS_BASE + magnitude * RIPPLE_RADIUS_VELOCITY)
        * audio_boost;
    if !(radius.is_finite() && radius > 0.0) {
        return None;
    }

    let alpha = (1.0 - main_progress).powf(RIPPLE_ALPHA_EXPONENT) * afterglow_factor;
    let center_alpha = alpha * clamp_unit(input.glow_intensity) * (GLOW_CENTER_BASE + level * GLOW_CENTER_AUDIO);

    Some(DrawCommand::RadialGradientCircle {
        center: ripple.origin,
        radius,
        stops: [
            GradientStop {
                offset: 0.0,
                color: ripple.color.with_alpha(center_alpha),
            },
            GradientStop {
                offset: 0.5,
                color: ripple.color.with_alpha(alpha * GLOW_MID_ALPHA),
            },
            GradientStop {
                offset: 1.0,
                color: Color::TRANSPARENT,
            },
        ],
    })
}
