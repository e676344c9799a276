//! Ripple and trail particle store
//!
//! The store exclusively owns every live ripple and trail particle of one scene.
//! Mutations are single-field writes or single-collection appends/removals, so a
//! scene torn down between calls is never left half-updated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::{ripple_lifetime, velocity_magnitude};
use crate::consts::*;
use crate::renderer::Color;

/// A touch-origin wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ripple {
    /// Monotonically increasing, unique within the session
    pub id: u32,
    pub origin: Vec2,
    /// Creation time (ms)
    pub timestamp: u64,
    pub color: Color,
    /// 0 until pointer-up, fixed afterwards
    pub press_duration: u64,
    /// Latest pointer velocity (px/ms)
    pub velocity: Vec2,
    /// Set once the press duration has been finalized
    #[serde(default)]
    pub released: bool,
}

impl Ripple {
    /// Clamped velocity magnitude
    pub fn velocity_magnitude(&self) -> f32 {
        velocity_magnitude(self.velocity)
    }

    /// Main lifetime (without afterglow)
    pub fn lifetime(&self) -> u64 {
        ripple_lifetime(self.press_duration, self.velocity_magnitude())
    }

    /// Elapsed time since creation, saturating at 0 for out-of-order clocks
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.timestamp)
    }

    /// True once the ripple has outlived its lifetime plus the afterglow tail
    pub fn is_expired(&self, now: u64) -> bool {
        self.elapsed(now) > self.lifetime() + AFTERGLOW_DURATION
    }
}

/// A transient marker left along a drag path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailParticle {
    /// Owning ripple
    pub ripple_id: u32,
    pub position: Vec2,
    pub color: Color,
    pub timestamp: u64,
}

impl TrailParticle {
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.timestamp)
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.age(now) > TRAIL_PARTICLE_LIFETIME
    }
}

/// Counts returned by [`RippleStore::evict_expired`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Eviction {
    pub ripples: usize,
    pub particles: usize,
}

/// Authoritative collections of live ripples and trail particles
#[derive(Debug, Clone)]
pub struct RippleStore {
    ripples: Vec<Ripple>,
    particles: Vec<TrailParticle>,
    /// Oldest particles are dropped past this count
    max_particles: usize,
    next_id: u32,
    /// Bumped on every mutation
    revision: u64,
}

impl Default for RippleStore {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl RippleStore {
    /// Create an empty store holding at most `max_particles` trail particles
    pub fn new(max_particles: usize) -> Self {
        Self {
            ripples: Vec::new(),
            particles: Vec::new(),
            max_particles,
            next_id: 0,
            revision: 0,
        }
    }

    /// Append a new ripple with zero velocity and zero press duration
    pub fn add_ripple(&mut self, origin: Vec2, timestamp: u64, color: Color) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.ripples.push(Ripple {
            id,
            origin,
            timestamp,
            color,
            press_duration: 0,
            velocity: Vec2::ZERO,
            released: false,
        });
        self.bump();
        id
    }

    /// Store the latest velocity. No-op if the ripple already expired.
    pub fn update_ripple_velocity(&mut self, id: u32, velocity: Vec2) {
        if let Some(ripple) = self.ripple_mut(id) {
            ripple.velocity = velocity;
            self.bump();
        }
    }

    /// Fix the press duration. Only the first call per ripple takes effect.
    pub fn finalize_ripple_press(&mut self, id: u32, press_duration_ms: u64) {
        if let Some(ripple) = self.ripple_mut(id) {
            if ripple.released {
                log::debug!("Ripple {} already finalized, ignoring", id);
                return;
            }
            ripple.press_duration = press_duration_ms;
            ripple.released = true;
            self.bump();
        }
    }

    pub fn add_trail_particle(&mut self, ripple_id: u32, position: Vec2, color: Color, timestamp: u64) {
        if self.max_particles == 0 {
            return;
        }
        if self.particles.len() >= self.max_particles {
            // Particles are appended in time order, front is oldest
            let overflow = self.particles.len() + 1 - self.max_particles;
            self.particles.drain(..overflow);
        }
        self.particles.push(TrailParticle {
            ripple_id,
            position,
            color,
            timestamp,
        });
        self.bump();
    }

    /// Drop every ripple past lifetime + afterglow and every particle past its lifetime.
    /// Call once per frame, before drawing.
    pub fn evict_expired(&mut self, now: u64) -> Eviction {
        let ripples_before = self.ripples.len();
        let particles_before = self.particles.len();

        self.ripples.retain(|r| !r.is_expired(now));
        self.particles.retain(|p| !p.is_expired(now));

        let eviction = Eviction {
            ripples: ripples_before - self.ripples.len(),
            particles: particles_before - self.particles.len(),
        };
        if eviction != Eviction::default() {
            log::trace!(
                "Evicted {} ripples, {} particles at {}ms",
                eviction.ripples,
                eviction.particles,
                now
            );
            self.bump();
        }
        eviction
    }

    /// Remove everything (scene teardown). Ids keep counting up.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.ripples.clear();
            self.particles.clear();
            self.bump();
        }
    }

    pub fn set_max_particles(&mut self, max_particles: usize) {
        self.max_particles = max_particles;
        if self.particles.len() > max_particles {
            let overflow = self.particles.len() - max_particles;
            self.particles.drain(..overflow);
            self.bump();
        }
    }

    pub fn ripple(&self, id: u32) -> Option<&Ripple> {
        self.ripples.iter().find(|r| r.id == id)
    }

    fn ripple_mut(&mut self, id: u32) -> Option<&mut Ripple> {
        self.ripples.iter_mut().find(|r| r.id == id)
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn particles(&self) -> &[TrailParticle] {
        &self.particles
    }

    pub fn ripple_count(&self) -> usize {
        self.ripples.len()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty() && self.particles.is_empty()
    }

    /// Change counter for observers polling for a redraw
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
