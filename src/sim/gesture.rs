//! Gesture capture
//!
//! Turns a raw pointer event stream into ripple creation, velocity sampling and
//! trail emission. Each pointer id runs its own `Idle -> Pressed -> Moving* -> Idle`
//! sequence; sequences never interact except through the shared color cursor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::velocity;
use super::state::RippleStore;
use crate::renderer::Color;
use crate::settings::FeatureFlags;

/// Neon ripple palette, cycled in order when multi-color is on
pub const PALETTE: [Color; 5] = [
    Color::from_hex(0x00FFFF), // cyan
    Color::from_hex(0xFF00FF), // magenta
    Color::from_hex(0xAA00FF), // violet
    Color::from_hex(0x39FF14), // neon green
    Color::from_hex(0xF5FF00), // yellow
];

/// Palette entry for a cursor value (wraps)
pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Stream interrupted by the system without an up event
    Cancel,
}

/// One raw pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub pointer_id: u32,
    pub kind: PointerKind,
    pub position: Vec2,
    /// Event time (ms), same clock as the frame clock
    pub time: u64,
}

impl PointerEvent {
    pub fn new(pointer_id: u32, kind: PointerKind, position: Vec2, time: u64) -> Self {
        Self {
            pointer_id,
            kind,
            position,
            time,
        }
    }

    pub fn down(pointer_id: u32, position: Vec2, time: u64) -> Self {
        Self::new(pointer_id, PointerKind::Down, position, time)
    }

    pub fn moved(pointer_id: u32, position: Vec2, time: u64) -> Self {
        Self::new(pointer_id, PointerKind::Move, position, time)
    }

    pub fn up(pointer_id: u32, position: Vec2, time: u64) -> Self {
        Self::new(pointer_id, PointerKind::Up, position, time)
    }

    pub fn cancel(pointer_id: u32, time: u64) -> Self {
        Self::new(pointer_id, PointerKind::Cancel, Vec2::ZERO, time)
    }
}

/// Haptic feedback collaborator
pub trait Haptics {
    /// Pointer went down and a ripple was created
    fn on_press_start(&mut self);
    /// Pointer released (or the gesture was cancelled)
    fn on_press_end(&mut self);
}

/// Haptics sink for hosts without a vibration motor
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn on_press_start(&mut self) {}
    fn on_press_end(&mut self) {}
}

/// Where a pointer sequence currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Pressed,
    Moving,
}

/// Per-pointer sequence state
#[derive(Debug, Clone)]
struct PointerTrack {
    pointer_id: u32,
    ripple_id: u32,
    /// Captured at press so trails outlive an evicted ripple
    color: Color,
    down_time: u64,
    last_position: Vec2,
    last_time: u64,
    phase: GesturePhase,
}

/// Pointer state machines for one scene surface, keyed by pointer id
#[derive(Debug, Default, Clone)]
pub struct GestureTracker {
    tracks: Vec<PointerTrack>,
    color_index: usize,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one pointer event. Returns the id of the ripple it touched, if any.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        flags: FeatureFlags,
        store: &mut RippleStore,
        haptics: &mut dyn Haptics,
    ) -> Option<u32> {
        match event.kind {
            PointerKind::Down => self.press(event, flags, store, haptics),
            PointerKind::Move => {
                let index = self.track_index(event.pointer_id)?;
                if !event.position.is_finite() {
                    log::warn!("Dropping non-finite move sample for pointer {}", event.pointer_id);
                    return None;
                }
                self.sample(index, event.position, event.time, flags, store);
                Some(self.tracks[index].ripple_id)
            }
            PointerKind::Up => {
                let index = self.track_index(event.pointer_id)?;
                // The release point is the final velocity sample
                if event.position.is_finite() {
                    self.sample(index, event.position, event.time, flags, store);
                } else {
                    log::warn!("Non-finite up position for pointer {}", event.pointer_id);
                }
                Some(self.release(index, event.time, flags, store, haptics))
            }
            PointerKind::Cancel => {
                let index = self.track_index(event.pointer_id)?;
                log::debug!("Pointer {} cancelled, releasing", event.pointer_id);
                Some(self.release(index, event.time, flags, store, haptics))
            }
        }
    }

    /// Release every in-flight pointer as if it had been cancelled at `now`
    pub fn cancel_all(
        &mut self,
        now: u64,
        flags: FeatureFlags,
        store: &mut RippleStore,
        haptics: &mut dyn Haptics,
    ) {
        while !self.tracks.is_empty() {
            let last = self.tracks.len() - 1;
            self.release(last, now, flags, store, haptics);
        }
    }

    /// Forget all pointers without touching any ripple (scene teardown)
    pub fn reset(&mut self) {
        self.tracks.clear();
    }

    pub fn phase(&self, pointer_id: u32) -> GesturePhase {
        self.track_index(pointer_id)
            .map(|i| self.tracks[i].phase)
            .unwrap_or(GesturePhase::Idle)
    }

    pub fn active_pointers(&self) -> usize {
        self.tracks.len()
    }

    /// Palette cursor, advanced once per ripple in multi-color mode
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    fn track_index(&self, pointer_id: u32) -> Option<usize> {
        self.tracks.iter().position(|t| t.pointer_id == pointer_id)
    }

    fn next_color(&mut self, multi_color: bool) -> Color {
        if multi_color {
            let color = palette_color(self.color_index);
            self.color_index = (self.color_index + 1) % PALETTE.len();
            color
        } else {
            PALETTE[0]
        }
    }

    fn press(
        &mut self,
        event: &PointerEvent,
        flags: FeatureFlags,
        store: &mut RippleStore,
        haptics: &mut dyn Haptics,
    ) -> Option<u32> {
        if !event.position.is_finite() {
            log::warn!("Dropping non-finite down for pointer {}", event.pointer_id);
            return None;
        }
        // A second down without an up means we missed the end of the last sequence
        if let Some(stale) = self.track_index(event.pointer_id) {
            log::debug!("Pointer {} pressed while active, releasing previous", event.pointer_id);
            self.release(stale, event.time, flags, store, haptics);
        }

        let color = self.next_color(flags.multi_color);
        let ripple_id = store.add_ripple(event.position, event.time, color);
        if flags.haptics {
            haptics.on_press_start();
        }
        log::debug!(
            "Ripple {} at ({:.1}, {:.1}) for pointer {}",
            ripple_id,
            event.position.x,
            event.position.y,
            event.pointer_id
        );

        self.tracks.push(PointerTrack {
            pointer_id: event.pointer_id,
            ripple_id,
            color,
            down_time: event.time,
            last_position: event.position,
            last_time: event.time,
            phase: GesturePhase::Pressed,
        });
        Some(ripple_id)
    }

    fn sample(&mut self, index: usize, position: Vec2, now: u64, flags: FeatureFlags, store: &mut RippleStore) {
        let track = &mut self.tracks[index];
        let dt = now.saturating_sub(track.last_time).max(1) as i64;
        let delta = position - track.last_position;
        store.update_ripple_velocity(track.ripple_id, velocity(delta, dt));

        if flags.trails {
            store.add_trail_particle(track.ripple_id, position, track.color, now);
        }

        track.last_position = position;
        track.last_time = now;
        track.phase = GesturePhase::Moving;
    }

    fn release(
        &mut self,
        index: usize,
        now: u64,
        flags: FeatureFlags,
        store: &mut RippleStore,
        haptics: &mut dyn Haptics,
    ) -> u32 {
        let track = self.tracks.swap_remove(index);
        let press_duration = now.saturating_sub(track.down_time);
        store.finalize_ripple_press(track.ripple_id, press_duration);
        if flags.haptics {
            haptics.on_press_end();
        }
        log::trace!("Ripple {} released after {}ms", track.ripple_id, press_duration);
        track.ripple_id
    }
}
