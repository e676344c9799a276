//! Neon ripple scene
//!
//! The embeddable component: a host feeds it pointer events and frame ticks, it
//! hands back draw commands. Feature flags and the audio level are polled from the
//! host's settings, never owned.

use crate::renderer::DrawCommand;
use crate::settings::Settings;
use crate::sim::gesture::{GestureTracker, Haptics, NoHaptics, PointerEvent};
use crate::sim::state::RippleStore;
use crate::sim::{FrameInput, render_frame};

/// Stable identifier of the ripple canvas for test harnesses
pub const RIPPLE_CANVAS_TAG: &str = "neon_ripple_canvas";

/// Touch-responsive ripple scene
pub struct NeonRippleScene {
    settings: Settings,
    store: RippleStore,
    gestures: GestureTracker,
    haptics: Box<dyn Haptics>,
    /// Externally updated audio energy; `None` means no audio engine
    audio_level: Option<f32>,
    width: f32,
    height: f32,
    /// Store revision at the end of the last frame
    drawn_revision: u64,
    last_frame: u64,
}

impl NeonRippleScene {
    pub const ID: &'static str = "neon_ripple";
    pub const DISPLAY_NAME: &'static str = "Neon Ripple";
    pub const DESCRIPTION: &'static str = "Touch-responsive neon particle ripples";

    pub fn new(settings: Settings, width: f32, height: f32) -> Self {
        Self::with_haptics(settings, width, height, Box::new(NoHaptics))
    }

    pub fn with_haptics(settings: Settings, width: f32, height: f32, haptics: Box<dyn Haptics>) -> Self {
        log::info!(
            "{} scene {}x{} (quality {})",
            Self::DISPLAY_NAME,
            width,
            height,
            settings.quality.as_str()
        );
        Self {
            store: RippleStore::new(settings.quality.max_trail_particles()),
            settings,
            gestures: GestureTracker::new(),
            haptics,
            audio_level: None,
            width,
            height,
            drawn_revision: 0,
            last_frame: 0,
        }
    }

    /// Canvas tag for external lookup
    pub fn tag(&self) -> &'static str {
        RIPPLE_CANVAS_TAG
    }

    /// Live state descriptor, `ripples:<count>`
    pub fn state_description(&self) -> String {
        format!("ripples:{}", self.store.ripple_count())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap settings; takes effect from the next event or frame
    pub fn set_settings(&mut self, settings: Settings) {
        self.store.set_max_particles(settings.quality.max_trail_particles());
        self.settings = settings;
    }

    pub fn set_audio_level(&mut self, level: Option<f32>) {
        self.audio_level = level;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn store(&self) -> &RippleStore {
        &self.store
    }

    pub fn gestures(&self) -> &GestureTracker {
        &self.gestures
    }

    /// Gesture capture: feed one pointer event
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<u32> {
        let flags = self.settings.flags();
        self.gestures
            .handle(event, flags, &mut self.store, self.haptics.as_mut())
    }

    /// Release every held pointer, e.g. when the host loses focus
    pub fn cancel_gestures(&mut self, now: u64) {
        let flags = self.settings.flags();
        self.gestures
            .cancel_all(now, flags, &mut self.store, self.haptics.as_mut());
    }

    /// Frame tick: evict, then draw
    pub fn frame(&mut self, now: u64) -> Vec<DrawCommand> {
        let input = FrameInput {
            now,
            width: self.width,
            height: self.height,
            audio_level: self.settings.effective_audio_level(self.audio_level),
            glow_intensity: self.settings.effective_glow_intensity(),
        };
        let commands = render_frame(&mut self.store, &input);
        self.drawn_revision = self.store.revision();
        self.last_frame = now;
        commands
    }

    /// Whether the host should schedule another frame
    pub fn needs_frame(&self) -> bool {
        !self.store.is_empty() || self.store.revision() != self.drawn_revision
    }

    /// Timestamp of the last frame drawn
    pub fn last_frame(&self) -> u64 {
        self.last_frame
    }

    /// Drop all ripples, particles and pointer tracks
    pub fn teardown(&mut self) {
        log::info!(
            "{} teardown ({} ripples, {} pointers)",
            Self::DISPLAY_NAME,
            self.store.ripple_count(),
            self.gestures.active_pointers()
        );
        self.gestures.reset();
        self.store.clear();
        self.drawn_revision = self.store.revision();
    }
}
