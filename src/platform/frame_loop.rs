//! Cooperative frame loop
//!
//! Gesture handling and drawing share one thread. Each tick takes the frame time,
//! delivers the pointer events due by then, evicts, and hands the draw list to the
//! surface. Nothing here blocks; a host that owns a real vsync just calls [`FrameLoop::tick`].

use std::cell::Cell;
use std::rc::Rc;

use super::input::EventQueue;
use super::time::FrameClock;
use crate::renderer::DrawSurface;
use crate::scene::NeonRippleScene;

/// Shared cancellation flag for a frame loop
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Summary of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: usize,
    pub events: usize,
    pub draw_commands: usize,
    pub peak_ripples: usize,
    pub cancelled: bool,
}

pub struct FrameLoop<C: FrameClock> {
    clock: C,
    cancel: CancelHandle,
}

impl<C: FrameClock> FrameLoop<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            cancel: CancelHandle::default(),
        }
    }

    /// Handle that stops the loop before its next draw
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run one frame. Returns `None` once cancelled; the scene is torn down and any
    /// pending events and draws are discarded.
    pub fn tick(
        &mut self,
        scene: &mut NeonRippleScene,
        queue: &mut EventQueue,
        surface: &mut dyn DrawSurface,
        stats: &mut FrameStats,
    ) -> Option<()> {
        if self.is_cancelled() {
            return self.shut_down(scene, queue, stats);
        }

        let now = self.clock.next_frame();
        for event in queue.drain_until(now) {
            scene.handle_pointer(&event);
            stats.events += 1;
        }
        stats.peak_ripples = stats.peak_ripples.max(scene.store().ripple_count());

        let commands = scene.frame(now);
        // Cancelled from a callback during event delivery
        if self.is_cancelled() {
            return self.shut_down(scene, queue, stats);
        }

        let (width, height) = scene.size();
        surface.begin_frame(width, height);
        for command in &commands {
            surface.draw(command);
        }
        surface.end_frame();

        stats.frames += 1;
        stats.draw_commands += commands.len();
        Some(())
    }

    /// Run up to `frames` ticks, stopping early on cancellation
    pub fn run_for(
        &mut self,
        frames: usize,
        scene: &mut NeonRippleScene,
        queue: &mut EventQueue,
        surface: &mut dyn DrawSurface,
    ) -> FrameStats {
        let mut stats = FrameStats::default();
        for _ in 0..frames {
            if self.tick(scene, queue, surface, &mut stats).is_none() {
                break;
            }
        }
        log::debug!(
            "Frame loop ran {} frames, {} events, {} draws, peak {} ripples",
            stats.frames,
            stats.events,
            stats.draw_commands,
            stats.peak_ripples
        );
        stats
    }

    fn shut_down(
        &mut self,
        scene: &mut NeonRippleScene,
        queue: &mut EventQueue,
        stats: &mut FrameStats,
    ) -> Option<()> {
        if !stats.cancelled {
            log::info!("Frame loop cancelled, dropping {} queued events", queue.len());
            queue.clear();
            scene.teardown();
            stats.cancelled = true;
        }
        None
    }
}
