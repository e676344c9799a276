//! Deterministic ripple simulation
//!
//! Everything that decides what the scene looks like lives here:
//! - Integer millisecond timestamps supplied by the caller, never read from a clock
//! - No rendering or platform dependencies beyond plain draw commands
//! - Malformed input is clamped or dropped, never propagated

pub mod frame;
pub mod gesture;
pub mod physics;
pub mod state;

pub use frame::{FrameInput, render_frame};
pub use gesture::{
    GesturePhase, GestureTracker, Haptics, NoHaptics, PALETTE, PointerEvent, PointerKind, palette_color,
};
pub use physics::{ripple_lifetime, trail_alpha, velocity, velocity_magnitude};
pub use state::{Ripple, RippleStore, TrailParticle};
