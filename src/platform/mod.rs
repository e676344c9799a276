//! Platform abstraction layer
//!
//! Handles the host side of the scene:
//! - Frame timing (`time`)
//! - Pointer event delivery (`input`)
//! - The cooperative loop that interleaves both (`frame_loop`)

pub mod frame_loop;
pub mod input;
pub mod time;

pub use frame_loop::{CancelHandle, FrameLoop, FrameStats};
pub use input::{DOM_POINTER_EVENTS, EventQueue, dom_pointer_kind};
pub use time::{FixedTicker, FrameClock};
