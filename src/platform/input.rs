//! Pointer event queue
//!
//! Events arrive from the host in order and wait here until the frame that is due
//! to see them.

use std::collections::VecDeque;

use crate::sim::gesture::{PointerEvent, PointerKind};

/// DOM pointer event types the host listens for
pub const DOM_POINTER_EVENTS: [&str; 5] = [
    "pointerdown",
    "pointermove",
    "pointerup",
    "pointercancel",
    "lostpointercapture",
];

/// Map a DOM pointer event type onto a gesture event kind.
///
/// Losing pointer capture ends the sequence like a cancel; when it follows a normal
/// `pointerup` the tracker has already forgotten the pointer and ignores it.
pub fn dom_pointer_kind(event_type: &str) -> Option<PointerKind> {
    match event_type {
        "pointerdown" => Some(PointerKind::Down),
        "pointermove" => Some(PointerKind::Move),
        "pointerup" => Some(PointerKind::Up),
        "pointercancel" | "lostpointercapture" => Some(PointerKind::Cancel),
        _ => None,
    }
}

#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    events: VecDeque<PointerEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.events.push_back(event);
    }

    /// Pop the events stamped at or before `now`, in arrival order.
    ///
    /// Stops at the first event from the future so arrival order is never broken.
    pub fn drain_until(&mut self, now: u64) -> Vec<PointerEvent> {
        let mut due = Vec::new();
        while let Some(event) = self.events.front() {
            if event.time > now {
                break;
            }
            if let Some(event) = self.events.pop_front() {
                due.push(event);
            }
        }
        due
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Extend<PointerEvent> for EventQueue {
    fn extend<T: IntoIterator<Item = PointerEvent>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

impl FromIterator<PointerEvent> for EventQueue {
    fn from_iter<T: IntoIterator<Item = PointerEvent>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
