// Keyflick Pointer Trackers
// Per-touch gesture state and the ordered set of active trackers

use std::time::{Duration, Instant};

use super::event::PointerId;
use crate::layout::SlotId;
use crate::{Flags, KeyValue, ModifierSet};

/// State of one touch on one slot.
///
/// A tracker whose pointer is `None` is detached: logically still down but
/// no longer bound to a live touch. Lock and keep-on keys detach instead of
/// releasing.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTracker {
    pointer: Option<PointerId>,
    slot: SlotId,
    down_x: f32,
    down_y: f32,
    value: Option<KeyValue>,
    flags: Flags,
    next_repeat: Instant,
}

impl PointerTracker {
    /// Create a tracker selecting the slot's center value
    pub fn new(
        pointer: PointerId,
        slot: SlotId,
        x: f32,
        y: f32,
        center: Option<KeyValue>,
        now: Instant,
        long_press_timeout: Duration,
    ) -> Self {
        let mut tracker = Self {
            pointer: Some(pointer),
            slot,
            down_x: x,
            down_y: y,
            value: None,
            flags: Flags::empty(),
            next_repeat: now,
        };
        tracker.select(center, now, long_press_timeout);
        tracker
    }

    /// Select a value, snapshotting its flags and restarting the long-press
    /// timer
    pub fn select(&mut self, value: Option<KeyValue>, now: Instant, long_press_timeout: Duration) {
        self.flags = value.as_ref().map(KeyValue::flags).unwrap_or_default();
        self.value = value;
        self.next_repeat = now + long_press_timeout;
    }

    pub fn pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    /// Where the touch went down
    pub fn origin(&self) -> (f32, f32) {
        (self.down_x, self.down_y)
    }

    pub fn value(&self) -> Option<&KeyValue> {
        self.value.as_ref()
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn next_repeat(&self) -> Instant {
        self.next_repeat
    }

    pub fn is_detached(&self) -> bool {
        self.pointer.is_none()
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(Flags::LOCKED)
    }

    /// Swap LOCK for LOCKED
    pub fn lock(&mut self) {
        self.flags.remove(Flags::LOCK);
        self.flags.insert(Flags::LOCKED);
    }

    /// Bind a detached tracker to a new touch
    pub fn rebind(&mut self, pointer: PointerId) {
        self.pointer = Some(pointer);
    }

    /// Release the live touch but stay down for one more cycle
    pub fn detach(&mut self) {
        self.flags.remove(Flags::KEEP_ON);
        self.pointer = None;
    }

    /// Check the long-press deadline, advancing it by `interval` when due
    pub fn take_repeat(&mut self, now: Instant, interval: Duration) -> bool {
        if now >= self.next_repeat {
            self.next_repeat = now + interval;
            true
        } else {
            false
        }
    }
}

/// Active trackers in creation order.
///
/// Concurrent touches are few, so lookups are linear scans and the first
/// match wins.
#[derive(Debug, Clone, Default)]
pub struct TrackerSet {
    trackers: Vec<PointerTracker>,
}

impl TrackerSet {
    /// Create a new empty tracker set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tracker: PointerTracker) {
        self.trackers.push(tracker);
    }

    pub fn by_pointer(&self, pointer: PointerId) -> Option<&PointerTracker> {
        self.trackers.iter().find(|t| t.pointer == Some(pointer))
    }

    pub fn by_pointer_mut(&mut self, pointer: PointerId) -> Option<&mut PointerTracker> {
        self.trackers.iter_mut().find(|t| t.pointer == Some(pointer))
    }

    pub fn by_slot(&self, slot: SlotId) -> Option<&PointerTracker> {
        self.trackers.iter().find(|t| t.slot == slot)
    }

    pub fn by_slot_mut(&mut self, slot: SlotId) -> Option<&mut PointerTracker> {
        self.trackers.iter_mut().find(|t| t.slot == slot)
    }

    /// Remove the tracker bound to a live pointer
    pub fn remove_pointer(&mut self, pointer: PointerId) -> Option<PointerTracker> {
        let index = self.trackers.iter().position(|t| t.pointer == Some(pointer))?;
        Some(self.trackers.remove(index))
    }

    /// Drop detached trackers that are not locked and clear the one-shot
    /// KEEP_ON flag on the rest. Returns the number removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.trackers.len();
        self.trackers.retain_mut(|t| {
            if t.is_detached() && !t.is_locked() {
                return false;
            }
            t.flags.remove(Flags::KEEP_ON);
            true
        });
        before - self.trackers.len()
    }

    /// Bitwise OR of every tracker's flags
    pub fn aggregate_flags(&self) -> Flags {
        self.trackers
            .iter()
            .fold(Flags::empty(), |acc, t| acc | t.flags)
    }

    /// Modifiers selected by any tracker
    pub fn active_modifiers(&self) -> ModifierSet {
        self.trackers
            .iter()
            .filter_map(|t| t.value.as_ref()?.as_modifier())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointerTracker> {
        self.trackers.iter()
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}
