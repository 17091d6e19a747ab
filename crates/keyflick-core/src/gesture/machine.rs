// Keyflick Gesture State Machine
// Turns concurrent pointer events into key selections and dispatches

use std::time::{Duration, Instant};

use super::event::{PointerAction, PointerEvent, PointerId};
use super::haptics::{HapticConfig, HapticFeedback, Vibrator};
use super::host::KeyboardHost;
use super::tracker::{PointerTracker, TrackerSet};
use crate::geometry::KeyboardGeometry;
use crate::layout::{Direction, KeyboardLayout, SlotId};
use crate::transform::ModifierResolver;
use crate::{Flags, KeyValue, ModifierSet};

/// Gesture timing and distance parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Drag distance (Manhattan, layout units) before an alternate is picked
    pub sub_value_dist: f32,
    /// Hold time before the first repeat
    pub long_press_timeout: Duration,
    /// Time between repeats
    pub long_press_interval: Duration,
    pub haptics: HapticConfig,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            sub_value_dist: 6.0,
            long_press_timeout: Duration::from_millis(800),
            long_press_interval: Duration::from_millis(90),
            haptics: HapticConfig::default(),
        }
    }
}

/// How a slot should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Up,
    Down,
    Locked,
}

/// Multi-touch keyboard state.
///
/// All processing is event driven: long-press repeats are only evaluated
/// when a move event arrives for the held pointer.
#[derive(Debug)]
pub struct GestureStateMachine {
    layout: KeyboardLayout,
    geometry: KeyboardGeometry,
    config: GestureConfig,
    trackers: TrackerSet,
    flags: Flags,
    modifiers: ModifierSet,
    resolver: ModifierResolver,
    vibrator: Vibrator,
}

impl GestureStateMachine {
    pub fn new(layout: KeyboardLayout, geometry: KeyboardGeometry, config: GestureConfig) -> Self {
        let vibrator = Vibrator::new(Box::new(super::haptics::NoHaptics), config.haptics);
        Self {
            layout,
            geometry,
            config,
            trackers: TrackerSet::new(),
            flags: Flags::empty(),
            modifiers: ModifierSet::new(),
            resolver: ModifierResolver::new(),
            vibrator,
        }
    }

    pub fn with_resolver(mut self, resolver: ModifierResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_haptics(mut self, device: Box<dyn HapticFeedback>) -> Self {
        self.vibrator = Vibrator::new(device, self.config.haptics);
        self
    }

    /// Process one pointer event
    pub fn handle_event(&mut self, event: &PointerEvent, host: &mut dyn KeyboardHost) {
        match event.action {
            PointerAction::Down => self.on_down(event, host),
            PointerAction::Move => self.on_move(event, host),
            PointerAction::Up => self.on_up(event.pointer, host),
        }
    }

    fn on_down(&mut self, event: &PointerEvent, host: &mut dyn KeyboardHost) {
        let Some(slot) = self.geometry.hit_test(&self.layout, event.x, event.y) else {
            log::trace!("pointer {} down outside keys", event.pointer);
            return;
        };

        match self.trackers.by_slot_mut(slot) {
            Some(tracker) => {
                if tracker.flags().contains(Flags::LOCK) {
                    tracker.lock();
                    log::debug!("slot {} locked", slot);
                } else if tracker.is_detached() {
                    tracker.rebind(event.pointer);
                    log::debug!("slot {} rebound to pointer {}", slot, event.pointer);
                }
            }
            None => {
                let center = self
                    .layout
                    .slot(slot)
                    .and_then(|s| s.value(Direction::Center))
                    .cloned();
                log::debug!(
                    "pointer {} down on slot {} ({})",
                    event.pointer,
                    slot,
                    center.as_ref().map_or("-", |v| v.name())
                );
                self.trackers.push(PointerTracker::new(
                    event.pointer,
                    slot,
                    event.x,
                    event.y,
                    center,
                    event.time,
                    self.config.long_press_timeout,
                ));
            }
        }

        self.vibrator.pulse(event.time);
        self.update_flags();
        host.invalidate();
    }

    fn on_move(&mut self, event: &PointerEvent, host: &mut dyn KeyboardHost) {
        let Some(tracker) = self.trackers.by_pointer_mut(event.pointer) else {
            return;
        };

        let (down_x, down_y) = tracker.origin();
        let direction = Direction::from_offset(
            event.x - down_x,
            event.y - down_y,
            self.config.sub_value_dist,
        );
        let selected = self
            .layout
            .slot(tracker.slot())
            .and_then(|s| s.value(direction));

        match selected {
            Some(value) if tracker.value() != Some(value) => {
                log::debug!(
                    "pointer {} selected {:?} ({})",
                    event.pointer,
                    direction,
                    value.name()
                );
                tracker.select(Some(value.clone()), event.time, self.config.long_press_timeout);
                self.update_flags();
                self.vibrator.pulse(event.time);
                host.invalidate();
            }
            _ => {
                let Some(value) = tracker.value() else {
                    return;
                };
                if tracker.flags().contains(Flags::NO_CHAR) {
                    return;
                }
                let value = value.clone();
                if tracker.take_repeat(event.time, self.config.long_press_interval) {
                    log::debug!("long press repeat: {}", value.name());
                    self.dispatch(&value, host);
                    self.vibrator.pulse(event.time);
                }
            }
        }
    }

    fn on_up(&mut self, pointer: PointerId, host: &mut dyn KeyboardHost) {
        let Some(tracker) = self.trackers.by_pointer_mut(pointer) else {
            return;
        };

        if tracker.flags().contains(Flags::KEEP_ON) {
            tracker.detach();
            log::debug!("slot {} kept on after pointer {} up", tracker.slot(), pointer);
            self.update_flags();
            return;
        }

        let value = tracker.value().cloned();
        let flags = tracker.flags();

        let swept = self.trackers.sweep();
        if swept > 0 {
            log::debug!("released {} kept-on key(s)", swept);
        }

        // Dispatch with the modifiers that were active before the sweep
        if let Some(value) = value {
            if !flags.intersects(Flags::LOCKED | Flags::NO_CHAR) {
                self.dispatch(&value, host);
            }
        }

        self.trackers.remove_pointer(pointer);
        self.update_flags();
        host.invalidate();
    }

    fn dispatch(&self, value: &KeyValue, host: &mut dyn KeyboardHost) {
        match self.resolver.resolve(Some(value), &self.modifiers) {
            Some(resolved) => {
                log::debug!(
                    "dispatch {} [{}] -> {}",
                    value.name(),
                    self.modifiers,
                    resolved.name()
                );
                host.key_up(&resolved, self.flags);
            }
            None => log::debug!("{} removed under [{}]", value.name(), self.modifiers),
        }
    }

    fn update_flags(&mut self) {
        self.flags = self.trackers.aggregate_flags();
        self.modifiers = self.trackers.active_modifiers();
    }

    /// Bitwise OR of every tracker's flags
    pub fn aggregate_flags(&self) -> Flags {
        self.flags
    }

    /// Modifiers currently applied to other keys
    pub fn active_modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn is_shifted(&self) -> bool {
        self.flags.contains(Flags::SHIFT)
    }

    pub fn slot_state(&self, slot: SlotId) -> SlotState {
        match self.trackers.by_slot(slot) {
            None => SlotState::Up,
            Some(tracker) if tracker.is_locked() => SlotState::Locked,
            Some(_) => SlotState::Down,
        }
    }

    /// Resolve a value under the active modifiers
    pub fn display_value(&self, value: Option<&KeyValue>) -> Option<KeyValue> {
        self.resolver.resolve(value, &self.modifiers)
    }

    /// Symbol to draw for one of a slot's values
    pub fn label(&self, slot: SlotId, direction: Direction) -> Option<String> {
        let value = self.layout.slot(slot)?.value(direction);
        let resolved = self.display_value(value)?;
        Some(resolved.symbol(self.is_shifted()).into_owned())
    }

    pub fn trackers(&self) -> &TrackerSet {
        &self.trackers
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn geometry(&self) -> &KeyboardGeometry {
        &self.geometry
    }

    /// Replace the geometry, e.g. after a resize
    pub fn set_geometry(&mut self, geometry: KeyboardGeometry) {
        self.geometry = geometry;
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn resolver(&self) -> &ModifierResolver {
        &self.resolver
    }

    /// The earliest instant a held pointer could repeat, if any is held on
    /// a repeatable value
    pub fn next_repeat(&self) -> Option<Instant> {
        self.trackers
            .iter()
            .filter(|t| !t.is_detached() && t.value().is_some())
            .filter(|t| !t.flags().contains(Flags::NO_CHAR))
            .map(PointerTracker::next_repeat)
            .min()
    }
}
