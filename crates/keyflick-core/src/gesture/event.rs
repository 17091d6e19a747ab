// Keyflick Pointer Events
// Raw touch input fed to the gesture state machine

use std::fmt;
use std::time::Instant;

/// Identifier of a live touch, stable from down to up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
}

/// A single pointer event in layout coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub pointer: PointerId,
    pub x: f32,
    pub y: f32,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(action: PointerAction, pointer: u32, x: f32, y: f32, time: Instant) -> Self {
        Self {
            action,
            pointer: PointerId(pointer),
            x,
            y,
            time,
        }
    }

    pub fn down(pointer: u32, x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerAction::Down, pointer, x, y, time)
    }

    pub fn moved(pointer: u32, x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerAction::Move, pointer, x, y, time)
    }

    /// Up events carry no meaningful position
    pub fn up(pointer: u32, time: Instant) -> Self {
        Self::new(PointerAction::Up, pointer, 0.0, 0.0, time)
    }
}
