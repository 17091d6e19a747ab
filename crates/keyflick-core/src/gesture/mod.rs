// Keyflick Gesture Module
// Multi-touch gesture processing over a key slot layout

pub mod event;
pub mod haptics;
pub mod host;
pub mod machine;
pub mod tracker;

pub use event::{PointerAction, PointerEvent, PointerId};
pub use haptics::{HapticConfig, HapticError, HapticFeedback, NoHaptics, Vibrator};
pub use host::{KeyboardHost, RecordingHost};
pub use machine::{GestureConfig, GestureStateMachine, SlotState};
pub use tracker::{PointerTracker, TrackerSet};
