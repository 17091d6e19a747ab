// Keyflick Core Library
// Modifier resolution and multi-touch gesture handling for an on-screen keyboard

pub mod catalog;
pub mod geometry;
pub mod gesture;
pub mod key;
pub mod layout;
pub mod modifier;
pub mod settings;
pub mod transform;
pub mod value;

pub use catalog::key_by_name;
pub use geometry::{GeometryConfig, KeyboardGeometry, SlotRect};
pub use gesture::{
    GestureConfig, GestureStateMachine, HapticConfig, HapticError, HapticFeedback, KeyboardHost,
    NoHaptics, PointerAction, PointerEvent, PointerId, PointerTracker, RecordingHost, SlotState,
    TrackerSet, Vibrator,
};
pub use key::Key;
pub use layout::{Direction, KeySlot, KeyboardLayout, Row, SlotId};
pub use modifier::{Modifier, ModifierSet, MAX_MODIFIERS};
pub use settings::{default_settings_content, Settings, SettingsError};
pub use transform::{apply_modifier, ModifierResolver, ResolutionCache};
pub use value::{Flags, KeyKind, KeyValue};
