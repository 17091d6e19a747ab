// Keyflick Host Interface
// Receiver of finalized keys and redraw requests

use crate::{Flags, KeyValue};

/// The text-input side of the keyboard.
///
/// `key_up` receives the value already resolved under the active
/// modifiers, together with the aggregate flags at release time. The host
/// turns key events into keystrokes and characters or strings into
/// committed text.
pub trait KeyboardHost {
    fn key_up(&mut self, value: &KeyValue, flags: Flags);

    /// The visible keyboard state changed
    fn invalidate(&mut self) {}
}

/// Host that records everything it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub keys: Vec<(KeyValue, Flags)>,
    pub invalidations: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbols of every dispatched key, in order
    pub fn symbols(&self) -> Vec<String> {
        self.keys
            .iter()
            .map(|(value, _)| value.symbol(false).into_owned())
            .collect()
    }
}

impl KeyboardHost for RecordingHost {
    fn key_up(&mut self, value: &KeyValue, flags: Flags) {
        self.keys.push((value.clone(), flags));
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}
