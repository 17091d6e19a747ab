// Keyflick Key Values
// Immutable description of what a key slot currently represents

use std::borrow::Cow;
use std::fmt;

use crate::{Key, Modifier};

bitflags::bitflags! {
    /// Behavioral flags carried by a key value and snapshotted by pointer
    /// trackers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u8 {
        /// Produces no text on release (bare modifiers, placeholders).
        const NO_CHAR = 1 << 0;
        /// A second activation toggles into LOCKED instead of releasing.
        const LOCK = 1 << 1;
        /// Currently toggled on.
        const LOCKED = 1 << 2;
        /// Survives one release cycle.
        const KEEP_ON = 1 << 3;
        /// Counted as shift in the aggregate flags.
        const SHIFT = 1 << 4;
    }
}

/// What a key value represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Commits a single character
    Char(char),
    /// Commits a string
    String(String),
    /// Requests a low-level key event from the host
    KeyEvent(Key),
    /// A modifier held while the key is down
    Modifier(Modifier),
    /// The key disappears under the current modifiers
    Removed,
}

/// An immutable key value.
///
/// Transforms never mutate a value; the `with_*` methods build a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyValue {
    name: String,
    symbol: String,
    kind: KeyKind,
    flags: Flags,
}

impl KeyValue {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        kind: KeyKind,
        flags: Flags,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            kind,
            flags,
        }
    }

    /// A character key named after its character
    pub fn char(c: char) -> Self {
        let s = c.to_string();
        Self::new(s.clone(), s, KeyKind::Char(c), Flags::empty())
    }

    /// A string key named after its text
    pub fn string(s: impl Into<String>) -> Self {
        let s = s.into();
        Self::new(s.clone(), s.clone(), KeyKind::String(s), Flags::empty())
    }

    pub fn key_event(name: impl Into<String>, symbol: impl Into<String>, key: Key) -> Self {
        Self::new(name, symbol, KeyKind::KeyEvent(key), Flags::empty())
    }

    /// A modifier key. Modifiers never produce text.
    pub fn modifier(
        name: impl Into<String>,
        symbol: impl Into<String>,
        modifier: Modifier,
        flags: Flags,
    ) -> Self {
        Self::new(
            name,
            symbol,
            KeyKind::Modifier(modifier),
            flags | Flags::NO_CHAR,
        )
    }

    /// The removed sentinel
    pub fn removed() -> Self {
        Self::new("removed", "", KeyKind::Removed, Flags::NO_CHAR)
    }

    /// Stable identifier, used as the resolution cache key
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &KeyKind {
        &self.kind
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn is_removed(&self) -> bool {
        matches!(self.kind, KeyKind::Removed)
    }

    pub fn as_char(&self) -> Option<char> {
        match self.kind {
            KeyKind::Char(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_modifier(&self) -> Option<Modifier> {
        match self.kind {
            KeyKind::Modifier(m) => Some(m),
            _ => None,
        }
    }

    /// The symbol to draw. Text-producing keys are drawn upper-cased while
    /// shift is active.
    pub fn symbol(&self, upper_case: bool) -> Cow<'_, str> {
        match self.kind {
            KeyKind::Char(_) | KeyKind::String(_) if upper_case => {
                Cow::Owned(self.symbol.to_uppercase())
            }
            _ => Cow::Borrowed(&self.symbol),
        }
    }

    /// Same flags, new character. Name and symbol follow the character.
    pub fn with_char(&self, c: char) -> Self {
        let s = c.to_string();
        Self::new(s.clone(), s, KeyKind::Char(c), self.flags)
    }

    /// Same flags, new text. Name and symbol follow the text.
    pub fn with_string(&self, s: impl Into<String>) -> Self {
        let s = s.into();
        Self::new(s.clone(), s.clone(), KeyKind::String(s), self.flags)
    }

    /// Same name, symbol and flags, reinterpreted as a key event request.
    pub fn with_key_event(&self, key: Key) -> Self {
        Self::new(
            self.name.clone(),
            self.symbol.clone(),
            KeyKind::KeyEvent(key),
            self.flags,
        )
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_value() {
        let a = KeyValue::char('a');
        assert_eq!(a.name(), "a");
        assert_eq!(a.as_char(), Some('a'));
        assert_eq!(a.flags(), Flags::empty());
        assert!(!a.is_removed());
    }

    #[test]
    fn test_string_value() {
        let th = KeyValue::string("th");
        assert_eq!(th.name(), "th");
        assert_eq!(th.symbol(false), "th");
        assert_eq!(th.kind(), &KeyKind::String("th".to_string()));
        assert_eq!(th.flags(), Flags::empty());
    }

    #[test]
    fn test_symbol_follows_shift() {
        let a = KeyValue::char('a');
        assert_eq!(a.symbol(false), "a");
        assert_eq!(a.symbol(true), "A");

        let esc = KeyValue::key_event("esc", "Esc", Key::ESC);
        assert_eq!(esc.symbol(true), "Esc");
    }

    #[test]
    fn test_modifier_is_no_char() {
        let shift = KeyValue::modifier("shift", "⇧", Modifier::Shift, Flags::SHIFT);
        assert!(shift.flags().contains(Flags::NO_CHAR | Flags::SHIFT));
        assert_eq!(shift.as_modifier(), Some(Modifier::Shift));
    }

    #[test]
    fn test_with_char_builds_new_value() {
        let base = KeyValue::new("a", "a", KeyKind::Char('a'), Flags::KEEP_ON);
        let upper = base.with_char('A');
        assert_eq!(upper.name(), "A");
        assert_eq!(upper.flags(), Flags::KEEP_ON);
        assert_eq!(base.as_char(), Some('a'));
    }

    #[test]
    fn test_with_key_event_keeps_name() {
        let base = KeyValue::char('c');
        let chord = base.with_key_event(Key::from(46));
        assert_eq!(chord.name(), "c");
        assert_eq!(chord.kind(), &KeyKind::KeyEvent(Key::from(46)));
    }

    #[test]
    fn test_removed_sentinel() {
        let removed = KeyValue::removed();
        assert!(removed.is_removed());
        assert!(removed.flags().contains(Flags::NO_CHAR));
    }
}
