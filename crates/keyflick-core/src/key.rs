// Keyflick Key Codes
// Low-level key codes handed to the host for hardware-style key events

use std::fmt;
use std::str::FromStr;

/// Represents a single low-level key code.
///
/// This is a newtype wrapper around u16 for type safety.
/// The numeric values match Linux input-event-codes.h definitions, so a host
/// can forward them to a virtual input device unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Key(pub u16);

impl Key {
    pub const ESC: Key = Key(1);
    pub const BACKSPACE: Key = Key(14);
    pub const TAB: Key = Key(15);
    pub const ENTER: Key = Key(28);
    pub const SPACE: Key = Key(57);
    pub const F1: Key = Key(59);
    pub const F2: Key = Key(60);
    pub const F3: Key = Key(61);
    pub const F4: Key = Key(62);
    pub const F5: Key = Key(63);
    pub const F6: Key = Key(64);
    pub const F7: Key = Key(65);
    pub const F8: Key = Key(66);
    pub const F9: Key = Key(67);
    pub const F10: Key = Key(68);
    pub const F11: Key = Key(87);
    pub const F12: Key = Key(88);
    pub const HOME: Key = Key(102);
    pub const UP: Key = Key(103);
    pub const PAGE_UP: Key = Key(104);
    pub const LEFT: Key = Key(105);
    pub const RIGHT: Key = Key(106);
    pub const END: Key = Key(107);
    pub const DOWN: Key = Key(108);
    pub const PAGE_DOWN: Key = Key(109);
    pub const INSERT: Key = Key(110);
    pub const DELETE: Key = Key(111);

    /// Get the raw numeric code value
    pub fn code(self) -> u16 {
        self.0
    }

    /// Get the name of this key
    pub fn name(self) -> &'static str {
        key_name(self.0)
    }
}

impl From<u16> for Key {
    fn from(code: u16) -> Self {
        Key(code)
    }
}

impl From<Key> for u16 {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        key_from_name(s).ok_or_else(|| format!("Unknown key: {}", s))
    }
}

/// Names of the codes this crate can emit. The first entry for a code is its
/// display name; later entries are accepted aliases.
const KEY_NAMES: &[(&str, u16)] = &[
    ("ESC", 1),
    ("ESCAPE", 1),
    ("KEY_1", 2),
    ("KEY_2", 3),
    ("KEY_3", 4),
    ("KEY_4", 5),
    ("KEY_5", 6),
    ("KEY_6", 7),
    ("KEY_7", 8),
    ("KEY_8", 9),
    ("KEY_9", 10),
    ("KEY_0", 11),
    ("MINUS", 12),
    ("EQUAL", 13),
    ("BACKSPACE", 14),
    ("TAB", 15),
    ("Q", 16),
    ("W", 17),
    ("E", 18),
    ("R", 19),
    ("T", 20),
    ("Y", 21),
    ("U", 22),
    ("I", 23),
    ("O", 24),
    ("P", 25),
    ("LEFT_BRACE", 26),
    ("RIGHT_BRACE", 27),
    ("ENTER", 28),
    ("A", 30),
    ("S", 31),
    ("D", 32),
    ("F", 33),
    ("G", 34),
    ("H", 35),
    ("J", 36),
    ("K", 37),
    ("L", 38),
    ("SEMICOLON", 39),
    ("APOSTROPHE", 40),
    ("GRAVE", 41),
    ("BACKSLASH", 43),
    ("Z", 44),
    ("X", 45),
    ("C", 46),
    ("V", 47),
    ("B", 48),
    ("N", 49),
    ("M", 50),
    ("COMMA", 51),
    ("DOT", 52),
    ("SLASH", 53),
    ("KPASTERISK", 55),
    ("SPACE", 57),
    ("F1", 59),
    ("F2", 60),
    ("F3", 61),
    ("F4", 62),
    ("F5", 63),
    ("F6", 64),
    ("F7", 65),
    ("F8", 66),
    ("F9", 67),
    ("F10", 68),
    ("KPPLUS", 78),
    ("F11", 87),
    ("F12", 88),
    ("HOME", 102),
    ("UP", 103),
    ("PAGE_UP", 104),
    ("LEFT", 105),
    ("RIGHT", 106),
    ("END", 107),
    ("DOWN", 108),
    ("PAGE_DOWN", 109),
    ("INSERT", 110),
    ("DELETE", 111),
    ("KPLEFTPAREN", 179),
    ("KPRIGHTPAREN", 180),
];

/// Display name for a key code
pub fn key_name(code: u16) -> &'static str {
    KEY_NAMES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
        .unwrap_or("UNKNOWN")
}

/// Try to parse a key name to a key code
pub fn key_from_name(name: &str) -> Option<Key> {
    let name_upper = name.to_uppercase();
    KEY_NAMES
        .iter()
        .find(|(n, _)| *n == name_upper)
        .map(|(_, code)| Key::from(*code))
}

/// Character to key code mapping used when a platform modifier turns a
/// typed character into a key chord.
///
/// '@' and '#' only exist as shifted characters on this code set and are
/// left unmapped.
pub fn char_to_key(c: char) -> Option<Key> {
    let code = match c {
        'a' => 30,
        'b' => 48,
        'c' => 46,
        'd' => 32,
        'e' => 18,
        'f' => 33,
        'g' => 34,
        'h' => 35,
        'i' => 23,
        'j' => 36,
        'k' => 37,
        'l' => 38,
        'm' => 50,
        'n' => 49,
        'o' => 24,
        'p' => 25,
        'q' => 16,
        'r' => 19,
        's' => 31,
        't' => 20,
        'u' => 22,
        'v' => 47,
        'w' => 17,
        'x' => 45,
        'y' => 21,
        'z' => 44,
        '1' => 2,
        '2' => 3,
        '3' => 4,
        '4' => 5,
        '5' => 6,
        '6' => 7,
        '7' => 8,
        '8' => 9,
        '9' => 10,
        '0' => 11,
        '`' => 41,  // GRAVE
        '-' => 12,  // MINUS
        '=' => 13,  // EQUAL
        '[' => 26,  // LEFT_BRACE
        ']' => 27,  // RIGHT_BRACE
        '\\' => 43, // BACKSLASH
        ';' => 39,  // SEMICOLON
        '\'' => 40, // APOSTROPHE
        '/' => 53,  // SLASH
        ',' => 51,  // COMMA
        '.' => 52,  // DOT
        ' ' => 57,  // SPACE
        '+' => 78,  // KPPLUS
        '*' => 55,  // KPASTERISK
        '(' => 179, // KPLEFTPAREN
        ')' => 180, // KPRIGHTPAREN
        _ => return None,
    };
    Some(Key::from(code))
}
