// Keyflick Transform Tables
// Fixed character remaps for shift and the character-category modifiers

/// A character remap. Unlisted characters pass through.
pub type CharTable = &'static [(char, char)];

/// Look a character up in a remap table
pub fn map_char(table: CharTable, c: char) -> Option<char> {
    table.iter().find(|(from, _)| *from == c).map(|(_, to)| *to)
}

/// Shifted forms for glyphs that have no Unicode case mapping
pub const SHIFT: CharTable = &[
    ('↙', '⇙'),
    ('↓', '⇓'),
    ('↘', '⇘'),
    ('←', '⇐'),
    ('→', '⇒'),
    ('↖', '⇖'),
    ('↑', '⇑'),
    ('↗', '⇗'),
    ('└', '╚'),
    ('┴', '╩'),
    ('┘', '╝'),
    ('├', '╠'),
    ('┼', '╬'),
    ('┤', '╣'),
    ('┌', '╔'),
    ('┬', '╦'),
    ('┐', '╗'),
    ('─', '═'),
    ('│', '║'),
];

pub const DOUBLE_ACUTE: CharTable = &[('o', 'ő'), ('u', 'ű'), (' ', '˝')];

pub const ORDINAL: CharTable = &[
    ('a', 'ª'),
    ('o', 'º'),
    ('1', 'ª'),
    ('2', 'º'),
    ('3', 'ⁿ'),
    ('4', 'ᵈ'),
    ('5', 'ᵉ'),
    ('6', 'ʳ'),
    ('7', 'ˢ'),
    ('8', 'ᵗ'),
    ('9', 'ʰ'),
    ('*', '°'),
];

pub const SUPERSCRIPT: CharTable = &[
    ('1', '¹'),
    ('2', '²'),
    ('3', '³'),
    ('4', '⁴'),
    ('5', '⁵'),
    ('6', '⁶'),
    ('7', '⁷'),
    ('8', '⁸'),
    ('9', '⁹'),
    ('0', '⁰'),
    ('i', 'ⁱ'),
    ('+', '⁺'),
    ('-', '⁻'),
    ('=', '⁼'),
    ('(', '⁽'),
    (')', '⁾'),
    ('n', 'ⁿ'),
];

pub const SUBSCRIPT: CharTable = &[
    ('1', '₁'),
    ('2', '₂'),
    ('3', '₃'),
    ('4', '₄'),
    ('5', '₅'),
    ('6', '₆'),
    ('7', '₇'),
    ('8', '₈'),
    ('9', '₉'),
    ('0', '₀'),
    ('+', '₊'),
    ('-', '₋'),
    ('=', '₌'),
    ('(', '₍'),
    (')', '₎'),
    ('e', 'ₑ'),
    ('a', 'ₐ'),
    ('x', 'ₓ'),
    ('o', 'ₒ'),
];

/// Numpad-style arrows
pub const ARROWS: CharTable = &[
    ('1', '↙'),
    ('2', '↓'),
    ('3', '↘'),
    ('4', '←'),
    ('6', '→'),
    ('7', '↖'),
    ('8', '↑'),
    ('9', '↗'),
];

/// Numpad-style box drawing
pub const BOX_DRAWING: CharTable = &[
    ('1', '└'),
    ('2', '┴'),
    ('3', '┘'),
    ('4', '├'),
    ('5', '┼'),
    ('6', '┤'),
    ('7', '┌'),
    ('8', '┬'),
    ('9', '┐'),
    ('0', '─'),
    ('.', '│'),
];

pub const SLASH: CharTable = &[
    ('a', 'ⱥ'),
    ('c', 'ȼ'),
    ('e', 'ɇ'),
    ('g', 'ꞡ'),
    ('l', 'ł'),
    ('n', 'ꞥ'),
    ('o', 'ø'),
    (' ', '/'),
];

/// Combining right arrow above
pub const COMBINING_ARROW_RIGHT: char = '\u{20D7}';

/// Alternate-layer remap, by key name
pub const FN_NAMES: &[(&str, &str)] = &[
    ("1", "f1"),
    ("2", "f2"),
    ("3", "f3"),
    ("4", "f4"),
    ("5", "f5"),
    ("6", "f6"),
    ("7", "f7"),
    ("8", "f8"),
    ("9", "f9"),
    ("0", "f10"),
    ("f11_placeholder", "f11"),
    ("f12_placeholder", "f12"),
    ("up", "page_up"),
    ("down", "page_down"),
    ("left", "home"),
    ("right", "end"),
    ("<", "«"),
    (">", "»"),
    ("{", "‹"),
    ("}", "›"),
    ("[", "‘"),
    ("]", "’"),
    ("(", "“"),
    (")", "”"),
    ("'", "‚"),
    ("\"", "„"),
    ("-", "–"),
    ("_", "—"),
    ("^", "¬"),
    ("%", "‰"),
    ("=", "≈"),
    ("u", "µ"),
    ("a", "æ"),
    ("o", "œ"),
    ("esc", "insert"),
    ("*", "°"),
    (".", "…"),
    (",", "·"),
    ("!", "¡"),
    ("?", "¿"),
    ("tab", "\\t"),
    ("space", "nbsp"),
    ("↖", "⇖"),
    ("↑", "⇑"),
    ("↗", "⇗"),
    ("←", "⇐"),
    ("→", "⇒"),
    ("↙", "⇙"),
    ("↓", "⇓"),
    ("↘", "⇘"),
    ("e", "€"),
    ("l", "£"),
    ("r", "₹"),
    ("y", "¥"),
    ("c", "¢"),
    ("p", "₱"),
];

/// Names removed under the alternate layer, already reachable from
/// another key.
pub const FN_REMOVED: &[&str] = &["€", "£"];

/// Synthetic keys that only exist to be promoted by the alternate layer
pub const PLACEHOLDERS: &[&str] = &["f11_placeholder", "f12_placeholder"];

/// Target name for a key under the alternate layer
pub fn fn_target(name: &str) -> Option<&'static str> {
    FN_NAMES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
}

pub fn is_fn_removed(name: &str) -> bool {
    FN_REMOVED.contains(&name)
}

pub fn is_placeholder(name: &str) -> bool {
    PLACEHOLDERS.contains(&name)
}
