// Keyflick Key Catalog
// Canonical key values by stable name

use indexmap::IndexMap;
use std::sync::LazyLock;

use crate::{Flags, Key, KeyKind, KeyValue, Modifier};

/// Global catalog of named keys, built on first access
static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::with_defaults);

/// Internal registry, kept in declaration order for listing
struct Catalog {
    by_name: IndexMap<&'static str, KeyValue>,
}

impl Catalog {
    fn with_defaults() -> Self {
        let mut catalog = Self {
            by_name: IndexMap::new(),
        };

        let chord = Flags::LOCK | Flags::KEEP_ON;
        catalog.add_modifier("shift", "⇧", Modifier::Shift, chord | Flags::SHIFT);
        catalog.add_modifier("ctrl", "Ctrl", Modifier::Ctrl, chord);
        catalog.add_modifier("alt", "Alt", Modifier::Alt, chord);
        catalog.add_modifier("meta", "Meta", Modifier::Meta, chord);
        catalog.add_modifier("fn", "Fn", Modifier::Fn, chord);

        let accent = Flags::KEEP_ON;
        catalog.add_modifier("accent_grave", "\u{02CB}", Modifier::Grave, accent);
        catalog.add_modifier("accent_aigu", "\u{00B4}", Modifier::Acute, accent);
        catalog.add_modifier("accent_circonflexe", "\u{02C6}", Modifier::Circumflex, accent);
        catalog.add_modifier("accent_tilde", "\u{02DC}", Modifier::Tilde, accent);
        catalog.add_modifier("accent_cedille", "\u{00B8}", Modifier::Cedilla, accent);
        catalog.add_modifier("accent_trema", "\u{00A8}", Modifier::Umlaut, accent);
        catalog.add_modifier("accent_caron", "\u{02C7}", Modifier::Caron, accent);
        catalog.add_modifier("accent_ring", "\u{02DA}", Modifier::Ring, accent);
        catalog.add_modifier("accent_macron", "\u{00AF}", Modifier::Macron, accent);
        catalog.add_modifier("accent_ogonek", "\u{02DB}", Modifier::Ogonek, accent);
        catalog.add_modifier("accent_dot_above", "\u{02D9}", Modifier::DotAbove, accent);
        catalog.add_modifier("accent_double_aigu", "\u{02DD}", Modifier::DoubleAcute, accent);
        catalog.add_modifier("accent_slash", "/", Modifier::Slash, accent);
        catalog.add_modifier("accent_arrow_right", "→", Modifier::ArrowRight, accent);
        catalog.add_modifier("ordinal", "ª", Modifier::Ordinal, accent);
        catalog.add_modifier("superscript", "x²", Modifier::Superscript, accent);
        catalog.add_modifier("subscript", "x₂", Modifier::Subscript, accent);
        catalog.add_modifier("arrows", "↗", Modifier::Arrows, accent);
        catalog.add_modifier("box", "┼", Modifier::BoxDrawing, accent);

        catalog.add_event("esc", "Esc", Key::ESC);
        catalog.add_event("enter", "⏎", Key::ENTER);
        catalog.add_event("tab", "⇥", Key::TAB);
        catalog.add_event("backspace", "⌫", Key::BACKSPACE);
        catalog.add_event("delete", "⌦", Key::DELETE);
        catalog.add_event("insert", "Ins", Key::INSERT);
        catalog.add_event("up", "↑", Key::UP);
        catalog.add_event("down", "↓", Key::DOWN);
        catalog.add_event("left", "←", Key::LEFT);
        catalog.add_event("right", "→", Key::RIGHT);
        catalog.add_event("home", "Home", Key::HOME);
        catalog.add_event("end", "End", Key::END);
        catalog.add_event("page_up", "PgUp", Key::PAGE_UP);
        catalog.add_event("page_down", "PgDn", Key::PAGE_DOWN);

        const FUNCTION_KEYS: [(&str, &str, Key); 12] = [
            ("f1", "F1", Key::F1),
            ("f2", "F2", Key::F2),
            ("f3", "F3", Key::F3),
            ("f4", "F4", Key::F4),
            ("f5", "F5", Key::F5),
            ("f6", "F6", Key::F6),
            ("f7", "F7", Key::F7),
            ("f8", "F8", Key::F8),
            ("f9", "F9", Key::F9),
            ("f10", "F10", Key::F10),
            ("f11", "F11", Key::F11),
            ("f12", "F12", Key::F12),
        ];
        for (name, symbol, key) in FUNCTION_KEYS {
            catalog.add_event(name, symbol, key);
        }

        // Only meaningful once the alternate layer promotes them
        for name in ["f11_placeholder", "f12_placeholder"] {
            catalog.add(
                name,
                KeyValue::new(name, "", KeyKind::String(String::new()), Flags::NO_CHAR),
            );
        }

        catalog.add(
            "space",
            KeyValue::new("space", "␣", KeyKind::Char(' '), Flags::empty()),
        );
        catalog.add(
            "nbsp",
            KeyValue::new("nbsp", "⍽", KeyKind::Char('\u{a0}'), Flags::empty()),
        );
        catalog.add(
            "\\t",
            KeyValue::new("\\t", "\\t", KeyKind::Char('\t'), Flags::empty()),
        );
        catalog.add("removed", KeyValue::removed());

        catalog
    }

    fn add(&mut self, name: &'static str, value: KeyValue) {
        self.by_name.insert(name, value);
    }

    fn add_modifier(&mut self, name: &'static str, symbol: &str, modifier: Modifier, flags: Flags) {
        self.add(name, KeyValue::modifier(name, symbol, modifier, flags));
    }

    fn add_event(&mut self, name: &'static str, symbol: &str, key: Key) {
        self.add(name, KeyValue::key_event(name, symbol, key));
    }
}

/// Look up the canonical value for a key name.
///
/// Unregistered single-character names yield a character key of that
/// character. Other unregistered names are unknown.
pub fn key_by_name(name: &str) -> Option<KeyValue> {
    if let Some(value) = CATALOG.by_name.get(name) {
        return Some(value.clone());
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeyValue::char(c)),
        _ => None,
    }
}

/// Registered key names in declaration order
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.by_name.keys().copied()
}
