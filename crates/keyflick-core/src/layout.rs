// Keyflick Layout
// Rows of key slots, each with a center value and four directional alternates

use std::fmt;

use crate::{catalog, KeyValue};

/// Which of a slot's five values a gesture selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Center,
        Direction::TopLeft,
        Direction::TopRight,
        Direction::BottomLeft,
        Direction::BottomRight,
    ];

    /// Select a direction from a drag offset.
    ///
    /// Offsets whose Manhattan length is below `threshold` stay on the
    /// center. A zero vertical offset counts as downward and a zero
    /// horizontal offset as rightward. Non-finite offsets stay on the
    /// center.
    pub fn from_offset(dx: f32, dy: f32, threshold: f32) -> Self {
        if !(dx.is_finite() && dy.is_finite()) || dx.abs() + dy.abs() < threshold {
            Direction::Center
        } else if dx < 0.0 {
            if dy < 0.0 {
                Direction::TopLeft
            } else {
                Direction::BottomLeft
            }
        } else if dy < 0.0 {
            Direction::TopRight
        } else {
            Direction::BottomRight
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Center => 0,
            Direction::TopLeft => 1,
            Direction::TopRight => 2,
            Direction::BottomLeft => 3,
            Direction::BottomRight => 4,
        }
    }
}

/// Position of a slot in a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId {
    pub row: usize,
    pub col: usize,
}

impl SlotId {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A key on the keyboard surface
#[derive(Debug, Clone, PartialEq)]
pub struct KeySlot {
    values: [Option<KeyValue>; 5],
    width: f32,
}

impl KeySlot {
    /// A slot of unit width with a center value
    pub fn new(center: KeyValue) -> Self {
        Self {
            values: [Some(center), None, None, None, None],
            width: 1.0,
        }
    }

    /// A slot from catalog names. Unknown names leave the value empty.
    pub fn named(center: &str) -> Self {
        Self {
            values: [catalog::key_by_name(center), None, None, None, None],
            width: 1.0,
        }
    }

    pub fn with(mut self, direction: Direction, value: KeyValue) -> Self {
        self.values[direction.index()] = Some(value);
        self
    }

    /// Builder form of [`KeySlot::with`] taking a catalog name
    pub fn with_named(self, direction: Direction, name: &str) -> Self {
        match catalog::key_by_name(name) {
            Some(value) => self.with(direction, value),
            None => {
                log::warn!("unknown key name '{}' in layout", name);
                self
            }
        }
    }

    /// Width relative to the unit key width
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn value(&self, direction: Direction) -> Option<&KeyValue> {
        self.values[direction.index()].as_ref()
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

/// A horizontal row of slots
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    slots: Vec<KeySlot>,
}

impl Row {
    pub fn new(slots: Vec<KeySlot>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[KeySlot] {
        &self.slots
    }

    /// Total width in layout units for a given unit key width
    pub fn width(&self, key_width: f32) -> f32 {
        self.slots.iter().map(|slot| slot.width * key_width).sum()
    }
}

/// A complete keyboard: rows top to bottom
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardLayout {
    rows: Vec<Row>,
}

impl KeyboardLayout {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn slot(&self, id: SlotId) -> Option<&KeySlot> {
        self.rows.get(id.row)?.slots.get(id.col)
    }

    /// The built-in four row QWERTY layout
    pub fn qwerty() -> Self {
        use Direction::*;

        fn letter(center: &str, top_right: &str, bottom_left: &str) -> KeySlot {
            KeySlot::named(center)
                .with_named(Direction::TopRight, top_right)
                .with_named(Direction::BottomLeft, bottom_left)
        }

        let top = Row::new(vec![
            letter("q", "1", "~").with_named(TopLeft, "esc"),
            letter("w", "2", "@"),
            letter("e", "3", "#"),
            letter("r", "4", "$"),
            letter("t", "5", "%"),
            letter("y", "6", "^"),
            letter("u", "7", "&"),
            letter("i", "8", "*"),
            letter("o", "9", "(").with_named(BottomRight, ")"),
            letter("p", "0", "f11_placeholder").with_named(BottomRight, "f12_placeholder"),
        ]);

        let middle = Row::new(vec![
            letter("a", "`", "<").with_named(TopLeft, "tab"),
            letter("s", "\\", ">"),
            letter("d", "|", "{").with_named(BottomRight, "}"),
            letter("f", "-", "_"),
            letter("g", "=", "+"),
            letter("h", "[", "]"),
            letter("j", "'", "\""),
            letter("k", ";", ":"),
            letter("l", "/", "?"),
        ]);

        let bottom = Row::new(vec![
            KeySlot::named("shift")
                .with_named(TopLeft, "accent_tilde")
                .with_named(BottomLeft, "accent_cedille")
                .with_width(1.5),
            letter("z", "accent_caron", "accent_ring"),
            letter("x", "accent_macron", "accent_ogonek"),
            letter("c", "accent_dot_above", "accent_double_aigu"),
            letter("v", "accent_slash", "accent_arrow_right"),
            letter("b", "ordinal", "!"),
            letter("n", ",", "."),
            letter("m", "€", "£"),
            KeySlot::named("backspace")
                .with_named(TopRight, "delete")
                .with_width(1.5),
        ]);

        let controls = Row::new(vec![
            KeySlot::named("ctrl")
                .with_named(TopLeft, "meta")
                .with_named(TopRight, "alt")
                .with_width(1.5),
            KeySlot::named("fn")
                .with_named(TopLeft, "superscript")
                .with_named(TopRight, "subscript")
                .with_named(BottomLeft, "box")
                .with_named(BottomRight, "arrows"),
            KeySlot::named("space")
                .with_named(TopLeft, "accent_grave")
                .with_named(TopRight, "accent_aigu")
                .with_named(BottomLeft, "accent_circonflexe")
                .with_named(BottomRight, "accent_trema")
                .with_width(4.0),
            KeySlot::named("left")
                .with_named(TopLeft, "up")
                .with_named(BottomLeft, "down"),
            KeySlot::named("right")
                .with_named(TopRight, "page_up")
                .with_named(BottomRight, "page_down"),
            KeySlot::named("enter").with_width(1.5),
        ]);

        Self::new(vec![top, middle, bottom, controls])
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::qwerty()
    }
}
