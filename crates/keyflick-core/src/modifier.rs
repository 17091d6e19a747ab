// Keyflick Modifier System
// Modifier identities and the canonically ordered set of active modifiers

use smallvec::SmallVec;
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A logically held key that changes how other keys resolve.
///
/// Declaration order is the canonical application order: platform chords
/// first, then the alternate layer, shift, dead-key diacritics and finally
/// the character-category transforms. Transforms do not commute, so
/// `Ord` on this enum is load-bearing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Modifier {
    Ctrl,
    Alt,
    Meta,
    Fn,
    Shift,
    Grave,
    #[strum(to_string = "acute", serialize = "aigu")]
    Acute,
    Circumflex,
    Tilde,
    Cedilla,
    #[strum(to_string = "umlaut", serialize = "trema")]
    Umlaut,
    Caron,
    Ring,
    Macron,
    Ogonek,
    DotAbove,
    DoubleAcute,
    Ordinal,
    Superscript,
    Subscript,
    Arrows,
    #[strum(to_string = "box_drawing", serialize = "box")]
    BoxDrawing,
    Slash,
    ArrowRight,
}

impl Modifier {
    /// Platform chord modifiers turn typed characters into key events
    pub fn is_platform(self) -> bool {
        matches!(self, Modifier::Ctrl | Modifier::Alt | Modifier::Meta)
    }

    /// The spacing dead character composed with the base character, for
    /// diacritic modifiers.
    pub fn dead_char(self) -> Option<char> {
        let c = match self {
            Modifier::Grave => '\u{02CB}',
            Modifier::Acute => '\u{00B4}',
            Modifier::Circumflex => '\u{02C6}',
            Modifier::Tilde => '\u{02DC}',
            Modifier::Cedilla => '\u{00B8}',
            Modifier::Umlaut => '\u{00A8}',
            Modifier::Caron => '\u{02C7}',
            Modifier::Ring => '\u{02DA}',
            Modifier::Macron => '\u{00AF}',
            Modifier::Ogonek => '\u{02DB}',
            Modifier::DotAbove => '\u{02D9}',
            _ => return None,
        };
        Some(c)
    }
}

/// Upper bound on simultaneously active modifiers
pub const MAX_MODIFIERS: usize = 8;

/// Active modifiers, kept sorted in canonical order without duplicates.
///
/// Equality and hashing are by value so the set can key the resolution
/// cache. Uses SmallVec to avoid heap allocation for the common case of
/// 0-4 modifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet {
    mods: SmallVec<[Modifier; 4]>,
}

impl ModifierSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a modifier at its canonical position.
    ///
    /// Returns false if the modifier was already present or the set is full.
    pub fn insert(&mut self, modifier: Modifier) -> bool {
        match self.mods.binary_search(&modifier) {
            Ok(_) => false,
            Err(_) if self.mods.len() >= MAX_MODIFIERS => {
                log::warn!(
                    "modifier set full ({} entries), dropping {}",
                    MAX_MODIFIERS,
                    modifier
                );
                false
            }
            Err(pos) => {
                self.mods.insert(pos, modifier);
                true
            }
        }
    }

    /// Check whether a modifier is active
    pub fn contains(&self, modifier: Modifier) -> bool {
        self.mods.binary_search(&modifier).is_ok()
    }

    /// Iterate in canonical order
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.mods.iter().copied()
    }

    pub fn as_slice(&self) -> &[Modifier] {
        &self.mods
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::new();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

impl<const N: usize> From<[Modifier; N]> for ModifierSet {
    fn from(mods: [Modifier; N]) -> Self {
        mods.into_iter().collect()
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&'static str> = self.mods.iter().map(|m| (*m).into()).collect();
        write!(f, "{}", parts.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use strum::IntoEnumIterator;

    #[test]
    fn test_canonical_order_independent_of_insertion() {
        let a = ModifierSet::from([Modifier::Grave, Modifier::Shift, Modifier::Fn]);
        let b = ModifierSet::from([Modifier::Fn, Modifier::Grave, Modifier::Shift]);
        assert_eq!(a, b);
        assert_eq!(
            a.as_slice(),
            &[Modifier::Fn, Modifier::Shift, Modifier::Grave]
        );
    }

    #[test]
    fn test_platform_before_fn_before_shift() {
        let set = ModifierSet::from([Modifier::Shift, Modifier::Fn, Modifier::Ctrl]);
        assert_eq!(
            set.as_slice(),
            &[Modifier::Ctrl, Modifier::Fn, Modifier::Shift]
        );
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = ModifierSet::new();
        assert!(set.insert(Modifier::Shift));
        assert!(!set.insert(Modifier::Shift));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_bounded() {
        let set: ModifierSet = Modifier::iter().collect();
        assert_eq!(set.len(), MAX_MODIFIERS);
    }

    #[test]
    fn test_hashable_by_value() {
        let mut map = HashMap::new();
        map.insert(ModifierSet::from([Modifier::Shift]), "shifted");
        let mut probe = ModifierSet::new();
        probe.insert(Modifier::Shift);
        assert_eq!(map.get(&probe), Some(&"shifted"));
    }

    #[test]
    fn test_modifier_names() {
        assert_eq!("shift".parse::<Modifier>(), Ok(Modifier::Shift));
        assert_eq!("aigu".parse::<Modifier>(), Ok(Modifier::Acute));
        assert_eq!("DOT_ABOVE".parse::<Modifier>(), Ok(Modifier::DotAbove));
        assert_eq!("box".parse::<Modifier>(), Ok(Modifier::BoxDrawing));
        assert_eq!(Modifier::DoubleAcute.to_string(), "double_acute");
        assert!("hyper".parse::<Modifier>().is_err());
    }

    #[test]
    fn test_dead_chars() {
        assert_eq!(Modifier::Grave.dead_char(), Some('\u{02CB}'));
        assert_eq!(Modifier::Shift.dead_char(), None);
        assert!(Modifier::Alt.is_platform());
        assert!(!Modifier::Fn.is_platform());
    }

    #[test]
    fn test_display() {
        let set = ModifierSet::from([Modifier::Shift, Modifier::Ctrl]);
        assert_eq!(set.to_string(), "ctrl+shift");
    }
}
