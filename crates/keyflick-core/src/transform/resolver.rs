// Keyflick Modifier Resolver
// Applies active modifiers to a base key value in canonical order

use parking_lot::Mutex;

use super::cache::ResolutionCache;
use super::{deadkeys, tables};
use crate::key::char_to_key;
use crate::{catalog, KeyKind, KeyValue, Modifier, ModifierSet};

/// Resolves a base key under a modifier set, memoizing results per
/// instance.
///
/// The cache is an optimization only: a resolver built with
/// [`ModifierResolver::uncached`] returns identical results.
#[derive(Debug)]
pub struct ModifierResolver {
    cache: Option<Mutex<ResolutionCache>>,
}

impl ModifierResolver {
    /// Create a resolver with an empty cache
    pub fn new() -> Self {
        Self::with_cache(true)
    }

    /// Create a resolver that recomputes every resolution
    pub fn uncached() -> Self {
        Self::with_cache(false)
    }

    pub fn with_cache(enabled: bool) -> Self {
        Self {
            cache: enabled.then(|| Mutex::new(ResolutionCache::new())),
        }
    }

    /// Resolve `base` under `mods`. None means the key is absent or removed.
    pub fn resolve(&self, base: Option<&KeyValue>, mods: &ModifierSet) -> Option<KeyValue> {
        let base = base?;

        let resolved = match &self.cache {
            Some(cache) => {
                if let Some(hit) = cache.lock().lookup(base.name(), mods) {
                    log::trace!("resolve cache hit: {} [{}]", base.name(), mods);
                    return present(hit.clone());
                }
                log::trace!("resolve cache miss: {} [{}]", base.name(), mods);
                let resolved = apply_all(base, mods);
                cache
                    .lock()
                    .insert(base.name(), mods.clone(), resolved.clone());
                resolved
            }
            None => apply_all(base, mods),
        };

        present(resolved)
    }

    /// Number of memoized resolutions
    pub fn cached_entries(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }
}

impl Default for ModifierResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn present(value: KeyValue) -> Option<KeyValue> {
    if value.is_removed() {
        None
    } else {
        Some(value)
    }
}

fn apply_all(base: &KeyValue, mods: &ModifierSet) -> KeyValue {
    let mut result = base.clone();
    for modifier in mods.iter() {
        result = apply_modifier(&result, modifier);
        log::trace!("  {} -> {}", modifier, result.name());
    }
    remove_placeholders(result)
}

/// Placeholders that no transform promoted disappear
fn remove_placeholders(value: KeyValue) -> KeyValue {
    if tables::is_placeholder(value.name()) {
        KeyValue::removed()
    } else {
        value
    }
}

/// Apply a single modifier transform. Always returns a new value.
pub fn apply_modifier(value: &KeyValue, modifier: Modifier) -> KeyValue {
    // Modifier keys and the removed sentinel are never transformed
    if matches!(value.kind(), KeyKind::Modifier(_) | KeyKind::Removed) {
        return value.clone();
    }

    match modifier {
        Modifier::Ctrl | Modifier::Alt | Modifier::Meta => into_key_event(value),
        Modifier::Fn => apply_fn(value),
        Modifier::Shift => apply_shift(value),
        Modifier::Grave
        | Modifier::Acute
        | Modifier::Circumflex
        | Modifier::Tilde
        | Modifier::Cedilla
        | Modifier::Umlaut
        | Modifier::Caron
        | Modifier::Ring
        | Modifier::Macron
        | Modifier::Ogonek
        | Modifier::DotAbove => map_value_char(value, |c| deadkeys::compose(modifier, c)),
        Modifier::DoubleAcute => apply_table(value, tables::DOUBLE_ACUTE),
        Modifier::Ordinal => apply_table(value, tables::ORDINAL),
        Modifier::Superscript => apply_table(value, tables::SUPERSCRIPT),
        Modifier::Subscript => apply_table(value, tables::SUBSCRIPT),
        Modifier::Arrows => apply_table(value, tables::ARROWS),
        Modifier::BoxDrawing => apply_table(value, tables::BOX_DRAWING),
        Modifier::Slash => apply_table(value, tables::SLASH),
        Modifier::ArrowRight => match value.kind() {
            KeyKind::Char(c) => {
                value.with_string(format!("{}{}", c, tables::COMBINING_ARROW_RIGHT))
            }
            _ => value.clone(),
        },
    }
}

fn into_key_event(value: &KeyValue) -> KeyValue {
    match value.kind() {
        KeyKind::Char(c) => match char_to_key(*c) {
            Some(key) => value.with_key_event(key),
            None => value.clone(),
        },
        _ => value.clone(),
    }
}

fn apply_fn(value: &KeyValue) -> KeyValue {
    if tables::is_fn_removed(value.name()) {
        return KeyValue::removed();
    }
    tables::fn_target(value.name())
        .and_then(catalog::key_by_name)
        .unwrap_or_else(|| value.clone())
}

fn apply_shift(value: &KeyValue) -> KeyValue {
    match value.kind() {
        KeyKind::Char(_) => map_value_char(value, |c| {
            tables::map_char(tables::SHIFT, c).or_else(|| upper_char(c))
        }),
        KeyKind::String(s) => {
            let upper = s.to_uppercase();
            if upper == *s {
                value.clone()
            } else {
                value.with_string(upper)
            }
        }
        _ => value.clone(),
    }
}

/// Single-character uppercase, if any
fn upper_char(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

fn apply_table(value: &KeyValue, table: tables::CharTable) -> KeyValue {
    map_value_char(value, |c| tables::map_char(table, c))
}

/// Rebuild a character key through `f`, passing through on no result or no
/// change.
fn map_value_char(value: &KeyValue, f: impl Fn(char) -> Option<char>) -> KeyValue {
    match value.kind() {
        KeyKind::Char(c) => match f(*c) {
            Some(out) if out != *c => value.with_char(out),
            _ => value.clone(),
        },
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Flags, Key};
    use strum::IntoEnumIterator;

    fn named(name: &str) -> KeyValue {
        catalog::key_by_name(name).unwrap()
    }

    #[test]
    fn test_absent_base() {
        let resolver = ModifierResolver::new();
        assert_eq!(resolver.resolve(None, &ModifierSet::new()), None);
        assert_eq!(resolver.cached_entries(), 0);
    }

    #[test]
    fn test_no_modifiers_is_identity() {
        let resolver = ModifierResolver::new();
        let a = named("a");
        assert_eq!(resolver.resolve(Some(&a), &ModifierSet::new()), Some(a));
    }

    #[test]
    fn test_shift_letter() {
        let resolver = ModifierResolver::new();
        let out = resolver
            .resolve(Some(&named("a")), &ModifierSet::from([Modifier::Shift]))
            .unwrap();
        assert_eq!(out.as_char(), Some('A'));
    }

    #[test]
    fn test_shift_glyphs_and_strings() {
        assert_eq!(
            apply_modifier(&named("↑"), Modifier::Shift).as_char(),
            Some('⇑')
        );
        assert_eq!(
            apply_modifier(&named("─"), Modifier::Shift).as_char(),
            Some('═')
        );
        let s = apply_modifier(&KeyValue::string("abc"), Modifier::Shift);
        assert_eq!(s.kind(), &KeyKind::String("ABC".to_string()));
        // 'ß' uppercases to two characters and stays put
        assert_eq!(
            apply_modifier(&named("ß"), Modifier::Shift).as_char(),
            Some('ß')
        );
    }

    #[test]
    fn test_fn_layer() {
        assert_eq!(apply_modifier(&named("a"), Modifier::Fn).as_char(), Some('æ'));
        assert_eq!(
            apply_modifier(&named("1"), Modifier::Fn).kind(),
            &KeyKind::KeyEvent(Key::F1)
        );
        assert_eq!(
            apply_modifier(&named("left"), Modifier::Fn).kind(),
            &KeyKind::KeyEvent(Key::HOME)
        );
        assert_eq!(
            apply_modifier(&named("space"), Modifier::Fn).as_char(),
            Some('\u{a0}')
        );
        assert_eq!(apply_modifier(&named("z"), Modifier::Fn), named("z"));
    }

    #[test]
    fn test_fn_removes_duplicate_currency() {
        let resolver = ModifierResolver::new();
        let fn_set = ModifierSet::from([Modifier::Fn]);
        assert_eq!(resolver.resolve(Some(&named("€")), &fn_set), None);
        assert_eq!(resolver.resolve(Some(&named("£")), &fn_set), None);
        assert_eq!(
            resolver
                .resolve(Some(&named("e")), &fn_set)
                .unwrap()
                .as_char(),
            Some('€')
        );
    }

    #[test]
    fn test_platform_modifier_makes_key_event() {
        let c = named("c");
        let out = apply_modifier(&c, Modifier::Ctrl);
        assert_eq!(out.kind(), &KeyKind::KeyEvent(Key::from(46)));
        assert_eq!(out.name(), "c");
        assert_eq!(out.symbol(false), "c");

        let at = named("@");
        assert_eq!(apply_modifier(&at, Modifier::Alt), at);

        let enter = named("enter");
        assert_eq!(apply_modifier(&enter, Modifier::Meta), enter);
    }

    #[test]
    fn test_dead_keys() {
        let resolver = ModifierResolver::new();
        let out = resolver
            .resolve(Some(&named("e")), &ModifierSet::from([Modifier::Grave]))
            .unwrap();
        assert_eq!(out.as_char(), Some('è'));

        assert_eq!(apply_modifier(&named("q"), Modifier::Acute), named("q"));
    }

    #[test]
    fn test_shift_then_accent() {
        let resolver = ModifierResolver::new();
        let mods = ModifierSet::from([Modifier::Acute, Modifier::Shift]);
        let out = resolver.resolve(Some(&named("e")), &mods).unwrap();
        assert_eq!(out.as_char(), Some('É'));
    }

    #[test]
    fn test_category_tables() {
        assert_eq!(
            apply_modifier(&named("2"), Modifier::Superscript).as_char(),
            Some('²')
        );
        assert_eq!(
            apply_modifier(&named("2"), Modifier::Subscript).as_char(),
            Some('₂')
        );
        assert_eq!(
            apply_modifier(&named("8"), Modifier::Arrows).as_char(),
            Some('↑')
        );
        assert_eq!(
            apply_modifier(&named("5"), Modifier::BoxDrawing).as_char(),
            Some('┼')
        );
        assert_eq!(
            apply_modifier(&named("o"), Modifier::Slash).as_char(),
            Some('ø')
        );
        assert_eq!(
            apply_modifier(&named("u"), Modifier::DoubleAcute).as_char(),
            Some('ű')
        );
        assert_eq!(
            apply_modifier(&named("a"), Modifier::Ordinal).as_char(),
            Some('ª')
        );
        assert_eq!(apply_modifier(&named("q"), Modifier::Slash), named("q"));
    }

    #[test]
    fn test_arrow_right_combining() {
        let out = apply_modifier(&named("v"), Modifier::ArrowRight);
        assert_eq!(out.kind(), &KeyKind::String("v\u{20D7}".to_string()));
        assert_eq!(out.name(), "v\u{20D7}");
    }

    #[test]
    fn test_modifier_values_pass_through() {
        let shift = named("shift");
        for modifier in Modifier::iter() {
            assert_eq!(apply_modifier(&shift, modifier), shift);
        }
    }

    #[test]
    fn test_transforms_keep_flags() {
        let base = KeyValue::new("a", "a", KeyKind::Char('a'), Flags::KEEP_ON);
        let out = apply_modifier(&base, Modifier::Shift);
        assert_eq!(out.flags(), Flags::KEEP_ON);
    }

    #[test]
    fn test_placeholder_cleanup() {
        let resolver = ModifierResolver::new();
        let placeholder = named("f11_placeholder");
        assert_eq!(resolver.resolve(Some(&placeholder), &ModifierSet::new()), None);
        assert_eq!(
            resolver.resolve(Some(&placeholder), &ModifierSet::from([Modifier::Shift])),
            None
        );
        let promoted = resolver
            .resolve(Some(&placeholder), &ModifierSet::from([Modifier::Fn]))
            .unwrap();
        assert_eq!(promoted.kind(), &KeyKind::KeyEvent(Key::F11));
    }

    #[test]
    fn test_cache_populates_and_agrees() {
        let cached = ModifierResolver::new();
        let uncached = ModifierResolver::uncached();
        let mods = ModifierSet::from([Modifier::Fn, Modifier::Shift]);
        let a = named("a");

        let first = cached.resolve(Some(&a), &mods);
        let second = cached.resolve(Some(&a), &mods);
        assert_eq!(first, second);
        assert_eq!(first, uncached.resolve(Some(&a), &mods));
        assert_eq!(cached.cached_entries(), 1);
        assert_eq!(uncached.cached_entries(), 0);
    }

    #[test]
    fn test_canonical_order_applies() {
        // Fn runs before shift: a -> æ -> Æ
        let resolver = ModifierResolver::new();
        let mods = ModifierSet::from([Modifier::Shift, Modifier::Fn]);
        let out = resolver.resolve(Some(&named("a")), &mods).unwrap();
        assert_eq!(out.as_char(), Some('Æ'));

        // The other order would not reach the alternate layer
        let shifted = apply_modifier(&named("a"), Modifier::Shift);
        let reversed = apply_modifier(&shifted, Modifier::Fn);
        assert_eq!(reversed.as_char(), Some('A'));
    }

    #[test]
    fn test_instances_do_not_share_cache() {
        let one = ModifierResolver::new();
        let two = ModifierResolver::new();
        one.resolve(Some(&named("a")), &ModifierSet::new());
        assert_eq!(one.cached_entries(), 1);
        assert_eq!(two.cached_entries(), 0);
    }
}
