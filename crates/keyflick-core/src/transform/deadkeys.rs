// Keyflick Dead Keys
// Composition of a diacritic dead character with a base character

use crate::Modifier;

/// Compose a base character with the dead character of a diacritic
/// modifier.
///
/// A space, or the dead character itself, commits the accent alone.
/// Uppercase letters compose through their lowercase form. Returns None when
/// the pair has no precomposed form.
pub fn compose(modifier: Modifier, base: char) -> Option<char> {
    let dead = modifier.dead_char()?;
    if base == ' ' || base == dead {
        return Some(dead);
    }
    if let Some(out) = compose_letter(modifier, base) {
        return Some(out);
    }

    // Case-fold, compose, and only accept a single-character uppercase
    let lower = single_char(base.to_lowercase())?;
    if lower == base {
        return None;
    }
    let composed = compose_letter(modifier, lower)?;
    single_char(composed.to_uppercase())
}

fn single_char(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let c = chars.next()?;
    match chars.next() {
        Some(_) => None,
        None => Some(c),
    }
}

fn compose_letter(modifier: Modifier, base: char) -> Option<char> {
    let out = match modifier {
        Modifier::Grave => match base {
            'a' => 'à',
            'e' => 'è',
            'i' => 'ì',
            'o' => 'ò',
            'u' => 'ù',
            'n' => 'ǹ',
            'w' => 'ẁ',
            'y' => 'ỳ',
            _ => return None,
        },
        Modifier::Acute => match base {
            'a' => 'á',
            'e' => 'é',
            'i' => 'í',
            'o' => 'ó',
            'u' => 'ú',
            'y' => 'ý',
            'c' => 'ć',
            'g' => 'ǵ',
            'k' => 'ḱ',
            'l' => 'ĺ',
            'm' => 'ḿ',
            'n' => 'ń',
            'p' => 'ṕ',
            'r' => 'ŕ',
            's' => 'ś',
            'w' => 'ẃ',
            'z' => 'ź',
            _ => return None,
        },
        Modifier::Circumflex => match base {
            'a' => 'â',
            'e' => 'ê',
            'i' => 'î',
            'o' => 'ô',
            'u' => 'û',
            'c' => 'ĉ',
            'g' => 'ĝ',
            'h' => 'ĥ',
            'j' => 'ĵ',
            's' => 'ŝ',
            'w' => 'ŵ',
            'y' => 'ŷ',
            'z' => 'ẑ',
            _ => return None,
        },
        Modifier::Tilde => match base {
            'a' => 'ã',
            'e' => 'ẽ',
            'i' => 'ĩ',
            'n' => 'ñ',
            'o' => 'õ',
            'u' => 'ũ',
            'v' => 'ṽ',
            'y' => 'ỹ',
            _ => return None,
        },
        Modifier::Cedilla => match base {
            'c' => 'ç',
            'e' => 'ȩ',
            'g' => 'ģ',
            'k' => 'ķ',
            'l' => 'ļ',
            'n' => 'ņ',
            'r' => 'ŗ',
            's' => 'ş',
            't' => 'ţ',
            _ => return None,
        },
        Modifier::Umlaut => match base {
            'a' => 'ä',
            'e' => 'ë',
            'i' => 'ï',
            'o' => 'ö',
            'u' => 'ü',
            'y' => 'ÿ',
            'h' => 'ḧ',
            'w' => 'ẅ',
            'x' => 'ẍ',
            't' => 'ẗ',
            _ => return None,
        },
        Modifier::Caron => match base {
            'a' => 'ǎ',
            'c' => 'č',
            'd' => 'ď',
            'e' => 'ě',
            'g' => 'ǧ',
            'h' => 'ȟ',
            'i' => 'ǐ',
            'k' => 'ǩ',
            'l' => 'ľ',
            'n' => 'ň',
            'o' => 'ǒ',
            'r' => 'ř',
            's' => 'š',
            't' => 'ť',
            'u' => 'ǔ',
            'z' => 'ž',
            _ => return None,
        },
        Modifier::Ring => match base {
            'a' => 'å',
            'u' => 'ů',
            'w' => 'ẘ',
            'y' => 'ẙ',
            _ => return None,
        },
        Modifier::Macron => match base {
            'a' => 'ā',
            'e' => 'ē',
            'g' => 'ḡ',
            'i' => 'ī',
            'o' => 'ō',
            'u' => 'ū',
            'y' => 'ȳ',
            _ => return None,
        },
        Modifier::Ogonek => match base {
            'a' => 'ą',
            'e' => 'ę',
            'i' => 'į',
            'o' => 'ǫ',
            'u' => 'ų',
            _ => return None,
        },
        Modifier::DotAbove => match base {
            'a' => 'ȧ',
            'b' => 'ḃ',
            'c' => 'ċ',
            'd' => 'ḋ',
            'e' => 'ė',
            'f' => 'ḟ',
            'g' => 'ġ',
            'h' => 'ḣ',
            'm' => 'ṁ',
            'n' => 'ṅ',
            'o' => 'ȯ',
            'p' => 'ṗ',
            'r' => 'ṙ',
            's' => 'ṡ',
            't' => 'ṫ',
            'w' => 'ẇ',
            'x' => 'ẋ',
            'y' => 'ẏ',
            'z' => 'ż',
            _ => return None,
        },
        _ => return None,
    };

    Some(out)
}
