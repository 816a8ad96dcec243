//! Normalization into The Session's canonical forms.
//!
//! Names, keys, and types are normalized before matching so that input
//! like "the wise maid", "Dmaj", or "Reels" lines up with the forms used
//! by The Session data dump.

/// Mode abbreviations accepted in key hints, mapped to the full mode
/// names The Session uses (e.g. "Edor" -> "Edorian").
const MODE_ABBR_TO_FULL: &[(&str, &str)] = &[
    ("maj", "major"),
    ("min", "minor"),
    ("ion", "ionian"),
    ("dor", "dorian"),
    ("phr", "phrygian"),
    ("lyd", "lydian"),
    ("mix", "mixolydian"),
    ("aeo", "aeolian"),
    ("loc", "locrian"),
];

/// Normalize a tune name to The Session format.
///
/// - Curly apostrophe becomes an ASCII single quote
/// - Words starting with a lowercase ASCII letter are capitalized
/// - "The X" becomes "X, The"
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let name = name.replace('\u{2019}', "'");
    let name = name
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) if first.is_ascii_lowercase() => {
                    format!("{}{}", first.to_ascii_uppercase(), chars.as_str())
                }
                _ => word.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    match name.strip_prefix("The ") {
        Some(rest) => format!("{rest}, The"),
        None => name,
    }
}

/// Normalize a key/mode hint to The Session format: tonic followed by the
/// full mode name, e.g. "D" -> "Dmajor", "Am" -> "Aminor",
/// "Edor" -> "Edorian".
///
/// Inputs already in full form pass through unchanged, as does anything
/// with an unrecognized mode abbreviation (which will simply fail to
/// match downstream).
#[must_use]
pub fn normalize_key(key: &str) -> String {
    let key = if key.chars().count() == 1 {
        format!("{key}maj")
    } else if let Some(tonic) = key.strip_suffix('m') {
        format!("{tonic}min")
    } else {
        key.to_string()
    };

    if key.chars().count() > 4 {
        return key;
    }

    let mut chars = key.chars();
    let Some(tonic) = chars.next() else {
        return key;
    };
    let abbr = chars.as_str().to_lowercase();

    match MODE_ABBR_TO_FULL
        .iter()
        .find(|(short, _)| *short == abbr)
    {
        Some((_, full)) => format!("{}{full}", tonic.to_ascii_uppercase()),
        None => {
            log::debug!("unrecognized mode abbreviation in key {key:?}");
            key
        }
    }
}

/// Normalize a tune type to The Session format: lowercase, singular.
#[must_use]
pub fn normalize_type(tune_type: &str) -> String {
    let tune_type = tune_type.to_lowercase();
    match tune_type.strip_suffix('s') {
        Some(singular) => singular.to_string(),
        None => tune_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_capitalizes() {
        assert_eq!(normalize_name("the wise maid"), "Wise Maid, The");
        assert_eq!(normalize_name("maid behind the bar"), "Maid Behind The Bar");
    }

    #[test]
    fn test_normalize_name_leading_the() {
        assert_eq!(normalize_name("The Silver Spear"), "Silver Spear, The");
        assert_eq!(normalize_name("Cooley's"), "Cooley's");
    }

    #[test]
    fn test_normalize_name_fancy_quote() {
        assert_eq!(normalize_name("Cooley\u{2019}s"), "Cooley's");
    }

    #[test]
    fn test_normalize_key_bare_tonic() {
        assert_eq!(normalize_key("D"), "Dmajor");
        assert_eq!(normalize_key("G"), "Gmajor");
    }

    #[test]
    fn test_normalize_key_minor_shorthand() {
        assert_eq!(normalize_key("Am"), "Aminor");
        assert_eq!(normalize_key("Em"), "Eminor");
    }

    #[test]
    fn test_normalize_key_mode_abbr() {
        assert_eq!(normalize_key("Edor"), "Edorian");
        assert_eq!(normalize_key("Amix"), "Amixolydian");
        assert_eq!(normalize_key("Gmaj"), "Gmajor");
    }

    #[test]
    fn test_normalize_key_full_form_passthrough() {
        assert_eq!(normalize_key("Edorian"), "Edorian");
        assert_eq!(normalize_key("Dmajor"), "Dmajor");
    }

    #[test]
    fn test_normalize_type() {
        assert_eq!(normalize_type("Reels"), "reel");
        assert_eq!(normalize_type("jig"), "jig");
        assert_eq!(normalize_type("Slip Jigs"), "slip jig");
    }
}
