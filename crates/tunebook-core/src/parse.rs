//! Set-list parser.
//!
//! Input is plain text, one set per non-empty line:
//!
//! ```text
//! reels: Cooley's / The Wise Maid [118] / The Maid Behind The Bar
//! jigs, reel: The Kesh / Out On The Ocean / The Silver Spear
//! ```
//!
//! The field before `:` names the tune type(s); tunes are separated by
//! `/`, each with an optional `(key)` and `[id]` suffix. Parsing never
//! aborts the batch: line-level errors are collected alongside the sets
//! that did parse.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LineError, ParseError};
use crate::model::{TuneReference, TuneSet};
use crate::normalize::normalize_type;

/// A tune entry: name, then optional `(key)` and `[id]` suffixes.
#[allow(clippy::expect_used)]
static TUNE_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s*(?:\((.+?)\))?\s*(?:\[(.+?)\])?$").expect("tune pattern is valid")
});

/// The outcome of parsing a whole set-list text: every set that parsed,
/// plus every line that did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSetlist {
    pub sets: Vec<TuneSet>,
    pub errors: Vec<LineError>,
}

impl ParsedSetlist {
    /// True when every non-empty line parsed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a multi-line set-list text.
///
/// Produces one [`TuneSet`] per non-empty line, in input order. Lines
/// that fail to parse are reported in [`ParsedSetlist::errors`] with
/// their 1-based line number; the rest of the input still parses.
#[must_use]
pub fn parse_setlist(input: &str) -> ParsedSetlist {
    let mut sets = Vec::new();
    let mut errors = Vec::new();

    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_set(line) {
            Ok(set) => sets.push(set),
            Err(error) => errors.push(LineError {
                line: i + 1,
                content: line.to_string(),
                error,
            }),
        }
    }

    ParsedSetlist { sets, errors }
}

/// Parse a single set line, e.g.
/// `reels: Cooley's / The Maid Behind The Bar / The Silver Spear`.
pub fn parse_set(line: &str) -> Result<TuneSet, ParseError> {
    let (type_input, tunes_input) = line
        .split_once(':')
        .ok_or(ParseError::MissingSeparator)?;

    let tune_inputs: Vec<&str> = tunes_input
        .split('/')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tune_inputs.is_empty() {
        return Err(ParseError::EmptySet);
    }

    let types = parse_set_type(type_input, tune_inputs.len())?;

    let mut tunes = Vec::with_capacity(tune_inputs.len());
    for (tune_input, tune_type) in tune_inputs.iter().zip(types) {
        let mut reference = parse_tune(tune_input)?;
        reference.tune_type = Some(tune_type);
        tunes.push(reference);
    }

    Ok(TuneSet {
        label: type_input.trim().to_string(),
        tunes,
    })
}

/// Parse one tune entry, e.g. `Cooley's`, `Cooley's (Edor)`,
/// `Cooley's [1]`, or `Cooley's (Edor) [1]`.
pub fn parse_tune(tune_input: &str) -> Result<TuneReference, ParseError> {
    let captures = TUNE_INPUT
        .captures(tune_input)
        .ok_or_else(|| ParseError::Tune {
            input: tune_input.to_string(),
        })?;

    let name = captures
        .get(1)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ParseError::Tune {
            input: tune_input.to_string(),
        })?;
    let key = captures.get(2).map(|m| m.as_str().to_string());
    let tune_id = match captures.get(3) {
        Some(m) => Some(m.as_str().parse().map_err(|_| ParseError::TuneIdHint {
            hint: m.as_str().to_string(),
        })?),
        None => None,
    };

    Ok(TuneReference {
        name,
        key,
        tune_id,
        tune_type: None,
    })
}

/// Distribute the type field of a set line over its tunes.
///
/// The field is a comma list: one type per tune, a single type for all
/// tunes, or two entries where a plural form covers a run of tunes
/// (`jigs, reel` plays jigs until a final reel).
pub fn parse_set_type(type_input: &str, num_tunes: usize) -> Result<Vec<String>, ParseError> {
    let type_inputs: Vec<&str> = type_input.split(',').map(str::trim).collect();

    if type_inputs.len() == num_tunes {
        return Ok(type_inputs.iter().map(|t| normalize_type(t)).collect());
    }
    if type_inputs.len() == 1 {
        return Ok(vec![normalize_type(type_inputs[0]); num_tunes]);
    }
    if type_inputs.len() == 2 {
        let (a, b) = (type_inputs[0], type_inputs[1]);
        let a_is_plural = a.ends_with('s');
        let b_is_plural = b.ends_with('s');

        if num_tunes < 2 {
            return Err(ParseError::TypeCount {
                input: type_input.to_string(),
                num_tunes,
            });
        }
        // num_tunes == 2 is covered by the one-type-per-tune case above.
        return match (a_is_plural, b_is_plural) {
            (true, true) => Err(ParseError::AmbiguousTypes {
                input: type_input.to_string(),
            }),
            (true, false) => {
                let mut types = vec![normalize_type(a); num_tunes - 1];
                types.push(normalize_type(b));
                Ok(types)
            }
            (false, true) => {
                let mut types = vec![normalize_type(b); num_tunes - 1];
                types.insert(0, normalize_type(a));
                Ok(types)
            }
            (false, false) => Err(ParseError::TypeCount {
                input: type_input.to_string(),
                num_tunes,
            }),
        };
    }

    Err(ParseError::TypeCount {
        input: type_input.to_string(),
        num_tunes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tune_plain() {
        let reference = parse_tune("Cooley's").unwrap();
        assert_eq!(reference.name, "Cooley's");
        assert_eq!(reference.key, None);
        assert_eq!(reference.tune_id, None);
    }

    #[test]
    fn test_parse_tune_with_hints() {
        let reference = parse_tune("Cooley's (Edor) [1]").unwrap();
        assert_eq!(reference.name, "Cooley's");
        assert_eq!(reference.key.as_deref(), Some("Edor"));
        assert_eq!(reference.tune_id, Some(1));

        let reference = parse_tune("The Wise Maid [118]").unwrap();
        assert_eq!(reference.name, "The Wise Maid");
        assert_eq!(reference.tune_id, Some(118));
    }

    #[test]
    fn test_parse_tune_bad_id_hint() {
        let err = parse_tune("Cooley's [first]").unwrap_err();
        assert_eq!(
            err,
            ParseError::TuneIdHint {
                hint: "first".to_string()
            }
        );
    }

    #[test]
    fn test_parse_set_assigns_types() {
        let set = parse_set("reels: Cooley's / The Wise Maid [118] / The Maid Behind The Bar")
            .unwrap();
        assert_eq!(set.label, "reels");
        assert_eq!(set.tunes.len(), 3);
        for tune in &set.tunes {
            assert_eq!(tune.tune_type.as_deref(), Some("reel"));
        }
        assert_eq!(set.tunes[1].tune_id, Some(118));
    }

    #[test]
    fn test_parse_set_missing_separator() {
        assert_eq!(
            parse_set("justatune").unwrap_err(),
            ParseError::MissingSeparator
        );
    }

    #[test]
    fn test_parse_set_type_per_tune() {
        let types = parse_set_type("slip jig, jig, reel", 3).unwrap();
        assert_eq!(types, vec!["slip jig", "jig", "reel"]);
    }

    #[test]
    fn test_parse_set_type_plural_run_first() {
        let types = parse_set_type("jigs, reel", 4).unwrap();
        assert_eq!(types, vec!["jig", "jig", "jig", "reel"]);
    }

    #[test]
    fn test_parse_set_type_plural_run_last() {
        let types = parse_set_type("hornpipe, reels", 3).unwrap();
        assert_eq!(types, vec!["hornpipe", "reel", "reel"]);
    }

    #[test]
    fn test_parse_set_type_two_for_two() {
        let types = parse_set_type("jig, reel", 2).unwrap();
        assert_eq!(types, vec!["jig", "reel"]);
    }

    #[test]
    fn test_parse_set_type_ambiguous() {
        let err = parse_set_type("jigs, reels", 3).unwrap_err();
        assert!(matches!(err, ParseError::AmbiguousTypes { .. }));
    }

    #[test]
    fn test_parse_set_type_count_mismatch() {
        let err = parse_set_type("jig, reel, polka", 5).unwrap_err();
        assert!(matches!(err, ParseError::TypeCount { .. }));

        let err = parse_set_type("jig, reel", 1).unwrap_err();
        assert!(matches!(err, ParseError::TypeCount { .. }));
    }

    #[test]
    fn test_parse_setlist_one_set_per_line() {
        let input = "reels: Cooley's / The Silver Spear\n\
                     \n\
                     jigs: The Kesh / Out On The Ocean\n";
        let parsed = parse_setlist(input);
        assert!(parsed.is_clean());
        assert_eq!(parsed.sets.len(), 2);
        assert_eq!(parsed.sets[0].tunes[0].name, "Cooley's");
        assert_eq!(parsed.sets[0].tunes[1].name, "The Silver Spear");
        assert_eq!(parsed.sets[1].label, "jigs");
    }

    #[test]
    fn test_parse_setlist_collects_line_errors() {
        let input = "reels: Cooley's\njustatune\njigs: The Kesh";
        let parsed = parse_setlist(input);
        assert_eq!(parsed.sets.len(), 2);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].line, 2);
        assert_eq!(parsed.errors[0].content, "justatune");
        assert_eq!(parsed.errors[0].error, ParseError::MissingSeparator);
    }
}
