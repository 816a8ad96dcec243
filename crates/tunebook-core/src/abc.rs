//! ABC incipit extraction.
//!
//! Derives a short, multi-part melodic fragment from a full ABC
//! transcription: the opening measures of the tune plus the opening
//! measures of each later part (found at `|:` / `||` boundaries).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Measures taken for the first part of a tune.
const FIRST_PART_MEASURES: usize = 5;

/// Measures taken for each later part (the leading `|:` or `||` counts as
/// a bar line, so one extra measure keeps the fragments comparable).
const LATER_PART_MEASURES: usize = 7;

/// Part boundaries look like `|:` or `||`.
#[allow(clippy::expect_used)]
static PART_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|[:|]").expect("part boundary pattern is valid"));

/// Ignore boundary candidates this close to the start of the tune.
const PART_SEARCH_OFFSET: usize = 10;

/// Ignore boundary candidates this close to the end (end-of-tune `||`).
const PART_MIN_TAIL: usize = 10;

/// The prefix of `abc` through its `n`-th bar line, or all of it if the
/// transcription has fewer bars.
#[must_use]
pub fn take_measures(abc: &str, n: usize) -> &str {
    let mut count = 0;
    for (i, c) in abc.char_indices() {
        if c == '|' {
            count += 1;
            if count == n {
                return &abc[..=i];
            }
        }
    }
    abc
}

/// Byte offsets in `abc` where a later part of the tune starts.
///
/// Candidates preceded by another bar line within three bytes are
/// rejected (`|:` directly after `||` marks the same boundary), as are
/// candidates within [`PART_MIN_TAIL`] bytes of the end.
#[must_use]
pub fn part_starts(abc: &str) -> Vec<usize> {
    let Some(tail) = abc.get(PART_SEARCH_OFFSET..) else {
        return Vec::new();
    };

    let mut starts = Vec::new();
    for m in PART_BOUNDARY.find_iter(tail) {
        let i = m.start() + PART_SEARCH_OFFSET;
        if abc.as_bytes()[i.saturating_sub(3)..i].contains(&b'|') {
            continue;
        }
        if abc.len() - i < PART_MIN_TAIL {
            continue;
        }
        starts.push(i);
    }
    log::debug!("part start candidates: {starts:?}");
    starts
}

/// The opening measures of each part of a tune, in playing order.
///
/// Derived from an ABC transcription and used only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incipit {
    parts: Vec<String>,
}

impl Incipit {
    /// Build an incipit from already-extracted part fragments.
    ///
    /// Mainly useful in tests; [`Incipit::from_abc`] is the usual entry
    /// point.
    #[must_use]
    pub fn new(parts: Vec<String>) -> Self {
        Self { parts }
    }

    /// Extract an incipit from a full ABC transcription.
    ///
    /// Returns `None` when the transcription is empty, so callers can
    /// report the missing notation instead of showing a blank fragment.
    /// The `abc` must already have line breaks stripped.
    #[must_use]
    pub fn from_abc(abc: &str) -> Option<Self> {
        if abc.trim().is_empty() {
            return None;
        }

        let mut parts = vec![take_measures(abc, FIRST_PART_MEASURES).to_string()];
        for i in part_starts(abc) {
            parts.push(take_measures(&abc[i..], LATER_PART_MEASURES).to_string());
        }
        Some(Self { parts })
    }

    /// The opening measures of the first part, or `""` if the incipit
    /// has no parts.
    #[must_use]
    pub fn first(&self) -> &str {
        self.parts.first().map_or("", String::as_str)
    }

    /// All part fragments, first part first.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Render the incipit as an ABC tune body with a `K:` key field and
    /// one `P:` section per part, ready for notation rendering.
    #[must_use]
    pub fn to_abc(&self, key: &str) -> String {
        let sections: Vec<String> = ('A'..='Z')
            .zip(&self.parts)
            .map(|(label, part)| format!("P: {label}\n{part}"))
            .collect();
        format!("K: {key}\n{}", sections.join("\n"))
    }
}

impl fmt::Display for Incipit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Opening of Cooley's (setting 1), line breaks stripped.
    const COOLEYS: &str = "|:D2|EB{c}BA B2 EB|~B2 AB dBAG|FDAD BDAD|FDAD dAFD|\
EBBA B2 EB|B2 AB defg|afe^c dBAF|DEFD E2:|\
|:gf|eB B2 efge|eB B2 gedB|A2 FA DAFA|A2 FA defg|\
eB B2 eBgB|eB B2 defg|afe^c dBAF|DEFD E2:|";

    #[test]
    fn test_take_measures_counts_bars() {
        let abc = "ab|cd|ef|gh|ij|kl|";
        assert_eq!(take_measures(abc, 2), "ab|cd|");
        assert_eq!(take_measures(abc, 5), "ab|cd|ef|gh|ij|");
    }

    #[test]
    fn test_take_measures_short_tune() {
        let abc = "ab|cd|";
        assert_eq!(take_measures(abc, 5), "ab|cd|");
    }

    #[test]
    fn test_part_starts_finds_second_part() {
        let starts = part_starts(COOLEYS);
        // One later part, at the second |: (the first is within the
        // leading offset).
        assert_eq!(starts.len(), 1);
        assert!(COOLEYS[starts[0]..].starts_with("||:gf"));
    }

    #[test]
    fn test_part_starts_rejects_adjacent_boundaries() {
        // ||: marks one boundary, not two.
        let abc = "abcdefghijkl||:mnopqrstuvwxyz|abc|def|";
        let starts = part_starts(abc);
        assert_eq!(starts.len(), 1);
    }

    #[test]
    fn test_incipit_from_abc_parts() {
        let incipit = Incipit::from_abc(COOLEYS).unwrap();
        assert_eq!(incipit.parts().len(), 2);
        assert_eq!(
            incipit.first(),
            "|:D2|EB{c}BA B2 EB|~B2 AB dBAG|FDAD BDAD|"
        );
        assert!(incipit.parts()[1].starts_with("||:gf|"));
    }

    #[test]
    fn test_incipit_from_empty_abc() {
        assert!(Incipit::from_abc("").is_none());
        assert!(Incipit::from_abc("   ").is_none());
    }

    #[test]
    fn test_incipit_to_abc_labels_parts() {
        let incipit = Incipit::new(vec!["ab|cd|".to_string(), "ef|gh|".to_string()]);
        assert_eq!(incipit.to_abc("Edor"), "K: Edor\nP: A\nab|cd|\nP: B\nef|gh|");
    }

    #[test]
    fn test_incipit_without_parts_renders_empty() {
        let incipit = Incipit::new(vec![]);
        assert_eq!(incipit.first(), "");
        assert!(incipit.parts().is_empty());
    }
}
