//! Setlist resolution.
//!
//! Walks parsed [`TuneSet`]s, matching each reference against the
//! [`TuneIndex`]. Failures stay attached to the tune they belong to:
//! a set with one unmatched tune still resolves the other tunes, and
//! the report carries the error alongside them.

use std::collections::HashMap;

use tunebook_core::model::{ResolvedTune, TuneReference, TuneSet};

use crate::error::ResolveError;
use crate::index::{TuneIndex, TuneQuery};

/// One tune's place in a report: the reference as entered, plus either
/// the resolved tune or the error that kept it unresolved.
#[derive(Debug)]
pub struct TuneEntry {
    pub reference: TuneReference,
    pub outcome: Result<ResolvedTune, ResolveError>,
}

/// A resolved set: the set's label and one entry per tune, in playing
/// order.
#[derive(Debug)]
pub struct SetReport {
    pub label: String,
    pub entries: Vec<TuneEntry>,
}

impl SetReport {
    /// Number of tunes that failed to resolve.
    #[must_use]
    pub fn unresolved(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_err()).count()
    }
}

/// Resolves tune references against a loaded [`TuneIndex`], memoizing
/// successful matches so repeated tunes within a run are matched once.
#[derive(Debug)]
pub struct Resolver {
    index: TuneIndex,
    cache: HashMap<TuneQuery, ResolvedTune>,
}

impl Resolver {
    #[must_use]
    pub fn new(index: TuneIndex) -> Self {
        Self {
            index,
            cache: HashMap::new(),
        }
    }

    /// Resolve a single reference.
    ///
    /// # Errors
    /// Any [`ResolveError`] from the match; callers deciding to continue
    /// or abort is exactly what [`Resolver::resolve_set`] is for.
    pub fn resolve(&mut self, reference: &TuneReference) -> Result<ResolvedTune, ResolveError> {
        let query = TuneQuery::from_reference(reference);

        let mut tune = match self.cache.get(&query) {
            Some(tune) => tune.clone(),
            None => {
                let tune = self.index.lookup(&query)?;
                self.cache.insert(query, tune.clone());
                tune
            }
        };
        tune.name_input = reference.name.clone();
        Ok(tune)
    }

    /// Resolve every tune of a set, collecting per-tune outcomes.
    pub fn resolve_set(&mut self, set: &TuneSet) -> SetReport {
        let entries = set
            .tunes
            .iter()
            .map(|reference| {
                let outcome = self.resolve(reference);
                if let Err(e) = &outcome {
                    log::warn!("could not resolve {:?}: {e}", reference.name);
                }
                TuneEntry {
                    reference: reference.clone(),
                    outcome,
                }
            })
            .collect();

        SetReport {
            label: set.label.clone(),
            entries,
        }
    }

    /// Resolve a whole setlist, one report per set.
    pub fn resolve_setlist(&mut self, sets: &[TuneSet]) -> Vec<SetReport> {
        let reports: Vec<SetReport> = sets.iter().map(|set| self.resolve_set(set)).collect();

        let unresolved: usize = reports.iter().map(SetReport::unresolved).sum();
        let total: usize = reports.iter().map(|r| r.entries.len()).sum();
        log::info!("resolved {}/{total} tunes", total - unresolved);

        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::TuneRecord;
    use tunebook_core::parse_set;

    fn fixture_resolver() -> Resolver {
        let record = |tune_id, setting_id, name: &str, tune_type: &str, key: &str| TuneRecord {
            tune_id,
            setting_id,
            name: name.to_string(),
            tune_type: tune_type.to_string(),
            key: key.to_string(),
            abc: "|:EBBA B2 EB|B2 AB dBAG|FDAD BDAD|FDAD dAFD|EBBA B2 EB|".to_string(),
        };
        Resolver::new(TuneIndex::new(
            vec![
                record(1, 1, "Cooley's", "reel", "Edorian"),
                record(118, 110, "Wise Maid, The", "reel", "Dmajor"),
                record(2961, 2961, "Silver Spear, The", "reel", "Dmajor"),
            ],
            vec![],
        ))
    }

    #[test]
    fn test_resolve_keeps_input_name() {
        let mut resolver = fixture_resolver();
        let reference = TuneReference::new("the wise maid");
        let tune = resolver.resolve(&reference).unwrap();
        assert_eq!(tune.name, "Wise Maid, The");
        assert_eq!(tune.name_input, "the wise maid");
    }

    #[test]
    fn test_resolve_set_localizes_failures() {
        let mut resolver = fixture_resolver();
        let set = parse_set("reels: Cooley's / No Such Tune / The Silver Spear").unwrap();

        let report = resolver.resolve_set(&set);
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.unresolved(), 1);
        assert!(report.entries[0].outcome.is_ok());
        assert!(report.entries[1].outcome.is_err());
        assert!(report.entries[2].outcome.is_ok());
    }

    #[test]
    fn test_resolve_memoizes_repeats() {
        let mut resolver = fixture_resolver();
        let reference = TuneReference::new("Cooley's");

        let first = resolver.resolve(&reference).unwrap();
        assert_eq!(resolver.cache.len(), 1);
        let second = resolver.resolve(&reference).unwrap();
        assert_eq!(resolver.cache.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_setlist_order_preserved() {
        let mut resolver = fixture_resolver();
        let sets = vec![
            parse_set("reels: The Silver Spear / Cooley's").unwrap(),
            parse_set("reel: The Wise Maid").unwrap(),
        ];

        let reports = resolver.resolve_setlist(&sets);
        assert_eq!(reports.len(), 2);
        assert_eq!(
            reports[0].entries[0].reference.name,
            "The Silver Spear"
        );
        assert_eq!(reports[0].entries[1].reference.name, "Cooley's");
    }
}
