//! Integration tests for the parse -> resolve -> render pipeline.
//!
//! These tests run against a fixture tune index built in memory, so no
//! network access or dump download is needed.

use tunebook_core::parse_setlist;
use tunebook_render::{setlist_to_html, setlist_to_markdown};
use tunebook_resolve::index::{AliasRecord, TuneRecord};
use tunebook_resolve::{Resolver, TuneIndex};

const COOLEYS_ABC: &str = "|:D2|EB{c}BA B2 EB|~B2 AB dBAG|FDAD BDAD|FDAD dAFD|\
EBBA B2 EB|B2 AB defg|afe^c dBAF|DEFD E2:|\
|:gf|eB B2 efge|eB B2 gedB|A2 FA DAFA|A2 FA defg|\
eB B2 eBgB|eB B2 defg|afe^c dBAF|DEFD E2:|";

fn record(tune_id: u32, setting_id: u32, name: &str, tune_type: &str, key: &str) -> TuneRecord {
    TuneRecord {
        tune_id,
        setting_id,
        name: name.to_string(),
        tune_type: tune_type.to_string(),
        key: key.to_string(),
        abc: COOLEYS_ABC.to_string(),
    }
}

fn fixture_index() -> TuneIndex {
    TuneIndex::new(
        vec![
            record(1, 1, "Cooley's", "reel", "Edorian"),
            record(118, 110, "Wise Maid, The", "reel", "Dmajor"),
            // A second, distinct tune sharing the name.
            record(9999, 9000, "Wise Maid, The", "reel", "Dmajor"),
            record(27, 27, "Maid Behind The Bar, The", "reel", "Dmajor"),
        ],
        vec![AliasRecord {
            tune_id: 1,
            alias: "Cooley's Reel".to_string(),
        }],
    )
}

/// A single one-tune set resolves to a non-empty incipit.
#[test]
fn test_single_tune_set() {
    let parsed = parse_setlist("reel: Cooley's");
    assert!(parsed.is_clean());
    assert_eq!(parsed.sets.len(), 1);

    let mut resolver = Resolver::new(fixture_index());
    let reports = resolver.resolve_setlist(&parsed.sets);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].unresolved(), 0);

    let tune = reports[0].entries[0].outcome.as_ref().unwrap();
    assert_eq!(tune.tune_id, 1);
    assert!(!tune.incipit.first().is_empty());
}

/// A three-tune set where one name needs its id hint to pick among two
/// same-named tunes.
#[test]
fn test_hint_disambiguates_in_set() {
    let parsed =
        parse_setlist("reels: Cooley's / The Wise Maid [118] / The Maid Behind The Bar");
    assert!(parsed.is_clean());

    let mut resolver = Resolver::new(fixture_index());
    let report = &resolver.resolve_setlist(&parsed.sets)[0];
    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.unresolved(), 0);
    assert_eq!(report.entries[1].outcome.as_ref().unwrap().tune_id, 118);
}

/// Without the hint the same set reports the ambiguity but still
/// resolves its other tunes.
#[test]
fn test_ambiguity_is_localized() {
    let parsed = parse_setlist("reels: Cooley's / The Wise Maid / The Maid Behind The Bar");

    let mut resolver = Resolver::new(fixture_index());
    let report = &resolver.resolve_setlist(&parsed.sets)[0];
    assert_eq!(report.unresolved(), 1);
    assert!(report.entries[0].outcome.is_ok());
    assert!(report.entries[2].outcome.is_ok());

    let err = report.entries[1].outcome.as_ref().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("118"));
    assert!(message.contains("9999"));
}

/// A malformed line is reported while the valid line still renders, and
/// the bad line shows up in both output formats.
#[test]
fn test_malformed_line_does_not_abort() {
    let parsed = parse_setlist("justatune\nreel: Cooley's");
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].line, 1);
    assert_eq!(parsed.sets.len(), 1);

    let mut resolver = Resolver::new(fixture_index());
    let reports = resolver.resolve_setlist(&parsed.sets);

    let md = setlist_to_markdown(&reports, &parsed.errors);
    assert!(md.contains("#### reel: Cooley's"));
    assert!(md.contains("[link](https://thesession.org/tunes/1#setting1)"));
    assert!(md.contains("#### Unparsed lines"));
    assert!(md.contains("justatune"));

    let html = setlist_to_html(&reports, &parsed.errors, false, false);
    assert!(html.contains("<h2>Unparsed lines</h2>"));
    assert!(html.contains("justatune"));
}

#[test]
fn test_markdown_and_html_agree_on_content() {
    let parsed = parse_setlist("reels: Cooley's / The Wise Maid [118]");
    let mut resolver = Resolver::new(fixture_index());
    let reports = resolver.resolve_setlist(&parsed.sets);

    let md = setlist_to_markdown(&reports, &parsed.errors);
    let html = setlist_to_html(&reports, &parsed.errors, true, true);

    for url in [
        "https://thesession.org/tunes/1#setting1",
        "https://thesession.org/tunes/118#setting110",
    ] {
        assert!(md.contains(url));
        assert!(html.contains(url));
    }
    assert!(html.contains("ABCJS.renderAbc"));
}
