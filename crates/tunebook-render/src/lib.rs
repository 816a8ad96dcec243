//! Setlist rendering for tunebook.
//!
//! Turns [`SetReport`]s into a Markdown document or an HTML page whose
//! incipits are drawn as staff notation in the browser by the abcjs
//! library. Unresolved tunes render as annotated entries, never dropped.
//!
//! [`SetReport`]: tunebook_resolve::SetReport

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod html;
pub mod markdown;

pub use html::setlist_to_html;
pub use markdown::setlist_to_markdown;

use tunebook_resolve::SetReport;

/// The set heading: its label, then the tune names as entered, joined
/// with ` / ` and without the `(key)`/`[id]` suffixes.
#[must_use]
pub fn set_heading(report: &SetReport) -> String {
    let names = report
        .entries
        .iter()
        .map(|e| e.reference.name.as_str())
        .collect::<Vec<_>>()
        .join(" / ");

    // Collapse stray whitespace from the input.
    format!("{}: {}", report.label, names)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
