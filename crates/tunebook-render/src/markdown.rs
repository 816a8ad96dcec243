//! Markdown setlist rendering.
//!
//! Compact text output: one heading per set, one numbered line per tune
//! with its key, first-part incipit, and a link to the tune page.

use tunebook_core::LineError;
use tunebook_resolve::SetReport;

use crate::set_heading;

fn set_to_markdown(report: &SetReport) -> String {
    let mut s = format!("\n#### {}\n\n", set_heading(report));

    for (i, entry) in report.entries.iter().enumerate() {
        match &entry.outcome {
            Ok(tune) => {
                s.push_str(&format!(
                    "{}. `{}` `{}` [link]({})\n",
                    i + 1,
                    tune.key,
                    tune.incipit.first(),
                    tune.url()
                ));
            }
            Err(e) => {
                s.push_str(&format!("{}. {} (unresolved: {e})\n", i + 1, entry.reference));
            }
        }
    }

    s
}

/// Render the whole setlist as a Markdown document.
///
/// Input lines that could not be parsed are listed at the end under
/// their own heading so they are visible in the output, not just in
/// the logs.
#[must_use]
pub fn setlist_to_markdown(reports: &[SetReport], errors: &[LineError]) -> String {
    let mut s = "# Set list\n".to_string();
    for report in reports {
        s.push_str(&set_to_markdown(report));
    }
    if !errors.is_empty() {
        s.push_str("\n#### Unparsed lines\n\n");
        for error in errors {
            s.push_str(&format!("- {error}\n"));
        }
    }
    s
}
