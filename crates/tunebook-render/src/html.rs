//! HTML setlist rendering.
//!
//! Each tune's incipit is embedded as ABC text inside a `music-*` div; a
//! trailing script asks abcjs (loaded from a CDN) to draw every div as
//! staff notation. The structure mirrors the Markdown renderer: one
//! heading per set, an ordered list of tunes.

use tunebook_core::model::ResolvedTune;
use tunebook_core::LineError;
use tunebook_resolve::{SetReport, TuneEntry};

use crate::set_heading;

pub const HEAD_SNIPPET: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Setlist</title>
  <script src="https://cdn.jsdelivr.net/npm/abcjs@6.4.4/dist/abcjs-basic-min.js"></script>
</head>
"#;

pub const RENDER_SNIPPET: &str = r#"<script>
// Find all divs with ID music-* and render them
document.querySelectorAll('div[id^="music-"]').forEach(function (div) {
  var abc = div.querySelector('pre').textContent;
  ABCJS.renderAbc(
    div,
    abc,
    {
      scale: 0.6,
      staffwidth: 350,
    },
  );
});
</script>
"#;

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// One tune as a link plus its incipit in a renderable `music-*` div.
#[must_use]
pub fn tune_to_html(tune: &ResolvedTune, div_id: Option<&str>) -> String {
    let div_id = match div_id {
        Some(id) => id.to_string(),
        None => format!("music-{}", tune.tune_id),
    };
    let abc = tune.incipit.to_abc(&tune.key);

    format!(
        "<a href=\"{}\">link</a><div id=\"{div_id}\"><pre>{}</pre></div>",
        tune.url(),
        escape_text(&abc)
    )
}

fn entry_to_html(entry: &TuneEntry) -> String {
    match &entry.outcome {
        Ok(tune) => format!("  <li>{}</li>", tune_to_html(tune, None)),
        Err(e) => format!(
            "  <li class=\"unresolved\">{} (unresolved: {})</li>",
            escape_text(&entry.reference.to_string()),
            escape_text(&e.to_string())
        ),
    }
}

/// One set as a heading plus an ordered list of tunes.
#[must_use]
pub fn set_to_html(report: &SetReport) -> String {
    let heading = set_heading(report).replace('\u{2019}', "&rsquo;");

    let mut s = format!("<h2>{heading}</h2>\n<ol>\n");
    s.push_str(
        &report
            .entries
            .iter()
            .map(entry_to_html)
            .collect::<Vec<_>>()
            .join("\n"),
    );
    s.push_str("\n</ol>");
    s
}

/// Render the whole setlist as HTML.
///
/// With `fullpage` the output is a complete document including the abcjs
/// `<head>`; with `render` the notation-drawing script is appended. Both
/// off yields an embeddable fragment. Input lines that failed to parse
/// are listed at the end of the body.
#[must_use]
pub fn setlist_to_html(
    reports: &[SetReport],
    errors: &[LineError],
    render: bool,
    fullpage: bool,
) -> String {
    let mut s = String::new();
    if fullpage {
        s.push_str(HEAD_SNIPPET);
        s.push_str("<body>\n");
    }

    s.push_str(
        &reports
            .iter()
            .map(set_to_html)
            .collect::<Vec<_>>()
            .join("\n"),
    );

    if !errors.is_empty() {
        s.push_str("\n<h2>Unparsed lines</h2>\n<ul>\n");
        for error in errors {
            s.push_str(&format!("  <li>{}</li>\n", escape_text(&error.to_string())));
        }
        s.push_str("</ul>");
    }

    if render {
        s.push('\n');
        s.push_str(RENDER_SNIPPET);
    }
    if fullpage {
        s.push_str("</body>\n</html>");
    }

    s
}
