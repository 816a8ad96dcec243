use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use tunebook_core::parse_setlist;
use tunebook_render::{setlist_to_html, setlist_to_markdown};
use tunebook_resolve::{dump, Config, Resolver};

use crate::commands::write_output;

/// Parse a set-list file, resolve every tune, and write the formatted
/// setlist. Parse and resolution errors are annotated, not fatal; only
/// an unreachable data source aborts the run.
pub async fn run_render(
    config: &Config,
    input: &Path,
    html: bool,
    out: Option<&Path>,
) -> Result<()> {
    let text = read_input(input)?;

    let parsed = parse_setlist(&text);
    for error in &parsed.errors {
        log::warn!("{error}");
    }
    if parsed.sets.is_empty() {
        anyhow::bail!("no sets parsed from {}", input.display());
    }

    let index = dump::load_index(config)
        .await
        .context("Failed to load tune data")?;
    let mut resolver = Resolver::new(index);
    let reports = resolver.resolve_setlist(&parsed.sets);

    let output = if html {
        setlist_to_html(&reports, &parsed.errors, true, true)
    } else {
        setlist_to_markdown(&reports, &parsed.errors)
    };

    write_output(&output, out)
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))
    }
}
