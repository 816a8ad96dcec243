use std::path::Path;

use anyhow::{Context, Result};

use tunebook_render::{setlist_to_html, setlist_to_markdown};
use tunebook_resolve::{SessionClient, SetReport, TuneEntry};

use crate::commands::write_output;

/// Fetch a member's saved sets from thesession.org and render them.
///
/// API settings already carry their transcription, so there is no
/// matching step; the sets render exactly as saved on the site. A
/// setting the API returns without a usable transcription shows up as
/// an unresolved entry, not as a missing tune.
pub async fn run_sets(
    member_id: u64,
    set_id: Option<u32>,
    html: bool,
    out: Option<&Path>,
) -> Result<()> {
    let client = SessionClient::new().context("Failed to create HTTP client")?;

    let sets = match set_id {
        Some(set_id) => vec![client.member_set(member_id, set_id).await?],
        None => client.member_sets(member_id).await?,
    };
    log::info!("fetched {} sets for member {member_id}", sets.len());

    let reports: Vec<SetReport> = sets.into_iter().map(to_report).collect();

    let output = if html {
        setlist_to_html(&reports, &[], true, true)
    } else {
        setlist_to_markdown(&reports, &[])
    };

    write_output(&output, out)
}

fn to_report(entries: Vec<TuneEntry>) -> SetReport {
    let mut types: Vec<&str> = entries
        .iter()
        .filter_map(|entry| entry.outcome.as_ref().ok())
        .map(|tune| tune.tune_type.as_str())
        .collect();
    types.dedup();

    let label = if types.is_empty() {
        "tunes".to_string()
    } else if types.len() == 1 {
        format!("{}s", types[0])
    } else {
        types.join(", ")
    };

    SetReport { label, entries }
}
