use anyhow::{Context, Result};

use tunebook_core::TuneReference;
use tunebook_resolve::{dump, Config, Resolver};

/// Resolve one tune and print its metadata and incipit.
pub async fn run_lookup(
    config: &Config,
    name: &str,
    tune_type: Option<String>,
    key: Option<String>,
    id: Option<u32>,
) -> Result<()> {
    let mut reference = TuneReference::new(name);
    reference.tune_type = tune_type;
    reference.key = key;
    reference.tune_id = id;

    let index = dump::load_index(config)
        .await
        .context("Failed to load tune data")?;
    let tune = Resolver::new(index).resolve(&reference)?;

    println!("{} ({} {})", tune.name, tune.key, tune.tune_type);
    println!("  {}", tune.url());
    for (label, part) in ('A'..='Z').zip(tune.incipit.parts()) {
        println!("  {label}: {part}");
    }

    Ok(())
}
