use anyhow::{Context, Result};

use tunebook_resolve::{dump, Config};

/// Download (or re-download) the Session data dump into the local cache.
pub async fn run_fetch(config: &Config) -> Result<()> {
    dump::refresh(config)
        .await
        .context("Failed to refresh tune data")?;

    println!("Tune data cached in {}", config.data_dir.display());
    Ok(())
}
