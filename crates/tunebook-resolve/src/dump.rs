//! Local cache of The Session data dump.
//!
//! The dump files are large (tens of MB of JSON), so they are stored
//! gzipped in the data directory and only downloaded when missing or on
//! an explicit refresh. With `offline` set, a missing cache is fatal
//! rather than a download trigger.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::config::Config;
use crate::error::{ResolveError, ResolveResult};
use crate::index::TuneIndex;
use crate::session::SessionClient;

const DUMP_FILES: [&str; 2] = ["tunes", "aliases"];

/// Path of one cached dump file, e.g. `<data_dir>/tunes.json.gz`.
#[must_use]
pub fn cached_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{name}.json.gz"))
}

fn read_cached(path: &Path) -> ResolveResult<String> {
    let mut decoder = GzDecoder::new(File::open(path)?);
    let mut json = String::new();
    decoder.read_to_string(&mut json)?;
    Ok(json)
}

fn write_cached(path: &Path, json: &str) -> ResolveResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut encoder = GzEncoder::new(File::create(path)?, Compression::default());
    encoder.write_all(json.as_bytes())?;
    encoder.finish()?;
    Ok(())
}

/// Load one dump file, preferring the local cache and falling back to a
/// download (which is then cached).
async fn load_file(config: &Config, client: &SessionClient, name: &str) -> ResolveResult<String> {
    let path = cached_path(&config.data_dir, name);

    if path.exists() {
        log::debug!("using cached {}", path.display());
        return read_cached(&path);
    }
    if config.offline {
        return Err(ResolveError::SourceUnavailable {
            reason: format!("offline and no cached dump at {}", path.display()),
        });
    }

    let json = client.fetch_dump(name).await?;
    write_cached(&path, &json)?;
    log::info!("cached {}", path.display());
    Ok(json)
}

/// Load the tune index from the cached dump, downloading any missing
/// file first.
///
/// # Errors
/// Returns [`ResolveError::SourceUnavailable`] when the data can be
/// neither read locally nor downloaded; this is the one fatal error of a
/// run.
pub async fn load_index(config: &Config) -> ResolveResult<TuneIndex> {
    let client = SessionClient::new().map_err(|e| ResolveError::SourceUnavailable {
        reason: e.to_string(),
    })?;

    let tunes_json = load_file(config, &client, DUMP_FILES[0]).await?;
    let aliases_json = load_file(config, &client, DUMP_FILES[1]).await?;

    TuneIndex::from_json(&tunes_json, &aliases_json)
}

/// Re-download both dump files, replacing any cached copies.
pub async fn refresh(config: &Config) -> ResolveResult<()> {
    let client = SessionClient::new()?;

    for name in DUMP_FILES {
        let json = client.fetch_dump(name).await?;
        let path = cached_path(&config.data_dir, name);
        write_cached(&path, &json)?;
        log::info!("refreshed {}", path.display());
    }

    Ok(())
}
