//! HTTP client for thesession.org and its data dump.
//!
//! Two surfaces: the bulk data dump (tunes and aliases as JSON, served
//! from the TheSession-data GitHub mirror) used to build the
//! [`TuneIndex`], and the members API used to fetch a member's saved
//! sets. Member-set settings already carry everything a [`ResolvedTune`]
//! needs, so they bypass matching entirely; a setting that cannot be
//! used still only fails its own [`TuneEntry`], never the whole set.
//!
//! [`TuneIndex`]: crate::index::TuneIndex

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use reqwest::Client;
use serde::Deserialize;

use tunebook_core::abc::Incipit;
use tunebook_core::model::{ResolvedTune, TuneReference};

use crate::error::{ResolveError, ResolveResult};
use crate::index::de_u32;
use crate::resilience::RateLimiter;
use crate::resolver::TuneEntry;

const DUMP_BASE: &str = "https://raw.githubusercontent.com/adactio/TheSession-data/main/json";
const API_BASE: &str = "https://thesession.org";

const USER_AGENT: &str = "tunebook/0.1.0 (https://github.com/tradtools/tunebook)";

#[derive(Debug, Deserialize)]
struct MemberSetsResponse {
    sets: Vec<MemberSetStub>,
}

#[derive(Debug, Deserialize)]
struct MemberSetStub {
    #[serde(deserialize_with = "de_u32")]
    id: u32,
}

#[derive(Debug, Deserialize)]
struct MemberSetResponse {
    #[serde(default)]
    settings: Vec<SettingRecord>,
}

/// One setting in a member-set API response.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingRecord {
    #[serde(deserialize_with = "de_u32")]
    pub id: u32,

    /// Tune page URL ending in the tune id, e.g.
    /// `https://thesession.org/tunes/1`.
    pub url: String,

    pub name: String,

    #[serde(rename = "type")]
    pub tune_type: String,

    pub key: String,

    /// ABC with `! ` line-break markers.
    #[serde(default)]
    pub abc: String,
}

impl SettingRecord {
    fn tune_id(&self) -> ResolveResult<u32> {
        self.url
            .rsplit('/')
            .next()
            .and_then(|last| last.split('#').next())
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| ResolveError::Parse {
                context: format!("member set setting {}", self.id),
                message: format!("no tune id in url {:?}", self.url),
            })
    }

    /// Convert to a per-tune outcome, keeping a broken setting (no
    /// transcription, unparseable tune URL) attached to its own entry
    /// instead of failing the set.
    fn into_entry(self) -> TuneEntry {
        let reference = TuneReference::new(self.name.clone());
        let outcome = self.into_resolved();
        if let Err(e) = &outcome {
            log::warn!("could not use setting {:?}: {e}", reference.name);
        }
        TuneEntry { reference, outcome }
    }

    fn into_resolved(self) -> ResolveResult<ResolvedTune> {
        let tune_id = self.tune_id()?;
        let abc = self.abc.replace("! ", "");
        let incipit =
            Incipit::from_abc(&abc).ok_or_else(|| ResolveError::TranscriptionUnavailable {
                name: self.name.clone(),
            })?;

        Ok(ResolvedTune {
            name: self.name.clone(),
            tune_id,
            setting_id: self.id,
            tune_type: self.tune_type,
            key: self.key.chars().take(4).collect(),
            incipit,
            name_input: self.name,
        })
    }
}

/// Whether a failed download is worth retrying: timeouts, connection
/// failures, and server-side (5xx) responses. Client errors (4xx) never
/// are.
fn transient_http(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || transient_status(err.status())
}

fn transient_status(status: Option<reqwest::StatusCode>) -> bool {
    status.is_some_and(|s| s.is_server_error())
}

/// Client for thesession.org.
///
/// Wraps an HTTP client and a rate limiter (1 req/sec, out of courtesy
/// to a community-run service). Dump downloads are retried with
/// exponential backoff since the files are large and occasionally time
/// out.
#[derive(Debug, Clone)]
pub struct SessionClient {
    http: Client,
    rate_limiter: RateLimiter,
}

impl SessionClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            rate_limiter: RateLimiter::new(1),
        })
    }

    /// Download one dump file (`"tunes"` or `"aliases"`) and return the
    /// raw JSON text.
    pub async fn fetch_dump(&self, name: &str) -> ResolveResult<String> {
        let url = format!("{DUMP_BASE}/{name}.json");
        log::info!("downloading {url}");

        let body = (|| async {
            let response = self.http.get(&url).send().await?.error_for_status()?;
            response.text().await
        })
        .retry(ExponentialBuilder::default().with_max_times(3))
        .when(transient_http)
        .notify(|err, dur| log::warn!("retrying {name} dump download in {dur:?}: {err}"))
        .await?;

        Ok(body)
    }

    /// Fetch one of a member's saved sets.
    ///
    /// Settings that cannot be used (no transcription, unparseable tune
    /// URL) stay in the result as failed entries; only the fetch itself
    /// can error.
    pub async fn member_set(&self, member_id: u64, set_id: u32) -> ResolveResult<Vec<TuneEntry>> {
        let url = format!("{API_BASE}/members/{member_id}/sets/{set_id}?format=json");
        log::debug!("fetching member set {url}");

        self.rate_limiter.acquire().await;
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let data: MemberSetResponse = response.json().await?;

        Ok(data
            .settings
            .into_iter()
            .map(SettingRecord::into_entry)
            .collect())
    }

    /// Fetch all of a member's saved sets, in site order.
    pub async fn member_sets(&self, member_id: u64) -> ResolveResult<Vec<Vec<TuneEntry>>> {
        let url = format!("{API_BASE}/members/{member_id}/sets?format=json");
        log::debug!("fetching member sets {url}");

        self.rate_limiter.acquire().await;
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let data: MemberSetsResponse = response.json().await?;

        let mut sets = Vec::with_capacity(data.sets.len());
        for stub in data.sets {
            sets.push(self.member_set(member_id, stub.id).await?);
        }

        Ok(sets)
    }
}
