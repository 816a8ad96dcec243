//! In-memory tune index built from The Session data dump.
//!
//! Matching works the way the website's own search does not: an exact
//! alias lookup on the normalized name, then narrowing by type, key, and
//! tune-id hint. Every tune's primary name is indexed as an alias of
//! itself.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use tunebook_core::abc::Incipit;
use tunebook_core::model::ResolvedTune;
use tunebook_core::normalize::{normalize_key, normalize_name, normalize_type};
use tunebook_core::TuneReference;

use crate::error::{ResolveError, ResolveResult};

/// The dump serializes ids sometimes as numbers, sometimes as strings.
pub(crate) fn de_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(u32),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// One setting row of the dump's `tunes.json`.
///
/// A tune has one row per setting (transcription variant); `tune_id`
/// repeats across them while `setting_id` is unique.
#[derive(Debug, Clone, Deserialize)]
pub struct TuneRecord {
    #[serde(deserialize_with = "de_u32")]
    pub tune_id: u32,

    #[serde(deserialize_with = "de_u32")]
    pub setting_id: u32,

    /// Primary name, in The Session's canonical form.
    pub name: String,

    #[serde(rename = "type")]
    pub tune_type: String,

    /// Full key/mode of this setting, e.g. "Edorian".
    #[serde(rename = "mode")]
    pub key: String,

    /// ABC transcription of this setting's melody.
    #[serde(default)]
    pub abc: String,
}

/// One row of the dump's `aliases.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasRecord {
    #[serde(deserialize_with = "de_u32")]
    pub tune_id: u32,

    pub alias: String,
}

/// A normalized tune lookup, also used as the resolver's cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TuneQuery {
    /// Name in The Session's canonical form.
    pub name: String,
    pub tune_type: Option<String>,
    pub key: Option<String>,
    pub tune_id: Option<u32>,
}

impl TuneQuery {
    /// Build a query from a parsed reference, normalizing name, key, and
    /// type into The Session's forms.
    #[must_use]
    pub fn from_reference(reference: &TuneReference) -> Self {
        Self {
            name: normalize_name(&reference.name),
            tune_type: reference.tune_type.as_deref().map(normalize_type),
            key: reference.key.as_deref().map(normalize_key),
            tune_id: reference.tune_id,
        }
    }
}

/// The loaded dump: all settings plus an alias table for name matching.
#[derive(Debug, Clone)]
pub struct TuneIndex {
    tunes: Vec<TuneRecord>,
    /// Indexes into `tunes`, keyed by tune id.
    by_tune_id: HashMap<u32, Vec<usize>>,
    /// Alias -> sorted, deduplicated tune ids.
    aliases: HashMap<String, Vec<u32>>,
}

impl TuneIndex {
    /// Build an index from dump records. Primary tune names are added to
    /// the alias table alongside the explicit aliases.
    #[must_use]
    pub fn new(tunes: Vec<TuneRecord>, aliases: Vec<AliasRecord>) -> Self {
        let mut by_tune_id: HashMap<u32, Vec<usize>> = HashMap::new();
        let mut alias_map: HashMap<String, Vec<u32>> = HashMap::new();

        for (i, record) in tunes.iter().enumerate() {
            by_tune_id.entry(record.tune_id).or_default().push(i);
            alias_map
                .entry(record.name.clone())
                .or_default()
                .push(record.tune_id);
        }
        for alias in aliases {
            alias_map.entry(alias.alias).or_default().push(alias.tune_id);
        }
        for ids in alias_map.values_mut() {
            ids.sort_unstable();
            ids.dedup();
        }

        log::info!(
            "tune index: {} settings, {} names/aliases",
            tunes.len(),
            alias_map.len()
        );

        Self {
            tunes,
            by_tune_id,
            aliases: alias_map,
        }
    }

    /// Parse `tunes.json` and `aliases.json` dump content.
    pub fn from_json(tunes_json: &str, aliases_json: &str) -> ResolveResult<Self> {
        let tunes: Vec<TuneRecord> = serde_json::from_str(tunes_json)?;
        let aliases: Vec<AliasRecord> = serde_json::from_str(aliases_json)?;
        Ok(Self::new(tunes, aliases))
    }

    /// Number of settings in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tunes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tunes.is_empty()
    }

    /// Match a query to exactly one tune and derive its incipit.
    ///
    /// The name must match an alias exactly; candidates are then narrowed
    /// by the query's type, key, and tune-id hint. Anything other than
    /// exactly one surviving tune id is an error: [`ResolveError::NotFound`]
    /// or [`ResolveError::NoMatch`] for zero (a tune-id hint matching no
    /// candidate is never silently ignored), [`ResolveError::Ambiguous`]
    /// with every candidate id for more than one. Of the matched tune's
    /// settings, the oldest (lowest setting id) provides the transcription.
    pub fn lookup(&self, query: &TuneQuery) -> ResolveResult<ResolvedTune> {
        let candidate_ids = self
            .aliases
            .get(&query.name)
            .ok_or_else(|| ResolveError::NotFound {
                name: query.name.clone(),
            })?;

        let mut settings: Vec<&TuneRecord> = candidate_ids
            .iter()
            .filter_map(|id| self.by_tune_id.get(id))
            .flatten()
            .map(|&i| &self.tunes[i])
            .collect();

        if let Some(tune_type) = &query.tune_type {
            settings.retain(|r| &r.tune_type == tune_type);
        }
        if let Some(key) = &query.key {
            settings.retain(|r| &r.key == key);
        }
        if let Some(tune_id) = query.tune_id {
            settings.retain(|r| r.tune_id == tune_id);
        }

        let mut matched_ids: Vec<u32> = settings.iter().map(|r| r.tune_id).collect();
        matched_ids.sort_unstable();
        matched_ids.dedup();

        if matched_ids.len() > 1 {
            return Err(ResolveError::Ambiguous {
                name: query.name.clone(),
                candidates: matched_ids,
            });
        }
        let Some(record) = settings.into_iter().min_by_key(|r| r.setting_id) else {
            return Err(ResolveError::NoMatch {
                name: query.name.clone(),
                tune_type: query.tune_type.clone(),
                key: query.key.clone(),
            });
        };

        let abc = record.abc.replace("\r\n", "");
        let incipit =
            Incipit::from_abc(&abc).ok_or_else(|| ResolveError::TranscriptionUnavailable {
                name: query.name.clone(),
            })?;

        Ok(ResolvedTune {
            name: record.name.clone(),
            tune_id: record.tune_id,
            setting_id: record.setting_id,
            tune_type: record.tune_type.clone(),
            key: record.key.chars().take(4).collect(),
            incipit,
            name_input: query.name.clone(),
        })
    }
}
