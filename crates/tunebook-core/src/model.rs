use std::fmt;

use serde::{Deserialize, Serialize};

use crate::abc::Incipit;

/// A reference to a tune as written in a set line.
///
/// Holds the raw name plus the optional `(key)` and `[id]` hints and the
/// tune type assigned from the set's type field. Immutable once parsed;
/// normalization happens at resolution time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneReference {
    /// Tune name as entered, e.g. "The Wise Maid".
    pub name: String,

    /// Key/mode hint, e.g. "D", "Am", "Edor".
    pub key: Option<String>,

    /// Tune ID on The Session, used to disambiguate same-named tunes.
    pub tune_id: Option<u32>,

    /// Tune type, e.g. "reel", distributed from the set's type field.
    pub tune_type: Option<String>,
}

impl TuneReference {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
            tune_id: None,
            tune_type: None,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_tune_id(mut self, tune_id: u32) -> Self {
        self.tune_id = Some(tune_id);
        self
    }

    #[must_use]
    pub fn with_tune_type(mut self, tune_type: impl Into<String>) -> Self {
        self.tune_type = Some(tune_type.into());
        self
    }
}

/// Formats the reference back into set-line syntax, reproducing the
/// `(key)` and `[id]` suffixes.
impl fmt::Display for TuneReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(key) = &self.key {
            write!(f, " ({key})")?;
        }
        if let Some(id) = self.tune_id {
            write!(f, " [{id}]")?;
        }
        Ok(())
    }
}

/// An ordered, non-empty group of tunes played together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneSet {
    /// The raw type field of the set line, e.g. "reels" or "jigs, reel".
    pub label: String,
    pub tunes: Vec<TuneReference>,
}

/// Tune metadata matched from The Session, plus its incipit.
///
/// Owned transiently between resolution and rendering; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTune {
    /// Name in The Session's canonical form, e.g. "Wise Maid, The".
    pub name: String,

    /// Tune ID on The Session.
    pub tune_id: u32,

    /// Setting ID of the transcription the incipit was taken from.
    pub setting_id: u32,

    /// Tune type, e.g. "reel" (unique per tune ID).
    pub tune_type: String,

    /// Abbreviated key/mode of the selected setting, e.g. "Edor".
    pub key: String,

    pub incipit: Incipit,

    /// Name as it appeared in the input, for headings.
    pub name_input: String,
}

impl ResolvedTune {
    /// The Session page for this tune, anchored at the selected setting.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "https://thesession.org/tunes/{}#setting{}",
            self.tune_id, self.setting_id
        )
    }
}
