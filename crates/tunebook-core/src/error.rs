use thiserror::Error;

/// Errors produced while parsing a single set line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line has no `:` between the type field and the tunes.
    #[error("missing ':' separator between set type and tunes")]
    MissingSeparator,

    /// The line has a separator but no tunes after it.
    #[error("no tunes in set")]
    EmptySet,

    /// A tune entry could not be parsed.
    #[error("could not parse tune input {input:?}")]
    Tune { input: String },

    /// A `[...]` disambiguation hint was not a number.
    #[error("tune id hint {hint:?} is not a number")]
    TuneIdHint { hint: String },

    /// Two plural type entries cannot be distributed over the tunes.
    #[error("ambiguous type input {input:?}; try one type per tune (e.g. 'slip jig, jig, reel')")]
    AmbiguousTypes { input: String },

    /// The number of type entries does not fit the number of tunes.
    #[error("type input {input:?} does not fit {num_tunes} tunes")]
    TypeCount { input: String, num_tunes: usize },
}

/// A [`ParseError`] located at a specific input line.
///
/// The parser collects these per line instead of aborting the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line} ({content:?}): {error}")]
pub struct LineError {
    /// 1-based line number in the input.
    pub line: usize,
    /// The offending line, trimmed.
    pub content: String,
    pub error: ParseError,
}
