//! Core domain model for tunebook.
//!
//! This crate defines the setlist data model (TuneReference, TuneSet,
//! ResolvedTune), the set-list parser, The Session normalization rules,
//! and ABC incipit extraction.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod abc;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parse;

pub use abc::Incipit;
pub use error::{LineError, ParseError};
pub use model::{ResolvedTune, TuneReference, TuneSet};
pub use parse::{parse_set, parse_setlist, ParsedSetlist};
