//! Tune resolution against The Session for tunebook.
//!
//! Builds an in-memory [`TuneIndex`] from The Session data dump, matches
//! parsed [`TuneReference`]s against it, and talks to the thesession.org
//! JSON API for member sets. The dump is cached gzipped in the platform
//! data directory.
//!
//! [`TuneReference`]: tunebook_core::TuneReference

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod dump;
pub mod error;
pub mod index;
pub mod resilience;
pub mod resolver;
pub mod session;

pub use config::Config;
pub use error::{ResolveError, ResolveResult};
pub use index::{TuneIndex, TuneQuery};
pub use resolver::{Resolver, SetReport, TuneEntry};
pub use session::SessionClient;
