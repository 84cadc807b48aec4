//! Character n-gram fuzzy string matching library.
//!
//! This crate scores how similar two strings are by slicing both into
//! overlapping character n-grams and comparing the resulting multisets:
//! - Case-folded n-gram profiles with graceful handling of short strings
//! - Percentage or absolute match scoring against a reference string
//! - Ranking of a candidate list against an input string
//! - Best-match selection by value or by position
//!
//! Profiles are memoized in an explicit [`ngram::cache::ProfileCache`] owned
//! by each [`CharNgram`] matcher. The free functions re-exported here share
//! one lazily created process-wide matcher.
//!
//! ```rust
//! use rs_fuzz_core::{CharNgram, MatchOptions, Scoring};
//!
//! let matcher = CharNgram::new();
//! let options = MatchOptions { scoring: Scoring::Matches, ..MatchOptions::default() };
//! assert_eq!(matcher.compare_string("testing", "test", &options).value(), 3.0);
//! ```

/// Error kinds surfaced by the matcher.
pub mod error;

/// N-gram generation, caching, scoring and ranking.
///
/// The `CharNgram` facade ties the pieces together; the submodules are
/// public so callers can work with profiles directly.
pub mod ngram;

pub use error::{NgramError, Result};
pub use ngram::cache::ProfileCache;
pub use ngram::matcher::{CharNgram, MatchOptions};
pub use ngram::profile::{DEFAULT_NGRAM_SIZE, MIN_NGRAM_SIZE, NgramProfile};
pub use ngram::ranking::{KeyBy, MatchKey, RankedEntry, ReturnScope, TieBreak};
pub use ngram::scoring::{Score, Scoring};
pub use ngram::{best_match, best_match_index, compare_list, compare_string, default_matcher};
