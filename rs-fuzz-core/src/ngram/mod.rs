//! Character n-gram matching.
//!
//! - Profile generation (`NgramProfile`)
//! - Profile memoization (`ProfileCache`)
//! - Profile comparison (`Scoring`, `Score`)
//! - Candidate ranking (`KeyBy`, `ReturnScope`, `TieBreak`)
//! - The `CharNgram` facade and best-match selectors
//!
//! The free functions below mirror the `CharNgram` methods with explicit
//! parameters and run on a single process-wide matcher, so their cache is
//! shared by every caller of this module.

use std::sync::LazyLock;

/// Thread-safe memoization of generated profiles.
pub mod cache;

/// `CharNgram` facade and `MatchOptions`.
pub mod matcher;

/// Case-folded n-gram multisets.
pub mod profile;

/// Sorting and scope filtering of scored candidates.
pub mod ranking;

/// Scoring methods and profile comparison.
pub mod scoring;

use crate::error::Result;
use matcher::{CharNgram, MatchOptions};
use ranking::{KeyBy, RankedEntry, ReturnScope};
use scoring::{Score, Scoring};

static DEFAULT_MATCHER: LazyLock<CharNgram> = LazyLock::new(CharNgram::new);

/// Returns the process-wide matcher used by the free functions.
pub fn default_matcher() -> &'static CharNgram {
	&DEFAULT_MATCHER
}

/// Compares an input string against a reference string.
///
/// See `CharNgram::compare_string`.
pub fn compare_string(reference: &str, input: &str, scoring: Scoring, ngram_size: usize) -> Score {
	default_matcher().compare_string(reference, input, &MatchOptions::new(scoring, ngram_size))
}

/// Ranks candidates against an input string.
///
/// See `CharNgram::compare_list`.
pub fn compare_list<S: AsRef<str>>(
	candidates: &[S],
	input: &str,
	scoring: Scoring,
	ngram_size: usize,
	key_by: KeyBy,
	scope: ReturnScope,
) -> Result<Vec<RankedEntry>> {
	let options = MatchOptions { key_by, scope, ..MatchOptions::new(scoring, ngram_size) };
	default_matcher().compare_list(candidates, input, &options)
}

/// Returns the best matching candidate, `None` if nothing matched.
pub fn best_match<S: AsRef<str>>(candidates: &[S], input: &str, scoring: Scoring, ngram_size: usize) -> Result<Option<String>> {
	default_matcher().best_match(candidates, input, &MatchOptions::new(scoring, ngram_size))
}

/// Returns the position of the best matching candidate, `None` if nothing matched.
pub fn best_match_index<S: AsRef<str>>(candidates: &[S], input: &str, scoring: Scoring, ngram_size: usize) -> Result<Option<usize>> {
	default_matcher().best_match_index(candidates, input, &MatchOptions::new(scoring, ngram_size))
}
