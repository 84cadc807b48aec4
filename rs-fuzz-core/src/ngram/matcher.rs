use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cache::ProfileCache;
use super::profile::{DEFAULT_NGRAM_SIZE, NgramProfile};
use super::ranking::{self, KeyBy, RankedEntry, ReturnScope, ScoredCandidate, TieBreak};
use super::scoring::{self, Score, Scoring};
use crate::error::{NgramError, Result};

/// Parameters of a comparison.
///
/// # Defaults
/// - `scoring`: `Scoring::Percentage`
/// - `ngram_size`: `DEFAULT_NGRAM_SIZE` (2)
/// - `key_by`: `KeyBy::String`
/// - `scope`: `ReturnScope::Top`
/// - `tie_break`: `None`, derived from `key_by`
///
/// `compare_string` only reads `scoring` and `ngram_size`; the best-match
/// selectors override `key_by` and `scope`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
	/// Scoring method
	pub scoring: Scoring,

	/// N-gram size, clamped to 1
	pub ngram_size: usize,

	/// How ranked entries identify their candidate
	pub key_by: KeyBy,

	/// Which ranked entries to return
	pub scope: ReturnScope,

	/// Explicit tie-break policy, overriding the one implied by `key_by`
	pub tie_break: Option<TieBreak>,
}

impl Default for MatchOptions {
	fn default() -> Self {
		Self {
			scoring: Scoring::default(),
			ngram_size: DEFAULT_NGRAM_SIZE,
			key_by: KeyBy::default(),
			scope: ReturnScope::default(),
			tie_break: None,
		}
	}
}

impl MatchOptions {
	/// Options with the given scoring method and n-gram size, other fields defaulted.
	pub fn new(scoring: Scoring, ngram_size: usize) -> Self {
		Self { scoring, ngram_size, ..Self::default() }
	}

	/// Returns the tie-break policy in effect.
	pub fn effective_tie_break(&self) -> TieBreak {
		self.tie_break.unwrap_or_else(|| self.key_by.default_tie_break())
	}
}

/// Character n-gram matcher.
///
/// # Responsibilities
/// - Compare an input string against a reference string
/// - Rank a list of candidate strings against an input string
/// - Select the best candidate, by value or by position
///
/// Every profile is obtained through the owned `ProfileCache`, so repeated
/// candidates are only sliced once. The matcher is `Sync` and can be shared
/// between threads; give each caller its own instance for isolated caches.
#[derive(Debug, Default)]
pub struct CharNgram {
	cache: ProfileCache,
}

impl CharNgram {
	/// Creates a matcher with an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a matcher around an existing cache.
	pub fn with_cache(cache: ProfileCache) -> Self {
		Self { cache }
	}

	/// Returns the profile cache of this matcher.
	pub fn cache(&self) -> &ProfileCache {
		&self.cache
	}

	/// Returns the (cached) profile of `text`.
	pub fn profile(&self, text: &str, n: usize) -> Arc<NgramProfile> {
		self.cache.profile(text, n)
	}

	/// Compares an input string against a reference string.
	///
	/// For instance, with the default options "test" scores 50.0 against
	/// "testing", and 3 with `Scoring::Matches`.
	///
	/// # Notes
	/// - Case-insensitive.
	/// - Not symmetric: only n-grams of `reference` can match.
	pub fn compare_string(&self, reference: &str, input: &str, options: &MatchOptions) -> Score {
		let reference = self.profile(reference, options.ngram_size);
		let input = self.profile(input, options.ngram_size);
		scoring::compare(&reference, &input, options.scoring)
	}

	/// Compares an input string against each candidate and ranks the results.
	///
	/// # Returns
	/// Entries sorted by descending score. With `ReturnScope::Top` only the
	/// entries tied for the best score are kept.
	///
	/// # Errors
	/// Returns `NgramError::EmptyCandidateList` if `candidates` is empty.
	pub fn compare_list<S: AsRef<str>>(
		&self,
		candidates: &[S],
		input: &str,
		options: &MatchOptions,
	) -> Result<Vec<RankedEntry>> {
		if candidates.is_empty() {
			return Err(NgramError::EmptyCandidateList);
		}

		let input_profile = self.profile(input, options.ngram_size);
		let scored: Vec<ScoredCandidate<'_>> = candidates
			.iter()
			.enumerate()
			.map(|(index, candidate)| {
				let text = candidate.as_ref();
				let reference = self.profile(text, options.ngram_size);
				ScoredCandidate {
					index,
					text,
					score: scoring::compare(&reference, &input_profile, options.scoring),
				}
			})
			.collect();

		debug!(
			candidates = candidates.len(),
			input,
			n = options.ngram_size,
			scoring = %options.scoring,
			"scored candidate list"
		);

		Ok(ranking::rank(scored, options.key_by, options.scope, options.effective_tie_break()))
	}

	/// Returns the candidate that best matches `input`.
	///
	/// # Returns
	/// - `Ok(Some(candidate))` for the first ranked candidate if it scored above zero.
	/// - `Ok(None)` if no candidate shares any n-gram with the input.
	///
	/// # Errors
	/// Returns `NgramError::EmptyCandidateList` if `candidates` is empty.
	pub fn best_match<S: AsRef<str>>(
		&self,
		candidates: &[S],
		input: &str,
		options: &MatchOptions,
	) -> Result<Option<String>> {
		let options = MatchOptions { key_by: KeyBy::String, scope: ReturnScope::All, ..*options };
		let entries = self.compare_list(candidates, input, &options)?;
		Ok(Self::winner(entries).and_then(|key| key.as_text().map(str::to_owned)))
	}

	/// Returns the position of the candidate that best matches `input`.
	///
	/// Same as `best_match`, but ties keep the input order.
	pub fn best_match_index<S: AsRef<str>>(
		&self,
		candidates: &[S],
		input: &str,
		options: &MatchOptions,
	) -> Result<Option<usize>> {
		let options = MatchOptions { key_by: KeyBy::Index, scope: ReturnScope::All, ..*options };
		let entries = self.compare_list(candidates, input, &options)?;
		Ok(Self::winner(entries).and_then(|key| key.as_index()))
	}

	fn winner(entries: Vec<RankedEntry>) -> Option<ranking::MatchKey> {
		entries
			.into_iter()
			.next()
			.filter(|entry| entry.score.is_positive())
			.map(|entry| entry.key)
	}
}
