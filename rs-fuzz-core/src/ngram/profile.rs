use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Iter;

use crate::error::{NgramError, Result};

/// The minimum valid n-gram size. Smaller sizes are clamped to it.
pub const MIN_NGRAM_SIZE: usize = 1;

/// The n-gram size used when the caller does not pick one.
pub const DEFAULT_NGRAM_SIZE: usize = 2;

/// Multiset of the character n-grams of one string.
///
/// Each key is a lowercase n-gram and each value is how many times that
/// n-gram occurs in the source string.
///
/// # Invariants
/// - `n` is always >= `MIN_NGRAM_SIZE`
/// - Every count is >= 1
/// - `total()` is `len - n + 1` for strings of at least `n` characters,
///   `1` for non-empty shorter strings and `0` for the empty string
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NgramProfile {
	/// The n-gram size used to build this profile
	n: usize,

	/// Mapping from n-gram to its number of occurrences
	/// Example: { "te" => 1, "es" => 1, "st" => 1 }
	ngrams: HashMap<String, usize>,
}

impl NgramProfile {
	/// Builds the n-gram profile of `text`.
	///
	/// # Behavior
	/// - Folds the text to lowercase before slicing.
	/// - Clamps `n` to `MIN_NGRAM_SIZE`.
	/// - Emits one n-gram per starting offset when the text has at least `n` characters.
	/// - Emits the whole text once when it is non-empty but shorter than `n`.
	/// - Returns an empty profile for the empty string.
	///
	/// # Notes
	/// - UTF-8 safe: slices on characters, not bytes.
	pub fn generate(text: &str, n: usize) -> Self {
		let n = effective_size(n);
		let chars: Vec<char> = text.to_lowercase().chars().collect();
		let mut ngrams = HashMap::new();

		if chars.len() >= n {
			for window in chars.windows(n) {
				*ngrams.entry(window.iter().collect::<String>()).or_insert(0) += 1;
			}
		} else if !chars.is_empty() {
			// Too short for a single n-gram, keep the whole string as one unit
			ngrams.insert(chars.into_iter().collect(), 1);
		}

		Self { n, ngrams }
	}

	/// Builds a profile from raw bytes.
	///
	/// # Errors
	/// Returns `NgramError::InvalidInput` if `bytes` is not valid UTF-8.
	/// The check happens before any case folding.
	pub fn from_utf8(bytes: &[u8], n: usize) -> Result<Self> {
		let text = std::str::from_utf8(bytes)
			.map_err(|e| NgramError::InvalidInput(format!("text must be valid UTF-8: {e}")))?;
		Ok(Self::generate(text, n))
	}

	/// Returns the n-gram size of the profile (after clamping).
	pub fn ngram_size(&self) -> usize {
		self.n
	}

	/// Returns the total n-gram mass (sum of all counts).
	pub fn total(&self) -> usize {
		self.ngrams.values().sum()
	}

	/// Returns the number of occurrences of `ngram`, `0` if absent.
	pub fn count(&self, ngram: &str) -> usize {
		self.ngrams.get(ngram).copied().unwrap_or(0)
	}

	/// Returns the number of distinct n-grams.
	pub fn len(&self) -> usize {
		self.ngrams.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ngrams.is_empty()
	}

	/// Iterates over `(ngram, count)` pairs in no particular order.
	pub fn iter(&self) -> Iter<'_, String, usize> {
		self.ngrams.iter()
	}

	/// Counts the n-grams of `self` also found in `input`.
	///
	/// Each reference n-gram contributes `min(reference count, input count)`.
	/// N-grams only present in `input` never contribute: the reference
	/// defines the universe of possible matches.
	pub fn matches(&self, input: &Self) -> usize {
		self.ngrams
			.iter()
			.map(|(ngram, occurrence)| (*occurrence).min(input.count(ngram)))
			.sum()
	}
}

/// Clamps a requested n-gram size to `MIN_NGRAM_SIZE`.
pub(crate) fn effective_size(n: usize) -> usize {
	n.max(MIN_NGRAM_SIZE)
}
