use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::scoring::Score;
use crate::error::NgramError;

/// How each ranked entry identifies its candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum KeyBy {
	/// By the candidate string itself
	#[default]
	String,
	/// By the zero-based position of the candidate in the input list
	Index,
}

impl KeyBy {
	/// Tie-break policy applied when the caller does not choose one.
	///
	/// String keys rank shorter candidates first while index keys keep the
	/// input order. The two modes intentionally differ to stay compatible
	/// with existing rankings; pass an explicit `TieBreak` to unify them.
	pub fn default_tie_break(&self) -> TieBreak {
		match self {
			Self::String => TieBreak::ShortestFirst,
			Self::Index => TieBreak::Insertion,
		}
	}
}

impl FromStr for KeyBy {
	type Err = NgramError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"string" => Ok(Self::String),
			"index" => Ok(Self::Index),
			_ => Err(NgramError::InvalidReturnKey(s.to_owned())),
		}
	}
}

impl TryFrom<String> for KeyBy {
	type Error = NgramError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl fmt::Display for KeyBy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::String => write!(f, "string"),
			Self::Index => write!(f, "index"),
		}
	}
}

/// Which ranked entries to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ReturnScope {
	/// Every candidate, zero scores included
	All,
	/// Only the entries tied for the best score
	#[default]
	Top,
}

impl FromStr for ReturnScope {
	type Err = NgramError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"all" => Ok(Self::All),
			"top" => Ok(Self::Top),
			_ => Err(NgramError::InvalidReturnScope(s.to_owned())),
		}
	}
}

impl TryFrom<String> for ReturnScope {
	type Error = NgramError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Ordering of candidates that share the same score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
	/// Shorter candidates first (in characters), then lexicographic order
	ShortestFirst,
	/// Candidates keep their input order
	Insertion,
}

/// Identifier of a candidate in a ranked result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchKey {
	Text(String),
	Index(usize),
}

impl MatchKey {
	/// Returns the candidate string if the key is `Text`.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::Index(_) => None,
		}
	}

	/// Returns the candidate position if the key is `Index`.
	pub fn as_index(&self) -> Option<usize> {
		match self {
			Self::Text(_) => None,
			Self::Index(index) => Some(*index),
		}
	}
}

impl fmt::Display for MatchKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) => write!(f, "{text}"),
			Self::Index(index) => write!(f, "#{index}"),
		}
	}
}

/// One candidate and its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
	pub key: MatchKey,
	pub score: Score,
}

/// A candidate scored against the input, before ranking.
#[derive(Debug, Clone)]
pub(crate) struct ScoredCandidate<'a> {
	pub index: usize,
	pub text: &'a str,
	pub score: Score,
}

/// Sorts scored candidates and keeps the requested scope.
///
/// # Behavior
/// - Sorts by score, descending.
/// - Breaks ties with `tie_break` (a stable sort keeps the input order otherwise).
/// - With `KeyBy::String`, repeated candidate strings are reported once,
///   at the position of their first occurrence.
/// - `ReturnScope::Top` keeps the leading run of entries equal to the best score.
pub(crate) fn rank(
	mut scored: Vec<ScoredCandidate<'_>>,
	key_by: KeyBy,
	scope: ReturnScope,
	tie_break: TieBreak,
) -> Vec<RankedEntry> {
	if key_by == KeyBy::String {
		let mut seen = HashSet::new();
		scored.retain(|candidate| seen.insert(candidate.text));
	}

	scored.sort_by(|a, b| {
		b.score.total_cmp(&a.score).then_with(|| match tie_break {
			TieBreak::ShortestFirst => shortest_first(a.text, b.text),
			TieBreak::Insertion => Ordering::Equal,
		})
	});

	if scope == ReturnScope::Top {
		if let Some(best) = scored.first().map(|candidate| candidate.score) {
			scored.retain(|candidate| candidate.score.total_cmp(&best) == Ordering::Equal);
		}
	}

	debug!(
		entries = scored.len(),
		%key_by,
		?scope,
		?tie_break,
		"ranked candidates"
	);

	scored
		.into_iter()
		.map(|candidate| RankedEntry {
			key: match key_by {
				KeyBy::String => MatchKey::Text(candidate.text.to_owned()),
				KeyBy::Index => MatchKey::Index(candidate.index),
			},
			score: candidate.score,
		})
		.collect()
}

fn shortest_first(a: &str, b: &str) -> Ordering {
	a.chars().count().cmp(&b.chars().count()).then_with(|| a.cmp(b))
}
