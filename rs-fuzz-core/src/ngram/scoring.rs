use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::profile::NgramProfile;
use crate::error::NgramError;

/// Scoring method used when comparing an input against a reference.
///
/// # Variants
/// - `Percentage`: matched n-gram mass divided by the reference mass, x100.
/// - `Matches`: raw matched n-gram mass.
///
/// Parses from `"percentage"` / `"matches"` (any case) so selectors coming
/// from configuration or HTTP requests go through the same checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Scoring {
	#[default]
	Percentage,
	Matches,
}

impl FromStr for Scoring {
	type Err = NgramError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"percentage" => Ok(Self::Percentage),
			"matches" => Ok(Self::Matches),
			_ => Err(NgramError::InvalidScoringMethod(s.to_owned())),
		}
	}
}

impl TryFrom<String> for Scoring {
	type Error = NgramError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl fmt::Display for Scoring {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Percentage => write!(f, "percentage"),
			Self::Matches => write!(f, "matches"),
		}
	}
}

/// Result of a comparison.
///
/// The variant always follows the `Scoring` method that produced it.
/// Serialized as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Score {
	/// Percentage in [0, 100], not rounded
	Percentage(f64),
	/// Number of matched n-grams
	Matches(usize),
}

impl Score {
	/// Returns the score as a float, whatever the scoring method.
	pub fn value(&self) -> f64 {
		match self {
			Self::Percentage(percentage) => *percentage,
			Self::Matches(matches) => count_to_f64(*matches),
		}
	}

	/// Returns `true` if the score is strictly greater than zero.
	pub fn is_positive(&self) -> bool {
		match self {
			Self::Percentage(percentage) => *percentage > 0.0,
			Self::Matches(matches) => *matches > 0,
		}
	}

	/// Total order on scores, used for ranking.
	pub fn total_cmp(&self, other: &Self) -> Ordering {
		match (self, other) {
			(Self::Matches(a), Self::Matches(b)) => a.cmp(b),
			_ => self.value().total_cmp(&other.value()),
		}
	}

	fn zero(scoring: Scoring) -> Self {
		match scoring {
			Scoring::Percentage => Self::Percentage(0.0),
			Scoring::Matches => Self::Matches(0),
		}
	}
}

impl fmt::Display for Score {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Percentage(percentage) => write!(f, "{percentage}%"),
			Self::Matches(matches) => write!(f, "{matches}"),
		}
	}
}

/// Scores an input profile against a reference profile.
///
/// # Behavior
/// - An empty reference always scores zero.
/// - Otherwise each reference n-gram contributes the smaller of its two counts.
/// - `Percentage` divides the matches by the reference total and multiplies by 100.
pub fn compare(reference: &NgramProfile, input: &NgramProfile, scoring: Scoring) -> Score {
	let total = reference.total();
	if total == 0 {
		return Score::zero(scoring);
	}

	let matches = reference.matches(input);
	match scoring {
		Scoring::Percentage => Score::Percentage((count_to_f64(matches) / count_to_f64(total)) * 100.0),
		Scoring::Matches => Score::Matches(matches),
	}
}

#[inline]
fn count_to_f64(count: usize) -> f64 {
	#[allow(clippy::cast_precision_loss)]
	{
		count as f64
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn score(reference: &str, input: &str, scoring: Scoring, n: usize) -> Score {
		compare(&NgramProfile::generate(reference, n), &NgramProfile::generate(input, n), scoring)
	}

	#[test]
	fn test_percentage() {
		assert_eq!(score("testing", "test", Scoring::Percentage, 2), Score::Percentage(50.0));
		assert_eq!(score("testing", "inst", Scoring::Percentage, 2), Score::Percentage(2.0 / 6.0 * 100.0));
		assert_eq!(score("testing", "test", Scoring::Percentage, 1), Score::Percentage(4.0 / 7.0 * 100.0));
		assert_eq!(score("testing", "test", Scoring::Percentage, 3), Score::Percentage(2.0 / 5.0 * 100.0));
	}

	#[test]
	fn test_matches() {
		assert_eq!(score("testing", "test", Scoring::Matches, 2), Score::Matches(3));
		assert_eq!(score("testing", "testing", Scoring::Matches, 1), Score::Matches(7));
		assert_eq!(score("testing", "st", Scoring::Matches, 2), Score::Matches(1));
		assert_eq!(score("testing", "te", Scoring::Matches, 3), Score::Matches(0));
	}

	#[test]
	fn test_empty_reference_scores_zero() {
		assert_eq!(score("", "test", Scoring::Percentage, 2), Score::Percentage(0.0));
		assert_eq!(score("", "", Scoring::Matches, 2), Score::Matches(0));
		assert_eq!(score("testing", "", Scoring::Percentage, 2), Score::Percentage(0.0));
	}

	#[test]
	fn test_input_only_ngrams_do_not_count() {
		// "tt" is not in the reference and must not add to the score
		assert_eq!(score("test", "testtt", Scoring::Percentage, 2), Score::Percentage(100.0));
	}

	#[test]
	fn test_parse_scoring() {
		assert_eq!("percentage".parse::<Scoring>(), Ok(Scoring::Percentage));
		assert_eq!("MATCHES".parse::<Scoring>(), Ok(Scoring::Matches));
		assert_eq!(
			"1337".parse::<Scoring>(),
			Err(NgramError::InvalidScoringMethod("1337".to_string()))
		);
	}

	#[test]
	fn test_score_ordering() {
		assert_eq!(Score::Matches(3).total_cmp(&Score::Matches(2)), Ordering::Greater);
		assert_eq!(Score::Percentage(10.0).total_cmp(&Score::Percentage(10.0)), Ordering::Equal);
		assert!(!Score::Percentage(0.0).is_positive());
		assert!(Score::Matches(1).is_positive());
	}
}
