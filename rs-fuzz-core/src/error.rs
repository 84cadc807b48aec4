use thiserror::Error;

/// Errors raised by n-gram generation, scoring and ranking.
///
/// Every variant is a synchronous failure surfaced at the point of
/// detection. "No match found" is not an error: selectors report it as
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NgramError {
	/// A value that must be text could not be treated as text
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// Unrecognized scoring method selector
	#[error("invalid scoring method: '{0}' (expected 'percentage' or 'matches')")]
	InvalidScoringMethod(String),

	/// Unrecognized key-by selector
	#[error("invalid return key: '{0}' (expected 'string' or 'index')")]
	InvalidReturnKey(String),

	/// Unrecognized return scope selector
	#[error("invalid return scope: '{0}' (expected 'all' or 'top')")]
	InvalidReturnScope(String),

	/// Ranking was attempted over zero candidates
	#[error("candidate list is empty")]
	EmptyCandidateList,
}

/// Result type for matcher operations
pub type Result<T> = std::result::Result<T, NgramError>;
