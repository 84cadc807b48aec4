use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rs_fuzz_core::{
	CharNgram, KeyBy, MatchOptions, NgramError, ReturnScope, Score, Scoring, best_match, best_match_index,
	compare_list, compare_string,
};

const ELEMENTS: [&str; 10] = [
	"Hydrogen", "Helium", "Lithium", "Beryllium", "Boron", "Carbon", "Nitrogen", "Oxygen", "Fluorine", "Neon",
];

/// Random alphanumeric strings of 1 to 24 characters, reproducible across runs.
fn random_words(seed: u64, count: usize) -> Vec<String> {
	let mut rng = StdRng::seed_from_u64(seed);
	(0..count)
		.map(|_| {
			let len = rng.random_range(1..=24);
			(&mut rng).sample_iter(&Alphanumeric).take(len).map(char::from).collect()
		})
		.collect()
}

#[test]
fn identical_strings_match_fully() {
	let matcher = CharNgram::new();
	for word in random_words(7, 200) {
		for n in 0..=6 {
			let options = MatchOptions::new(Scoring::Percentage, n);
			assert_eq!(matcher.compare_string(&word, &word, &options), Score::Percentage(100.0), "{word} n={n}");
		}
	}
}

#[test]
fn empty_strings_score_zero() {
	let matcher = CharNgram::new();
	for word in random_words(11, 100) {
		for scoring in [Scoring::Percentage, Scoring::Matches] {
			let options = MatchOptions::new(scoring, 2);
			assert_eq!(matcher.compare_string("", &word, &options).value(), 0.0);
			assert_eq!(matcher.compare_string(&word, "", &options).value(), 0.0);
		}
	}
}

#[test]
fn comparison_is_case_insensitive() {
	let matcher = CharNgram::new();
	let options = MatchOptions::new(Scoring::Matches, 2);
	for word in random_words(13, 100) {
		let upper = word.to_uppercase();
		let lower = word.to_lowercase();
		assert_eq!(
			matcher.compare_string(&upper, &lower, &options),
			matcher.compare_string(&lower, &lower, &options)
		);
	}
	assert_eq!(compare_string("TeSt", "tEsT", Scoring::Matches, 2), compare_string("test", "test", Scoring::Matches, 2));
}

#[test]
fn oversized_ngram_collapses_to_one_match() {
	assert_eq!(compare_string("testing", "testing", Scoring::Matches, 7), Score::Matches(1));
	assert_eq!(compare_string("testing", "testing", Scoring::Matches, 8), Score::Matches(1));
	assert_eq!(compare_string("testing", "testing", Scoring::Matches, 100), Score::Matches(1));
	assert_eq!(compare_string("testing", "testing", Scoring::Percentage, 8), Score::Percentage(100.0));
}

#[test]
fn reference_scenarios() {
	assert_eq!(compare_string("testing", "test", Scoring::Percentage, 2), Score::Percentage(50.0));
	assert_eq!(compare_string("testing", "test", Scoring::Matches, 2), Score::Matches(3));
	assert_eq!(compare_string("testing", "testing", Scoring::Matches, 0), Score::Matches(7));
	assert_eq!(compare_string("testing", "t", Scoring::Percentage, 1), Score::Percentage(1.0 / 7.0 * 100.0));
	assert_eq!(compare_string("testing", "t", Scoring::Matches, 2), Score::Matches(0));
	assert_eq!(compare_string("t", "t", Scoring::Percentage, 2), Score::Percentage(100.0));
	assert_eq!(compare_string("testing", "fail", Scoring::Percentage, 2), Score::Percentage(0.0));
}

#[test]
fn ranking_scenarios() {
	let top = compare_list(&ELEMENTS, "floreen", Scoring::Percentage, 2, KeyBy::String, ReturnScope::Top).unwrap();
	assert_eq!(top.len(), 1);
	assert_eq!(top[0].key.as_text(), Some("Fluorine"));
	assert_eq!(top[0].score, Score::Percentage(2.0 / 7.0 * 100.0));

	let ties = compare_list(&ELEMENTS, "um", Scoring::Matches, 2, KeyBy::String, ReturnScope::Top).unwrap();
	let names: Vec<&str> = ties.iter().filter_map(|entry| entry.key.as_text()).collect();
	assert_eq!(names, vec!["Helium", "Lithium", "Beryllium"]);
	assert!(ties.iter().all(|entry| entry.score == Score::Matches(1)));
}

#[test]
fn empty_candidate_list_always_fails() {
	let candidates: Vec<String> = Vec::new();
	for key_by in [KeyBy::String, KeyBy::Index] {
		for scope in [ReturnScope::All, ReturnScope::Top] {
			assert_eq!(
				compare_list(&candidates, "floreen", Scoring::Matches, 2, key_by, scope),
				Err(NgramError::EmptyCandidateList)
			);
		}
	}
	assert_eq!(best_match_index(&candidates, "x", Scoring::Matches, 2), Err(NgramError::EmptyCandidateList));
}

#[test]
fn best_match_without_overlap_is_absent() {
	assert_eq!(best_match(&ELEMENTS, "zazozuzezizy", Scoring::Percentage, 2), Ok(None));
	assert_eq!(best_match_index(&ELEMENTS, "qqq", Scoring::Matches, 2), Ok(None));
	assert_eq!(best_match(&ELEMENTS, "floreen", Scoring::Matches, 2), Ok(Some("Fluorine".to_string())));
}

#[test]
fn separate_matchers_have_separate_caches() {
	let first = CharNgram::new();
	let second = CharNgram::new();
	first.compare_string("testing", "test", &MatchOptions::default());
	assert_eq!(first.cache().len(), 2);
	assert!(second.cache().is_empty());
}
