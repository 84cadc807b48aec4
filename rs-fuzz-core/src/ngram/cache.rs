use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use super::profile::{NgramProfile, effective_size};

/// Memoization of generated n-gram profiles.
///
/// Profiles are keyed by n-gram size, then by the original string exactly
/// as given (before case folding). Two inputs that only differ by case are
/// therefore stored as two entries holding equal profiles.
///
/// # Notes
/// - Thread-safe: lookups share a read lock, insertions take the write lock.
/// - Entries are never evicted. Memory grows with the number of distinct
///   `(n, string)` pairs seen; call `clear()` to reset.
/// - Caching only affects timing, never scores.
#[derive(Debug, Default)]
pub struct ProfileCache {
	profiles: RwLock<HashMap<usize, HashMap<String, Arc<NgramProfile>>>>,
}

impl ProfileCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the profile of `text` for size `n`, generating and storing it on a miss.
	pub fn profile(&self, text: &str, n: usize) -> Arc<NgramProfile> {
		let n = effective_size(n);

		if let Some(profile) = self.profiles.read().get(&n).and_then(|by_text| by_text.get(text)) {
			trace!(n, text, "ngram cache hit");
			return Arc::clone(profile);
		}

		trace!(n, text, "ngram cache miss");
		let profile = Arc::new(NgramProfile::generate(text, n));

		// Another thread may have inserted the same entry meanwhile; both are equal
		let mut profiles = self.profiles.write();
		let stored = profiles
			.entry(n)
			.or_default()
			.entry(text.to_owned())
			.or_insert(profile);
		Arc::clone(stored)
	}

	/// Returns `true` if a profile of `text` for size `n` is cached.
	pub fn contains(&self, text: &str, n: usize) -> bool {
		self.profiles
			.read()
			.get(&effective_size(n))
			.is_some_and(|by_text| by_text.contains_key(text))
	}

	/// Returns the number of cached profiles across all sizes.
	pub fn len(&self) -> usize {
		self.profiles.read().values().map(HashMap::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Drops every cached profile.
	pub fn clear(&self) {
		self.profiles.write().clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::thread;

	#[test]
	fn test_profile_is_memoized() {
		let cache = ProfileCache::new();
		let first = cache.profile("testing", 2);
		let second = cache.profile("testing", 2);
		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn test_key_is_the_original_case() {
		let cache = ProfileCache::new();
		let lower = cache.profile("test", 2);
		let upper = cache.profile("TEST", 2);
		assert!(!Arc::ptr_eq(&lower, &upper));
		assert_eq!(lower, upper);
		assert_eq!(cache.len(), 2);
	}

	#[test]
	fn test_sizes_are_separate_entries() {
		let cache = ProfileCache::new();
		cache.profile("test", 2);
		cache.profile("test", 3);
		assert!(cache.contains("test", 2));
		assert!(cache.contains("test", 3));
		assert!(!cache.contains("test", 4));
		assert_eq!(cache.len(), 2);
	}

	#[test]
	fn test_clamped_size_shares_entry() {
		let cache = ProfileCache::new();
		let zero = cache.profile("test", 0);
		let one = cache.profile("test", 1);
		assert!(Arc::ptr_eq(&zero, &one));
	}

	#[test]
	fn test_clear() {
		let cache = ProfileCache::new();
		cache.profile("a", 2);
		cache.profile("b", 2);
		assert!(!cache.is_empty());
		cache.clear();
		assert!(cache.is_empty());
		assert!(!cache.contains("a", 2));
	}

	#[test]
	fn test_concurrent_access() {
		let cache = Arc::new(ProfileCache::new());
		let handles: Vec<_> = (0..8)
			.map(|i| {
				let cache = Arc::clone(&cache);
				thread::spawn(move || {
					for word in ["hydrogen", "helium", "lithium"] {
						let profile = cache.profile(word, 2 + i % 2);
						assert_eq!(*profile, NgramProfile::generate(word, 2 + i % 2));
					}
				})
			})
			.collect();

		for handle in handles {
			handle.join().unwrap();
		}
		assert_eq!(cache.len(), 6);
	}
}
