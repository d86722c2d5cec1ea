use std::collections::BTreeMap;

use super::ngram::{Framing, windows};
use crate::error::Result;

/// Summed n-gram occurrence counts over a corpus of names.
///
/// # Invariants
/// - Every key has exactly `n` characters
/// - Every stored count is >= 1 (absent keys have count 0)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
	n: usize,
	framing: Framing,
	counts: BTreeMap<String, usize>,
}

impl FrequencyTable {
	/// Counts every n-gram of every name (sum over the corpus, not per name).
	///
	/// # Errors
	/// Returns `InvalidArgument` if `n == 0`.
	pub fn from_names<S: AsRef<str>>(names: &[S], n: usize, framing: Framing) -> Result<Self> {
		let mut counts = BTreeMap::new();
		for name in names {
			for gram in framing.ngrams(name.as_ref(), n)? {
				*counts.entry(gram).or_insert(0) += 1;
			}
		}
		log::debug!("counted {} distinct {}-grams over {} names", counts.len(), n, names.len());
		Ok(Self { n, framing, counts })
	}

	pub fn n(&self) -> usize {
		self.n
	}

	pub fn framing(&self) -> Framing {
		self.framing
	}

	/// Count of `gram`, zero when it was never observed.
	pub fn get(&self, gram: &str) -> usize {
		self.counts.get(gram).copied().unwrap_or(0)
	}

	/// Total number of n-gram occurrences.
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// Number of distinct n-grams.
	pub fn distinct(&self) -> usize {
		self.counts.len()
	}

	/// `count(gram) / total`, zero on an empty table.
	pub fn relative_frequency(&self, gram: &str) -> f64 {
		let total = self.total();
		if total == 0 {
			return 0.0;
		}
		self.get(gram) as f64 / total as f64
	}

	/// Iterates over `(n-gram, count)` in lexicographic order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(k, v)| (k.as_str(), *v))
	}

	/// All entries by descending count, ties in lexicographic order.
	pub fn sorted_by_count(&self) -> Vec<(&str, usize)> {
		let mut entries: Vec<_> = self.iter().collect();
		// Stable sort keeps the lexicographic order among equal counts
		entries.sort_by(|a, b| b.1.cmp(&a.1));
		entries
	}

	/// The `k` most frequent n-grams.
	pub fn most_common(&self, k: usize) -> Vec<(&str, usize)> {
		let mut entries = self.sorted_by_count();
		entries.truncate(k);
		entries
	}

	/// N-grams observed exactly once.
	pub fn hapax(&self) -> Vec<&str> {
		self.iter().filter(|(_, c)| *c == 1).map(|(g, _)| g).collect()
	}

	/// Letter-only bigrams (`aa` to `zz`) never observed in this table.
	///
	/// Empty unless the table holds bigrams.
	pub fn unobserved_letter_bigrams(&self) -> Vec<String> {
		if self.n != 2 {
			return Vec::new();
		}
		('a'..='z')
			.flat_map(|a| ('a'..='z').map(move |b| format!("{a}{b}")))
			.filter(|bg| !self.counts.contains_key(bg))
			.collect()
	}
}

/// Single-character counts obtained by summing the left character of every
/// bigram, plus the final character of each non-empty name.
pub fn unigram_counts_from_bigrams<S: AsRef<str>>(names: &[S], framing: Framing) -> BTreeMap<char, usize> {
	let mut counts = BTreeMap::new();
	for name in names {
		let chars = framing.frame(name.as_ref());
		for bigram in windows(&chars, 2) {
			if let Some(left) = bigram.chars().next() {
				*counts.entry(left).or_insert(0) += 1;
			}
		}
		if let Some(last) = chars.last() {
			*counts.entry(*last).or_insert(0) += 1;
		}
	}
	counts
}

/// Single-character counts obtained by direct unigram extraction.
///
/// Agrees with [`unigram_counts_from_bigrams`] on every corpus.
pub fn unigram_counts<S: AsRef<str>>(names: &[S], framing: Framing) -> BTreeMap<char, usize> {
	let mut counts = BTreeMap::new();
	for name in names {
		for c in framing.frame(name.as_ref()) {
			*counts.entry(c).or_insert(0) += 1;
		}
	}
	counts
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn counts_are_summed_over_the_corpus() {
		let table = FrequencyTable::from_names(&["anna", "Anne"], 2, Framing::Raw).unwrap();
		assert_eq!(table.get("an"), 2);
		assert_eq!(table.get("nn"), 2);
		assert_eq!(table.get("na"), 1);
		assert_eq!(table.get("ne"), 1);
		assert_eq!(table.get("zz"), 0);
		assert_eq!(table.total(), 6);
		assert_eq!(table.distinct(), 4);
	}

	#[test]
	fn most_common_breaks_ties_lexicographically() {
		let table = FrequencyTable::from_names(&["anna", "anne"], 2, Framing::Raw).unwrap();
		assert_eq!(table.most_common(3), vec![("an", 2), ("nn", 2), ("na", 1)]);
		assert_eq!(table.hapax(), vec!["na", "ne"]);
	}

	#[test]
	fn unobserved_letter_bigrams_excludes_observed() {
		let table = FrequencyTable::from_names(&["ab"], 2, Framing::Raw).unwrap();
		let missing = table.unobserved_letter_bigrams();
		assert_eq!(missing.len(), 26 * 26 - 1);
		assert!(!missing.contains(&"ab".to_owned()));

		let trigrams = FrequencyTable::from_names(&["abc"], 3, Framing::Raw).unwrap();
		assert!(trigrams.unobserved_letter_bigrams().is_empty());
	}

	#[test]
	fn relative_frequency_of_empty_table_is_zero() {
		let names: [&str; 0] = [];
		let table = FrequencyTable::from_names(&names, 2, Framing::Raw).unwrap();
		assert_eq!(table.relative_frequency("ab"), 0.0);
	}

	#[test]
	fn boundary_table_counts_marker_bigrams() {
		let table = FrequencyTable::from_names(&["ab", "Ac"], 2, Framing::Boundary).unwrap();
		assert_eq!(table.get("^a"), 2);
		assert_eq!(table.get("b$"), 1);
		assert_eq!(table.total(), 6);
		assert_eq!(table.framing(), Framing::Boundary);
	}

	#[test]
	fn single_letter_names_count_once_in_both_derivations() {
		let names = ["a", "", "bob"];
		assert_eq!(unigram_counts_from_bigrams(&names, Framing::Raw), unigram_counts(&names, Framing::Raw));
		assert_eq!(unigram_counts(&names, Framing::Raw).get(&'a'), Some(&1));
	}

	proptest! {
		#[test]
		fn unigram_derivations_agree(names in prop::collection::vec("[A-Za-z]{0,10}", 0..20)) {
			for framing in [Framing::Raw, Framing::Boundary] {
				prop_assert_eq!(
					unigram_counts_from_bigrams(&names, framing),
					unigram_counts(&names, framing)
				);
			}
		}
	}
}
