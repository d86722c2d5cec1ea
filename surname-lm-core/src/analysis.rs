use std::collections::BTreeSet;

use crate::corpus::{Language, LabeledName, split_by_language};
use crate::error::{Error, Result};
use crate::model::discriminator::{LabeledModel, classify_all};
use crate::model::frequency::FrequencyTable;
use crate::model::language_model::LanguageModel;

/// How well a bigram separates the two languages.
///
/// `english` and `russian` are relative frequencies (count over table total).
#[derive(Clone, Debug, PartialEq)]
pub struct Informativeness {
	pub bigram: String,
	pub score: f64,
	pub english: f64,
	pub russian: f64,
}

/// Scores every bigram observed in either table by
/// `|P_english(bg) - P_russian(bg)|` and ranks them, least informative first.
///
/// Ties keep lexicographic order.
pub fn informativeness(english: &FrequencyTable, russian: &FrequencyTable) -> Vec<Informativeness> {
	let bigrams: BTreeSet<&str> = english.iter().chain(russian.iter()).map(|(g, _)| g).collect();
	let mut ranking: Vec<Informativeness> = bigrams
		.into_iter()
		.map(|bigram| {
			let e = english.relative_frequency(bigram);
			let r = russian.relative_frequency(bigram);
			Informativeness {
				bigram: bigram.to_owned(),
				score: (e - r).abs(),
				english: e,
				russian: r,
			}
		})
		.collect();
	ranking.sort_by(|a, b| a.score.total_cmp(&b.score));
	ranking
}

/// 2x2 confusion matrix indexed by `[actual][predicted]` in [`Language::ALL`] order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
	counts: [[usize; 2]; 2],
}

fn index(language: Language) -> usize {
	match language {
		Language::English => 0,
		Language::Russian => 1,
	}
}

impl ConfusionMatrix {
	/// Tallies paired actual/predicted labels.
	///
	/// # Errors
	/// Returns `InvalidArgument` if the slices differ in length.
	pub fn from_labels(actual: &[Language], predicted: &[Language]) -> Result<Self> {
		if actual.len() != predicted.len() {
			return Err(Error::invalid(format!(
				"{} actual labels but {} predictions",
				actual.len(),
				predicted.len()
			)));
		}
		let mut matrix = Self::default();
		for (a, p) in actual.iter().zip(predicted) {
			matrix.counts[index(*a)][index(*p)] += 1;
		}
		Ok(matrix)
	}

	pub fn get(&self, actual: Language, predicted: Language) -> usize {
		self.counts[index(actual)][index(predicted)]
	}

	pub fn total(&self) -> usize {
		self.counts.iter().flatten().sum()
	}

	/// Fraction of predictions of `positive` that were right, 0 if none.
	pub fn precision(&self, positive: Language) -> f64 {
		let predicted: usize = Language::ALL.iter().map(|a| self.get(*a, positive)).sum();
		ratio(self.get(positive, positive), predicted)
	}

	/// Fraction of actual `positive` names that were found, 0 if none.
	pub fn recall(&self, positive: Language) -> f64 {
		let actual: usize = Language::ALL.iter().map(|p| self.get(positive, *p)).sum();
		ratio(self.get(positive, positive), actual)
	}

	pub fn f1(&self, positive: Language) -> f64 {
		let p = self.precision(positive);
		let r = self.recall(positive);
		if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
	}

	pub fn accuracy(&self) -> f64 {
		let correct = Language::ALL.iter().map(|l| self.get(*l, *l)).sum();
		ratio(correct, self.total())
	}

	pub fn metrics(&self, positive: Language) -> Metrics {
		Metrics {
			precision: self.precision(positive),
			recall: self.recall(positive),
			f1: self.f1(positive),
		}
	}
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
	if denominator == 0 { 0.0 } else { numerator as f64 / denominator as f64 }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
	pub precision: f64,
	pub recall: f64,
	pub f1: f64,
}

/// A held-out name the discriminator got wrong.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Misclassification {
	pub name: String,
	pub actual: Language,
	pub predicted: Language,
}

/// Result of one smoothing constant on a held-out set.
///
/// `misclassified` keeps the test order.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepResult {
	pub k: f64,
	pub confusion: ConfusionMatrix,
	pub metrics: Metrics,
	pub misclassified: Vec<Misclassification>,
}

/// Trains English and Russian add-k models on `train` and classifies `test`.
///
/// English is passed first to the discriminator, so it wins ties. Metrics
/// use Russian as the positive label.
///
/// # Errors
/// Propagates `InvalidArgument` for a bad `k` and `DomainError` at `k == 0`.
pub fn evaluate_smoothing(train: &[LabeledName], test: &[LabeledName], k: f64) -> Result<SweepResult> {
	let split = split_by_language(train);
	let english = LabeledModel::new(Language::English, LanguageModel::add_k(split.english(), k)?);
	let russian = LabeledModel::new(Language::Russian, LanguageModel::add_k(split.russian(), k)?);

	let names: Vec<&str> = test.iter().map(|e| e.name.as_str()).collect();
	let actual: Vec<Language> = test.iter().map(|e| e.language).collect();
	let predicted = classify_all(&english, &russian, &names)?;

	let confusion = ConfusionMatrix::from_labels(&actual, &predicted)?;
	let metrics = confusion.metrics(Language::Russian);
	let misclassified: Vec<Misclassification> = test
		.iter()
		.zip(&predicted)
		.filter(|(entry, p)| entry.language != **p)
		.map(|(entry, p)| Misclassification {
			name: entry.name.clone(),
			actual: entry.language,
			predicted: *p,
		})
		.collect();
	log::debug!("k = {k}: {metrics:?}, {} errors", misclassified.len());
	Ok(SweepResult {
		k,
		confusion,
		metrics,
		misclassified,
	})
}

/// Runs [`evaluate_smoothing`] for every `k` in order.
pub fn sweep_smoothing(train: &[LabeledName], test: &[LabeledName], ks: &[f64]) -> Result<Vec<SweepResult>> {
	ks.iter().map(|k| evaluate_smoothing(train, test, *k)).collect()
}

/// Result with the highest F1; the earliest wins ties.
pub fn best_by_f1(results: &[SweepResult]) -> Option<&SweepResult> {
	let mut best: Option<&SweepResult> = None;
	for result in results {
		match best {
			Some(b) if result.metrics.f1 <= b.metrics.f1 => (),
			_ => best = Some(result),
		}
	}
	best
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::ngram::Framing;
	use crate::corpus::Language::{English, Russian};

	#[test]
	fn informativeness_ranks_shared_bigrams_first() {
		let english = FrequencyTable::from_names(&["ab", "cd"], 2, Framing::Raw).unwrap();
		let russian = FrequencyTable::from_names(&["ab", "ov"], 2, Framing::Raw).unwrap();
		let ranking = informativeness(&english, &russian);
		let order: Vec<&str> = ranking.iter().map(|r| r.bigram.as_str()).collect();
		assert_eq!(order, vec!["ab", "cd", "ov"]);
		assert_eq!(ranking[0].score, 0.0);
		assert!((ranking[0].english - 0.5).abs() < 1e-12);
		assert!((ranking[2].score - 0.5).abs() < 1e-12);
		assert_eq!(ranking[2].english, 0.0);
	}

	#[test]
	fn metrics_match_hand_computed_values() {
		let actual = [Russian, Russian, Russian, English, English];
		let predicted = [Russian, Russian, English, Russian, English];
		let cm = ConfusionMatrix::from_labels(&actual, &predicted).unwrap();
		assert_eq!(cm.get(Russian, Russian), 2);
		assert_eq!(cm.get(Russian, English), 1);
		assert_eq!(cm.get(English, Russian), 1);
		assert_eq!(cm.get(English, English), 1);
		assert!((cm.precision(Russian) - 2.0 / 3.0).abs() < 1e-12);
		assert!((cm.recall(Russian) - 2.0 / 3.0).abs() < 1e-12);
		assert!((cm.f1(Russian) - 2.0 / 3.0).abs() < 1e-12);
		assert!((cm.accuracy() - 0.6).abs() < 1e-12);
	}

	#[test]
	fn zero_division_yields_zero() {
		let cm = ConfusionMatrix::from_labels(&[English], &[English]).unwrap();
		assert_eq!(cm.precision(Russian), 0.0);
		assert_eq!(cm.recall(Russian), 0.0);
		assert_eq!(cm.f1(Russian), 0.0);
		assert!(ConfusionMatrix::from_labels(&[English], &[]).is_err());
	}

	#[test]
	fn best_by_f1_prefers_the_earliest() {
		let result = |k: f64, f1: f64| SweepResult {
			k,
			confusion: ConfusionMatrix::default(),
			metrics: Metrics { precision: 0.0, recall: 0.0, f1 },
			misclassified: Vec::new(),
		};
		let results = vec![result(0.1, 0.5), result(0.5, 0.8), result(1.0, 0.8)];
		assert_eq!(best_by_f1(&results).map(|r| r.k), Some(0.5));
		assert!(best_by_f1(&[]).is_none());
	}

	#[test]
	fn sweep_separates_a_toy_corpus() {
		let train: Vec<LabeledName> = ["smith", "johnson", "williams", "brown", "taylor"]
			.iter()
			.map(|n| LabeledName::new(*n, English))
			.chain(
				["ivanov", "petrov", "smirnov", "volkov", "popov"]
					.iter()
					.map(|n| LabeledName::new(*n, Russian)),
			)
			.collect();
		let test = vec![LabeledName::new("sokolov", Russian), LabeledName::new("wilson", English)];
		let results = sweep_smoothing(&train, &test, &[0.1, 1.0]).unwrap();
		assert_eq!(results.len(), 2);
		for r in &results {
			assert_eq!(r.confusion.total(), 2);
			assert_eq!(r.metrics.f1, 1.0);
			assert!(r.misclassified.is_empty());
		}
	}

	#[test]
	fn sweep_lists_misclassified_names() {
		let train: Vec<LabeledName> = ["smith", "johnson", "williams", "brown", "taylor"]
			.iter()
			.map(|n| LabeledName::new(*n, English))
			.chain(
				["ivanov", "petrov", "smirnov", "volkov", "popov"]
					.iter()
					.map(|n| LabeledName::new(*n, Russian)),
			)
			.collect();
		// "thomson" is labeled Russian but reads English to both models
		let test = vec![
			LabeledName::new("sokolov", Russian),
			LabeledName::new("wilson", English),
			LabeledName::new("thomson", Russian),
		];
		for r in sweep_smoothing(&train, &test, &[0.1, 1.0]).unwrap() {
			assert_eq!(
				r.misclassified,
				vec![Misclassification {
					name: "thomson".to_owned(),
					actual: Russian,
					predicted: English,
				}]
			);
			assert_eq!(r.confusion.get(Russian, English), 1);
			assert_eq!(r.metrics.precision, 1.0);
			assert!((r.metrics.recall - 0.5).abs() < 1e-12);
			let english = r.confusion.metrics(English);
			assert!((english.precision - 0.5).abs() < 1e-12);
			assert_eq!(english.recall, 1.0);
			assert!((english.f1 - 2.0 / 3.0).abs() < 1e-12);
		}
	}
}
