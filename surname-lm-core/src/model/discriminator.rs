use super::language_model::LanguageModel;
use super::scorer::score;
use crate::corpus::Language;
use crate::error::Result;

/// A language model tagged with the language it was trained on.
#[derive(Clone, Debug)]
pub struct LabeledModel {
	pub language: Language,
	pub model: LanguageModel,
}

impl LabeledModel {
	pub fn new(language: Language, model: LanguageModel) -> Self {
		Self { language, model }
	}
}

/// Outcome of comparing two models on one name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Verdict {
	pub language: Language,
	/// `(language, log-probability)` of the first model.
	pub first: (Language, f64),
	/// `(language, log-probability)` of the second model.
	pub second: (Language, f64),
}

impl Verdict {
	/// Log-probability margin of the winner over the loser (>= 0).
	pub fn margin(&self) -> f64 {
		(self.first.1 - self.second.1).abs()
	}
}

/// Scores `name` under both models and keeps the higher log-probability.
///
/// Ties go to `first`.
///
/// # Errors
/// Propagates `DomainError` from the scorer (add-k at `k == 0`).
pub fn judge(first: &LabeledModel, second: &LabeledModel, name: &str) -> Result<Verdict> {
	let a = score(&first.model, name)?.log_probability;
	let b = score(&second.model, name)?.log_probability;
	let language = if b > a { second.language } else { first.language };
	Ok(Verdict {
		language,
		first: (first.language, a),
		second: (second.language, b),
	})
}

/// Language of `name` according to the two models, ties going to `first`.
///
/// # Errors
/// Propagates `DomainError` from the scorer.
pub fn classify(first: &LabeledModel, second: &LabeledModel, name: &str) -> Result<Language> {
	judge(first, second, name).map(|v| v.language)
}

/// Classifies every name of `names`.
pub fn classify_all<S: AsRef<str>>(first: &LabeledModel, second: &LabeledModel, names: &[S]) -> Result<Vec<Language>> {
	names.iter().map(|name| classify(first, second, name.as_ref())).collect()
}
