use std::fmt;

use super::language_model::LanguageModel;
use super::ngram::boundary_bigrams;
use crate::error::{Error, Result};

/// One step of a scored name: `P(symbol | context)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
	pub context: char,
	pub symbol: char,
	pub probability: f64,
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "P({}|{})={:.4}", self.symbol, self.context, self.probability)
	}
}

/// Likelihood of a name under a [`LanguageModel`].
///
/// `log_probability` is accumulated step by step and stays finite for long
/// names; `probability` is the raw product and may underflow to zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Score {
	pub probability: f64,
	pub log_probability: f64,
	pub trace: Vec<Step>,
}

/// Scores `name` as `^name$` under `model`.
///
/// The empty name has no bigrams: probability 1.0, log-probability 0.0.
///
/// # Errors
/// Returns `DomainError` if a step probability is zero, which only happens
/// with add-k smoothing at `k == 0`.
pub fn score(model: &LanguageModel, name: &str) -> Result<Score> {
	let mut probability = 1.0;
	let mut log_probability = 0.0;
	let mut trace = Vec::new();

	for (context, symbol) in boundary_bigrams(name) {
		let p = model.probability(context, symbol);
		if p <= 0.0 {
			return Err(Error::DomainError { context, symbol });
		}
		probability *= p;
		log_probability += p.ln();
		trace.push(Step { context, symbol, probability: p });
	}

	Ok(Score { probability, log_probability, trace })
}
