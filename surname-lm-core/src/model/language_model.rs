use std::collections::{BTreeMap, BTreeSet};

use super::ngram::boundary_bigrams;
use super::state::ContextState;
use crate::error::{Error, Result};

/// Probability returned for a context never observed during training.
pub const PROBABILITY_FLOOR: f64 = 1e-10;

/// Probability estimation strategy of a [`LanguageModel`].
///
/// The strategies differ on how bigrams outside the table are handled:
///
/// - `FixedFloor`: observed bigrams get their maximum likelihood estimate
///   `count / context_total`, anything unobserved gets `floor`.
/// - `AddK`: `(count + k) / (context_total + k * V)` for observed bigrams,
///   `k / (context_total + k * V)` for unseen continuations of an observed
///   context, [`PROBABILITY_FLOOR`] for an unseen context.
///
/// # Zero probabilities
/// `AddK { k: 0.0 }` is accepted and is plain maximum likelihood. It returns
/// exactly zero for unseen continuations of an observed context. Such a model
/// is never floored implicitly: scoring a name through a zero step fails with
/// [`Error::DomainError`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Smoothing {
	FixedFloor { floor: f64 },
	AddK { k: f64 },
}

impl Smoothing {
	/// Fixed floor at [`PROBABILITY_FLOOR`].
	pub fn fixed_floor() -> Self {
		Smoothing::FixedFloor { floor: PROBABILITY_FLOOR }
	}

	pub fn add_k(k: f64) -> Self {
		Smoothing::AddK { k }
	}

	fn validate(self) -> Result<Self> {
		match self {
			Smoothing::FixedFloor { floor } if !(floor > 0.0 && floor <= 1.0) => {
				Err(Error::invalid(format!("floor must be in (0, 1], got {floor}")))
			}
			Smoothing::AddK { k } if !(k.is_finite() && k >= 0.0) => {
				Err(Error::invalid(format!("k must be finite and >= 0, got {k}")))
			}
			_ => Ok(self),
		}
	}
}

/// Accumulates boundary bigram counts before a [`LanguageModel`] is built.
///
/// The builder owns its maps; nothing is shared between builders.
#[derive(Clone, Debug, Default)]
pub struct LanguageModelBuilder {
	states: BTreeMap<char, ContextState>,
	names: usize,
}

impl LanguageModelBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds the boundary bigrams of `name` (`^name$`, lowercased).
	///
	/// The empty name contributes nothing.
	pub fn add_name(&mut self, name: &str) {
		for (context, symbol) in boundary_bigrams(name) {
			self.states
				.entry(context)
				.or_insert_with(|| ContextState::new(context))
				.add_transition(symbol);
		}
		self.names += 1;
	}

	/// Adds every name of `names`.
	pub fn add_names<S: AsRef<str>>(&mut self, names: &[S]) -> &mut Self {
		for name in names {
			self.add_name(name.as_ref());
		}
		self
	}

	/// Freezes the counts into a model using `smoothing`.
	///
	/// # Errors
	/// Returns `InvalidArgument` for a negative or non-finite `k`, or a floor
	/// outside `(0, 1]`.
	pub fn build(self, smoothing: Smoothing) -> Result<LanguageModel> {
		let smoothing = smoothing.validate()?;

		let mut vocabulary = BTreeSet::new();
		for state in self.states.values() {
			vocabulary.insert(state.context());
			vocabulary.extend(state.transitions().map(|(symbol, _)| symbol));
		}
		let vocabulary = vocabulary.len();

		let mut probabilities = BTreeMap::new();
		for (context, state) in &self.states {
			let total = state.total() as f64;
			let distribution: BTreeMap<char, f64> = state
				.transitions()
				.map(|(symbol, count)| {
					let p = match smoothing {
						Smoothing::FixedFloor { .. } => count as f64 / total,
						Smoothing::AddK { k } => (count as f64 + k) / (total + k * vocabulary as f64),
					};
					(symbol, p)
				})
				.collect();
			probabilities.insert(*context, distribution);
		}

		log::debug!(
			"built {:?} model: {} names, {} contexts, V = {}",
			smoothing,
			self.names,
			self.states.len(),
			vocabulary
		);

		Ok(LanguageModel {
			smoothing,
			vocabulary,
			states: self.states,
			probabilities,
		})
	}
}

/// Character bigram language model over boundary-framed names.
///
/// Immutable once built. Holds the observed counts per context and the
/// derived `context -> (symbol -> probability)` table; probabilities of
/// bigrams outside the table are computed on demand by [`Self::probability`].
///
/// # Invariants
/// - Every key of `probabilities` is a key of `states` and vice versa
/// - `vocabulary` counts distinct characters seen on either side of a bigram,
///   boundary markers included
#[derive(Clone, Debug)]
pub struct LanguageModel {
	smoothing: Smoothing,
	vocabulary: usize,
	states: BTreeMap<char, ContextState>,
	probabilities: BTreeMap<char, BTreeMap<char, f64>>,
}

impl LanguageModel {
	/// Builds an add-k smoothed model over `names`.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `k` is negative or not finite.
	pub fn add_k<S: AsRef<str>>(names: &[S], k: f64) -> Result<Self> {
		let mut builder = LanguageModelBuilder::new();
		builder.add_names(names);
		builder.build(Smoothing::add_k(k))
	}

	/// Builds a maximum likelihood model floored at [`PROBABILITY_FLOOR`].
	pub fn fixed_floor<S: AsRef<str>>(names: &[S]) -> Result<Self> {
		let mut builder = LanguageModelBuilder::new();
		builder.add_names(names);
		builder.build(Smoothing::fixed_floor())
	}

	pub fn smoothing(&self) -> Smoothing {
		self.smoothing
	}

	/// Vocabulary size V.
	pub fn vocabulary_size(&self) -> usize {
		self.vocabulary
	}

	/// Number of bigrams starting with `context`, zero if never seen.
	pub fn context_total(&self, context: char) -> usize {
		self.states.get(&context).map(ContextState::total).unwrap_or(0)
	}

	/// Observed counts for `context`.
	pub fn state(&self, context: char) -> Option<&ContextState> {
		self.states.get(&context)
	}

	/// Contexts observed during training, in ascending order.
	pub fn contexts(&self) -> impl Iterator<Item = char> + '_ {
		self.probabilities.keys().copied()
	}

	/// Probabilities of the observed continuations of `context`.
	pub fn distribution(&self, context: char) -> Option<&BTreeMap<char, f64>> {
		self.probabilities.get(&context)
	}

	/// Probability given to a continuation of `context` absent from the table.
	pub fn unseen_probability(&self, context: char) -> f64 {
		match (self.smoothing, self.states.get(&context)) {
			(Smoothing::FixedFloor { floor }, _) => floor,
			(Smoothing::AddK { k }, Some(state)) => k / (state.total() as f64 + k * self.vocabulary as f64),
			(Smoothing::AddK { .. }, None) => PROBABILITY_FLOOR,
		}
	}

	/// `P(symbol | context)`.
	///
	/// Strictly positive except for `AddK { k: 0.0 }` on an unseen
	/// continuation of an observed context, which yields exactly zero.
	pub fn probability(&self, context: char, symbol: char) -> f64 {
		self.probabilities
			.get(&context)
			.and_then(|distribution| distribution.get(&symbol))
			.copied()
			.unwrap_or_else(|| self.unseen_probability(context))
	}

	/// Most probable observed continuation of `context`.
	///
	/// Ties go to the smallest symbol. Returns `None` if the context was never
	/// observed.
	pub fn most_likely(&self, context: char) -> Option<(char, f64)> {
		let mut best: Option<(char, f64)> = None;
		for (symbol, p) in self.probabilities.get(&context)? {
			match best {
				Some((_, best_p)) if *p <= best_p => (),
				_ => best = Some((*symbol, *p)),
			}
		}
		best
	}
}
