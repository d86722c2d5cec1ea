use std::collections::BTreeMap;

/// Observed continuations of a single context character.
///
/// Conceptually a node of a first-order Markov chain: outgoing edges are
/// weighted by how many times the transition was seen during training.
///
/// ## Invariants
/// - All transitions belong to the same `context`
/// - Each transition count is strictly positive
/// - `total` equals the sum of all transition counts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextState {
	context: char,
	/// Example: { 'e' => 42, 'a' => 3 }
	transitions: BTreeMap<char, usize>,
	total: usize,
}

impl ContextState {
	/// Creates an empty state for `context`.
	pub fn new(context: char) -> Self {
		Self {
			context,
			transitions: BTreeMap::new(),
			total: 0,
		}
	}

	/// Records one occurrence of `context -> symbol`.
	pub fn add_transition(&mut self, symbol: char) {
		*self.transitions.entry(symbol).or_insert(0) += 1;
		self.total += 1;
	}

	pub fn context(&self) -> char {
		self.context
	}

	/// Number of bigrams starting with this context.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Occurrences of `context -> symbol`, zero if never seen.
	pub fn count(&self, symbol: char) -> usize {
		self.transitions.get(&symbol).copied().unwrap_or(0)
	}

	/// Distinct symbols observed after this context.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Iterates over `(symbol, count)` in ascending symbol order.
	pub fn transitions(&self) -> impl Iterator<Item = (char, usize)> + '_ {
		self.transitions.iter().map(|(s, c)| (*s, *c))
	}

}
