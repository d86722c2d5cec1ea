use crate::error::{Error, Result};

/// Synthetic symbol placed before the first character of a name.
pub const START_CHAR: char = '^';

/// Synthetic symbol placed after the last character of a name.
pub const END_CHAR: char = '$';

/// How a name is framed before n-grams are cut out of it.
///
/// - `Raw`: the lowercased name as-is, used for corpus frequency statistics.
/// - `Boundary`: the lowercased name wrapped as `^name$`, so that start and
///   end transitions become ordinary bigrams for the likelihood model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Framing {
	Raw,
	Boundary,
}

impl Framing {
	/// Returns the lowercased character sequence of `name` under this framing.
	pub fn frame(self, name: &str) -> Vec<char> {
		let lowered = name.chars().flat_map(char::to_lowercase);
		match self {
			Framing::Raw => lowered.collect(),
			Framing::Boundary => std::iter::once(START_CHAR)
				.chain(lowered)
				.chain(std::iter::once(END_CHAR))
				.collect(),
		}
	}

	/// Extracts the n-grams of `name` under this framing.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `n == 0`.
	pub fn ngrams(self, name: &str, n: usize) -> Result<Vec<String>> {
		if n == 0 {
			return Err(Error::invalid("n must be >= 1"));
		}
		Ok(windows(&self.frame(name), n))
	}
}

/// Cuts every length-`n` window out of `chars`, left to right.
///
/// Yields `max(0, len - n + 1)` windows; nothing when `n` is zero.
pub(crate) fn windows(chars: &[char], n: usize) -> Vec<String> {
	if n == 0 || chars.len() < n {
		return Vec::new();
	}
	chars.windows(n).map(|w| w.iter().collect()).collect()
}

/// Returns all length-`n` contiguous substrings of the lowercased `name`.
///
/// Returns an empty vector when the name is shorter than `n` (or `n == 0`).
/// Lengths are counted in characters, not bytes.
pub fn extract_ngrams(name: &str, n: usize) -> Vec<String> {
	windows(&Framing::Raw.frame(name), n)
}

/// Same as [`extract_ngrams`] but on `^name$`.
pub fn extract_boundary_ngrams(name: &str, n: usize) -> Vec<String> {
	windows(&Framing::Boundary.frame(name), n)
}

/// Ordered `(context, symbol)` pairs of the boundary-framed name.
///
/// The empty name yields no pairs at all rather than the lone `^$` bigram.
pub(crate) fn boundary_bigrams(name: &str) -> Vec<(char, char)> {
	if name.is_empty() {
		return Vec::new();
	}
	Framing::Boundary
		.frame(name)
		.windows(2)
		.map(|w| (w[0], w[1]))
		.collect()
}
