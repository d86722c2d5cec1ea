use super::language_model::LanguageModel;
use super::ngram::END_CHAR;
use crate::error::{Error, Result};

/// Default cap on the completed length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 20;

/// Why a completion stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stop {
	/// The current symbol has no observed continuation.
	ModelExhausted,
	/// The most likely continuation was the end marker.
	EndReached,
	/// The string reached the length cap.
	LengthCap,
}

/// A completed name and the reason generation stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
	pub text: String,
	pub stop: Stop,
}

/// Greedily extends `prefix` with the most likely next character.
///
/// See [`complete_with_reason`].
///
/// # Errors
/// Returns `InvalidArgument` if `prefix` is empty.
pub fn complete(model: &LanguageModel, prefix: &str, max_length: usize) -> Result<String> {
	complete_with_reason(model, prefix, max_length).map(|c| c.text)
}

/// Greedily extends `prefix`, one character at a time.
///
/// The context is the last character of the current string, lowercased.
/// Each step appends the continuation with the strictly highest probability,
/// ties going to the smallest symbol. Generation stops on the end marker
/// (not appended), on a context without continuations, or once the string
/// holds `max_length` characters.
///
/// # Notes
/// - The prefix is kept verbatim; appended characters are lowercase.
/// - A prefix already at or over `max_length` is returned unchanged.
/// - Runs at most `max_length - |prefix|` steps.
///
/// # Errors
/// Returns `InvalidArgument` if `prefix` is empty.
pub fn complete_with_reason(model: &LanguageModel, prefix: &str, max_length: usize) -> Result<Completion> {
	let Some(last) = prefix.chars().last() else {
		return Err(Error::invalid("completion prefix must not be empty"));
	};

	let mut text = prefix.to_owned();
	let mut length = prefix.chars().count();
	// Should not be empty, to_lowercase yields at least one char
	let mut current = last.to_lowercase().next().unwrap_or(last);

	let stop = loop {
		if length >= max_length {
			break Stop::LengthCap;
		}
		let next = match model.most_likely(current) {
			Some((symbol, _)) => symbol,
			None => break Stop::ModelExhausted,
		};
		if next == END_CHAR {
			break Stop::EndReached;
		}
		text.push(next);
		length += 1;
		current = next;
	};

	log::debug!("completed {prefix:?} -> {text:?} ({stop:?})");
	Ok(Completion { text, stop })
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	const CORPUS: [&str; 3] = ["anna", "anne", "anton"];

	#[test]
	fn empty_prefix_is_rejected() {
		let model = LanguageModel::add_k(&CORPUS, 1.0).unwrap();
		assert!(matches!(complete(&model, "", 20), Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn stops_on_end_marker() {
		let model = LanguageModel::fixed_floor(&["ab"]).unwrap();
		let c = complete_with_reason(&model, "A", 20).unwrap();
		assert_eq!(c.text, "Ab");
		assert_eq!(c.stop, Stop::EndReached);
	}

	#[test]
	fn end_marker_wins_a_tie_with_a_letter() {
		// 'a' is followed once by 'b' and once by the end marker
		for model in [
			LanguageModel::fixed_floor(&["ab", "a"]).unwrap(),
			LanguageModel::add_k(&["ab", "a"], 1.0).unwrap(),
		] {
			let c = complete_with_reason(&model, "a", 20).unwrap();
			assert_eq!(c.text, "a");
			assert_eq!(c.stop, Stop::EndReached);
		}
	}

	#[test]
	fn stops_on_unknown_context() {
		let model = LanguageModel::fixed_floor(&CORPUS).unwrap();
		let c = complete_with_reason(&model, "Zj", 20).unwrap();
		assert_eq!(c.text, "Zj");
		assert_eq!(c.stop, Stop::ModelExhausted);
	}

	#[test]
	fn stops_at_length_cap_on_a_cycle() {
		// a -> b -> a -> ... never prefers the end marker
		let model = LanguageModel::fixed_floor(&["abababa", "ab"]).unwrap();
		let c = complete_with_reason(&model, "a", 6).unwrap();
		assert_eq!(c.text.chars().count(), 6);
		assert_eq!(c.stop, Stop::LengthCap);
	}

	#[test]
	fn prefix_longer_than_cap_is_unchanged() {
		let model = LanguageModel::fixed_floor(&CORPUS).unwrap();
		let c = complete_with_reason(&model, "annabelle", 3).unwrap();
		assert_eq!(c.text, "annabelle");
		assert_eq!(c.stop, Stop::LengthCap);
	}

	#[test]
	fn follows_greedy_argmax_of_the_table() {
		let model = LanguageModel::add_k(&CORPUS, 1.0).unwrap();
		let completed = complete(&model, "an", DEFAULT_MAX_LENGTH).unwrap();

		let mut expected = String::from("an");
		let mut current = 'n';
		while expected.chars().count() < DEFAULT_MAX_LENGTH {
			let Some((next, _)) = model.most_likely(current) else { break };
			if next == END_CHAR {
				break;
			}
			expected.push(next);
			current = next;
		}
		assert_eq!(completed, expected);
	}

	proptest! {
		#[test]
		fn result_extends_prefix_within_bounds(prefix in "[A-Za-z]{1,8}", max_length in 0usize..30) {
			let model = LanguageModel::add_k(&CORPUS, 1.0).unwrap();
			let text = complete(&model, &prefix, max_length).unwrap();
			prop_assert!(text.starts_with(&prefix));
			let len = text.chars().count();
			let prefix_len = prefix.chars().count();
			prop_assert!(len >= prefix_len);
			prop_assert!(len <= prefix_len.max(max_length));
		}
	}
}
