//! Character n-gram language modeling.
//!
//! Components, leaves first:
//! - N-gram extraction (`ngram`)
//! - Frequency counting (`frequency`)
//! - Per-context transition counts (`ContextState`)
//! - Smoothed bigram model and its builder (`language_model`)
//! - Scoring, completion and discrimination on top of a built model

/// Raw and boundary-framed n-gram extraction.
pub mod ngram;

/// Corpus-wide n-gram and unigram counts.
pub mod frequency;

/// Observed continuations of one context character.
///
/// Kept internal; exposed read-only through `LanguageModel::state`.
mod state;

/// Bigram model with `FixedFloor` and `AddK` smoothing.
pub mod language_model;

/// Probability, log-probability and per-step trace of a name.
pub mod scorer;

/// Greedy argmax completion of a prefix.
pub mod completion;

/// Two-model language decision.
pub mod discriminator;

pub use completion::{Completion, Stop, complete, complete_with_reason};
pub use discriminator::{LabeledModel, Verdict, classify, judge};
pub use frequency::FrequencyTable;
pub use language_model::{LanguageModel, LanguageModelBuilder, Smoothing};
pub use ngram::{Framing, extract_boundary_ngrams, extract_ngrams};
pub use scorer::{Score, Step, score};
pub use state::ContextState;
