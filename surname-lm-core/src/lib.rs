//! Character n-gram language models over surnames.
//!
//! This crate provides:
//! - N-gram extraction in raw and boundary-marked (`^name$`) framings
//! - Corpus-wide n-gram frequency tables
//! - Character bigram language models with fixed-floor or add-k smoothing
//! - Likelihood scoring, greedy completion and two-language discrimination
//! - Corpus loading, stratified splitting and evaluation helpers
//!
//! Models are built once and immutable afterwards; nothing here keeps
//! process-wide state.

/// N-gram extraction, frequency tables and the bigram language model.
pub mod model;

/// Language labels, labeled names and corpus splits.
pub mod corpus;

/// Informativeness ranking, classification metrics and smoothing sweeps.
pub mod analysis;

/// Analysis run parameters.
pub mod config;

/// File loading and CSV export.
pub mod io;

mod error;

pub use error::{Error, Result};
