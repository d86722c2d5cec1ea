use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::completion::DEFAULT_MAX_LENGTH;
use crate::model::language_model::PROBABILITY_FLOOR;

/// Parameters of a batch analysis run.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```json
/// { "data_path": "data/names.txt", "k_values": [0.5, 1.0] }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
	/// Labeled `name,...,label` dataset.
	pub data_path: PathBuf,
	/// Directory receiving the CSV tables.
	pub results_dir: PathBuf,
	/// Share of each language held out for evaluation, in `(0, 1)`.
	pub test_ratio: f64,
	/// Seed of the train/test shuffle.
	pub seed: u64,
	/// Smoothing constants compared on the held-out set.
	pub k_values: Vec<f64>,
	/// Near-zero k standing in for an unsmoothed model.
	pub baseline_k: f64,
	/// Number of n-grams listed in frequency reports.
	pub top: usize,
	pub max_completion_length: usize,
	/// Names scored by the likelihood report.
	pub sample_names: Vec<String>,
	/// Prefixes completed by the likelihood report.
	pub prefixes: Vec<String>,
}

impl Default for AnalysisConfig {
	fn default() -> Self {
		Self {
			data_path: PathBuf::from("data/Russian-and-English-dev.txt"),
			results_dir: PathBuf::from("results"),
			test_ratio: 0.2,
			seed: 42,
			k_values: vec![0.01, 0.1, 0.5, 1.0, 2.0],
			baseline_k: PROBABILITY_FLOOR,
			top: 20,
			max_completion_length: DEFAULT_MAX_LENGTH,
			sample_names: [
				"Fergus",
				"Angus",
				"Boston",
				"Austin",
				"Dankworth",
				"Denkworth",
				"Birtwistle",
				"Birdwhistle",
			]
			.map(str::to_owned)
			.to_vec(),
			prefixes: ["Lou", "Ber", "Cul", "Ede", "Zjo"].map(str::to_owned).to_vec(),
		}
	}
}

impl AnalysisConfig {
	/// Parses a JSON configuration and validates it.
	///
	/// # Errors
	/// Returns `Config` on malformed JSON and `InvalidArgument` on values
	/// rejected by [`Self::validate`].
	pub fn from_json(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads a JSON configuration file.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let json = std::fs::read_to_string(path)?;
		Self::from_json(&json)
	}

	/// Checks value ranges.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `test_ratio` is outside `(0, 1)`, if a k
	/// is not strictly positive and finite, or if an empty prefix is configured.
	///
	/// # Notes
	/// The sweep scores every held-out name, so `k == 0` would fail on the
	/// first unseen transition and is rejected up front.
	pub fn validate(&self) -> Result<()> {
		if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
			return Err(Error::invalid(format!("test_ratio must be in (0, 1), got {}", self.test_ratio)));
		}
		for k in self.k_values.iter().chain(std::iter::once(&self.baseline_k)) {
			if !(k.is_finite() && *k > 0.0) {
				return Err(Error::invalid(format!("k must be finite and > 0, got {k}")));
			}
		}
		if self.prefixes.iter().any(String::is_empty) {
			return Err(Error::invalid("completion prefixes must not be empty"));
		}
		Ok(())
	}
}
