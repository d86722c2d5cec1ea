use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Error, Result};

/// Language of origin of a surname.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
	English,
	Russian,
}

impl Language {
	pub const ALL: [Language; 2] = [Language::English, Language::Russian];

	pub fn as_str(self) -> &'static str {
		match self {
			Language::English => "English",
			Language::Russian => "Russian",
		}
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.as_str())
	}
}

impl FromStr for Language {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"English" => Ok(Language::English),
			"Russian" => Ok(Language::Russian),
			other => Err(Error::invalid(format!("unknown language label {other:?}"))),
		}
	}
}

/// A surname with its language label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledName {
	pub name: String,
	pub language: Language,
}

impl LabeledName {
	pub fn new(name: impl Into<String>, language: Language) -> Self {
		Self { name: name.into(), language }
	}
}

/// Parses one `name,...,label` row.
///
/// Blank fields are dropped; the first remaining field is the name and the
/// last is the label. Returns `None` for rows with fewer than two fields, an
/// unknown label, or a name containing a space.
pub fn parse_line(line: &str) -> Option<LabeledName> {
	let line = line.trim().replace('\r', "");
	let fields: Vec<&str> = line.split(',').filter(|f| !f.trim().is_empty()).collect();
	if fields.len() < 2 {
		return None;
	}
	let name = fields[0].trim();
	let language: Language = fields[fields.len() - 1].trim().parse().ok()?;
	if name.contains(' ') {
		return None;
	}
	Some(LabeledName::new(name, language))
}

/// Parses every line, silently skipping rows rejected by [`parse_line`].
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<LabeledName> {
	let corpus: Vec<LabeledName> = lines.iter().filter_map(|l| parse_line(l.as_ref())).collect();
	let skipped = lines.len() - corpus.len();
	if skipped > 0 {
		log::debug!("skipped {skipped} malformed or unlabeled rows");
	}
	corpus
}

/// Names partitioned by language. Built once, read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorpusSplit {
	english: Vec<String>,
	russian: Vec<String>,
}

impl CorpusSplit {
	pub fn english(&self) -> &[String] {
		&self.english
	}

	pub fn russian(&self) -> &[String] {
		&self.russian
	}

	pub fn names(&self, language: Language) -> &[String] {
		match language {
			Language::English => &self.english,
			Language::Russian => &self.russian,
		}
	}

	pub fn len(&self) -> usize {
		self.english.len() + self.russian.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Partitions labeled names into per-language lists, keeping input order.
pub fn split_by_language(corpus: &[LabeledName]) -> CorpusSplit {
	let mut split = CorpusSplit::default();
	for entry in corpus {
		match entry.language {
			Language::English => split.english.push(entry.name.clone()),
			Language::Russian => split.russian.push(entry.name.clone()),
		}
	}
	split
}

/// Train and test partitions of a labeled corpus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainTestSplit {
	pub train: Vec<LabeledName>,
	pub test: Vec<LabeledName>,
}

impl TrainTestSplit {
	/// Names of the test partition.
	pub fn test_names(&self) -> Vec<&str> {
		self.test.iter().map(|e| e.name.as_str()).collect()
	}

	/// Labels of the test partition.
	pub fn test_labels(&self) -> Vec<Language> {
		self.test.iter().map(|e| e.language).collect()
	}
}

/// Stratified, seeded train/test split.
///
/// Each language is shuffled independently and `round(test_ratio * count)`
/// of its names go to the test partition, so both partitions keep the label
/// proportions of the input. The same seed always yields the same split.
///
/// # Errors
/// Returns `InvalidArgument` if `test_ratio` is not in `(0, 1)`.
pub fn train_test_split(corpus: &[LabeledName], test_ratio: f64, seed: u64) -> Result<TrainTestSplit> {
	if !(test_ratio > 0.0 && test_ratio < 1.0) {
		return Err(Error::invalid(format!("test ratio must be in (0, 1), got {test_ratio}")));
	}

	let mut rng = StdRng::seed_from_u64(seed);
	let mut train = Vec::new();
	let mut test = Vec::new();

	for language in Language::ALL {
		let mut group: Vec<&LabeledName> = corpus.iter().filter(|e| e.language == language).collect();
		group.shuffle(&mut rng);
		let n_test = (test_ratio * group.len() as f64).round() as usize;
		let (test_part, train_part) = group.split_at(n_test);
		test.extend(test_part.iter().map(|e| (*e).clone()));
		train.extend(train_part.iter().map(|e| (*e).clone()));
	}

	log::debug!("split {} names into {} train / {} test", corpus.len(), train.len(), test.len());
	Ok(TrainTestSplit { train, test })
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Vec<LabeledName> {
		let mut corpus = Vec::new();
		for i in 0..10 {
			corpus.push(LabeledName::new(format!("eng{i}"), Language::English));
		}
		for i in 0..20 {
			corpus.push(LabeledName::new(format!("rus{i}"), Language::Russian));
		}
		corpus
	}

	#[test]
	fn parses_rows_like_the_dataset() {
		assert_eq!(parse_line("Smith,English"), Some(LabeledName::new("Smith", Language::English)));
		assert_eq!(parse_line("Ivanov,,Russian\r"), Some(LabeledName::new("Ivanov", Language::Russian)));
		assert_eq!(parse_line(" Petrov , x , Russian "), Some(LabeledName::new("Petrov", Language::Russian)));
		assert_eq!(parse_line("Van Dyke,English"), None);
		assert_eq!(parse_line("Dubois,French"), None);
		assert_eq!(parse_line("Lonely"), None);
		assert_eq!(parse_line(""), None);
	}

	#[test]
	fn parse_lines_skips_rejected_rows() {
		let corpus = parse_lines(&["Smith,English", "garbage", "Ivanov,Russian"]);
		assert_eq!(corpus.len(), 2);
	}

	#[test]
	fn language_labels_round_trip_through_text() {
		for language in Language::ALL {
			assert_eq!(language.to_string().parse::<Language>().unwrap(), language);
		}
		assert!("english".parse::<Language>().is_err());
		assert_eq!(format!("{:<9}|", Language::Russian), "Russian  |");
	}

	#[test]
	fn split_by_language_keeps_order() {
		let corpus = vec![
			LabeledName::new("b", Language::English),
			LabeledName::new("x", Language::Russian),
			LabeledName::new("a", Language::English),
		];
		let split = split_by_language(&corpus);
		assert_eq!(split.english(), ["b", "a"]);
		assert_eq!(split.names(Language::Russian), ["x"]);
		assert_eq!(split.len(), 3);
	}

	#[test]
	fn stratified_split_is_disjoint_and_proportional() {
		let corpus = sample();
		let split = train_test_split(&corpus, 0.2, 42).unwrap();
		assert_eq!(split.train.len() + split.test.len(), corpus.len());
		let test_english = split.test.iter().filter(|e| e.language == Language::English).count();
		let test_russian = split.test.iter().filter(|e| e.language == Language::Russian).count();
		assert_eq!(test_english, 2);
		assert_eq!(test_russian, 4);
		for entry in &split.test {
			assert!(!split.train.contains(entry));
		}
		assert_eq!(split.test_names().len(), split.test_labels().len());
	}

	#[test]
	fn split_is_deterministic_for_a_seed() {
		let corpus = sample();
		assert_eq!(train_test_split(&corpus, 0.3, 7).unwrap(), train_test_split(&corpus, 0.3, 7).unwrap());
	}

	#[test]
	fn split_rejects_degenerate_ratios() {
		let corpus = sample();
		assert!(train_test_split(&corpus, 0.0, 42).is_err());
		assert!(train_test_split(&corpus, 1.0, 42).is_err());
	}
}
