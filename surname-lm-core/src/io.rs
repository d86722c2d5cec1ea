use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::analysis::Informativeness;
use crate::corpus::{LabeledName, parse_lines};
use crate::error::Result;
use crate::model::frequency::FrequencyTable;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Loads a labeled corpus of `name,...,label` rows.
///
/// Rows that do not parse are skipped, see [`crate::corpus::parse_line`].
pub fn load_corpus<P: AsRef<Path>>(filename: P) -> Result<Vec<LabeledName>> {
	let path = filename.as_ref();
	let lines = read_file(path)?;
	let corpus = parse_lines(&lines);
	log::info!("loaded {} labeled names from {}", corpus.len(), path.display());
	Ok(corpus)
}

/// Creates `dir` (and its parents) if missing and returns it.
pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
	let dir = dir.as_ref();
	fs::create_dir_all(dir)?;
	Ok(dir.to_path_buf())
}

/// Writes `ngram,count` rows sorted by descending count.
pub fn write_frequency_table<W: Write>(table: &FrequencyTable, out: W) -> Result<()> {
	let mut out = BufWriter::new(out);
	writeln!(out, "ngram,count")?;
	for (gram, count) in table.sorted_by_count() {
		writeln!(out, "{gram},{count}")?;
	}
	out.flush()?;
	Ok(())
}

/// Writes `bigram,score,eng_pct,rus_pct` rows in the given order.
pub fn write_informativeness<W: Write>(ranking: &[Informativeness], out: W) -> Result<()> {
	let mut out = BufWriter::new(out);
	writeln!(out, "bigram,score,eng_pct,rus_pct")?;
	for row in ranking {
		writeln!(
			out,
			"{},{:.6},{:.2},{:.2}",
			row.bigram,
			row.score,
			row.english * 100.0,
			row.russian * 100.0
		)?;
	}
	out.flush()?;
	Ok(())
}

/// Creates (or truncates) `path` and runs `write` on it.
pub fn write_to<P, F>(path: P, write: F) -> Result<()>
where
	P: AsRef<Path>,
	F: FnOnce(File) -> Result<()>,
{
	let path = path.as_ref();
	write(File::create(path)?)?;
	log::info!("wrote {}", path.display());
	Ok(())
}
