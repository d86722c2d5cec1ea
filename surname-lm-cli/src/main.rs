use surname_lm_core::analysis::{SweepResult, best_by_f1, evaluate_smoothing, informativeness, sweep_smoothing};
use surname_lm_core::config::AnalysisConfig;
use surname_lm_core::corpus::{CorpusSplit, Language, LabeledName, split_by_language, train_test_split};
use surname_lm_core::io::{ensure_dir, load_corpus, write_frequency_table, write_informativeness, write_to};
use surname_lm_core::model::{Framing, FrequencyTable, LanguageModel, complete_with_reason, score};

const MAX_LISTED_ERRORS: usize = 15;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	// Optional JSON config as first argument, defaults otherwise
	let config = match std::env::args().nth(1) {
		Some(path) => AnalysisConfig::load(&path)?,
		None => AnalysisConfig::default(),
	};
	log::debug!("{config:?}");

	let corpus = load_corpus(&config.data_path)?;
	let split = split_by_language(&corpus);
	println!(
		"Loaded {} names ({} English, {} Russian)",
		corpus.len(),
		split.english().len(),
		split.russian().len()
	);

	ensure_dir(&config.results_dir)?;

	frequency_report(&config, &split)?;
	informativeness_report(&config, &split)?;
	likelihood_report(&config, &split)?;
	smoothing_report(&config, &corpus)?;

	Ok(())
}

/// Bigram and trigram tables per language, printed and saved as CSV.
fn frequency_report(config: &AnalysisConfig, split: &CorpusSplit) -> Result<(), Box<dyn std::error::Error>> {
	for n in [2, 3] {
		for language in Language::ALL {
			let table = FrequencyTable::from_names(split.names(language), n, Framing::Raw)?;
			let total = table.total();

			println!("\n{}", "=".repeat(50));
			println!("{n}-gram frequency analysis: {language}");
			println!("{}", "=".repeat(50));
			println!("Total {n}-grams counted: {total}");
			println!("Unique {n}-grams: {}", table.distinct());
			println!("\nTop {} most frequent:", config.top);
			for (rank, (gram, count)) in table.most_common(config.top).into_iter().enumerate() {
				println!("  {:>2}. '{gram}' {count} ({:.1}%)", rank + 1, table.relative_frequency(gram) * 100.0);
			}
			let hapax = table.hapax();
			println!("Appearing exactly once: {}", hapax.len());
			if !hapax.is_empty() {
				println!("  Examples: {:?}", &hapax[..hapax.len().min(10)]);
			}
			if n == 2 {
				let unobserved = table.unobserved_letter_bigrams();
				println!("Unobserved letter-only bigrams: {}", unobserved.len());
				if !unobserved.is_empty() {
					println!("  Examples: {:?}", &unobserved[..unobserved.len().min(5)]);
				}
			}

			let file = config
				.results_dir
				.join(format!("{}_{}.csv", language.as_str().to_lowercase(), gram_name(n)));
			write_to(&file, |f| write_frequency_table(&table, f))?;
		}
	}
	Ok(())
}

fn gram_name(n: usize) -> String {
	match n {
		2 => "bigrams".to_owned(),
		3 => "trigrams".to_owned(),
		n => format!("{n}grams"),
	}
}

/// Bigrams ranked by how differently the two languages use them.
fn informativeness_report(config: &AnalysisConfig, split: &CorpusSplit) -> Result<(), Box<dyn std::error::Error>> {
	let english = FrequencyTable::from_names(split.english(), 2, Framing::Raw)?;
	let russian = FrequencyTable::from_names(split.russian(), 2, Framing::Raw)?;
	let ranking = informativeness(&english, &russian);

	println!("\n{}", "=".repeat(50));
	println!("Least informative bigrams");
	println!("{}", "=".repeat(50));
	println!("{:<5} {:<8} {:<10} {:<10} {:<10}", "Rank", "Bigram", "Score", "Eng Freq", "Rus Freq");
	for (rank, row) in ranking.iter().take(config.top).enumerate() {
		println!(
			"{:<5} '{}'     {:.6}  {:.2}%      {:.2}%",
			rank + 1,
			row.bigram,
			row.score,
			row.english * 100.0,
			row.russian * 100.0
		);
	}
	println!("\nMost informative bigrams:");
	for (rank, row) in ranking.iter().rev().take(config.top).enumerate() {
		println!("{:<5} '{}'     {:.6}", rank + 1, row.bigram, row.score);
	}

	let file = config.results_dir.join("informativeness.csv");
	write_to(&file, |f| write_informativeness(&ranking, f))?;
	Ok(())
}

/// Likelihood of sample names and greedy completions under the English model.
fn likelihood_report(config: &AnalysisConfig, split: &CorpusSplit) -> Result<(), Box<dyn std::error::Error>> {
	println!("\nTraining on {} English names...", split.english().len());
	let model = LanguageModel::fixed_floor(split.english())?;

	println!("\n--- Likelihoods ---");
	println!("{:<15} {:<20} {:<20}", "Name", "Log-Likelihood", "Probability");
	println!("{}", "-".repeat(55));
	let mut worst: Option<(&str, f64)> = None;
	for name in &config.sample_names {
		let s = score(&model, name)?;
		println!("{:<15} {:<20.4} {:.4e}", name, s.log_probability, s.probability);
		let path: Vec<String> = s.trace.iter().map(ToString::to_string).collect();
		log::debug!("{name}: {}", path.join(" "));
		if worst.is_none_or(|(_, lp)| s.log_probability < lp) {
			worst = Some((name.as_str(), s.log_probability));
		}
	}

	println!("\n--- Most likely completions ---");
	for prefix in &config.prefixes {
		let c = complete_with_reason(&model, prefix, config.max_completion_length)?;
		println!("Prefix: {:<5} -> Completion: {} ({:?})", prefix, c.text, c.stop);
	}

	if let Some((name, log_probability)) = worst {
		println!("\nLowest likelihood name: {name} with log-prob {log_probability:.4}");
	}
	Ok(())
}

/// Add-k sweep on a stratified held-out split, against a near-unsmoothed baseline.
fn smoothing_report(config: &AnalysisConfig, corpus: &[LabeledName]) -> Result<(), Box<dyn std::error::Error>> {
	let split = train_test_split(corpus, config.test_ratio, config.seed)?;
	println!("\n{}", "=".repeat(55));
	println!("Smoothing (add-k language models)");
	println!("{}", "=".repeat(55));
	println!("Training set: {} names", split.train.len());
	println!("Test set:     {} names", split.test.len());
	println!("Equation: P(w_i|w_{{i-1}}) = (C(w_{{i-1}},w_i) + k) / (C(w_{{i-1}}) + k*V)");

	let baseline = evaluate_smoothing(&split.train, &split.test, config.baseline_k)?;
	let results = sweep_smoothing(&split.train, &split.test, &config.k_values)?;

	println!("\nBaseline (k = {:e}):", config.baseline_k);
	print_confusion(&baseline);

	println!("\n{:<8} {:<12} {:<12} {:<12}", "k", "Precision", "Recall", "F1");
	println!("{}", "-".repeat(44));
	for r in &results {
		println!("{:<8} {:<12.4} {:<12.4} {:<12.4}", r.k, r.metrics.precision, r.metrics.recall, r.metrics.f1);
	}

	let Some(best) = best_by_f1(&results) else {
		log::warn!("no smoothing constant configured, skipping comparison");
		return Ok(());
	};
	println!("\nBest k = {}", best.k);
	print_confusion(best);

	println!("\n{:<12} {:<12} {:<20}", "Metric", "Baseline", format!("Smoothed(k={})", best.k));
	println!("{}", "-".repeat(44));
	println!("{:<12} {:<12.4} {:<20.4}", "Precision", baseline.metrics.precision, best.metrics.precision);
	println!("{:<12} {:<12.4} {:<20.4}", "Recall", baseline.metrics.recall, best.metrics.recall);
	println!("{:<12} {:<12.4} {:<20.4}", "F1", baseline.metrics.f1, best.metrics.f1);

	print_report(best);
	print_errors(best);
	Ok(())
}

/// Per-class precision, recall and F1.
fn print_report(result: &SweepResult) {
	println!("\nClassification report (k = {}):", result.k);
	println!("{:<10} {:<12} {:<12} {:<12}", "Class", "Precision", "Recall", "F1");
	for language in Language::ALL {
		let m = result.confusion.metrics(language);
		println!("{:<10} {:<12.4} {:<12.4} {:<12.4}", language, m.precision, m.recall, m.f1);
	}
}

/// Count of held-out errors and the first few misclassified names.
fn print_errors(result: &SweepResult) {
	let errors = &result.misclassified;
	println!("\nTotal errors: {} / {}", errors.len(), result.confusion.total());
	if errors.is_empty() {
		return;
	}
	println!("{:<20} {:<10} {:<10}", "Name", "True", "Predicted");
	for e in errors.iter().take(MAX_LISTED_ERRORS) {
		println!("{:<20} {:<10} {:<10}", e.name, e.actual, e.predicted);
	}
	if errors.len() > MAX_LISTED_ERRORS {
		println!("... and {} more", errors.len() - MAX_LISTED_ERRORS);
	}
}

fn print_confusion(result: &SweepResult) {
	let cm = &result.confusion;
	println!("Confusion matrix (accuracy {:.4}):", cm.accuracy());
	println!("              Predicted");
	println!("            Eng    Rus");
	println!(
		"Actual Eng  {:<6} {}",
		cm.get(Language::English, Language::English),
		cm.get(Language::English, Language::Russian)
	);
	println!(
		"       Rus  {:<6} {}",
		cm.get(Language::Russian, Language::English),
		cm.get(Language::Russian, Language::Russian)
	);
}
