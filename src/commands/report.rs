//! Re-render the summary for a saved results file

use eyre::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::bench::plot_or_skip;
use crate::bench::{PerfSample, Summary, writer};
use crate::config::Config;

pub fn run(input: &Path, plot: bool, out_plot: Option<PathBuf>, config: &Config) -> Result<()> {
    let input = Config::expand_path(input);
    let samples = load(&input)?;
    log::info!("Loaded {} samples from {}", samples.len(), input.display());

    let failed = samples.iter().filter(|s| !s.success()).count();
    println!("{} samples ({} failed) from {}", samples.len(), failed, input.display());
    if let (Some(first), Some(last)) = (samples.first(), samples.last()) {
        println!("Topic: {}  ({} .. {})", first.topic(), first.ts_utc(), last.ts_utc());
    }

    for line in describe(&samples) {
        println!("{}", line);
    }

    let summary = Summary::from_samples(&samples);
    if summary.is_empty() {
        println!("No samples to summarize");
        return Ok(());
    }
    println!();
    println!("{}", summary.render());
    println!();

    if plot {
        let path = Config::expand_path(&out_plot.unwrap_or_else(|| config.output.plot_path()));
        plot_or_skip(&path, &summary)?;
    }
    Ok(())
}

/// Sweep dimensions the summary grid does not show
fn describe(samples: &[PerfSample]) -> Vec<String> {
    if samples.is_empty() {
        return Vec::new();
    }

    let mode = match (samples.iter().any(|s| s.test_mode()), samples.iter().any(|s| !s.test_mode())) {
        (true, false) => "mock",
        (false, true) => "live",
        _ => "mixed",
    };
    let questions: BTreeSet<u32> = samples.iter().map(|s| s.questions()).collect();
    let questions: Vec<String> = questions.iter().map(|q| q.to_string()).collect();
    let runs = samples.iter().map(|s| s.run_index()).max().unwrap_or(0);

    let mut lines = vec![format!(
        "Mode: {}  questions: {}  runs: {}",
        mode,
        questions.join(","),
        runs
    )];

    let ok: Vec<&PerfSample> = samples.iter().filter(|s| s.success()).collect();
    if !ok.is_empty() {
        let n = ok.len() as f64;
        let chars = ok.iter().map(|s| s.article_chars() as f64).sum::<f64>() / n;
        let events = ok.iter().map(|s| s.events_count() as f64).sum::<f64>() / n;
        lines.push(format!("Mean article: {:.0} chars, {:.1} events", chars, events));
    }
    lines
}

fn load(path: &Path) -> Result<Vec<PerfSample>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => writer::read_csv(path),
        Some("jsonl") | Some("json") => writer::read_jsonl(path),
        _ => eyre::bail!("Unsupported results file {} (expected .csv or .jsonl)", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::sample::fixture;
    use tempfile::TempDir;

    #[test]
    fn test_load_by_extension() {
        let dir = TempDir::new().unwrap();
        let samples = vec![fixture(1, 1, 1, 1, 0.5), fixture(2, 1, 1, 1, 1.5)];

        let csv_path = dir.path().join("perf.csv");
        writer::write_csv(&csv_path, &samples).unwrap();
        assert_eq!(load(&csv_path).unwrap(), samples);

        let jsonl_path = dir.path().join("perf.jsonl");
        writer::write_jsonl(&jsonl_path, &samples).unwrap();
        assert_eq!(load(&jsonl_path).unwrap(), samples);
    }

    #[test]
    fn test_describe_shows_hidden_dimensions() {
        let samples = vec![
            fixture(1, 1, 1, 1, 0.5),
            fixture(1, 2, 1, 1, 0.5),
            fixture(1, 2, 1, 2, 0.5),
        ];
        let lines = describe(&samples);
        assert_eq!(lines[0], "Mode: mock  questions: 1,2  runs: 2");
        assert_eq!(lines[1], "Mean article: 100 chars, 10.0 events");
        assert!(describe(&[]).is_empty());
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("perf.txt");
        std::fs::write(&path, "").unwrap();
        assert!(load(&path).is_err());
    }
}
