//! Benchmark command
//!
//! Sweeps the grid, then writes CSV + JSONL, prints the summary table and
//! optionally plots.

use colored::*;
use eyre::{Context, Result};
use std::path::{Path, PathBuf};

use crate::bench::{self, Grid, Summary, plot, writer};
use crate::cli::BenchArgs;
use crate::config::Config;
use crate::credentials::Credentials;
use crate::storm::{AgentFactory, print_handler};

pub fn run(args: BenchArgs, config: &Config) -> Result<()> {
    let grid = Grid::new(args.personas.0, args.questions.0, args.sections.0, args.runs)?;

    let out_csv = resolve(args.out_csv, config.output.csv_path());
    let out_jsonl = resolve(args.out_jsonl, config.output.jsonl_path());
    let out_plot = resolve(args.out_plot, config.output.plot_path());

    if args.plot && !plot::AVAILABLE {
        log::warn!("--plot requested but plot support is not compiled in");
    }

    let on_event = args.print_events.then(print_handler);
    let factory = if args.mock {
        AgentFactory::mock(config.mock.clone(), on_event)
    } else {
        let credentials = Credentials::from_env(&config.api)?;
        AgentFactory::live(config.api.clone(), credentials, on_event)
    };

    log::info!(
        "Benchmarking {} samples (mock={}) for topic {:?}",
        grid.total(),
        factory.is_mock(),
        args.topic
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    let samples = rt.block_on(bench::run_sweep(&grid, &args.topic, factory.is_mock(), |settings| {
        factory.build(settings)
    }))?;

    writer::write_csv(&out_csv, &samples)?;
    writer::write_jsonl(&out_jsonl, &samples)?;

    println!();
    println!("Saved CSV:   {}", out_csv.display().to_string().green());
    println!("Saved JSONL: {}", out_jsonl.display().to_string().green());

    let summary = Summary::from_samples(&samples);
    println!();
    println!("{}", summary.render());
    println!();

    if args.plot {
        plot_or_skip(&out_plot, &summary)?;
    }

    Ok(())
}

/// Render the plot, or tell the user why it was skipped
pub fn plot_or_skip(path: &Path, summary: &Summary) -> Result<()> {
    match plot::render(path, summary)? {
        Some(saved) => println!("Saved plot:  {}", saved.display().to_string().green()),
        None => println!(
            "{} Plot skipped: plot support not compiled in. Rebuild with {}.",
            "⚠".yellow(),
            "--features plot".cyan()
        ),
    }
    Ok(())
}

fn resolve(path: Option<PathBuf>, default: PathBuf) -> PathBuf {
    Config::expand_path(&path.unwrap_or(default))
}
