//! Parameter sweep over personas x questions x sections x runs
//!
//! Every grid point gets a fresh agent and one timed `write` call. Points
//! run one after another; an error from any call aborts the sweep.

pub mod plot;
pub mod sample;
pub mod summary;
pub mod writer;

use colored::*;
use eyre::{Context, Result};
use std::time::Instant;

pub use sample::PerfSample;
pub use summary::Summary;

use crate::storm::{AgentSettings, StormAgent};

/// Ordered lists of values to sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    personas: Vec<u32>,
    questions: Vec<u32>,
    sections: Vec<u32>,
    runs: u32,
}

/// One element of the grid, `run_index` is 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPoint {
    pub settings: AgentSettings,
    pub run_index: u32,
}

impl Grid {
    pub fn new(personas: Vec<u32>, questions: Vec<u32>, sections: Vec<u32>, runs: u32) -> Result<Self> {
        for (name, values) in [("personas", &personas), ("questions", &questions), ("sections", &sections)] {
            if values.is_empty() {
                eyre::bail!("{} must not be empty", name);
            }
            if values.contains(&0) {
                eyre::bail!("{} values must be positive integers", name);
            }
        }
        if runs < 1 {
            eyre::bail!("runs must be >= 1");
        }

        Ok(Self {
            personas,
            questions,
            sections,
            runs,
        })
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Number of samples the sweep produces
    pub fn total(&self) -> usize {
        self.personas.len() * self.questions.len() * self.sections.len() * self.runs as usize
    }

    /// Points in sweep order: personas outer, then questions, sections, run
    pub fn points(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.personas.iter().flat_map(move |&p| {
            self.questions.iter().flat_map(move |&q| {
                self.sections.iter().flat_map(move |&s| {
                    (1..=self.runs).map(move |run_index| GridPoint {
                        settings: AgentSettings::new(p, q, s),
                        run_index,
                    })
                })
            })
        })
    }
}

/// Run the whole grid and collect one sample per point
pub async fn run_sweep<F>(grid: &Grid, topic: &str, test_mode: bool, build_agent: F) -> Result<Vec<PerfSample>>
where
    F: Fn(AgentSettings) -> Result<Box<dyn StormAgent>>,
{
    let total = grid.total();
    let mut samples = Vec::with_capacity(total);

    for (i, point) in grid.points().enumerate() {
        let settings = point.settings;
        println!(
            "{} personas={} questions={} sections={} run={}/{}",
            format!("[{}/{}]", i + 1, total).dimmed(),
            settings.personas,
            settings.questions,
            settings.sections,
            point.run_index,
            grid.runs()
        );

        let agent = build_agent(settings).context("Failed to construct agent")?;
        log::debug!("Agent ready: {:?}", agent.settings());

        let started = Instant::now();
        let result = agent.write(topic).await.context(format!(
            "write failed for personas={} questions={} sections={} run={}",
            settings.personas, settings.questions, settings.sections, point.run_index
        ))?;
        let elapsed = started.elapsed();

        let sample = PerfSample::record(topic, test_mode, settings, point.run_index, elapsed, &result);
        log::info!(
            "Sample {}/{}: {:?} run={} elapsed={:.4}s success={}",
            i + 1,
            total,
            settings,
            point.run_index,
            sample.elapsed_s(),
            sample.success()
        );
        if !sample.success() {
            log::warn!("Agent reported failure: {}", sample.error());
        }
        samples.push(sample);
    }

    Ok(samples)
}
