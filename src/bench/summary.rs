//! Mean elapsed time per (personas, sections) pair
//!
//! The question count is not part of the key: samples that differ only in
//! question count are averaged together.

use std::collections::{BTreeMap, BTreeSet};

use super::sample::PerfSample;

/// Samples grouped by (personas, sections)
#[derive(Debug, Clone, Default)]
pub struct Summary {
    groups: BTreeMap<(u32, u32), Vec<f64>>,
}

impl Summary {
    pub fn from_samples(samples: &[PerfSample]) -> Self {
        let mut groups: BTreeMap<(u32, u32), Vec<f64>> = BTreeMap::new();
        for sample in samples {
            groups
                .entry((sample.personas(), sample.sections()))
                .or_default()
                .push(sample.elapsed_s());
        }
        Self { groups }
    }

    /// Distinct persona counts, ascending
    pub fn personas(&self) -> Vec<u32> {
        self.groups.keys().map(|(p, _)| *p).collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// Distinct section counts, ascending
    pub fn sections(&self) -> Vec<u32> {
        self.groups.keys().map(|(_, s)| *s).collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// Mean elapsed seconds, `None` when no sample has this pair
    pub fn mean(&self, personas: u32, sections: u32) -> Option<f64> {
        self.groups
            .get(&(personas, sections))
            .filter(|xs| !xs.is_empty())
            .map(|xs| xs.iter().sum::<f64>() / xs.len() as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Render the personas x sections grid
    pub fn render(&self) -> String {
        let sections = self.sections();

        let mut header = vec!["personas\\sections".to_string()];
        header.extend(sections.iter().map(|s| s.to_string()));
        let header = header.join(" | ");

        let mut lines = vec![header.clone(), "-".repeat(header.chars().count())];
        for p in self.personas() {
            let mut row = vec![p.to_string()];
            for &s in &sections {
                row.push(match self.mean(p, s) {
                    Some(mean) => format!("{:.2}s", mean),
                    None => "-".to_string(),
                });
            }
            lines.push(row.join(" | "));
        }
        lines.join("\n")
    }
}
