//! CSV and JSONL result writers
//!
//! Both writers create missing parent directories and write the whole file
//! in one go after the sweep.

use eyre::{Context, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::sample::PerfSample;

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context(format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

/// Header row plus one row per sample
pub fn write_csv(path: &Path, samples: &[PerfSample]) -> Result<()> {
    ensure_parent(path)?;

    let file = File::create(path).context(format!("Failed to create {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    // Explicit header so an empty run still gets one
    writer
        .write_record(PerfSample::FIELDS)
        .context("Failed to write CSV header")?;
    for sample in samples {
        writer.serialize(sample).context("Failed to write CSV row")?;
    }
    writer.flush().context(format!("Failed to flush {}", path.display()))?;

    log::info!("Wrote {} rows to {}", samples.len(), path.display());
    Ok(())
}

/// One JSON object per line, non-ASCII kept as-is
pub fn write_jsonl(path: &Path, samples: &[PerfSample]) -> Result<()> {
    ensure_parent(path)?;

    let file = File::create(path).context(format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for sample in samples {
        let line = serde_json::to_string(sample).context("Failed to serialize sample")?;
        writeln!(writer, "{}", line).context(format!("Failed to write {}", path.display()))?;
    }
    writer.flush().context(format!("Failed to flush {}", path.display()))?;

    log::info!("Wrote {} lines to {}", samples.len(), path.display());
    Ok(())
}

pub fn read_csv(path: &Path) -> Result<Vec<PerfSample>> {
    let mut reader = csv::Reader::from_path(path).context(format!("Failed to open {}", path.display()))?;
    let mut samples = Vec::new();
    for row in reader.deserialize::<PerfSample>() {
        samples.push(row.context(format!("Failed to parse row in {}", path.display()))?);
    }
    Ok(samples)
}

pub fn read_jsonl(path: &Path) -> Result<Vec<PerfSample>> {
    let file = File::open(path).context(format!("Failed to open {}", path.display()))?;
    let mut samples = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.context(format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        samples.push(serde_json::from_str::<PerfSample>(&line).context("Failed to parse JSONL line")?);
    }
    Ok(samples)
}
