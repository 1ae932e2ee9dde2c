//! Frame discovery and per-timestep loading.
//!
//! The filter run writes one CSV per resource per timestep, with the index
//! embedded in the filename. Frames are assumed dense from 0 to the highest
//! index found; a hole shows up as a load failure for that frame, which
//! aborts the run rather than producing a video with a silently dropped
//! frame.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

use crate::types::{Particle, SensorReading, StateRecord};

pub const TRUE_STATE_DIR: &str = "true_state_results";
const ESTIMATED_DIR: &str = "estimated_results";
const PARTICLE_DIR: &str = "pf_estimates";
const SENSOR_DIR: &str = "sensor_readings";

/// Everything needed to draw one timestep.
#[derive(Debug, Clone)]
pub struct FrameData {
    pub truth: StateRecord,
    pub estimate: StateRecord,
    pub particles: Vec<Particle>,
    pub actual_reading: f64,
    pub noisy_reading: f64,
}

/// Highest frame index present under `<results_root>/true_state_results`.
///
/// Filenames that don't match the expected shape are skipped; they never
/// abort the scan. A missing directory or a directory with no matching
/// files is fatal.
pub fn max_frame_index(results_root: &Path) -> Result<usize> {
    let dir = results_root.join(TRUE_STATE_DIR);
    let entries = fs::read_dir(&dir)
        .with_context(|| format!("reading frame directory {}", dir.display()))?;

    let mut max = None;
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        if let Some(index) = entry.file_name().to_str().and_then(parse_frame_index) {
            max = Some(max.map_or(index, |m: usize| m.max(index)));
        }
    }
    max.with_context(|| format!("no frame files found in {}", dir.display()))
}

/// Extracts the frame index from a result filename.
///
/// Accepts exactly `<a>_<b>_<index>.csv`, e.g. `true_state_12.csv`; anything
/// else (wrong extension, extra tokens, non-numeric index) yields `None`.
pub fn parse_frame_index(name: &str) -> Option<usize> {
    let stem = name.strip_suffix(".csv")?;
    let mut tokens = stem.split('_');
    let (_, _, index) = (tokens.next()?, tokens.next()?, tokens.next()?);
    if tokens.next().is_some() {
        return None;
    }
    index.parse().ok()
}

/// Loads the five CSV resources for frame `index`.
///
/// A missing file, wrong row count, or missing column fails with an error
/// naming the offending path; callers add the frame index.
pub fn load_frame(results_root: &Path, index: usize) -> Result<FrameData> {
    let truth = read_single(
        &results_root
            .join(TRUE_STATE_DIR)
            .join(format!("true_state_{index}.csv")),
    )?;
    let estimate = read_single(
        &results_root
            .join(ESTIMATED_DIR)
            .join(format!("estimated_state_{index}.csv")),
    )?;
    let particles: Vec<Particle> = read_rows(
        &results_root
            .join(PARTICLE_DIR)
            .join(format!("pf_estimates_{index}.csv")),
    )?;
    let actual: SensorReading = read_single(
        &results_root
            .join(SENSOR_DIR)
            .join(format!("actual_sensor_reading_{index}.csv")),
    )?;
    let noisy: SensorReading = read_single(
        &results_root
            .join(SENSOR_DIR)
            .join(format!("noisy_sensor_reading_{index}.csv")),
    )?;

    Ok(FrameData {
        truth,
        estimate,
        particles,
        actual_reading: actual.reading,
        noisy_reading: noisy.reading,
    })
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.with_context(|| format!("parsing {}", path.display()))?);
    }
    if rows.is_empty() {
        bail!("{} contains no data rows", path.display());
    }
    Ok(rows)
}

fn read_single<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let mut rows: Vec<T> = read_rows(path)?;
    if rows.len() != 1 {
        bail!(
            "{} holds {} rows, expected exactly one",
            path.display(),
            rows.len()
        );
    }
    Ok(rows.remove(0))
}
