use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

pub mod experiments;
pub mod landscape;
pub mod reader;

pub use experiments::Experiments;
pub use landscape::{Landscape, read_landscape};

use reader::{find_run_files, open_run_csv};

pub const RUN_PREFIX: &str = "run";
pub const EVAL_PREFIX: &str = "eval";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub rep: usize,
    pub round: u32,
    pub measurement_cost: Option<f64>,
    pub true_score: f64,
    pub model_score: Option<f64>,
    pub seq: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    round: u32,
    #[serde(default)]
    measurement_cost: Option<f64>,
    true_score: f64,
    #[serde(default)]
    model_score: Option<f64>,
    #[serde(default)]
    seq: Option<String>,
}

impl RawRecord {
    fn into_record(self, rep: usize) -> RunRecord {
        RunRecord {
            rep,
            round: self.round,
            measurement_cost: self.measurement_cost,
            true_score: self.true_score,
            model_score: self.model_score,
            seq: self.seq.filter(|s| !s.is_empty()),
        }
    }
}

/// All rows of one run directory, one rep per file.
#[derive(Debug, Clone, Default)]
pub struct RunTable {
    pub records: Vec<RunRecord>,
}

impl RunTable {
    pub fn new(records: Vec<RunRecord>) -> Self {
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn reps(&self) -> Vec<usize> {
        let set: BTreeSet<usize> = self.records.iter().map(|r| r.rep).collect();
        set.into_iter().collect()
    }

    pub fn n_reps(&self) -> usize {
        self.reps().len()
    }

    pub fn rounds(&self) -> Vec<u32> {
        let set: BTreeSet<u32> = self.records.iter().map(|r| r.round).collect();
        set.into_iter().collect()
    }

    pub fn max_round(&self) -> Option<u32> {
        self.records.iter().map(|r| r.round).max()
    }

    pub fn has_measurement_cost(&self) -> bool {
        self.records.iter().any(|r| r.measurement_cost.is_some())
    }

    pub fn filter<F>(&self, keep: F) -> RunTable
    where
        F: Fn(&RunRecord) -> bool,
    {
        RunTable::new(self.records.iter().filter(|r| keep(r)).cloned().collect())
    }

    pub fn filter_rep(&self, rep: usize) -> RunTable {
        self.filter(|r| r.rep == rep)
    }
}

/// Loads every `<prefix>*.csv` (or `.csv.gz`) file of `run_dir`.
///
/// Files are taken in file-name order and the i-th file becomes rep `i`.
/// The first line of each file is run metadata and is skipped.
pub fn read_data(run_dir: &Path, prefix: &str) -> Result<RunTable, InputError> {
    let files = find_run_files(run_dir, prefix)?;
    if files.is_empty() {
        return Err(InputError::MissingInput(format!(
            "no {}*.csv files in {}",
            prefix,
            run_dir.display()
        )));
    }
    info!(
        "discovered {} run files under {} (prefix {:?})",
        files.len(),
        run_dir.display(),
        prefix
    );

    let mut records = Vec::new();
    for (rep, path) in files.iter().enumerate() {
        let rows = read_run_file(path, rep)?;
        if rows.is_empty() {
            warn!("run file {} has no rows", path.display());
        }
        debug!("rep {} <- {} ({} rows)", rep, path.display(), rows.len());
        records.extend(rows);
    }

    Ok(RunTable::new(records))
}

pub fn read_run_file(path: &Path, rep: usize) -> Result<Vec<RunRecord>, InputError> {
    let mut reader = open_run_csv(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<RawRecord>() {
        let raw = row.map_err(|source| InputError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(raw.into_record(rep));
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
