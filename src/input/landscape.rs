use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::input::reader::open_maybe_gz;
use crate::input::{InputError, RunTable};

/// Sequence-to-score map of a fitness landscape, in first-seen order.
#[derive(Debug, Clone)]
pub struct Landscape {
    pub name: String,
    pub sequences: Vec<(String, f64)>,
    pub seq_len: usize,
}

impl Landscape {
    pub fn new(name: &str, pairs: Vec<(String, f64)>) -> Result<Self, InputError> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut sequences: Vec<(String, f64)> = Vec::with_capacity(pairs.len());
        for (seq, score) in pairs {
            if let Some(&idx) = index.get(&seq) {
                sequences[idx].1 = score;
                continue;
            }
            index.insert(seq.clone(), sequences.len());
            sequences.push((seq, score));
        }

        let seq_len = match sequences.first() {
            Some((seq, _)) => seq.len(),
            None => {
                return Err(InputError::InvalidInput(format!(
                    "landscape {name} has no sequences"
                )));
            }
        };
        if let Some((seq, _)) = sequences.iter().find(|(s, _)| s.len() != seq_len) {
            return Err(InputError::InvalidInput(format!(
                "landscape {name}: sequence {seq:?} has length {} (expected {seq_len})",
                seq.len()
            )));
        }
        if let Some((seq, _)) = sequences.iter().find(|(s, _)| !s.is_ascii()) {
            return Err(InputError::InvalidInput(format!(
                "landscape {name}: sequence {seq:?} is not ASCII"
            )));
        }

        Ok(Self {
            name: name.to_string(),
            sequences,
            seq_len,
        })
    }

    /// Builds a landscape from the measured sequences of a run table.
    pub fn from_run_table(name: &str, table: &RunTable) -> Result<Self, InputError> {
        let pairs: Vec<(String, f64)> = table
            .records
            .iter()
            .filter_map(|r| r.seq.as_ref().map(|s| (s.clone(), r.true_score)))
            .collect();
        if pairs.len() < table.records.len() {
            warn!(
                "landscape {}: {} rows without a seq column value were skipped",
                name,
                table.records.len() - pairs.len()
            );
        }
        Self::new(name, pairs)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }
}

pub fn read_landscape(path: &Path, score_column: &str) -> Result<Landscape, InputError> {
    let reader = open_maybe_gz(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let csv_err = |source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let seq_idx = headers
        .iter()
        .position(|h| h == "seq")
        .ok_or_else(|| InputError::MissingInput(format!("{}: no seq column", path.display())))?;
    let score_idx = headers
        .iter()
        .position(|h| h == score_column)
        .ok_or_else(|| {
            InputError::MissingInput(format!(
                "{}: no {} column",
                path.display(),
                score_column
            ))
        })?;

    let mut pairs = Vec::new();
    for (line, row) in rdr.records().enumerate() {
        let row = row.map_err(csv_err)?;
        let seq = row.get(seq_idx).unwrap_or("").to_string();
        let raw = row.get(score_idx).unwrap_or("");
        let score: f64 = raw.parse().map_err(|_| {
            InputError::InvalidInput(format!(
                "{}: invalid score {:?} on data line {}",
                path.display(),
                raw,
                line + 1
            ))
        })?;
        pairs.push((seq, score));
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("landscape");
    let landscape = Landscape::new(name, pairs)?;
    info!(
        "loaded landscape {} ({} sequences of length {})",
        landscape.name,
        landscape.len(),
        landscape.seq_len
    );
    Ok(landscape)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/landscape.rs"]
mod tests;
