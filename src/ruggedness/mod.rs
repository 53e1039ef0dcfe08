use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::input::Landscape;
use crate::stats::mean;

pub mod combinations;
pub mod estimator;

pub use combinations::combinations;
pub use estimator::{RoughnessToSlope, RuggednessEstimator};

pub const DEFAULT_SUBGRAPH_SIZE: usize = 4;
pub const AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";

#[derive(Debug, thiserror::Error)]
pub enum RuggednessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("landscape {name}: sequence length {seq_len} is shorter than the subgraph size {subgraph_size}")]
    SubgraphTooLarge {
        name: String,
        seq_len: usize,
        subgraph_size: usize,
    },
    #[error("{landscapes} landscapes but {files} cache files")]
    CacheMismatch { landscapes: usize, files: usize },
    #[error("invalid cache file {}: {reason}", path.display())]
    InvalidCache { path: PathBuf, reason: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Clone, Copy)]
pub struct RsParams<'a> {
    pub subgraph_size: usize,
    pub amino_acids: &'a str,
}

impl Default for RsParams<'_> {
    fn default() -> Self {
        Self {
            subgraph_size: DEFAULT_SUBGRAPH_SIZE,
            amino_acids: AMINO_ACIDS,
        }
    }
}

/// Sequences carrying `aa` at every position in `fixed`.
pub fn subgraph(landscape: &Landscape, fixed: &[usize], aa: u8) -> Vec<(String, f64)> {
    landscape
        .sequences
        .iter()
        .filter(|(seq, _)| {
            let bytes = seq.as_bytes();
            fixed.iter().all(|&pos| bytes.get(pos) == Some(&aa))
        })
        .cloned()
        .collect()
}

/// Ruggedness of every subgraph of `landscape`.
///
/// When the sequence length equals the subgraph size the whole landscape is
/// the only subgraph. Otherwise every `subgraph_size` set of free positions
/// is paired with every residue held at the remaining positions.
pub fn subgraph_values(
    landscape: &Landscape,
    params: RsParams<'_>,
    estimator: &dyn RuggednessEstimator,
) -> Result<Vec<f64>, RuggednessError> {
    let seq_len = landscape.seq_len;
    if seq_len < params.subgraph_size {
        return Err(RuggednessError::SubgraphTooLarge {
            name: landscape.name.clone(),
            seq_len,
            subgraph_size: params.subgraph_size,
        });
    }
    if seq_len == params.subgraph_size {
        return Ok(vec![estimator.ruggedness(&landscape.sequences)]);
    }
    if !params.amino_acids.is_ascii() {
        return Err(RuggednessError::InvalidArgument(format!(
            "amino acid alphabet {:?} is not ASCII",
            params.amino_acids
        )));
    }

    let positions: Vec<usize> = (0..seq_len).collect();
    let mut values = Vec::new();
    for free in combinations(&positions, params.subgraph_size) {
        let fixed: Vec<usize> = positions
            .iter()
            .copied()
            .filter(|p| !free.contains(p))
            .collect();
        for aa in params.amino_acids.bytes() {
            let sub = subgraph(landscape, &fixed, aa);
            let value = estimator.ruggedness(&sub);
            debug!(
                "{}: free {:?}, residue {}: {} sequences, rs {}",
                landscape.name,
                free,
                aa as char,
                sub.len(),
                value
            );
            values.push(value);
        }
    }
    Ok(values)
}

pub fn read_cache(path: &Path) -> Result<Vec<f64>, RuggednessError> {
    let csv_err = |source| RuggednessError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut values = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(csv_err)?;
        let raw = row.get(0).unwrap_or("");
        let value = if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
            f64::NAN
        } else {
            raw.parse().map_err(|_| RuggednessError::InvalidCache {
                path: path.to_path_buf(),
                reason: format!("{raw:?} is not a number"),
            })?
        };
        values.push(value);
    }
    Ok(values)
}

pub fn write_cache(path: &Path, values: &[f64]) -> Result<(), RuggednessError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let csv_err = |source| RuggednessError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::Writer::from_writer(File::create(path)?);
    wtr.write_record(["0"]).map_err(csv_err)?;
    for value in values {
        let field = if value.is_nan() {
            String::new()
        } else {
            value.to_string()
        };
        wtr.write_record([field]).map_err(csv_err)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Mean subgraph ruggedness per landscape.
///
/// With `files`, each landscape's subgraph values are read from its cache
/// file when it exists and written to it otherwise.
pub fn rs(
    landscapes: &[Landscape],
    files: Option<&[PathBuf]>,
    params: RsParams<'_>,
    estimator: &dyn RuggednessEstimator,
) -> Result<Vec<f64>, RuggednessError> {
    if let Some(files) = files {
        if files.len() != landscapes.len() {
            return Err(RuggednessError::CacheMismatch {
                landscapes: landscapes.len(),
                files: files.len(),
            });
        }
    }

    let mut out = Vec::with_capacity(landscapes.len());
    for (idx, landscape) in landscapes.iter().enumerate() {
        let cache = files.map(|f| f[idx].as_path());
        let values = match cache {
            Some(path) if path.exists() => {
                info!("{}: reading ruggedness cache {}", landscape.name, path.display());
                read_cache(path)?
            }
            _ => {
                let values = subgraph_values(landscape, params, estimator)?;
                if let Some(path) = cache {
                    write_cache(path, &values)?;
                    info!("{}: wrote ruggedness cache {}", landscape.name, path.display());
                }
                values
            }
        };

        let value = mean(&values);
        if value.is_nan() {
            warn!("{}: no subgraph had a defined ruggedness", landscape.name);
        }
        out.push(value);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/ruggedness/tests.rs"]
mod tests;
