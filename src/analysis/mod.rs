use std::path::Path;

use tracing::debug;

use crate::input::{Experiments, InputError, RunTable, read_data};
use crate::plot::PlotError;
use crate::ruggedness::RuggednessError;

pub mod auc;
pub mod counts;
pub mod cummax;
pub mod model_fit;
pub mod overall;
pub mod score_round;
pub mod success;
pub mod violin_round;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Plot(#[from] PlotError),
    #[error(transparent)]
    Ruggedness(#[from] RuggednessError),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{name}: round {round} is not present in the data")]
    MissingRound { name: String, round: u32 },
    #[error("{name}: {reason}")]
    Insufficient { name: String, reason: String },
}

/// Loads every experiment's run table, in name order.
pub fn load_experiments(
    experiments: &Experiments,
    prefix: &str,
) -> Result<Vec<(String, RunTable)>, AnalysisError> {
    if experiments.is_empty() {
        return Err(AnalysisError::InvalidArgument(
            "at least one run directory is required".to_string(),
        ));
    }
    let mut out = Vec::with_capacity(experiments.len());
    for (name, dir) in experiments.iter() {
        let table = read_data(dir, prefix)?;
        debug!(
            "{}: {} rows, {} reps, max round {:?}",
            name,
            table.records.len(),
            table.n_reps(),
            table.max_round()
        );
        out.push((name.to_string(), table));
    }
    Ok(out)
}

pub(crate) fn load_single(path: &Path, prefix: &str) -> Result<RunTable, AnalysisError> {
    Ok(read_data(path, prefix)?)
}
