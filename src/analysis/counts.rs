use std::collections::BTreeMap;
use std::path::Path;

use clap::ValueEnum;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::analysis::{AnalysisError, load_single};
use crate::input::RunTable;
use crate::model::Orientation;
use crate::plot::AxisSpec;
use crate::plot::bars::barplot_count;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CountColumn {
    Round,
    Rep,
}

impl CountColumn {
    pub fn name(self) -> &'static str {
        match self {
            CountColumn::Round => "round",
            CountColumn::Rep => "rep",
        }
    }
}

/// Number of rows per value of `column`, in ascending value order.
pub fn count_by(table: &RunTable, column: CountColumn) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for record in &table.records {
        let key = match column {
            CountColumn::Round => record.round as usize,
            CountColumn::Rep => record.rep,
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(k, c)| (k.to_string(), c))
        .collect()
}

pub fn barplot_counts<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    path: &Path,
    prefix: &str,
    column: CountColumn,
    orientation: Orientation,
) -> Result<(), AnalysisError> {
    let table = load_single(path, prefix)?;
    let counts = count_by(&table, column);
    let axes = match orientation {
        Orientation::Vertical => AxisSpec::new(column.name(), "count"),
        Orientation::Horizontal => AxisSpec::new("count", column.name()),
    };
    barplot_count(area, &counts, orientation, &axes)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/counts.rs"]
mod tests;
