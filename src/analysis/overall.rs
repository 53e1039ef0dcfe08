use plotters::coord::Shift;
use plotters::prelude::*;

use crate::analysis::{AnalysisError, load_experiments};
use crate::input::{Experiments, RUN_PREFIX, RunTable};
use crate::model::{Aggregate, ScoreColumn};
use crate::plot::{AxisSpec, ViolinGroup, ViolinStyle, violinplot};
use crate::stats::aggregate_per_rep;

/// One value per rep: `score` reduced with `method` over the whole run.
pub fn overall_group(name: &str, table: &RunTable, score: ScoreColumn, method: Aggregate) -> ViolinGroup {
    ViolinGroup {
        label: name.to_string(),
        values: aggregate_per_rep(&table.records, score, method)
            .into_values()
            .filter(|v| !v.is_nan())
            .collect(),
    }
}

pub fn overall<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    experiments: &Experiments,
    score: ScoreColumn,
    method: Aggregate,
    face_colors: Option<&[RGBColor]>,
) -> Result<(), AnalysisError> {
    let tables = load_experiments(experiments, RUN_PREFIX)?;
    let groups: Vec<ViolinGroup> = tables
        .iter()
        .map(|(name, table)| overall_group(name, table, score, method))
        .collect();

    let style = ViolinStyle {
        face_colors: face_colors.map(<[RGBColor]>::to_vec),
        ..ViolinStyle::default()
    };
    violinplot(area, &groups, &style, &AxisSpec::new("name", score.name()), &[])?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/overall.rs"]
mod tests;
