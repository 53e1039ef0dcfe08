use tabled::builder::Builder;
use tabled::{Table, Tabled};

use crate::analysis::auc::AucRow;
use crate::analysis::success::SuccessRow;
use crate::model::ScoreColumn;
use crate::report::format_f64_4;
use crate::stats::CummaxRow;

#[derive(Tabled)]
struct CummaxLine {
    #[tabled(rename = "round")]
    round: u32,
    #[tabled(rename = "measurement_cost")]
    cost: String,
    #[tabled(rename = "rep")]
    rep: usize,
    #[tabled(rename = "value")]
    value: String,
}

pub fn render_cummax_table(rows: &[CummaxRow], score: ScoreColumn) -> String {
    if rows.is_empty() {
        return format!("No {} values to show", score.name());
    }
    let lines: Vec<CummaxLine> = rows
        .iter()
        .map(|r| CummaxLine {
            round: r.round,
            cost: r.measurement_cost.map(format_f64_4).unwrap_or_default(),
            rep: r.rep,
            value: format_f64_4(r.value),
        })
        .collect();
    let title = format!("cumulative max of {}", score.name());
    format!("{}\n{}", title, Table::new(lines))
}

/// One line of the success-ratio printout, e.g. `Round 10-greedy: 40.00%`.
pub fn success_message(round: u32, name: &str, ratio: f64) -> String {
    format!("Round {}-{}: {:.2}%", round, name, ratio)
}

/// Experiments as rows, requested rounds as columns.
pub fn render_success_table(rows: &[SuccessRow]) -> String {
    let mut rounds: Vec<u32> = rows
        .iter()
        .flat_map(|r| r.ratios.iter().map(|(round, _)| *round))
        .collect();
    rounds.sort_unstable();
    rounds.dedup();

    let mut builder = Builder::default();
    let mut header = vec!["experiment".to_string()];
    header.extend(rounds.iter().map(|r| format!("round {r}")));
    builder.push_record(header);
    for row in rows {
        let mut record = vec![row.name.clone()];
        record.extend(rounds.iter().map(|round| {
            row.ratios
                .iter()
                .find(|(r, _)| r == round)
                .map(|(_, v)| format!("{:.2}%", v))
                .unwrap_or_default()
        }));
        builder.push_record(record);
    }
    builder.build().to_string()
}

#[derive(Tabled)]
struct NamedValue {
    #[tabled(rename = "experiment")]
    name: String,
    value: String,
}

pub fn render_auc_table(rows: &[AucRow]) -> String {
    let lines: Vec<NamedValue> = rows
        .iter()
        .map(|r| NamedValue {
            name: r.name.clone(),
            value: format_f64_4(r.auc),
        })
        .collect();
    Table::new(lines).to_string()
}

pub fn render_rs_table(rows: &[(String, f64)]) -> String {
    let lines: Vec<NamedValue> = rows
        .iter()
        .map(|(name, rs)| NamedValue {
            name: name.clone(),
            value: format_f64_4(*rs),
        })
        .collect();
    Table::new(lines).to_string()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
