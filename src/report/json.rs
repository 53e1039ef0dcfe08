use serde::Serialize;

use crate::analysis::auc::AucRow;
use crate::analysis::success::SuccessRow;

#[derive(Debug, Serialize)]
struct Summary<'a, T: Serialize> {
    tool: &'static str,
    version: &'static str,
    kind: &'a str,
    results: &'a [T],
}

#[derive(Debug, Serialize)]
pub struct RsRow {
    pub name: String,
    pub rs: Option<f64>,
}

impl RsRow {
    pub fn new(name: &str, rs: f64) -> Self {
        Self {
            name: name.to_string(),
            rs: rs.is_finite().then_some(rs),
        }
    }
}

fn render<T: Serialize>(kind: &str, results: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Summary {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        kind,
        results,
    })
}

pub fn render_success_json(rows: &[SuccessRow]) -> Result<String, serde_json::Error> {
    render("success_ratio", rows)
}

pub fn render_auc_json(rows: &[AucRow]) -> Result<String, serde_json::Error> {
    render("auc", rows)
}

pub fn render_rs_json(rows: &[RsRow]) -> Result<String, serde_json::Error> {
    render("ruggedness", rows)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
