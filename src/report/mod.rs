pub mod json;
pub mod text;

/// Formats a summary value; undefined values print as `nan`.
pub fn format_f64_4(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.4}", v)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
