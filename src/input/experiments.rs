use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::style::RGBColor;
use serde::Deserialize;
use tracing::{info, warn};

use crate::input::InputError;
use crate::model::LineStyle;
use crate::plot::style::parse_hex_color;

/// Named run directories compared on one chart, plus optional per-series styling.
#[derive(Debug, Clone, Default)]
pub struct Experiments {
    pub runs: BTreeMap<String, PathBuf>,
    pub colors: Option<Vec<RGBColor>>,
    pub linestyles: Option<Vec<LineStyle>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExperimentsFile {
    runs: BTreeMap<String, PathBuf>,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    linestyles: Vec<LineStyle>,
}

impl Experiments {
    pub fn from_runs<I>(runs: I) -> Self
    where
        I: IntoIterator<Item = (String, PathBuf)>,
    {
        Self {
            runs: runs.into_iter().collect(),
            colors: None,
            linestyles: None,
        }
    }

    /// Reads a JSON experiments file. Relative run directories resolve against the file's directory.
    pub fn from_json_file(path: &Path) -> Result<Self, InputError> {
        let text = fs::read_to_string(path)?;
        let parsed: ExperimentsFile =
            serde_json::from_str(&text).map_err(|source| InputError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        let runs = parsed
            .runs
            .into_iter()
            .map(|(name, dir)| {
                let dir = if dir.is_relative() { base.join(dir) } else { dir };
                (name, dir)
            })
            .collect();

        let colors = if parsed.colors.is_empty() {
            None
        } else {
            let mut out = Vec::with_capacity(parsed.colors.len());
            for raw in &parsed.colors {
                out.push(parse_hex_color(raw).map_err(InputError::InvalidInput)?);
            }
            Some(out)
        };
        let linestyles = if parsed.linestyles.is_empty() {
            None
        } else {
            Some(parsed.linestyles)
        };

        info!("loaded experiments file {}", path.display());
        Ok(Self {
            runs,
            colors,
            linestyles,
        })
    }

    /// CLI entries win over file entries with the same name.
    pub fn merge(&mut self, other: Experiments) {
        for (name, dir) in other.runs {
            if let Some(prev) = self.runs.insert(name.clone(), dir) {
                warn!(
                    "run {:?} given twice; overriding {} from the command line",
                    name,
                    prev.display()
                );
            }
        }
        if other.colors.is_some() {
            self.colors = other.colors;
        }
        if other.linestyles.is_some() {
            self.linestyles = other.linestyles;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.runs.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }
}

/// Parses a `NAME=DIR` command-line pair.
pub fn parse_run_arg(raw: &str) -> Result<(String, PathBuf), String> {
    let Some((name, dir)) = raw.split_once('=') else {
        return Err(format!("expected NAME=DIR, got {raw:?}"));
    };
    let name = name.trim();
    let dir = dir.trim();
    if name.is_empty() || dir.is_empty() {
        return Err(format!("expected NAME=DIR, got {raw:?}"));
    }
    Ok((name.to_string(), PathBuf::from(dir)))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/experiments.rs"]
mod tests;
