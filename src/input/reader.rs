use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::input::InputError;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn is_run_file(name: &str, prefix: &str) -> bool {
    name.starts_with(prefix) && (name.ends_with(".csv") || name.ends_with(".csv.gz"))
}

pub fn find_run_files(run_dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, InputError> {
    if !run_dir.is_dir() {
        return Err(InputError::MissingInput(format!(
            "run directory {} does not exist",
            run_dir.display()
        )));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(run_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if is_run_file(name, prefix) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Opens a run file positioned on its CSV header, past the metadata line.
pub fn open_run_csv(path: &Path) -> Result<csv::Reader<Box<dyn BufRead>>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut meta = String::new();
    let read = reader.read_line(&mut meta)?;
    if read == 0 {
        return Err(InputError::InvalidInput(format!(
            "{} is empty",
            path.display()
        )));
    }
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader))
}
