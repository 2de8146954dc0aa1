use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::error::LoadError;

/// Loads the newline-delimited label list. The returned order is the order
/// in the file; index i names the class behind output score i.
pub fn load_labels(path: &str) -> Result<Vec<String>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Labels {
        path: path.to_string(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut labels = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|source| LoadError::Labels {
            path: path.to_string(),
            source,
        })?;
        let name = line.trim();
        if !name.is_empty() {
            labels.push(name.to_string());
        }
    }

    if labels.is_empty() {
        return Err(LoadError::EmptyLabels {
            path: path.to_string(),
        });
    }
    Ok(labels)
}
