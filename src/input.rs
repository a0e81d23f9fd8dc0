use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::error::InputError;

/// Reads newline-delimited query terms, trimming each line and dropping blank ones.
pub fn read_query_terms<P: AsRef<Path>>(path: P) -> Result<Vec<String>, InputError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        error!(error = ?e, path = %path.display(), "Failed to read query list");
        InputError::Read {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    let terms = parse_query_terms(&content);
    info!(path = %path.display(), count = terms.len(), "Read query terms");
    Ok(terms)
}

pub fn parse_query_terms(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
