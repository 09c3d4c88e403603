// src/pipeline/input.rs

//! Delimited input reading.

use std::path::Path;

use crate::error::{AppError, Result};

/// Read the non-empty cells of a named column from a delimited file with a
/// header row.
pub fn read_url_column(path: impl AsRef<Path>, column: &str, delimiter: u8) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;

    let index = reader
        .headers()?
        .iter()
        .position(|header| header.trim() == column)
        .ok_or_else(|| {
            AppError::config(format!("Column '{}' not found in {}", column, path.display()))
        })?;

    let mut urls = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(index).map(str::trim) {
            Some(cell) if !cell.is_empty() => urls.push(cell.to_string()),
            _ => log::debug!("Skipping empty cell on line {:?}", record.position().map(|p| p.line())),
        }
    }
    Ok(urls)
}
