//! CSV loading with fallbacks for messy files.
//!
//! Loading tries progressively more forgiving strategies:
//! 1. standard parsing with `"` as the quote character
//! 2. parsing with quote handling switched off
//! 3. parsing pre-cleaned content (doubled quotes collapsed, blank lines dropped)
//!
//! Only when all three fail is the input reported as malformed.

use crate::error::{ProfilingError, Result};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Rows polars looks at when inferring column types.
const INFER_SCHEMA_ROWS: usize = 100;

/// Load a CSV file from disk.
///
/// # Errors
///
/// Returns [`ProfilingError::Io`] if the file cannot be read and
/// [`ProfilingError::MalformedInput`] if no strategy can parse it.
pub fn load_csv_from_path(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        ProfilingError::Io(e).with_context(format!("Could not read '{}'", path.display()))
    })?;
    load_csv_from_bytes(&bytes)
}

/// Load CSV content that is already in memory, e.g. an uploaded file.
pub fn load_csv_from_bytes(bytes: &[u8]) -> Result<DataFrame> {
    // Strategy 1: Standard loading with quote handling
    match read_csv(bytes.to_vec(), Some(b'"')) {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: Without quote handling
    match read_csv(bytes.to_vec(), None) {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Loading without quotes failed: {}", e);
        }
    }

    // Strategy 3: Pre-clean content
    let cleaned = clean_csv_content(&String::from_utf8_lossy(bytes));
    read_csv(cleaned.into_bytes(), Some(b'"'))
        .map_err(|e| ProfilingError::MalformedInput(e.to_string()))
}

fn read_csv(content: Vec<u8>, quote_char: Option<u8>) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(quote_char))
        .into_reader_with_file_handle(Cursor::new(content))
        .finish()
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
