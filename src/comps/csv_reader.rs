// src/comps/csv_reader.rs

use crate::domain::RawRow;
use std::io::Read;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("could not read CSV header: {0}")]
    Header(String),
}

/// Reads header-keyed rows out of delimited text.
///
/// Ragged rows are fine (missing trailing cells are simply absent), blank
/// lines are skipped, and a record the parser can't make sense of is logged
/// and skipped rather than failing the upload.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<RawRow>, CsvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = rdr
        .byte_headers()
        .map_err(|e| CsvError::Header(e.to_string()))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = String::from_utf8_lossy(h);
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.into_owned()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (n, result) in rdr.byte_records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(record = n + 1, "Skipping unreadable CSV record: {e}");
                continue;
            }
        };

        if record
            .iter()
            .all(|cell| cell.iter().all(u8::is_ascii_whitespace))
        {
            continue;
        }

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), String::from_utf8_lossy(v).into_owned()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
