pub mod aliases;
pub mod csv_reader;
pub mod normalize;

pub use csv_reader::{read_rows, CsvError};
pub use normalize::normalize_rows;

use crate::domain::SaleRecord;
use serde::Serialize;
use std::io::Read;

/// Result of normalizing one uploaded file.
#[derive(Debug, Serialize)]
pub struct NormalizeSummary {
    pub records: Vec<SaleRecord>,
    pub count: usize,
    pub dropped: usize,
}

pub fn normalize_csv<R: Read>(input: R) -> Result<NormalizeSummary, CsvError> {
    let rows = read_rows(input)?;
    let records = normalize_rows(&rows);
    let count = records.len();

    Ok(NormalizeSummary {
        dropped: rows.len() - count,
        count,
        records,
    })
}
