//! Reader for the two-column `output_id,output` attempt table.

use std::io::Read;

/// Expected header columns, in order.
pub const HEADER: [&str; 2] = ["output_id", "output"];

/// One data row of the attempt table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line on which the row starts (the header is line 1).
    pub line: u64,
    /// The `output_id` column, trimmed.
    pub output_id: String,
    /// The `output` column.
    pub output: String,
}

/// Reads all records of an attempt table.
///
/// The table is standard CSV: blank lines are skipped, and a field may be
/// wrapped in double quotes, with `""` standing for a literal quote. Quoted
/// fields may span several lines.
///
/// # Errors
///
/// Returns a [`TableError`] if reading fails, the header is missing or is not
/// exactly `output_id,output`, or a row does not have two fields.
pub fn read_records<R>(reader: R) -> Result<Vec<Record>, TableError>
where
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = reader.headers()?;
    if header.is_empty() {
        return Err(TableError::MissingHeader);
    }
    if header.iter().ne(HEADER) {
        return Err(TableError::UnexpectedHeader {
            found: header.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, csv::Position::line);
        if row.len() != HEADER.len() {
            return Err(TableError::FieldCount {
                line,
                found: row.len(),
            });
        }
        records.push(Record {
            line,
            output_id: row[0].trim().to_owned(),
            output: row[1].to_owned(),
        });
    }
    log::debug!("read {} record(s)", records.len());
    Ok(records)
}

/// Errors that can occur when reading an attempt table.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TableError {
    /// The underlying reader failed or the input is not valid CSV.
    #[display("failed to read table: {_0}")]
    #[from]
    Csv(csv::Error),
    /// The input has no header line.
    #[display("table is empty, expected header 'output_id,output'")]
    MissingHeader,
    /// The header is not `output_id,output`.
    #[display("unexpected table header '{found}', expected 'output_id,output'")]
    UnexpectedHeader {
        /// The header found.
        found: String,
    },
    /// A row does not have exactly two fields.
    #[display("line {line}: expected 2 fields, found {found}")]
    FieldCount {
        /// 1-based line on which the row starts.
        line: u64,
        /// Number of fields found.
        found: usize,
    },
}
