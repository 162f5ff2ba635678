//! Command-line drivers for converting and padding grid-puzzle submissions.
//!
//! Both drivers read their whole input, run every validation stage, and only
//! then write the output file in one go. Nothing is written on failure.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufReader, Read},
    path::{Path, PathBuf},
    process,
};

use gridsub_core::{AggregateError, NormalizeError, Submission, SubmissionBuilder, normalize};

pub use self::table::{Record, TableError, read_records};

pub mod table;

/// Builds a submission from an attempt table.
///
/// # Errors
///
/// Returns [`CliError::Table`] if the table is malformed and
/// [`CliError::Record`] for the first record that fails aggregation.
pub fn convert<R>(reader: R) -> Result<Submission, CliError>
where
    R: Read,
{
    let mut builder = SubmissionBuilder::new();
    for record in read_records(reader)? {
        builder
            .ingest(&record.output_id, &record.output)
            .map_err(|source| CliError::Record {
                line: record.line,
                source,
            })?;
    }
    log::info!("aggregating {} record(s)", builder.record_count());
    Ok(builder.finalize()?)
}

/// Loads a submission from JSON and pads it to four attempts per test case.
///
/// # Errors
///
/// Returns [`CliError::Json`] if the input is not a well-formed submission and
/// [`CliError::Normalize`] if it violates a structural invariant.
pub fn pad<R>(reader: R) -> Result<Submission, CliError>
where
    R: Read,
{
    let submission: Submission = serde_json::from_reader(reader)?;
    Ok(normalize(&submission)?)
}

/// Reads the attempt table at `input` and writes the submission JSON to `output`.
///
/// # Errors
///
/// Returns a [`CliError`] if any stage fails; `output` is not written then.
pub fn run_convert(input: &Path, output: &Path) -> Result<(), CliError> {
    let file = open(input)?;
    let submission = convert(file)?;
    write_submission(output, &submission)
}

/// Reads the submission JSON at `input` and writes the padded JSON to `output`.
///
/// # Errors
///
/// Returns a [`CliError`] if any stage fails; `output` is not written then.
pub fn run_pad(input: &Path, output: &Path) -> Result<(), CliError> {
    let file = open(input)?;
    let submission = pad(BufReader::new(file))?;
    write_submission(output, &submission)
}

/// Logs and prints a fatal error, then exits with a non-zero status.
pub fn exit_with_error(err: &CliError) -> ! {
    log::error!("{err}");
    eprintln!("error: {err}");
    process::exit(1);
}

fn open(path: &Path) -> Result<File, CliError> {
    File::open(path).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Writes the submission next to `path` first and renames it into place, so
/// `path` either keeps its old contents or holds the complete output.
fn write_submission(path: &Path, submission: &Submission) -> Result<(), CliError> {
    let json = serde_json::to_vec(submission)?;
    let tmp_path = temp_path(path);
    let result = fs::write(&tmp_path, json)
        .map_err(|source| CliError::Io {
            path: tmp_path.clone(),
            source,
        })
        .and_then(|()| {
            fs::rename(&tmp_path, path).map_err(|source| CliError::Io {
                path: path.to_owned(),
                source,
            })
        });
    if let Err(err) = result {
        if let Err(remove_err) = fs::remove_file(&tmp_path) {
            log::debug!("failed to remove {}: {remove_err}", tmp_path.display());
        }
        return Err(err);
    }
    log::info!(
        "wrote {} puzzle(s) to {}",
        submission.len(),
        path.display()
    );
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| "output".as_ref()));
    name.push(format!(".{}.tmp", process::id()));
    path.with_file_name(name)
}

/// Errors reported by the command-line drivers.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CliError {
    /// A file could not be read or written.
    #[display("{}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The I/O failure.
        source: std::io::Error,
    },
    /// The attempt table is malformed.
    #[display("{_0}")]
    #[from]
    Table(TableError),
    /// A table record failed aggregation.
    #[display("line {line}: {source}")]
    Record {
        /// 1-based line on which the record starts.
        line: u64,
        /// The aggregation failure.
        source: AggregateError,
    },
    /// The records failed the final submission checks.
    #[display("{_0}")]
    #[from]
    Aggregate(AggregateError),
    /// The submission JSON could not be parsed or written.
    #[display("invalid submission JSON: {_0}")]
    #[from]
    Json(serde_json::Error),
    /// The loaded submission violates a structural invariant.
    #[display("{_0}")]
    #[from]
    Normalize(NormalizeError),
}
