//! Aggregation of flat records into a nested submission.
//!
//! [`SubmissionBuilder`] owns the grouping state while records are ingested and
//! hands off an immutable [`Submission`] from [`SubmissionBuilder::finalize`].
//! Grouping happens during ingestion. Ordering and contiguity are verified in a
//! separate pass at finalization.

use std::collections::BTreeMap;

use crate::{Grid, GridError, IdentifierError, OutputId, Puzzle, Submission, TestCase};

/// Builds a [`Submission`] from `(output_id, output)` records.
///
/// # Examples
///
/// ```
/// use gridsub_core::{AggregateError, SubmissionBuilder};
///
/// let mut builder = SubmissionBuilder::new();
/// builder.ingest("p_0", "|1|")?;
/// builder.ingest("p_2", "|3|")?;
///
/// // Test case 1 is missing.
/// assert!(matches!(
///     builder.finalize(),
///     Err(AggregateError::NonContiguousTestIndices { expected: 1, found: 2, .. })
/// ));
/// # Ok::<(), AggregateError>(())
/// ```
#[derive(Debug, Default)]
pub struct SubmissionBuilder {
    puzzles: BTreeMap<String, BTreeMap<usize, Vec<Grid>>>,
}

impl SubmissionBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one record.
    ///
    /// `raw_attempts` holds one or more whitespace-separated grid encodings;
    /// their order defines the attempt positions. Test indices are accepted
    /// as-is and only checked for contiguity in [`Self::finalize`].
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::Identifier`] or [`AggregateError::Grid`] if
    /// the identifier or an attempt fails to decode,
    /// [`AggregateError::MissingAttempts`] if `raw_attempts` is blank, and
    /// [`AggregateError::DuplicateTestCase`] if the same puzzle id and test
    /// index were already ingested. The builder is left unchanged on error.
    pub fn ingest(&mut self, identifier: &str, raw_attempts: &str) -> Result<(), AggregateError> {
        let OutputId {
            puzzle_id,
            test_index,
        } = OutputId::resolve(identifier)?;

        let raw_attempts = raw_attempts.trim();
        if raw_attempts.is_empty() {
            return Err(AggregateError::MissingAttempts {
                identifier: identifier.into(),
            });
        }
        let attempts = raw_attempts
            .split_whitespace()
            .map(Grid::decode)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| AggregateError::Grid {
                identifier: identifier.into(),
                source,
            })?;
        if attempts.is_empty() {
            return Err(AggregateError::NoAttempts {
                identifier: identifier.into(),
            });
        }

        let cases = self.puzzles.entry(puzzle_id).or_default();
        if cases.contains_key(&test_index) {
            return Err(AggregateError::DuplicateTestCase {
                identifier: identifier.into(),
                test_index,
            });
        }
        log::debug!(
            "ingested {identifier}: test case {test_index} with {} attempt(s)",
            attempts.len()
        );
        cases.insert(test_index, attempts);
        Ok(())
    }

    /// Returns the number of records ingested so far.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.puzzles.values().map(BTreeMap::len).sum()
    }

    /// Verifies the collected records and produces the submission.
    ///
    /// Puzzles are emitted in lexicographic id order; test cases in ascending
    /// index order, with attempts numbered from 1 in ingestion order.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::NonContiguousTestIndices`] if a puzzle's test
    /// indices are not exactly `0..n`, and [`AggregateError::EmptyPuzzle`] if a
    /// puzzle has no test cases.
    pub fn finalize(self) -> Result<Submission, AggregateError> {
        for (puzzle_id, cases) in &self.puzzles {
            check_test_indices(puzzle_id, cases)?;
        }

        let submission = self
            .puzzles
            .into_iter()
            .map(|(puzzle_id, cases)| {
                let test_cases = cases.into_values().map(TestCase::from_grids).collect();
                (puzzle_id, Puzzle::new(test_cases))
            })
            .collect::<Submission>();
        log::info!("aggregated {} puzzle(s)", submission.len());
        Ok(submission)
    }
}

/// Checks that a puzzle has test cases and that their indices are `0..n`.
fn check_test_indices(
    puzzle_id: &str,
    cases: &BTreeMap<usize, Vec<Grid>>,
) -> Result<(), AggregateError> {
    if cases.is_empty() {
        return Err(AggregateError::EmptyPuzzle {
            puzzle_id: puzzle_id.into(),
        });
    }
    for (expected, &found) in cases.keys().enumerate() {
        if found != expected {
            return Err(AggregateError::NonContiguousTestIndices {
                puzzle_id: puzzle_id.into(),
                expected,
                found,
            });
        }
    }
    Ok(())
}

/// Errors that can occur while aggregating records.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AggregateError {
    /// The record identifier could not be resolved.
    #[display("{_0}")]
    #[from]
    Identifier(IdentifierError),
    /// An attempt of the record could not be decoded.
    #[display("invalid attempt for {identifier}: {source}")]
    Grid {
        /// Identifier of the offending record.
        identifier: String,
        /// The decoding failure.
        source: GridError,
    },
    /// The record has a blank output column.
    #[display("missing attempts for {identifier}")]
    MissingAttempts {
        /// Identifier of the offending record.
        identifier: String,
    },
    /// No attempts were parsed from the record.
    #[display("no attempts parsed for {identifier}")]
    NoAttempts {
        /// Identifier of the offending record.
        identifier: String,
    },
    /// The puzzle id and test index were already ingested.
    #[display("duplicate test index {test_index} for {identifier}")]
    DuplicateTestCase {
        /// Identifier of the offending record.
        identifier: String,
        /// The repeated test index.
        test_index: usize,
    },
    /// A puzzle's test indices have a gap or do not start at 0.
    #[display(
        "test indices for {puzzle_id} are not contiguous: expected {expected}, got {found}"
    )]
    NonContiguousTestIndices {
        /// The offending puzzle.
        puzzle_id: String,
        /// The index that should be present.
        expected: usize,
        /// The index found in its place.
        found: usize,
    },
    /// A puzzle was registered without test cases.
    #[display("no test cases collected for {puzzle_id}")]
    EmptyPuzzle {
        /// The offending puzzle.
        puzzle_id: String,
    },
}
