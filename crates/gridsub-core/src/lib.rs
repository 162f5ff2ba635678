//! Core data structures and transformations for grid-puzzle submissions.
//!
//! This crate turns flat `(output_id, output)` records into a nested, validated
//! submission and pads every test case of a submission to a fixed number of
//! attempts.
//!
//! # Overview
//!
//! The crate is organized as a small pipeline:
//!
//! 1. **Decoding** - Pure, stateless parsers
//!    - [`grid`]: Compact grid strings such as `|12|34|` into a [`Grid`]
//!    - [`identifier`]: Compound identifiers such as `puzzle17_2` into an [`OutputId`]
//!
//! 2. **Aggregation** - [`builder`]: [`SubmissionBuilder`] groups decoded records by
//!    puzzle and test case, then verifies ordering and contiguity in
//!    [`SubmissionBuilder::finalize`].
//!
//! 3. **Normalization** - [`normalize`]: pads every test case to exactly
//!    [`ATTEMPTS_PER_CASE`] attempts by replicating the first attempt.
//!
//! The nested [`Submission`] type serializes to (and deserializes from) the JSON
//! interchange shape `{ puzzle_id: [ { "attempt_1": [[..], ..], .. }, .. ] }`.
//!
//! # Examples
//!
//! ```
//! use gridsub_core::{SubmissionBuilder, normalize};
//!
//! let mut builder = SubmissionBuilder::new();
//! builder.ingest("p1_0", "|12|34|")?;
//! builder.ingest("p1_1", "|56|78| |91|23|")?;
//! let submission = builder.finalize()?;
//!
//! let padded = normalize(&submission)?;
//! let cases = padded.get("p1").unwrap().test_cases();
//! assert_eq!(cases[1].attempts().len(), 4);
//! assert_eq!(cases[1].get(4), cases[1].get(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod digit;
pub mod grid;
pub mod identifier;
pub mod normalize;
pub mod submission;

// Re-export commonly used types
pub use self::{
    builder::{AggregateError, SubmissionBuilder},
    digit::Digit,
    grid::{Grid, GridError},
    identifier::{IdentifierError, OutputId},
    normalize::{ATTEMPTS_PER_CASE, NormalizeError, normalize},
    submission::{Attempt, Puzzle, Submission, TestCase},
};
