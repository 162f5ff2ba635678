//! Compound output identifiers.
//!
//! An output identifier names a puzzle and one of its test cases, e.g.
//! `puzzle17_2`. A bare puzzle id such as `puzzle17` refers to test case 0.

/// Separator between the puzzle id and the test index.
pub const TEST_INDEX_SEPARATOR: char = '_';

/// A resolved output identifier.
///
/// # Examples
///
/// ```
/// use gridsub_core::OutputId;
///
/// // Only the last separator splits the identifier.
/// let id = OutputId::resolve("a_b_10")?;
/// assert_eq!((id.puzzle_id.as_str(), id.test_index), ("a_b", 10));
///
/// let id = OutputId::resolve("abc")?;
/// assert_eq!((id.puzzle_id.as_str(), id.test_index), ("abc", 0));
/// # Ok::<(), gridsub_core::IdentifierError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputId {
    /// The puzzle id.
    pub puzzle_id: String,
    /// The 0-based test-case index.
    pub test_index: usize,
}

impl OutputId {
    /// Resolves an identifier into a puzzle id and a test index.
    ///
    /// Any test index is accepted here; contiguity within a puzzle is checked
    /// later, once all records are known.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::EmptyIdentifier`] for an empty identifier,
    /// [`IdentifierError::EmptyPuzzleId`] if nothing precedes the last `_`,
    /// [`IdentifierError::NonNumericTestIndex`] if the suffix is not a run of
    /// ASCII digits, and [`IdentifierError::TestIndexOverflow`] if the suffix
    /// does not fit in a `usize`.
    pub fn resolve(identifier: &str) -> Result<Self, IdentifierError> {
        if identifier.is_empty() {
            return Err(IdentifierError::EmptyIdentifier);
        }

        let Some((puzzle_id, suffix)) = identifier.rsplit_once(TEST_INDEX_SEPARATOR) else {
            return Ok(Self {
                puzzle_id: identifier.into(),
                test_index: 0,
            });
        };

        if puzzle_id.is_empty() {
            return Err(IdentifierError::EmptyPuzzleId {
                identifier: identifier.into(),
            });
        }
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdentifierError::NonNumericTestIndex {
                identifier: identifier.into(),
            });
        }
        let test_index = suffix
            .parse()
            .map_err(|_| IdentifierError::TestIndexOverflow {
                identifier: identifier.into(),
            })?;

        Ok(Self {
            puzzle_id: puzzle_id.into(),
            test_index,
        })
    }
}

/// Errors that can occur when resolving an output identifier.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IdentifierError {
    /// The identifier is empty.
    #[display("missing output_id")]
    EmptyIdentifier,
    /// Nothing precedes the last `_`.
    #[display("puzzle id is empty in output_id: {identifier}")]
    EmptyPuzzleId {
        /// The offending identifier.
        identifier: String,
    },
    /// The text after the last `_` is not a run of decimal digits.
    #[display("non-numeric test index in output_id: {identifier}")]
    NonNumericTestIndex {
        /// The offending identifier.
        identifier: String,
    },
    /// The test index does not fit in the index type.
    #[display("test index too large in output_id: {identifier}")]
    TestIndexOverflow {
        /// The offending identifier.
        identifier: String,
    },
}
