//! Rectangular digit grids and their compact text encoding.
//!
//! A grid is encoded as its rows of digits, each row followed by the `|`
//! separator and the whole string opened by one: `|12|34|` is the 2x2 grid
//! `[[1, 2], [3, 4]]`.

use serde::{Deserialize, Serialize};

use crate::Digit;

/// Row separator of the compact grid encoding.
pub const ROW_SEPARATOR: char = '|';

/// A non-empty, rectangular matrix of digits.
///
/// Every row is non-empty and all rows share the width of the first row. The
/// only ways to obtain a `Grid` are [`Grid::decode`] and the shape-checked
/// `TryFrom<Vec<Vec<Digit>>>` conversion, which deserialization also uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Digit>>", into = "Vec<Vec<Digit>>")]
pub struct Grid {
    rows: Vec<Vec<Digit>>,
}

impl Grid {
    /// Decodes a grid from its compact `|`-delimited encoding.
    ///
    /// Surrounding whitespace is ignored. Exactly one leading and one trailing
    /// separator are stripped before the remainder is split into rows.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] naming the offending text if the input is empty,
    /// lacks the surrounding separators, contains no rows, contains an empty
    /// row, contains a non-digit character, or has rows of different widths.
    pub fn decode(text: &str) -> Result<Self, GridError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GridError::EmptyInput);
        }
        if !text.starts_with(ROW_SEPARATOR) || !text.ends_with(ROW_SEPARATOR) {
            return Err(GridError::MissingDelimiters { text: text.into() });
        }

        // A lone separator is both the leading and the trailing one.
        let inner = text
            .strip_prefix(ROW_SEPARATOR)
            .and_then(|rest| rest.strip_suffix(ROW_SEPARATOR))
            .unwrap_or_default();
        if inner.is_empty() {
            return Err(GridError::EmptyGrid { text: text.into() });
        }

        let tokens = inner.split(ROW_SEPARATOR).collect::<Vec<_>>();
        if tokens.iter().any(|token| token.is_empty()) {
            return Err(GridError::EmptyRow { text: text.into() });
        }

        let mut rows: Vec<Vec<Digit>> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let row = token
                .chars()
                .map(Digit::from_char)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| GridError::NonDigitRow {
                    text: text.into(),
                    row: token.into(),
                })?;
            if let Some(first) = rows.first().map(Vec::len)
                && row.len() != first
            {
                return Err(GridError::InconsistentWidth {
                    text: text.into(),
                    expected: first,
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        Ok(Self { rows })
    }
}

impl TryFrom<Vec<Vec<Digit>>> for Grid {
    type Error = GridShapeError;

    fn try_from(rows: Vec<Vec<Digit>>) -> Result<Self, Self::Error> {
        let Some(first) = rows.first() else {
            return Err(GridShapeError::EmptyGrid);
        };
        let expected = first.len();
        for (row, digits) in rows.iter().enumerate() {
            if digits.is_empty() {
                return Err(GridShapeError::EmptyRow { row });
            }
            if digits.len() != expected {
                return Err(GridShapeError::InconsistentWidth {
                    row,
                    expected,
                    found: digits.len(),
                });
            }
        }
        Ok(Self { rows })
    }
}

impl From<Grid> for Vec<Vec<Digit>> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

/// Errors that can occur when decoding a compact grid string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// The input is empty after trimming whitespace.
    #[display("grid text is empty")]
    EmptyInput,
    /// The input does not start and end with the row separator.
    #[display("grid must start and end with '|': {text}")]
    MissingDelimiters {
        /// The offending grid text.
        text: String,
    },
    /// Nothing remains between the leading and trailing separators.
    #[display("grid has no rows: {text}")]
    EmptyGrid {
        /// The offending grid text.
        text: String,
    },
    /// Two separators are adjacent.
    #[display("grid contains an empty row: {text}")]
    EmptyRow {
        /// The offending grid text.
        text: String,
    },
    /// A row contains a character other than an ASCII decimal digit.
    #[display("row {row:?} contains non-digit characters: {text}")]
    NonDigitRow {
        /// The offending grid text.
        text: String,
        /// The offending row token.
        row: String,
    },
    /// A row differs in width from the first row.
    #[display("inconsistent row width (expected {expected}, found {found}): {text}")]
    InconsistentWidth {
        /// The offending grid text.
        text: String,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
}

/// Errors that can occur when building a [`Grid`] from rows of digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridShapeError {
    /// The matrix has no rows.
    #[display("grid has no rows")]
    EmptyGrid,
    /// A row has no cells.
    #[display("grid row {row} is empty")]
    EmptyRow {
        /// 0-based index of the offending row.
        row: usize,
    },
    /// A row differs in width from the first row.
    #[display("grid row {row} has width {found}, expected {expected}")]
    InconsistentWidth {
        /// 0-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
}
