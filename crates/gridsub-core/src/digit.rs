//! Grid cell digit representation.

use serde::{Deserialize, Serialize};

/// A grid cell value in the range 0-9.
///
/// Unlike a bare `u8`, a `Digit` can only be constructed from an in-range
/// value. It serializes as a plain integer and rejects out-of-range integers
/// when deserialized, so grids loaded from storage are checked cell by cell.
///
/// # Examples
///
/// ```
/// use gridsub_core::Digit;
///
/// let digit = Digit::new(7).unwrap();
/// assert_eq!(digit.value(), 7);
///
/// assert_eq!(Digit::from_char('3'), Digit::new(3));
/// assert_eq!(Digit::from_char('a'), None);
/// assert_eq!(Digit::new(10), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// The largest representable digit value.
    pub const MAX: u8 = 9;

    /// Creates a digit from a value in the range 0-9.
    ///
    /// Returns `None` if `value` is greater than 9.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Creates a digit from an ASCII decimal digit character.
    ///
    /// Returns `None` for any other character, including non-ASCII digits.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        if !ch.is_ascii_digit() {
            return None;
        }
        let value = u8::try_from(ch.to_digit(10)?).ok()?;
        Self::new(value)
    }

    /// Returns the numeric value of this digit (0-9).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.value()
    }
}

impl TryFrom<u8> for Digit {
    type Error = DigitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(DigitError::OutOfRange { value })
    }
}

/// Errors that can occur when converting an integer into a [`Digit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DigitError {
    /// The value is greater than 9.
    #[display("digit out of range 0-9: {value}")]
    OutOfRange {
        /// The rejected value.
        value: u8,
    },
}
