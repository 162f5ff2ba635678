//! Nested submission structure and its interchange form.
//!
//! A [`Submission`] maps puzzle ids to [`Puzzle`]s, a puzzle is an ordered list
//! of [`TestCase`]s, and a test case holds one or more [`Attempt`]s keyed by a
//! 1-based position. The serialized form is:
//!
//! ```json
//! {"p1": [{"attempt_1": [[1, 2], [3, 4]]}, {"attempt_1": [[5]], "attempt_2": [[6]]}]}
//! ```
//!
//! Submissions built by [`SubmissionBuilder`](crate::SubmissionBuilder) or
//! returned by [`normalize`](crate::normalize) uphold all structural
//! invariants. Submissions deserialized from storage are only checked for grid
//! shape and attempt key syntax; run them through `normalize` before relying on
//! attempt positions.

use std::{collections::BTreeMap, fmt};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
};

use crate::Grid;

/// Prefix of attempt keys in the interchange form.
const ATTEMPT_KEY_PREFIX: &str = "attempt_";

/// One candidate answer for a test case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attempt {
    position: usize,
    grid: Grid,
}

impl Attempt {
    fn new(position: usize, grid: Grid) -> Self {
        Self { position, grid }
    }

    /// Returns the 1-based position of this attempt within its test case.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the answer grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn key(&self) -> String {
        attempt_key(self.position)
    }
}

fn attempt_key(position: usize) -> String {
    format!("{ATTEMPT_KEY_PREFIX}{position}")
}

/// Parses an interchange key such as `attempt_3` into its position.
fn parse_attempt_key(key: &str) -> Result<usize, AttemptKeyError> {
    let suffix = key
        .strip_prefix(ATTEMPT_KEY_PREFIX)
        .ok_or_else(|| AttemptKeyError::UnexpectedKey { key: key.into() })?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AttemptKeyError::NonNumericPosition { key: key.into() });
    }
    suffix
        .parse()
        .map_err(|_| AttemptKeyError::NonNumericPosition { key: key.into() })
}

/// Errors that can occur when parsing an attempt key.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AttemptKeyError {
    /// The key does not start with `attempt_`.
    #[display("unexpected attempt key: {key}")]
    UnexpectedKey {
        /// The offending key.
        key: String,
    },
    /// The key suffix is not a valid position.
    #[display("attempt key has non-numeric suffix: {key}")]
    NonNumericPosition {
        /// The offending key.
        key: String,
    },
}

/// The attempts submitted for one test case.
///
/// Attempts are kept in the order they were added or stored. Positions are
/// not validated here; see [`normalize`](crate::normalize).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TestCase {
    attempts: Vec<Attempt>,
}

impl TestCase {
    /// Creates a test case from grids in attempt order, numbered from 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridsub_core::{Grid, TestCase};
    ///
    /// let case = TestCase::from_grids([Grid::decode("|1|")?, Grid::decode("|2|")?]);
    /// assert_eq!(case.get(2), Some(&Grid::decode("|2|")?));
    /// # Ok::<(), gridsub_core::GridError>(())
    /// ```
    #[must_use]
    pub fn from_grids<I>(grids: I) -> Self
    where
        I: IntoIterator<Item = Grid>,
    {
        let attempts = (1..)
            .zip(grids)
            .map(|(position, grid)| Attempt::new(position, grid))
            .collect();
        Self { attempts }
    }

    /// Returns the attempts in stored order.
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Returns the grid at a 1-based position, if present.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Grid> {
        self.attempts
            .iter()
            .find(|attempt| attempt.position == position)
            .map(Attempt::grid)
    }
}

impl Serialize for TestCase {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            self.attempts
                .iter()
                .map(|attempt| (attempt.key(), &attempt.grid)),
        )
    }
}

impl<'de> Deserialize<'de> for TestCase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TestCaseVisitor;

        impl<'de> Visitor<'de> for TestCaseVisitor {
            type Value = TestCase;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attempt keys to grids")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut attempts = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, grid)) = map.next_entry::<String, Grid>()? {
                    let position = parse_attempt_key(&key).map_err(de::Error::custom)?;
                    attempts.push(Attempt::new(position, grid));
                }
                Ok(TestCase { attempts })
            }
        }

        deserializer.deserialize_map(TestCaseVisitor)
    }
}

/// The ordered test cases of one puzzle, indexed from 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Puzzle {
    test_cases: Vec<TestCase>,
}

impl Puzzle {
    /// Creates a puzzle from test cases in index order.
    #[must_use]
    pub fn new(test_cases: Vec<TestCase>) -> Self {
        Self { test_cases }
    }

    /// Returns the test cases in index order.
    #[must_use]
    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    /// Returns the number of test cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.test_cases.len()
    }

    /// Returns `true` if the puzzle has no test cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }
}

/// A complete submission, keyed by puzzle id in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    puzzles: BTreeMap<String, Puzzle>,
}

impl Submission {
    /// Returns the puzzle with the given id, if present.
    #[must_use]
    pub fn get(&self, puzzle_id: &str) -> Option<&Puzzle> {
        self.puzzles.get(puzzle_id)
    }

    /// Iterates over `(puzzle_id, puzzle)` pairs in lexicographic id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Puzzle)> {
        self.puzzles
            .iter()
            .map(|(puzzle_id, puzzle)| (puzzle_id.as_str(), puzzle))
    }

    /// Returns the number of puzzles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    /// Returns `true` if the submission has no puzzles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

impl FromIterator<(String, Puzzle)> for Submission {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, Puzzle)>,
    {
        Self {
            puzzles: iter.into_iter().collect(),
        }
    }
}
