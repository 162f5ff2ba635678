//! Padding submissions to a fixed number of attempts per test case.

use crate::{Puzzle, Submission, TestCase};

/// Number of attempts every test case holds after normalization.
pub const ATTEMPTS_PER_CASE: usize = 4;

/// Pads every test case of a submission to [`ATTEMPTS_PER_CASE`] attempts.
///
/// Each test case's attempts are ordered by position, checked to be numbered
/// `1..=n` with `n <= 4`, and then extended with copies of the first attempt.
/// The input is left untouched and may come from storage, so every structural
/// invariant is re-checked here. Normalizing a normalized submission returns
/// an equal submission.
///
/// # Errors
///
/// Returns [`NormalizeError::EmptyAttemptList`] for a submission without
/// puzzles, [`NormalizeError::EmptyPuzzle`] for a puzzle without test cases,
/// [`NormalizeError::EmptyCase`] for a test case without attempts,
/// [`NormalizeError::TooManyAttempts`] for a test case with more than four
/// attempts, and [`NormalizeError::NonContiguousAttempts`] if attempt
/// positions are not exactly `1..=n`.
///
/// # Examples
///
/// ```
/// use gridsub_core::{Grid, Puzzle, Submission, TestCase, normalize};
///
/// let grid = Grid::decode("|12|34|")?;
/// let submission = [(
///     "p".to_owned(),
///     Puzzle::new(vec![TestCase::from_grids([grid.clone()])]),
/// )]
/// .into_iter()
/// .collect::<Submission>();
///
/// let padded = normalize(&submission)?;
/// let case = &padded.get("p").unwrap().test_cases()[0];
/// assert_eq!(case.attempts().len(), 4);
/// assert!((1..=4).all(|position| case.get(position) == Some(&grid)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn normalize(submission: &Submission) -> Result<Submission, NormalizeError> {
    if submission.is_empty() {
        return Err(NormalizeError::EmptyAttemptList);
    }

    let normalized = submission
        .iter()
        .map(|(puzzle_id, puzzle)| {
            let puzzle = normalize_puzzle(puzzle_id, puzzle)?;
            log::debug!("normalized {puzzle_id}: {} test case(s)", puzzle.len());
            Ok::<_, NormalizeError>((puzzle_id.to_owned(), puzzle))
        })
        .collect::<Result<Submission, _>>()?;
    log::info!(
        "padded {} puzzle(s) to {ATTEMPTS_PER_CASE} attempts per test case",
        normalized.len()
    );
    Ok(normalized)
}

fn normalize_puzzle(puzzle_id: &str, puzzle: &Puzzle) -> Result<Puzzle, NormalizeError> {
    if puzzle.is_empty() {
        return Err(NormalizeError::EmptyPuzzle {
            puzzle_id: puzzle_id.into(),
        });
    }
    let test_cases = puzzle
        .test_cases()
        .iter()
        .enumerate()
        .map(|(test_index, case)| normalize_case(puzzle_id, test_index, case))
        .collect::<Result<_, _>>()?;
    Ok(Puzzle::new(test_cases))
}

fn normalize_case(
    puzzle_id: &str,
    test_index: usize,
    case: &TestCase,
) -> Result<TestCase, NormalizeError> {
    let mut attempts = case.attempts().iter().collect::<Vec<_>>();
    attempts.sort_by_key(|attempt| attempt.position());

    let Some(first) = attempts.first() else {
        return Err(NormalizeError::EmptyCase {
            puzzle_id: puzzle_id.into(),
            test_index,
        });
    };
    if attempts.len() > ATTEMPTS_PER_CASE {
        return Err(NormalizeError::TooManyAttempts {
            puzzle_id: puzzle_id.into(),
            test_index,
            count: attempts.len(),
        });
    }
    for (expected, attempt) in (1..).zip(&attempts) {
        if attempt.position() != expected {
            return Err(NormalizeError::NonContiguousAttempts {
                puzzle_id: puzzle_id.into(),
                test_index,
                expected,
                found: attempt.position(),
            });
        }
    }

    let first = first.grid();
    let grids = attempts
        .iter()
        .map(|attempt| attempt.grid())
        .chain(std::iter::repeat(first))
        .take(ATTEMPTS_PER_CASE)
        .cloned();
    Ok(TestCase::from_grids(grids))
}

/// Errors that can occur while normalizing a submission.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum NormalizeError {
    /// The submission has no puzzles.
    #[display("submission has no puzzles")]
    EmptyAttemptList,
    /// A puzzle has no test cases.
    #[display("puzzle {puzzle_id} has no test cases")]
    EmptyPuzzle {
        /// The offending puzzle.
        puzzle_id: String,
    },
    /// A test case has no attempts.
    #[display("test case {test_index} of {puzzle_id} is empty")]
    EmptyCase {
        /// The offending puzzle.
        puzzle_id: String,
        /// 0-based index of the offending test case.
        test_index: usize,
    },
    /// A test case has more attempts than allowed.
    #[display("test case {test_index} of {puzzle_id} has {count} attempts, at most 4 allowed")]
    TooManyAttempts {
        /// The offending puzzle.
        puzzle_id: String,
        /// 0-based index of the offending test case.
        test_index: usize,
        /// Number of attempts found.
        count: usize,
    },
    /// Attempt positions are not exactly `1..=n`.
    #[display(
        "attempt positions of test case {test_index} of {puzzle_id} are not contiguous: expected {expected}, got {found}"
    )]
    NonContiguousAttempts {
        /// The offending puzzle.
        puzzle_id: String,
        /// 0-based index of the offending test case.
        test_index: usize,
        /// The position that should be present.
        expected: usize,
        /// The position found in its place.
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{Digit, Grid};

    fn grid(text: &str) -> Grid {
        Grid::decode(text).unwrap()
    }

    fn single(case: TestCase) -> Submission {
        [("p".to_owned(), Puzzle::new(vec![case]))]
            .into_iter()
            .collect()
    }

    /// Builds a test case with the given stored positions, as if loaded from storage.
    fn attempts(positions: &[usize]) -> TestCase {
        let entries = positions
            .iter()
            .map(|position| format!(r#""attempt_{position}": [[1]]"#))
            .collect::<Vec<_>>();
        serde_json::from_str(&format!("{{{}}}", entries.join(", "))).unwrap()
    }

    fn is_normalized(submission: &Submission) -> bool {
        submission.iter().all(|(_, puzzle)| {
            puzzle.test_cases().iter().all(|case| {
                case.attempts().len() == ATTEMPTS_PER_CASE
                    && (1..)
                        .zip(case.attempts())
                        .all(|(expected, attempt)| attempt.position() == expected)
            })
        })
    }

    #[test]
    fn test_pads_single_attempt() {
        let g = grid("|12|34|");
        let padded = normalize(&single(TestCase::from_grids([g.clone()]))).unwrap();
        let case = &padded.get("p").unwrap().test_cases()[0];
        assert_eq!(*case, TestCase::from_grids(vec![g; 4]));
        assert!(is_normalized(&padded));
    }

    #[test]
    fn test_pads_with_first_attempt() {
        let case = TestCase::from_grids([grid("|56|78|"), grid("|91|23|")]);
        let padded = normalize(&single(case)).unwrap();
        let case = &padded.get("p").unwrap().test_cases()[0];
        assert_eq!(case.get(1), Some(&grid("|56|78|")));
        assert_eq!(case.get(2), Some(&grid("|91|23|")));
        assert_eq!(case.get(3), Some(&grid("|56|78|")));
        assert_eq!(case.get(4), Some(&grid("|56|78|")));
    }

    #[test]
    fn test_sorts_stored_positions() {
        let case: TestCase =
            serde_json::from_str(r#"{"attempt_2": [[2]], "attempt_1": [[1]]}"#).unwrap();
        let original = single(case);
        let padded = normalize(&original).unwrap();
        let case = &padded.get("p").unwrap().test_cases()[0];
        assert_eq!(
            *case,
            TestCase::from_grids([grid("|1|"), grid("|2|"), grid("|1|"), grid("|1|")])
        );
        // The input is not modified.
        let stored = &original.get("p").unwrap().test_cases()[0];
        assert_eq!(stored.attempts()[0].position(), 2);
        assert_eq!(stored.attempts().len(), 2);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            normalize(&Submission::default()),
            Err(NormalizeError::EmptyAttemptList)
        );

        let empty_puzzle = [("p".to_owned(), Puzzle::default())]
            .into_iter()
            .collect::<Submission>();
        assert_eq!(
            normalize(&empty_puzzle),
            Err(NormalizeError::EmptyPuzzle {
                puzzle_id: "p".into()
            })
        );

        assert_eq!(
            normalize(&single(TestCase::default())),
            Err(NormalizeError::EmptyCase {
                puzzle_id: "p".into(),
                test_index: 0,
            })
        );

        assert_eq!(
            normalize(&single(attempts(&[1, 2, 3, 4, 5]))),
            Err(NormalizeError::TooManyAttempts {
                puzzle_id: "p".into(),
                test_index: 0,
                count: 5,
            })
        );

        for (positions, expected, found) in [
            (&[2][..], 1, 2),
            (&[0, 1][..], 1, 0),
            (&[1, 3][..], 2, 3),
            (&[1, 1][..], 2, 1),
        ] {
            assert_eq!(
                normalize(&single(attempts(positions))),
                Err(NormalizeError::NonContiguousAttempts {
                    puzzle_id: "p".into(),
                    test_index: 0,
                    expected,
                    found,
                }),
                "{positions:?}"
            );
        }
    }

    #[test]
    fn test_reports_failing_test_case() {
        let puzzle = Puzzle::new(vec![attempts(&[1]), attempts(&[1, 2]), attempts(&[2])]);
        let submission = [("q".to_owned(), puzzle)].into_iter().collect::<Submission>();
        assert!(matches!(
            normalize(&submission),
            Err(NormalizeError::NonContiguousAttempts { test_index: 2, .. })
        ));
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1..5_usize, 1..5_usize).prop_flat_map(|(height, width)| {
            prop::collection::vec(prop::collection::vec(0..=Digit::MAX, width), height).prop_map(
                |rows| {
                    let rows = rows
                        .into_iter()
                        .map(|row| row.into_iter().filter_map(Digit::new).collect())
                        .collect::<Vec<Vec<_>>>();
                    Grid::try_from(rows).unwrap()
                },
            )
        })
    }

    fn arb_submission() -> impl Strategy<Value = Submission> {
        let case = prop::collection::vec(arb_grid(), 1..=ATTEMPTS_PER_CASE)
            .prop_map(TestCase::from_grids);
        let puzzle = prop::collection::vec(case, 1..4).prop_map(Puzzle::new);
        prop::collection::btree_map("[a-z0-9]{1,8}", puzzle, 1..5)
            .prop_map(|puzzles| puzzles.into_iter().collect::<Submission>())
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(submission in arb_submission()) {
            let once = normalize(&submission).unwrap();
            let twice = normalize(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalize_pads_with_first_attempt(submission in arb_submission()) {
            let padded = normalize(&submission).unwrap();
            prop_assert!(is_normalized(&padded));
            prop_assert_eq!(padded.len(), submission.len());
            for ((id, puzzle), (padded_id, padded_puzzle)) in submission.iter().zip(padded.iter()) {
                prop_assert_eq!(id, padded_id);
                prop_assert_eq!(puzzle.len(), padded_puzzle.len());
                for (case, padded_case) in puzzle.test_cases().iter().zip(padded_puzzle.test_cases()) {
                    let first = case.get(1).unwrap();
                    for position in 1..=ATTEMPTS_PER_CASE {
                        let expected = case.get(position).unwrap_or(first);
                        prop_assert_eq!(padded_case.get(position), Some(expected));
                    }
                }
            }
        }
    }
}
