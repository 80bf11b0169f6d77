//! Solver traits
//!
//! A puzzle is split into one parse step ([`AocParser`]) and one solve step
//! per part ([`PartSolver`]). [`Solver`] ties the parts together behind a
//! runtime part number and is normally derived with `#[derive(AocSolver)]`.

use crate::error::{ParseError, SolveError};

/// Turns raw puzzle text into the data every part works on
///
/// `SharedData` may borrow from the input, so solvers that only need slices
/// of the text (node names, workflow labels) can avoid copying it.
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Histories;
///
/// impl AocParser for Histories {
///     type SharedData<'a> = Vec<Vec<i64>>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|line| {
///                 line.split_whitespace()
///                     .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(line.to_string())))
///                     .collect()
///             })
///             .collect()
///     }
/// }
///
/// assert_eq!(Histories::parse("0 3 6\n1 3 6").unwrap().len(), 2);
/// assert!(Histories::parse("0 x").is_err());
/// ```
pub trait AocParser {
    /// Parsed input plus anything parts want to hand to each other
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N`
///
/// Parts run in order against the same `SharedData`, so part 2 can read what
/// part 1 left behind.
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Runtime dispatch over a solver's parts
///
/// `#[derive(AocSolver)]` writes this impl from the [`PartSolver`] impls.
/// A hand-written one looks like:
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Races;
///
/// impl AocParser for Races {
///     type SharedData<'a> = Vec<(u64, u64)>;
///
///     fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(vec![(7, 9), (15, 40)])
///     }
/// }
///
/// impl Solver for Races {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared
///                 .iter()
///                 .map(|&(time, record)| (0..=time).filter(|h| h * (time - h) > record).count())
///                 .product::<usize>()
///                 .to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut races = Races::parse("").unwrap();
/// assert_eq!(Races::solve_part(&mut races, 1).unwrap(), "32");
/// ```
pub trait Solver: AocParser {
    /// Parts are numbered `1..=PARTS`
    const PARTS: u8;

    /// Answer for `part`; `PartNotImplemented` when there is no such part
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked access to [`Solver::solve_part`]
pub trait SolverExt: Solver {
    /// Rejects parts outside `1..=PARTS` before dispatching
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Claims three parts but only answers part 1
    struct Overclaimed;

    impl AocParser for Overclaimed {
        type SharedData<'a> = &'a str;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            Ok(input)
        }
    }

    impl Solver for Overclaimed {
        const PARTS: u8 = 3;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.len().to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    #[test]
    fn test_checked_range() {
        let mut shared = Overclaimed::parse("abcd").unwrap();
        assert_eq!(
            Overclaimed::solve_part_checked_range(&mut shared, 1).unwrap(),
            "4"
        );
        assert!(matches!(
            Overclaimed::solve_part_checked_range(&mut shared, 0),
            Err(SolveError::PartOutOfRange(0))
        ));
        assert!(matches!(
            Overclaimed::solve_part_checked_range(&mut shared, 4),
            Err(SolveError::PartOutOfRange(4))
        ));
        // in range but unimplemented passes the check
        assert!(matches!(
            Overclaimed::solve_part_checked_range(&mut shared, 2),
            Err(SolveError::PartNotImplemented(2))
        ));
    }
}
