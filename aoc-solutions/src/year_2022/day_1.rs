use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::blocks;

/// Calorie Counting
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 1, tags = ["parsing", "sorting"])]
pub struct Solver;

/// Sum of the `n` largest totals
fn top_total(totals: &[u64], n: usize) -> u64 {
    // sorted descending at parse time
    totals.iter().take(n).sum()
}

impl AocParser for Solver {
    /// Calories carried per elf, largest first
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut totals = blocks(input)
            .into_iter()
            .map(|block| {
                block
                    .iter()
                    .map(|line| {
                        line.trim()
                            .parse::<u64>()
                            .with_context(|| format!("invalid calorie count {line:?}"))
                    })
                    .sum::<anyhow::Result<u64>>()
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;
        if totals.is_empty() {
            return Err(ParseError::MissingData("no elves".into()));
        }
        totals.sort_unstable_by(|a, b| b.cmp(a));
        Ok(totals)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(top_total(shared, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(top_total(shared, 3).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "1000
2000
3000

4000

5000
6000

7000
8000
9000

10000
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "24000");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "45000");
    }

    #[test]
    fn test_fewer_than_three_elves() {
        assert_eq!(solve::<Solver>("5\n\n7\n", 2), "12");
    }

    #[test]
    fn test_bad_count_rejected() {
        assert!(matches!(
            <Solver as AocParser>::parse("100\nabc\n"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            <Solver as AocParser>::parse("\n\n"),
            Err(ParseError::MissingData(_))
        ));
    }
}
