use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::{non_empty_lines, numbers};

/// Mirage Maintenance
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["math"])]
pub struct Solver;

/// Next value of the sequence by repeated differencing
pub fn extrapolate(values: &[i64]) -> i64 {
    let mut row = values.to_vec();
    let mut next = 0;
    while row.iter().any(|&v| v != 0) {
        next += row[row.len() - 1];
        row = row.windows(2).map(|w| w[1] - w[0]).collect();
    }
    next
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| numbers(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|values| extrapolate(values))
            .sum::<i64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // extrapolating the reversed sequence gives the previous value
        for values in shared.iter_mut() {
            values.reverse();
        }
        let total: i64 = shared.iter().map(|values| extrapolate(values)).sum();
        for values in shared.iter_mut() {
            values.reverse();
        }
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SAMPLE: &str = "0 3 6 9 12 15
1 3 6 10 15 21
10 13 16 21 30 45
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "114");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "2");
    }

    #[test]
    fn test_parts_share_data_without_interference() {
        let mut shared = <Solver as AocParser>::parse(SAMPLE).unwrap();
        let backwards = <Solver as PartSolver<2>>::solve(&mut shared).unwrap();
        let forwards = <Solver as PartSolver<1>>::solve(&mut shared).unwrap();
        assert_eq!((forwards.as_str(), backwards.as_str()), ("114", "2"));
    }

    #[test]
    fn test_extrapolate_edge_cases() {
        assert_eq!(extrapolate(&[]), 0);
        assert_eq!(extrapolate(&[7]), 7);
        assert_eq!(extrapolate(&[1, 4, 9, 16]), 25);
    }
}
