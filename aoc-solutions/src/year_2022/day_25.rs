use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::non_empty_lines;

/// Full of Hot Air
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2022, day = 25, tags = ["math", "strings"])]
pub struct Solver;

/// Balanced base five with digits `=`, `-`, `0`, `1`, `2` worth -2 to 2
pub fn from_snafu(s: &str) -> anyhow::Result<i64> {
    s.chars().try_fold(0i64, |acc, c| {
        let digit = match c {
            '=' => -2,
            '-' => -1,
            '0' => 0,
            '1' => 1,
            '2' => 2,
            other => bail!("invalid SNAFU digit {other:?}"),
        };
        acc.checked_mul(5)
            .and_then(|acc| acc.checked_add(digit))
            .ok_or_else(|| anyhow!("{s:?} does not fit in 64 bits"))
    })
}

pub fn to_snafu(mut n: i64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n != 0 {
        // shift the remainder from 0..=4 into -2..=2 and carry the difference
        let r = (n + 2).rem_euclid(5) - 2;
        digits.push(match r {
            -2 => '=',
            -1 => '-',
            0 => '0',
            1 => '1',
            _ => '2',
        });
        n = (n - r) / 5;
    }
    digits.iter().rev().collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| from_snafu(line.trim()).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .try_fold(0i64, |acc, &n| acc.checked_add(n))
            .map(to_snafu)
            .ok_or_else(|| SolveError::failed("fuel requirement overflows"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "1=-0-2
12111
2=0=
21
2=01
111
20012
112
1=-1=
1-12
12
1=
122
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "2=-1=0");
    }

    #[test]
    fn test_known_conversions() {
        let pairs = [
            (1, "1"),
            (3, "1="),
            (8, "2="),
            (2022, "1=11-2"),
            (12345, "1-0---0"),
            (314159265, "1121-1110-1=0"),
        ];
        for (n, s) in pairs {
            assert_eq!(to_snafu(n), s);
            assert_eq!(from_snafu(s).unwrap(), n);
        }
        assert_eq!(to_snafu(0), "0");
        assert!(from_snafu("12a").is_err());
    }

    #[test]
    fn test_only_one_part() {
        let mut shared = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert!(matches!(
            <Solver as aoc_solver::Solver>::solve_part(&mut shared, 2),
            Err(SolveError::PartNotImplemented(2))
        ));
    }
}
