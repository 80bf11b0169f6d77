use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::non_empty_lines;

/// Grove Positioning System
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 20, tags = ["simulation"])]
pub struct Solver;

const DECRYPTION_KEY: i64 = 811_589_153;

/// Order of `numbers` after `rounds` rounds of mixing
///
/// Each number moves forward by its value around a circle of the other
/// `len - 1` numbers, in the order the numbers were originally listed.
fn mix(numbers: &[i64], rounds: usize) -> Vec<i64> {
    let mut order: Vec<usize> = (0..numbers.len()).collect();
    let others = numbers.len() as i64 - 1;
    if others <= 0 {
        return numbers.to_vec();
    }
    for _ in 0..rounds {
        for (original, &value) in numbers.iter().enumerate() {
            let Some(at) = order.iter().position(|&i| i == original) else {
                continue;
            };
            order.remove(at);
            let to = (at as i64 + value).rem_euclid(others) as usize;
            order.insert(to, original);
        }
    }
    order.into_iter().map(|i| numbers[i]).collect()
}

/// Sum of the 1000th, 2000th and 3000th numbers after the zero
fn grove_coordinates(mixed: &[i64]) -> Result<i64, SolveError> {
    let zero = mixed
        .iter()
        .position(|&n| n == 0)
        .ok_or_else(|| SolveError::failed("no zero in the file"))?;
    Ok([1000, 2000, 3000]
        .iter()
        .map(|offset| mixed[(zero + offset) % mixed.len()])
        .sum())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .map(|line| {
                line.trim()
                    .parse()
                    .with_context(|| format!("invalid number {line:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        grove_coordinates(&mix(shared, 1)).map(|sum| sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let decrypted: Vec<i64> = shared.iter().map(|n| n * DECRYPTION_KEY).collect();
        grove_coordinates(&mix(&decrypted, 10)).map(|sum| sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "1\n2\n-3\n3\n-2\n0\n4\n";

    /// Rotate so the zero comes first, for comparing circular orders
    fn from_zero(mixed: Vec<i64>) -> Vec<i64> {
        let zero = mixed.iter().position(|&n| n == 0).unwrap();
        mixed[zero..].iter().chain(&mixed[..zero]).copied().collect()
    }

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "3");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "1623178306");
    }

    #[test]
    fn test_single_round_order() {
        let numbers = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(from_zero(mix(&numbers, 1)), vec![0, 3, -2, 1, 2, -3, 4]);
    }

    #[test]
    fn test_missing_zero() {
        let mut numbers = <Solver as AocParser>::parse("1\n2\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut numbers).is_err());
        assert!(<Solver as AocParser>::parse("1\nx\n").is_err());
    }
}
