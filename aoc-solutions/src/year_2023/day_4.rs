use std::collections::HashSet;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::{non_empty_lines, numbers};

/// Scratchcards
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["parsing"])]
pub struct Solver;

/// Winning-number count of one card
fn parse_card(line: &str) -> anyhow::Result<usize> {
    let (_, numbers_part) = line.split_once(':').ok_or_else(|| anyhow!("missing ':'"))?;
    let (winning, have) = numbers_part
        .split_once('|')
        .ok_or_else(|| anyhow!("missing '|'"))?;
    let winning: HashSet<u32> = numbers::<u32>(winning)
        .context("winning numbers")?
        .into_iter()
        .collect();
    let have: Vec<u32> = numbers(have).context("card numbers")?;
    Ok(have.iter().filter(|n| winning.contains(*n)).count())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<usize>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_card(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|&&m| m > 0)
            .map(|&m| 1u64 << (m - 1))
            .sum::<u64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut copies = vec![1u64; shared.len()];
        for (i, &matches) in shared.iter().enumerate() {
            let won = copies[i];
            // copies never run past the last card
            let end = (i + 1 + matches).min(copies.len());
            for count in &mut copies[i + 1..end] {
                *count += won;
            }
        }
        Ok(copies.iter().sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SAMPLE: &str = "Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "13");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "30");
    }

    #[test]
    fn test_parse_card_counts_matches() {
        assert_eq!(parse_card("Card 9: 1 2 3 | 3 2 9").unwrap(), 2);
        assert!(parse_card("Card 9: 1 2 3").is_err());
    }
}
