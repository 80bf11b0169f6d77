use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::interval::ClosedInterval;
use crate::utils::parsing::non_empty_lines;

/// Camp Cleanup
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 4, tags = ["interval"])]
pub struct Solver;

fn parse_sections(s: &str) -> anyhow::Result<ClosedInterval> {
    let (low, high) = s
        .split_once('-')
        .ok_or_else(|| anyhow!("expected '<low>-<high>', got {s:?}"))?;
    let low = low.parse().with_context(|| format!("invalid section {low:?}"))?;
    let high = high.parse().with_context(|| format!("invalid section {high:?}"))?;
    ClosedInterval::new(low, high).ok_or_else(|| anyhow!("section range {s:?} runs backwards"))
}

fn parse_pair(line: &str) -> anyhow::Result<(ClosedInterval, ClosedInterval)> {
    let (a, b) = line
        .split_once(',')
        .ok_or_else(|| anyhow!("expected two assignments"))?;
    Ok((parse_sections(a.trim())?, parse_sections(b.trim())?))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(ClosedInterval, ClosedInterval)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_pair(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|(a, b)| a.covers(b) || b.covers(a))
            .count()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|(a, b)| a.intersection(b).is_some())
            .count()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "2-4,6-8
2-3,4-5
5-7,7-9
2-8,3-7
6-6,4-6
2-6,4-8
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "2");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "4");
    }

    #[test]
    fn test_bad_assignments_rejected() {
        assert!(parse_pair("4-2,1-3").is_err());
        assert!(parse_pair("1-3").is_err());
        assert!(parse_pair("1-x,2-3").is_err());
    }
}
