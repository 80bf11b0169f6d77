use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::{non_empty_lines, numbers};

/// Wait For It
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Race {
    time: u64,
    record: u64,
}

/// Races as listed, plus the single race formed by ignoring the spaces
#[derive(Debug)]
pub struct Sheet {
    races: Vec<Race>,
    joined: Race,
}

fn field<'a>(line: Option<&'a str>, label: &str) -> anyhow::Result<&'a str> {
    line.and_then(|l| l.strip_prefix(label))
        .ok_or_else(|| anyhow!("missing '{label}' line"))
}

fn joined_number(s: &str) -> anyhow::Result<u64> {
    s.split_whitespace()
        .collect::<String>()
        .parse()
        .with_context(|| format!("invalid number {s:?}"))
}

fn parse_sheet(input: &str) -> anyhow::Result<Sheet> {
    let mut lines = non_empty_lines(input);
    let times = field(lines.next(), "Time:")?;
    let records = field(lines.next(), "Distance:")?;

    let time_values: Vec<u64> = numbers(times)?;
    let record_values: Vec<u64> = numbers(records)?;
    ensure!(
        time_values.len() == record_values.len(),
        "{} times but {} distances",
        time_values.len(),
        record_values.len()
    );

    Ok(Sheet {
        races: time_values
            .into_iter()
            .zip(record_values)
            .map(|(time, record)| Race { time, record })
            .collect(),
        joined: Race {
            time: joined_number(times)?,
            record: joined_number(records)?,
        },
    })
}

/// Number of hold times that beat the record
///
/// Distance `t * (time - t)` is symmetric around `time / 2`, so it is enough
/// to find the shortest winning hold.
pub fn ways_to_win(race: Race) -> u64 {
    let Race { time, record } = race;
    let beats = |t: u64| t * (time - t) > record;

    let half = time / 2;
    if !beats(half) {
        return 0;
    }
    let (mut lo, mut hi) = (0, half);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if beats(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    time - 2 * lo + 1
}

impl AocParser for Solver {
    type SharedData<'a> = Sheet;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_sheet(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .races
            .iter()
            .map(|&race| ways_to_win(race))
            .product::<u64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(ways_to_win(shared.joined).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;
    use proptest::prelude::*;

    const SAMPLE: &str = "Time:      7  15   30
Distance:  9  40  200
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "288");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "71503");
    }

    #[test]
    fn test_unbeatable_record() {
        assert_eq!(ways_to_win(Race { time: 4, record: 4 }), 0);
        assert_eq!(ways_to_win(Race { time: 0, record: 0 }), 0);
    }

    proptest! {
        #[test]
        fn matches_brute_force(time in 0u64..200, record in 0u64..10_000) {
            let brute = (0..=time).filter(|t| t * (time - t) > record).count() as u64;
            prop_assert_eq!(ways_to_win(Race { time, record }), brute);
        }
    }
}
