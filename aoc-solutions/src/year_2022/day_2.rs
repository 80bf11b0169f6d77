use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::non_empty_lines;

/// Rock Paper Scissors
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 2, tags = ["parsing"])]
pub struct Solver;

/// One strategy guide line as column indices: opponent `A..=C`, second column `X..=Z`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    opponent: u8,
    column: u8,
}

/// Shape values 0 rock, 1 paper, 2 scissors
fn score(opponent: u8, me: u8) -> u64 {
    // 0 draw, 1 win, 2 loss
    let result = (me + 3 - opponent) % 3;
    u64::from(me + 1) + u64::from((result + 1) % 3) * 3
}

impl Round {
    /// Second column read as the shape to play
    fn as_shape(self) -> u64 {
        score(self.opponent, self.column)
    }

    /// Second column read as the outcome: lose, draw, win
    fn as_outcome(self) -> u64 {
        let me = (self.opponent + self.column + 2) % 3;
        score(self.opponent, me)
    }
}

fn parse_round(line: &str) -> anyhow::Result<Round> {
    let (opponent, column) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected two columns"))?;
    let opponent = match opponent.trim() {
        "A" => 0,
        "B" => 1,
        "C" => 2,
        other => bail!("unknown opponent shape {other:?}"),
    };
    let column = match column.trim() {
        "X" => 0,
        "Y" => 1,
        "Z" => 2,
        other => bail!("unknown response {other:?}"),
    };
    Ok(Round { opponent, column })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Round>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_round(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|r| r.as_shape()).sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|r| r.as_outcome()).sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "A Y
B X
C Z
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "15");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "12");
    }

    #[test]
    fn test_every_pairing() {
        // rows: opponent rock, paper, scissors; columns: I play rock, paper, scissors
        let expected = [[4, 8, 3], [1, 5, 9], [7, 2, 6]];
        for (opponent, row) in expected.iter().enumerate() {
            for (me, &points) in row.iter().enumerate() {
                assert_eq!(score(opponent as u8, me as u8), points);
            }
        }
    }

    #[test]
    fn test_unknown_letters_rejected() {
        assert!(parse_round("D X").is_err());
        assert!(parse_round("A W").is_err());
        assert!(parse_round("AX").is_err());
    }
}
