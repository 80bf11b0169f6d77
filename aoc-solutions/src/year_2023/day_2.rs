use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// Cube Conundrum
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["parsing"])]
pub struct Solver;

/// Largest number of red, green and blue cubes seen in one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    id: u32,
    red: u32,
    green: u32,
    blue: u32,
}

fn parse_game(line: &str) -> anyhow::Result<Game> {
    let (head, draws) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':'"))?;
    let id: u32 = head
        .trim()
        .strip_prefix("Game ")
        .ok_or_else(|| anyhow!("expected 'Game <id>'"))?
        .parse()
        .context("invalid game id")?;

    let mut game = Game {
        id,
        red: 0,
        green: 0,
        blue: 0,
    };
    for cubes in draws.split([';', ',']) {
        let (count, colour) = cubes
            .trim()
            .split_once(' ')
            .ok_or_else(|| anyhow!("expected '<count> <colour>', got {cubes:?}"))?;
        let count: u32 = count.parse().context("invalid cube count")?;
        let slot = match colour {
            "red" => &mut game.red,
            "green" => &mut game.green,
            "blue" => &mut game.blue,
            other => bail!("unknown colour {other:?}"),
        };
        *slot = (*slot).max(count);
    }
    Ok(game)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Game>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(i, line)| parse_game(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|g| g.red <= 12 && g.green <= 13 && g.blue <= 14)
            .map(|g| g.id)
            .sum::<u32>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|g| u64::from(g.red) * u64::from(g.green) * u64::from(g.blue))
            .sum::<u64>()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SAMPLE: &str = "Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "8");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "2286");
    }

    #[test]
    fn test_parse_game_keeps_maxima() {
        let game = parse_game("Game 17: 3 blue, 4 red; 1 red, 2 green, 6 blue").unwrap();
        assert_eq!(
            game,
            Game {
                id: 17,
                red: 4,
                green: 2,
                blue: 6
            }
        );
    }

    #[test]
    fn test_unknown_colour_is_rejected() {
        let err = <Solver as AocParser>::parse("Game 1: 3 purple").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.contains("purple")));
    }
}
