use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Point, lattice_points_with_boundary};
use crate::utils::parsing::non_empty_lines;

/// Lavaduct Lagoon
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dig {
    dir: Direction,
    len: i64,
}

/// Each plan line read both ways: as written and from the colour code
#[derive(Debug)]
pub struct DigPlan {
    plain: Vec<Dig>,
    from_colour: Vec<Dig>,
}

fn parse_line(line: &str) -> anyhow::Result<(Dig, Dig)> {
    let mut parts = line.split_whitespace();
    let (Some(dir), Some(len), Some(colour), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        bail!("expected '<dir> <len> (#rrggbb)'");
    };

    let mut dir_chars = dir.chars();
    let (Some(dir), None) = (dir_chars.next(), dir_chars.next()) else {
        bail!("direction must be one letter, got {dir:?}");
    };
    let plain = Dig {
        dir: Direction::from_letter(dir)?,
        len: len.parse::<i64>().with_context(|| format!("invalid length {len:?}"))?,
    };

    let hex = colour
        .strip_prefix("(#")
        .and_then(|c| c.strip_suffix(')'))
        .filter(|c| c.len() == 6)
        .ok_or_else(|| anyhow!("expected colour '(#rrggbb)', got {colour:?}"))?;
    let len = i64::from_str_radix(&hex[..5], 16).context("invalid colour distance")?;
    let dir = match &hex[5..] {
        "0" => Direction::East,
        "1" => Direction::South,
        "2" => Direction::West,
        "3" => Direction::North,
        other => bail!("invalid colour direction {other:?}"),
    };
    Ok((plain, Dig { dir, len }))
}

/// Cubic metres of lava the dug-out lagoon holds
pub fn lagoon_volume(plan: &[Dig]) -> u64 {
    let mut pos = Point::default();
    let mut corners = Vec::with_capacity(plan.len());
    let mut boundary = 0u64;
    for dig in plan {
        pos = pos + dig.dir.delta() * dig.len;
        corners.push(pos);
        boundary += dig.len.unsigned_abs();
    }
    lattice_points_with_boundary(&corners, boundary)
}

impl AocParser for Solver {
    type SharedData<'a> = DigPlan;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (plain, from_colour) = non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_line(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<(Vec<_>, Vec<_>)>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(DigPlan { plain, from_colour })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_volume(&shared.plain).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_volume(&shared.from_colour).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SAMPLE: &str = "R 6 (#70c710)
D 5 (#0dc571)
L 2 (#5713f0)
D 2 (#d2c081)
R 2 (#59c680)
D 2 (#411b91)
L 5 (#8ceee2)
U 2 (#caa173)
L 1 (#1b58a2)
U 2 (#caa171)
R 2 (#7807d2)
U 3 (#a77fa3)
L 2 (#015232)
U 2 (#7a21e3)
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "62");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "952408144115");
    }

    #[test]
    fn test_colour_decoding() {
        let (plain, decoded) = parse_line("R 6 (#70c710)").unwrap();
        assert_eq!(plain, Dig { dir: Direction::East, len: 6 });
        assert_eq!(decoded, Dig { dir: Direction::East, len: 461_937 });
    }

    #[test]
    fn test_bad_lines_rejected() {
        assert!(parse_line("X 6 (#70c710)").is_err());
        assert!(parse_line("R 6 (#70c714)").is_err());
        assert!(parse_line("R 6").is_err());
    }
}
