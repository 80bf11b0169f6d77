use std::collections::HashSet;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Point};
use crate::utils::parsing::non_empty_lines;

/// Rope Bridge
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 9, tags = ["simulation"])]
pub struct Solver;

/// Step `knot` one square towards `leader` unless they already touch
fn follow(knot: Point, leader: Point) -> Point {
    let d = leader - knot;
    if d.x.abs() <= 1 && d.y.abs() <= 1 {
        knot
    } else {
        knot + Point::new(d.x.signum(), d.y.signum())
    }
}

/// Distinct squares the last of `knots` visits
fn tail_visits(moves: &[(Direction, u32)], knots: usize) -> usize {
    let mut rope = vec![Point::default(); knots];
    let mut visited = HashSet::from([Point::default()]);
    for &(dir, steps) in moves {
        for _ in 0..steps {
            rope[0] = rope[0].step(dir);
            for i in 1..knots {
                rope[i] = follow(rope[i], rope[i - 1]);
            }
            visited.extend(rope.last().copied());
        }
    }
    visited.len()
}

fn parse_move(line: &str) -> anyhow::Result<(Direction, u32)> {
    let (dir, steps) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected '<dir> <steps>'"))?;
    let mut letters = dir.chars();
    let dir = match (letters.next(), letters.next()) {
        (Some(c), None) => Direction::from_letter(c)?,
        _ => return Err(anyhow!("invalid direction {dir:?}")),
    };
    let steps = steps
        .trim()
        .parse()
        .with_context(|| format!("invalid step count {steps:?}"))?;
    Ok((dir, steps))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(Direction, u32)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_move(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_visits(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_visits(shared, 10).to_string())
    }
}
