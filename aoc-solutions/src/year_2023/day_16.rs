use std::collections::HashSet;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Point};

/// The Floor Will Be Lava
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 16, tags = ["grid", "bfs"])]
pub struct Solver;

/// Headings leaving a tile entered while moving along `heading`
fn deflect(tile: char, heading: Direction) -> Vec<Direction> {
    use Direction::*;
    match (tile, heading) {
        ('/', East) | ('\\', West) => vec![North],
        ('/', West) | ('\\', East) => vec![South],
        ('/', North) | ('\\', South) => vec![East],
        ('/', South) | ('\\', North) => vec![West],
        ('|', East | West) => vec![North, South],
        ('-', North | South) => vec![East, West],
        _ => vec![heading],
    }
}

/// Number of tiles a beam entering at `start` heading `heading` passes through
pub fn energized(grid: &Grid<char>, start: Point, heading: Direction) -> usize {
    let mut seen: HashSet<(Point, Direction)> = HashSet::new();
    let mut beams = vec![(start, heading)];

    while let Some((pos, heading)) = beams.pop() {
        let Some(&tile) = grid.get(pos) else {
            continue;
        };
        if !seen.insert((pos, heading)) {
            continue;
        }
        for next in deflect(tile, heading) {
            beams.push((pos.step(next), next));
        }
    }

    seen.iter()
        .map(|(pos, _)| *pos)
        .collect::<HashSet<_>>()
        .len()
}

/// Every entry along the border, pointing inwards
fn edge_entries(grid: &Grid<char>) -> Vec<(Point, Direction)> {
    let (w, h) = (grid.width() as i64, grid.height() as i64);
    let mut entries = Vec::with_capacity(2 * (w + h) as usize);
    for x in 0..w {
        entries.push((Point::new(x, 0), Direction::South));
        entries.push((Point::new(x, h - 1), Direction::North));
    }
    for y in 0..h {
        entries.push((Point::new(0, y), Direction::East));
        entries.push((Point::new(w - 1, y), Direction::West));
    }
    entries
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<char>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input, |c| match c {
            '.' | '/' | '\\' | '|' | '-' => Ok(c),
            other => Err(anyhow!("unexpected {other:?}")),
        })
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(energized(shared, Point::new(0, 0), Direction::East).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        edge_entries(shared)
            .into_iter()
            .map(|(start, heading)| energized(shared, start, heading))
            .max()
            .map(|best| best.to_string())
            .ok_or_else(|| SolveError::failed("empty contraption"))
    }
}
