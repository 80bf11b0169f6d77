use std::collections::{HashMap, HashSet};

use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Point};

/// Unstable Diffusion
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 23, tags = ["simulation", "grid"])]
pub struct Solver;

/// Directions considered in the first round; the list rotates by one each round
const ORDER: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

/// The three squares an elf checks before stepping towards `dir`
fn lookahead(elf: Point, dir: Direction) -> [Point; 3] {
    let ahead = elf.step(dir);
    [ahead, ahead.step(dir.turn_left()), ahead.step(dir.turn_right())]
}

/// Plays round `round` (zero-based); returns whether any elf moved
fn spread(elves: &mut HashSet<Point>, round: usize) -> bool {
    let mut proposals: HashMap<Point, Vec<Point>> = HashMap::new();
    for &elf in elves.iter() {
        if !elf.surrounding().any(|p| elves.contains(&p)) {
            continue;
        }
        let choice = (0..ORDER.len())
            .map(|k| ORDER[(round + k) % ORDER.len()])
            .find(|&dir| lookahead(elf, dir).iter().all(|p| !elves.contains(p)));
        if let Some(dir) = choice {
            proposals.entry(elf.step(dir)).or_default().push(elf);
        }
    }

    let mut moved = false;
    for (target, movers) in proposals {
        if let [elf] = movers.as_slice() {
            elves.remove(elf);
            elves.insert(target);
            moved = true;
        }
    }
    moved
}

/// Empty squares in the smallest rectangle holding every elf
fn empty_ground(elves: &HashSet<Point>) -> u64 {
    let (Some(min_x), Some(max_x)) = (
        elves.iter().map(|p| p.x).min(),
        elves.iter().map(|p| p.x).max(),
    ) else {
        return 0;
    };
    let (min_y, max_y) = (
        elves.iter().map(|p| p.y).min().unwrap_or(0),
        elves.iter().map(|p| p.y).max().unwrap_or(0),
    );
    let area = (max_x - min_x + 1) as u64 * (max_y - min_y + 1) as u64;
    area - elves.len() as u64
}

impl AocParser for Solver {
    type SharedData<'a> = HashSet<Point>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input, |c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            other => bail!("unexpected tile {other:?}"),
        })
        .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;
        Ok(grid.iter().filter(|&(_, &elf)| elf).map(|(p, _)| p).collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut elves = shared.clone();
        for round in 0..10 {
            spread(&mut elves, round);
        }
        Ok(empty_ground(&elves).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// First round in which no elf moves
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut elves = shared.clone();
        let mut round = 0;
        while spread(&mut elves, round) {
            round += 1;
        }
        Ok((round + 1).to_string())
    }
}
