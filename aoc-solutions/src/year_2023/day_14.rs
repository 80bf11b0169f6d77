use std::collections::HashMap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Point};

/// Parabolic Reflector Dish
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 14, tags = ["grid", "cycle"])]
pub struct Solver;

const ROUND: u8 = b'O';
const CUBE: u8 = b'#';
const EMPTY: u8 = b'.';

const SPIN: [Direction; 4] = [
    Direction::North,
    Direction::West,
    Direction::South,
    Direction::East,
];

/// Roll every round rock as far as it goes towards `dir`
fn tilt(grid: &mut Grid<u8>, dir: Direction) {
    let (w, h) = (grid.width() as i64, grid.height() as i64);
    // lanes run parallel to `dir`; step 0 is the cell against the wall
    let (lanes, steps) = match dir {
        Direction::North | Direction::South => (w, h),
        Direction::East | Direction::West => (h, w),
    };
    let at = |lane: i64, step: i64| match dir {
        Direction::North => Point::new(lane, step),
        Direction::South => Point::new(lane, h - 1 - step),
        Direction::West => Point::new(step, lane),
        Direction::East => Point::new(w - 1 - step, lane),
    };

    for lane in 0..lanes {
        let mut free = 0;
        for step in 0..steps {
            let p = at(lane, step);
            match grid.get(p).copied() {
                Some(CUBE) => free = step + 1,
                Some(ROUND) => {
                    if free != step {
                        if let Some(cell) = grid.get_mut(p) {
                            *cell = EMPTY;
                        }
                        if let Some(cell) = grid.get_mut(at(lane, free)) {
                            *cell = ROUND;
                        }
                    }
                    free += 1;
                }
                _ => {}
            }
        }
    }
}

/// Total load on the north support beams
fn north_load(grid: &Grid<u8>) -> u64 {
    let h = grid.height() as i64;
    grid.iter()
        .filter(|(_, c)| **c == ROUND)
        .map(|(p, _)| (h - p.y) as u64)
        .sum()
}

/// Load after `cycles` spin cycles, skipping ahead once a state repeats
fn load_after_spins(mut grid: Grid<u8>, cycles: usize) -> u64 {
    let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
    let mut loads = Vec::new();

    for done in 0..cycles {
        if let Some(&first) = seen.get(grid.cells()) {
            let period = done - first;
            return loads[first + (cycles - first) % period];
        }
        seen.insert(grid.cells().to_vec(), done);
        loads.push(north_load(&grid));
        for dir in SPIN {
            tilt(&mut grid, dir);
        }
    }
    north_load(&grid)
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input, |c| match c {
            'O' | '#' | '.' => Ok(c as u8),
            other => Err(anyhow!("unexpected {other:?}")),
        })
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.clone();
        tilt(&mut grid, Direction::North);
        Ok(north_load(&grid).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(load_after_spins(shared.clone(), 1_000_000_000).to_string())
    }
}
