use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Point};

/// Treetop Tree House
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 8, tags = ["grid"])]
pub struct Solver;

/// Trees passed looking from `tree` towards `dir`, and whether the view reaches the edge
fn sight_line(grid: &Grid<u8>, tree: Point, dir: Direction) -> (u64, bool) {
    let height = grid.get(tree).copied().unwrap_or_default();
    let mut seen = 0;
    let mut p = tree.step(dir);
    while let Some(&other) = grid.get(p) {
        seen += 1;
        if other >= height {
            return (seen, false);
        }
        p = p.step(dir);
    }
    (seen, true)
}

fn visible_from_outside(grid: &Grid<u8>, tree: Point) -> bool {
    Direction::ALL
        .into_iter()
        .any(|dir| sight_line(grid, tree, dir).1)
}

fn scenic_score(grid: &Grid<u8>, tree: Point) -> u64 {
    Direction::ALL
        .into_iter()
        .map(|dir| sight_line(grid, tree, dir).0)
        .product()
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_digits(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .points()
            .filter(|&p| visible_from_outside(shared, p))
            .count()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .points()
            .map(|p| scenic_score(shared, p))
            .max()
            .unwrap_or_default()
            .to_string())
    }
}
