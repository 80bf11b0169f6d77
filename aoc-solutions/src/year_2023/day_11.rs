use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::{Grid, Point};

/// Cosmic Expansion
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 11, tags = ["grid"])]
pub struct Solver;

/// Galaxy positions and the rows and columns holding none
#[derive(Debug)]
pub struct Image {
    galaxies: Vec<Point>,
    empty_rows: Vec<i64>,
    empty_cols: Vec<i64>,
}

impl Image {
    fn from_grid(grid: &Grid<bool>) -> Self {
        let galaxies: Vec<Point> = grid.iter().filter(|(_, g)| **g).map(|(p, _)| p).collect();
        let empty_rows = (0..grid.height() as i64)
            .filter(|y| galaxies.iter().all(|g| g.y != *y))
            .collect();
        let empty_cols = (0..grid.width() as i64)
            .filter(|x| galaxies.iter().all(|g| g.x != *x))
            .collect();
        Self {
            galaxies,
            empty_rows,
            empty_cols,
        }
    }

    /// Sum of pairwise distances after each empty line grows to `factor` lines
    pub fn distance_sum(&self, factor: i64) -> u64 {
        let grow = |coord: i64, empty: &[i64]| {
            coord + (factor - 1) * empty.partition_point(|&e| e < coord) as i64
        };
        let expanded: Vec<Point> = self
            .galaxies
            .iter()
            .map(|g| Point::new(grow(g.x, &self.empty_cols), grow(g.y, &self.empty_rows)))
            .collect();
        expanded
            .iter()
            .tuple_combinations()
            .map(|(a, b)| a.manhattan(*b))
            .sum()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Image;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input, |c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            other => Err(anyhow::anyhow!("unexpected {other:?}")),
        })
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(Image::from_grid(&grid))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.distance_sum(2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.distance_sum(1_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SAMPLE: &str = "...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "374");
    }

    #[test]
    fn test_larger_expansions() {
        let image = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(image.distance_sum(10), 1030);
        assert_eq!(image.distance_sum(100), 8410);
        assert_eq!(image.distance_sum(1_000_000), 82_000_210);
    }

    #[test]
    fn test_empty_lines_found() {
        let image = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(image.empty_rows, vec![3, 7]);
        assert_eq!(image.empty_cols, vec![2, 5, 8]);
        assert_eq!(image.galaxies.len(), 9);
    }
}
