use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::{Grid, Point};

/// Gear Ratios
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["grid"])]
pub struct Solver;

/// A number in the schematic and the symbols touching it
#[derive(Debug)]
pub struct PartNumber {
    value: u64,
    symbols: Vec<(Point, char)>,
}

fn is_symbol(c: char) -> bool {
    c != '.' && !c.is_ascii_digit()
}

fn scan_numbers(grid: &Grid<char>) -> Vec<PartNumber> {
    let mut numbers = Vec::new();
    for y in 0..grid.height() {
        let row = grid.row(y);
        let mut x = 0;
        while x < row.len() {
            if !row[x].is_ascii_digit() {
                x += 1;
                continue;
            }
            let start = x;
            let mut value = 0u64;
            while let Some(d) = row.get(x).and_then(|c| c.to_digit(10)) {
                value = value * 10 + u64::from(d);
                x += 1;
            }

            let symbols = (start..x)
                .flat_map(|cx| Point::new(cx as i64, y as i64).surrounding())
                .unique()
                .filter_map(|p| grid.get(p).filter(|c| is_symbol(**c)).map(|c| (p, *c)))
                .collect();
            numbers.push(PartNumber { value, symbols });
        }
    }
    numbers
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<PartNumber>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse_chars(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(scan_numbers(&grid))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|n| !n.symbols.is_empty())
            .map(|n| n.value)
            .sum::<u64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut gears: HashMap<Point, Vec<u64>> = HashMap::new();
        for number in shared.iter() {
            for (p, c) in &number.symbols {
                if *c == '*' {
                    gears.entry(*p).or_default().push(number.value);
                }
            }
        }
        Ok(gears
            .values()
            .filter(|values| values.len() == 2)
            .map(|values| values[0] * values[1])
            .sum::<u64>()
            .to_string())
    }
}
