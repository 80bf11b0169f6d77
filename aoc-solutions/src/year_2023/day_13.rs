use anyhow::{anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::blocks;

/// Point of Incidence
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 13, tags = ["grid"])]
pub struct Solver;

/// Pattern as row and column bitmasks, `#` being a set bit
#[derive(Debug)]
pub struct Pattern {
    rows: Vec<u64>,
    cols: Vec<u64>,
}

impl Pattern {
    fn parse(lines: &[&str]) -> anyhow::Result<Self> {
        let width = lines[0].len();
        ensure!(width <= 64, "patterns wider than 64 columns are not supported");
        ensure!(lines.len() <= 64, "patterns taller than 64 rows are not supported");

        let mut rows = vec![0u64; lines.len()];
        let mut cols = vec![0u64; width];
        for (y, line) in lines.iter().enumerate() {
            ensure!(line.len() == width, "ragged pattern row {:?}", line);
            for (x, c) in line.bytes().enumerate() {
                match c {
                    b'#' => {
                        rows[y] |= 1 << x;
                        cols[x] |= 1 << y;
                    }
                    b'.' => {}
                    other => return Err(anyhow!("unexpected {:?}", other as char)),
                }
            }
        }
        Ok(Self { rows, cols })
    }

    /// Score of the mirror line that needs exactly `smudges` fixes
    fn summary(&self, smudges: u32) -> Option<usize> {
        mirror_line(&self.cols, smudges).or_else(|| mirror_line(&self.rows, smudges).map(|r| 100 * r))
    }
}

/// Count of lines before a mirror whose two sides differ in exactly `smudges` cells
fn mirror_line(lines: &[u64], smudges: u32) -> Option<usize> {
    (1..lines.len()).find(|&split| {
        let before = lines[..split].iter().rev();
        let after = lines[split..].iter();
        before.zip(after).map(|(a, b)| (a ^ b).count_ones()).sum::<u32>() == smudges
    })
}

fn total(patterns: &[Pattern], smudges: u32) -> Result<String, SolveError> {
    let mut sum = 0;
    for (i, pattern) in patterns.iter().enumerate() {
        sum += pattern
            .summary(smudges)
            .ok_or_else(|| SolveError::failed(format!("pattern {} has no mirror line", i + 1)))?;
    }
    Ok(sum.to_string())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Pattern>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        blocks(input)
            .iter()
            .enumerate()
            .map(|(i, block)| Pattern::parse(block).map_err(|e| anyhow!("(pattern {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total(shared, 0)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total(shared, 1)
    }
}
