use anyhow::{Context, anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::blocks;

/// Supply Stacks
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 5, tags = ["parsing", "simulation"])]
pub struct Solver;

/// `count` crates from stack `from` to stack `to`, both zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    count: usize,
    from: usize,
    to: usize,
}

#[derive(Debug, Clone)]
pub struct Cargo {
    /// Bottom crate first
    stacks: Vec<Vec<u8>>,
    moves: Vec<Move>,
}

impl Cargo {
    /// Letters on top of each stack after every move
    ///
    /// The CrateMover 9000 lifts one crate at a time, reversing the moved
    /// run; the 9001 lifts the whole run at once.
    fn rearrange(&self, keep_order: bool) -> Result<String, SolveError> {
        let mut stacks = self.stacks.clone();
        for (i, m) in self.moves.iter().enumerate() {
            let source = &mut stacks[m.from];
            let Some(split) = source.len().checked_sub(m.count) else {
                return Err(SolveError::failed(format!(
                    "move {} takes {} crates from a stack of {}",
                    i + 1,
                    m.count,
                    source.len()
                )));
            };
            let mut lifted = source.split_off(split);
            if !keep_order {
                lifted.reverse();
            }
            stacks[m.to].extend(lifted);
        }
        Ok(stacks
            .iter()
            .filter_map(|s| s.last())
            .map(|&c| c as char)
            .collect())
    }
}

fn parse_drawing(lines: &[&str]) -> anyhow::Result<Vec<Vec<u8>>> {
    let (labels, rows) = lines
        .split_last()
        .ok_or_else(|| anyhow!("missing stack drawing"))?;
    let count = labels.split_whitespace().count();
    ensure!(count > 0, "no stack labels under the drawing");

    let mut stacks = vec![Vec::new(); count];
    for row in rows.iter().rev() {
        for (i, &c) in row.as_bytes().iter().skip(1).step_by(4).enumerate() {
            match c {
                b' ' => {}
                b'A'..=b'Z' if i < count => stacks[i].push(c),
                _ => bail!("unexpected crate {:?} in {row:?}", c as char),
            }
        }
    }
    Ok(stacks)
}

fn parse_move(line: &str, stacks: usize) -> anyhow::Result<Move> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let ["move", count, "from", from, "to", to] = words.as_slice() else {
        bail!("expected 'move <n> from <a> to <b>', got {line:?}");
    };
    let stack = |s: &str| -> anyhow::Result<usize> {
        let n: usize = s.parse().with_context(|| format!("invalid stack {s:?}"))?;
        ensure!((1..=stacks).contains(&n), "no stack {n}");
        Ok(n - 1)
    };
    Ok(Move {
        count: count
            .parse()
            .with_context(|| format!("invalid crate count {count:?}"))?,
        from: stack(from)?,
        to: stack(to)?,
    })
}

fn parse_cargo(input: &str) -> anyhow::Result<Cargo> {
    let blocks = blocks(input);
    let [drawing, moves] = blocks.as_slice() else {
        bail!("expected a stack drawing and a move list");
    };
    let stacks = parse_drawing(drawing)?;
    let moves = moves
        .iter()
        .enumerate()
        .map(|(i, line)| {
            parse_move(line, stacks.len()).map_err(|e| anyhow!("(move {}) {:#}", i + 1, e))
        })
        .collect::<anyhow::Result<_>>()?;
    Ok(Cargo { stacks, moves })
}

impl AocParser for Solver {
    type SharedData<'a> = Cargo;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_cargo(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.rearrange(false)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.rearrange(true)
    }
}
