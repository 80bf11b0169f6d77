use anyhow::{anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parsing::non_empty_lines;

/// Rucksack Reorganization
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 3, tags = ["strings", "bitset"])]
pub struct Solver;

/// Item types as a bitset: bit `p` set when an item of priority `p` is present
type ItemSet = u64;

fn priority(item: u8) -> anyhow::Result<u32> {
    match item {
        b'a'..=b'z' => Ok(u32::from(item - b'a') + 1),
        b'A'..=b'Z' => Ok(u32::from(item - b'A') + 27),
        other => bail!("unknown item {:?}", other as char),
    }
}

fn item_set(items: &[u8]) -> anyhow::Result<ItemSet> {
    items
        .iter()
        .try_fold(0, |set, &item| Ok(set | 1 << priority(item)?))
}

/// Priority of the single item type present in every set
fn shared_priority(sets: &[ItemSet]) -> Result<u64, SolveError> {
    let common = sets.iter().fold(ItemSet::MAX, |acc, s| acc & s);
    if common.count_ones() != 1 {
        return Err(SolveError::failed(format!(
            "expected one shared item type, found {}",
            common.count_ones()
        )));
    }
    Ok(u64::from(common.trailing_zeros()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rucksack {
    left: ItemSet,
    right: ItemSet,
}

fn parse_rucksack(line: &str) -> anyhow::Result<Rucksack> {
    let bytes = line.trim().as_bytes();
    ensure!(bytes.len() % 2 == 0, "odd number of items");
    let (left, right) = bytes.split_at(bytes.len() / 2);
    Ok(Rucksack {
        left: item_set(left)?,
        right: item_set(right)?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Rucksack>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_rucksack(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .map(|r| shared_priority(&[r.left, r.right]))
            .sum::<Result<u64, _>>()
            .map(|total| total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() % 3 != 0 {
            return Err(SolveError::failed("rucksacks do not split into groups of three"));
        }
        shared
            .iter()
            .map(|r| r.left | r.right)
            .tuples()
            .map(|(a, b, c)| shared_priority(&[a, b, c]))
            .sum::<Result<u64, _>>()
            .map(|total| total.to_string())
    }
}
