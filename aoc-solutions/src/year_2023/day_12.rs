use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parsing::non_empty_lines;

/// Hot Springs
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["dp"])]
pub struct Solver;

/// One condition record: `.` working, `#` damaged, `?` unknown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    springs: Vec<u8>,
    groups: Vec<usize>,
}

impl Record {
    /// Record repeated `times` times, springs joined by `?`
    fn unfold(&self, times: usize) -> Self {
        let springs = vec![self.springs.as_slice(); times].join(&b'?');
        Self {
            springs,
            groups: self.groups.repeat(times),
        }
    }

    pub fn arrangements(&self) -> u64 {
        // trailing '.' so every group can be followed by a separator
        let mut springs = self.springs.clone();
        springs.push(b'.');
        let problem = Arrangements {
            springs: &springs,
            groups: &self.groups,
        };
        DpCache::with_problem(HashMapBackend::new(), problem).get(&(0, 0))
    }
}

/// Ways to place `groups[gi..]` into `springs[si..]`, indexed by `(si, gi)`
struct Arrangements<'r> {
    springs: &'r [u8],
    groups: &'r [usize],
}

impl Arrangements<'_> {
    fn group_fits(&self, start: usize, len: usize) -> bool {
        start + len < self.springs.len()
            && !self.springs[start..start + len].contains(&b'.')
            && self.springs[start + len] != b'#'
    }
}

impl DpProblem<(usize, usize), u64> for Arrangements<'_> {
    fn deps(&self, &(si, gi): &(usize, usize)) -> Vec<(usize, usize)> {
        let Some(&len) = self.groups.get(gi) else {
            return vec![];
        };
        let Some(start) = (si..self.springs.len()).find(|&i| self.springs[i] != b'.') else {
            return vec![];
        };

        let mut deps = Vec::with_capacity(2);
        if self.group_fits(start, len) {
            deps.push((start + len + 1, gi + 1));
        }
        if self.springs[start] == b'?' {
            deps.push((start + 1, gi));
        }
        deps
    }

    fn compute(&self, &(si, gi): &(usize, usize), deps: Vec<u64>) -> u64 {
        if gi == self.groups.len() {
            // all groups placed: the rest must be undamaged
            u64::from(!self.springs[si.min(self.springs.len())..].contains(&b'#'))
        } else {
            deps.iter().sum()
        }
    }
}

fn parse_record(line: &str) -> anyhow::Result<Record> {
    let (springs, groups) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected '<springs> <groups>'"))?;
    if let Some(bad) = springs.chars().find(|c| !matches!(c, '.' | '#' | '?')) {
        bail!("unexpected spring {bad:?}");
    }
    let groups = groups
        .trim()
        .split(',')
        .map(|g| g.parse().with_context(|| format!("invalid group size {g:?}")))
        .collect::<anyhow::Result<Vec<usize>>>()?;
    if groups.contains(&0) {
        bail!("group sizes must be positive");
    }
    Ok(Record {
        springs: springs.as_bytes().to_vec(),
        groups,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Record>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_record(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(Record::arrangements)
            .sum::<u64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|record| record.unfold(5).arrangements())
            .sum::<u64>()
            .to_string())
    }
}
