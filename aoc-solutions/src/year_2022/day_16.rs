use std::collections::{HashMap, VecDeque};

use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::non_empty_lines;

/// Proboscidea Volcanium
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 16, tags = ["graph", "bfs", "bitset"])]
pub struct Solver;

const START: &str = "AA";
const MAX_USEFUL_VALVES: usize = 20;

/// Valves with a non-zero flow rate and the travel times between them
#[derive(Debug, Clone)]
pub struct Network {
    flows: Vec<u32>,
    /// `travel[i][j]`: minutes to walk from useful valve `i` to `j`
    travel: Vec<Vec<u32>>,
    /// Minutes from the start valve to each useful valve
    from_start: Vec<u32>,
}

impl Network {
    /// Most pressure released for each set of opened valves within `minutes`
    ///
    /// Indexed by a bitmask over the useful valves; 0 where a set cannot be
    /// opened in time.
    fn best_per_set(&self, minutes: u32) -> Vec<u32> {
        let mut best = vec![0; 1 << self.flows.len()];
        for (valve, &distance) in self.from_start.iter().enumerate() {
            if let Some(left) = minutes.checked_sub(distance + 1) {
                self.explore(valve, left, 1 << valve, self.flows[valve] * left, &mut best);
            }
        }
        best
    }

    fn explore(&self, at: usize, left: u32, opened: usize, released: u32, best: &mut [u32]) {
        best[opened] = best[opened].max(released);
        for (next, &flow) in self.flows.iter().enumerate() {
            if opened & (1 << next) != 0 {
                continue;
            }
            let Some(remaining) = left.checked_sub(self.travel[at][next] + 1) else {
                continue;
            };
            if remaining > 0 {
                self.explore(next, remaining, opened | 1 << next, released + flow * remaining, best);
            }
        }
    }

    fn alone(&self, minutes: u32) -> u32 {
        self.best_per_set(minutes).into_iter().max().unwrap_or(0)
    }

    /// Two workers opening disjoint sets of valves
    fn with_elephant(&self, minutes: u32) -> u32 {
        let best = self.best_per_set(minutes);
        // best over every subset of each mask
        let mut within = best.clone();
        for bit in 0..self.flows.len() {
            for mask in 0..within.len() {
                if mask & (1 << bit) != 0 {
                    within[mask] = within[mask].max(within[mask ^ (1 << bit)]);
                }
            }
        }
        let full = within.len() - 1;
        best.iter()
            .enumerate()
            .map(|(mask, &mine)| mine + within[full ^ mask])
            .max()
            .unwrap_or(0)
    }
}

/// Shortest walks from `from` to every reachable valve
fn walk_times(tunnels: &[Vec<usize>], from: usize) -> Vec<Option<u32>> {
    let mut dist = vec![None; tunnels.len()];
    dist[from] = Some(0);
    let mut queue = VecDeque::from([(from, 0)]);
    while let Some((at, d)) = queue.pop_front() {
        for &next in &tunnels[at] {
            if dist[next].is_none() {
                dist[next] = Some(d + 1);
                queue.push_back((next, d + 1));
            }
        }
    }
    dist
}

fn parse_valve(line: &str) -> anyhow::Result<(&str, u32, Vec<&str>)> {
    let (name, rest) = line
        .strip_prefix("Valve ")
        .and_then(|rest| rest.split_once(" has flow rate="))
        .ok_or_else(|| anyhow!("expected 'Valve <name> has flow rate=<n>; ...'"))?;
    let (rate, tunnels) = rest
        .split_once(';')
        .ok_or_else(|| anyhow!("missing tunnel list"))?;
    let rate = rate
        .parse()
        .with_context(|| format!("invalid flow rate {rate:?}"))?;
    let tunnels = tunnels.trim();
    let targets = tunnels
        .strip_prefix("tunnels lead to valves ")
        .or_else(|| tunnels.strip_prefix("tunnel leads to valve "))
        .ok_or_else(|| anyhow!("unexpected tunnel list {tunnels:?}"))?;
    Ok((name, rate, targets.split(", ").map(str::trim).collect()))
}

fn parse_network(input: &str) -> anyhow::Result<Network> {
    let valves = non_empty_lines(input)
        .enumerate()
        .map(|(i, line)| parse_valve(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let index: HashMap<&str, usize> = valves
        .iter()
        .enumerate()
        .map(|(i, (name, _, _))| (*name, i))
        .collect();
    ensure!(index.len() == valves.len(), "valve listed twice");
    let start = *index
        .get(START)
        .ok_or_else(|| anyhow!("no valve {START}"))?;

    let tunnels = valves
        .iter()
        .map(|(name, _, targets)| {
            targets
                .iter()
                .map(|t| {
                    index
                        .get(t)
                        .copied()
                        .ok_or_else(|| anyhow!("{name} leads to unknown valve {t}"))
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let useful: Vec<usize> = (0..valves.len()).filter(|&i| valves[i].1 > 0).collect();
    ensure!(
        useful.len() <= MAX_USEFUL_VALVES,
        "{} valves with flow, at most {MAX_USEFUL_VALVES} supported",
        useful.len()
    );

    // unreachable valves are given a travel time no schedule can afford
    let times = |from: usize| -> Vec<u32> {
        let walks = walk_times(&tunnels, from);
        useful
            .iter()
            .map(|&to| walks[to].unwrap_or(u32::MAX / 2))
            .collect()
    };
    Ok(Network {
        flows: useful.iter().map(|&i| valves[i].1).collect(),
        travel: useful.iter().map(|&from| times(from)).collect(),
        from_start: times(start),
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Network;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_network(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.alone(30).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.with_elephant(26).to_string())
    }
}
