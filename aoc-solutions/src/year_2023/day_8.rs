use std::collections::HashMap;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::math::lcm_all;
use crate::utils::parsing::non_empty_lines;

/// Haunted Wasteland
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["graph", "math"])]
pub struct Solver;

/// Left/right instructions and the node map, borrowing names from the input
#[derive(Debug)]
pub struct Network<'a> {
    go_right: Vec<bool>,
    nodes: HashMap<&'a str, (&'a str, &'a str)>,
}

impl<'a> Network<'a> {
    /// Steps from `start` until a node satisfying `is_end`
    ///
    /// Gives up once every (node, instruction) state has been visited.
    fn steps(&self, start: &'a str, is_end: impl Fn(&str) -> bool) -> Result<u64, SolveError> {
        let limit = (self.go_right.len() * self.nodes.len()) as u64;
        let mut node = start;
        for (steps, &right) in self.go_right.iter().cycle().enumerate() {
            if is_end(node) {
                return Ok(steps as u64);
            }
            if steps as u64 > limit {
                break;
            }
            let (left_node, right_node) = self
                .nodes
                .get(node)
                .ok_or_else(|| SolveError::failed(format!("unknown node {node}")))?;
            node = if right { *right_node } else { *left_node };
        }
        Err(SolveError::failed(format!("no end reachable from {start}")))
    }
}

fn parse_network(input: &str) -> anyhow::Result<Network<'_>> {
    let mut lines = non_empty_lines(input);
    let go_right = lines
        .next()
        .ok_or_else(|| anyhow!("missing instructions"))?
        .chars()
        .map(|c| match c {
            'L' => Ok(false),
            'R' => Ok(true),
            other => Err(anyhow!("unknown instruction {other:?}")),
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if go_right.is_empty() {
        bail!("empty instruction list");
    }

    let mut nodes = HashMap::new();
    for line in lines {
        let (name, targets) = line
            .split_once(" = ")
            .ok_or_else(|| anyhow!("expected 'NODE = (LEFT, RIGHT)', got {line:?}"))?;
        let (left, right) = targets
            .trim()
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .and_then(|t| t.split_once(", "))
            .ok_or_else(|| anyhow!("expected '(LEFT, RIGHT)', got {targets:?}"))?;
        nodes.insert(name.trim(), (left, right));
    }
    Ok(Network { go_right, nodes })
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_network(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if !shared.nodes.contains_key("AAA") {
            return Err(SolveError::failed("no AAA node"));
        }
        shared.steps("AAA", |n| n == "ZZZ").map(|s| s.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // each ghost loops back onto its first end node, so the cycles line up at the lcm
        let cycles = shared
            .nodes
            .keys()
            .filter(|name| name.ends_with('A'))
            .map(|&start| shared.steps(start, |n| n.ends_with('Z')))
            .collect::<Result<Vec<_>, _>>()?;
        lcm_all(cycles)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("no start nodes ending in 'A'"))
    }
}
