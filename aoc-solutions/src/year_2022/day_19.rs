use anyhow::{anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::non_empty_lines;

/// Not Enough Minerals
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 19, tags = ["search", "dfs"])]
pub struct Solver;

const ORE: usize = 0;
const CLAY: usize = 1;
const OBSIDIAN: usize = 2;
const GEODE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    id: u32,
    /// `costs[robot][resource]` for ore, clay and obsidian
    costs: [[u32; 3]; 4],
}

#[derive(Debug, Clone, Copy)]
struct Factory {
    minutes_left: u32,
    robots: [u32; 4],
    stock: [u32; 4],
}

impl Factory {
    /// Geodes at the end if no further robot is built
    fn settled(&self) -> u32 {
        self.stock[GEODE] + self.robots[GEODE] * self.minutes_left
    }

    /// Upper bound: one more geode robot every remaining minute
    fn ceiling(&self) -> u32 {
        let t = self.minutes_left;
        self.settled() + t * t.saturating_sub(1) / 2
    }

    /// State after waiting for the resources of `robot` and building it
    fn build(&self, robot: usize, cost: &[u32; 3]) -> Option<Factory> {
        let mut wait = 0;
        for resource in ORE..=OBSIDIAN {
            let missing = cost[resource].saturating_sub(self.stock[resource]);
            if missing > 0 {
                let rate = self.robots[resource];
                if rate == 0 {
                    return None;
                }
                wait = wait.max(missing.div_ceil(rate));
            }
        }
        let elapsed = wait + 1;
        let minutes_left = self.minutes_left.checked_sub(elapsed).filter(|&m| m > 0)?;

        let mut next = Factory {
            minutes_left,
            robots: self.robots,
            stock: self.stock,
        };
        for resource in ORE..=GEODE {
            next.stock[resource] += self.robots[resource] * elapsed;
        }
        for resource in ORE..=OBSIDIAN {
            next.stock[resource] -= cost[resource];
        }
        next.robots[robot] += 1;
        Some(next)
    }
}

impl Blueprint {
    /// Most geodes that can be opened in `minutes`
    ///
    /// Depth-first over which robot to build next, skipping the minutes
    /// spent saving up for it. Robot counts are capped at the largest price
    /// in their resource, since more could never be spent, and branches that
    /// cannot beat the best so far are cut.
    pub fn max_geodes(&self, minutes: u32) -> u32 {
        let mut caps = [u32::MAX; 4];
        for resource in ORE..=OBSIDIAN {
            caps[resource] = self.costs.iter().map(|c| c[resource]).max().unwrap_or(0);
        }
        let start = Factory {
            minutes_left: minutes,
            robots: [1, 0, 0, 0],
            stock: [0; 4],
        };
        let mut best = 0;
        self.explore(start, &caps, &mut best);
        best
    }

    fn explore(&self, factory: Factory, caps: &[u32; 4], best: &mut u32) {
        *best = (*best).max(factory.settled());
        if factory.ceiling() <= *best {
            return;
        }
        for robot in [GEODE, OBSIDIAN, CLAY, ORE] {
            if factory.robots[robot] >= caps[robot] {
                continue;
            }
            if let Some(next) = factory.build(robot, &self.costs[robot]) {
                self.explore(next, caps, best);
            }
        }
    }
}

fn parse_blueprint(line: &str) -> anyhow::Result<Blueprint> {
    let numbers: Vec<u32> = line
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .map(str::parse::<u32>)
        .collect::<Result<_, _>>()?;
    ensure!(line.starts_with("Blueprint "), "expected 'Blueprint <id>: ...'");
    let &[id, ore, clay, obsidian_ore, obsidian_clay, geode_ore, geode_obsidian] =
        numbers.as_slice()
    else {
        return Err(anyhow!("expected a blueprint id and six robot prices"));
    };
    Ok(Blueprint {
        id,
        costs: [
            [ore, 0, 0],
            [clay, 0, 0],
            [obsidian_ore, obsidian_clay, 0],
            [geode_ore, 0, geode_obsidian],
        ],
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Blueprint>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_blueprint(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|bp| bp.id * bp.max_geodes(24))
            .sum::<u32>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .take(3)
            .map(|bp| u64::from(bp.max_geodes(32)))
            .product::<u64>()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "\
Blueprint 1: Each ore robot costs 4 ore. Each clay robot costs 2 ore. Each obsidian robot costs 3 ore and 14 clay. Each geode robot costs 2 ore and 7 obsidian.
Blueprint 2: Each ore robot costs 2 ore. Each clay robot costs 3 ore. Each obsidian robot costs 3 ore and 8 clay. Each geode robot costs 3 ore and 12 obsidian.
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "33");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "3472");
    }

    #[test]
    fn test_geodes_per_blueprint() {
        let blueprints = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(blueprints[0].max_geodes(24), 9);
        assert_eq!(blueprints[1].max_geodes(24), 12);
        assert_eq!(blueprints[0].max_geodes(1), 0);
    }

    #[test]
    fn test_bad_blueprints_rejected() {
        assert!(parse_blueprint("Blueprint 1: Each ore robot costs 4 ore.").is_err());
        assert!(parse_blueprint("Recipe 1: 1 2 3 4 5 6").is_err());
    }
}
