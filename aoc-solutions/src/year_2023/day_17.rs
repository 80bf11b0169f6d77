use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Point};

/// Clumsy Crucible
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["grid", "dijkstra"])]
pub struct Solver;

/// Search state: where the crucible is, where it faces, and how long it has gone straight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Crucible {
    pos: Point,
    heading: Direction,
    run: u8,
}

/// Least heat loss from the top-left to the bottom-right block
///
/// The crucible must move `min_run..=max_run` blocks before turning or stopping.
pub fn least_heat_loss(grid: &Grid<u8>, min_run: u8, max_run: u8) -> Option<u64> {
    let goal = Point::new(grid.width() as i64 - 1, grid.height() as i64 - 1);
    let mut best: HashMap<Crucible, u64> = HashMap::new();
    let mut queue = BinaryHeap::new();

    for heading in [Direction::East, Direction::South] {
        let start = Crucible {
            pos: Point::new(0, 0),
            heading,
            run: 0,
        };
        best.insert(start, 0);
        queue.push(Reverse((0u64, start)));
    }

    while let Some(Reverse((loss, state))) = queue.pop() {
        if state.pos == goal && state.run >= min_run {
            return Some(loss);
        }
        if best.get(&state).is_some_and(|&known| known < loss) {
            continue;
        }

        let mut moves = Vec::with_capacity(3);
        if state.run < max_run {
            moves.push((state.heading, state.run + 1));
        }
        if state.run >= min_run {
            moves.push((state.heading.turn_left(), 1));
            moves.push((state.heading.turn_right(), 1));
        }

        for (heading, run) in moves {
            let pos = state.pos.step(heading);
            let Some(&cost) = grid.get(pos) else {
                continue;
            };
            let next = Crucible { pos, heading, run };
            let next_loss = loss + u64::from(cost);
            if best.get(&next).is_none_or(|&known| next_loss < known) {
                best.insert(next, next_loss);
                queue.push(Reverse((next_loss, next)));
            }
        }
    }
    None
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_digits(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        least_heat_loss(shared, 1, 3)
            .map(|loss| loss.to_string())
            .ok_or_else(|| SolveError::failed("no path to the factory"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        least_heat_loss(shared, 4, 10)
            .map(|loss| loss.to_string())
            .ok_or_else(|| SolveError::failed("no path to the factory"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SAMPLE: &str = "2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

    const UNFORTUNATE: &str = "111111111111
999999999991
999999999991
999999999991
999999999991
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "102");
    }

    #[test]
    fn test_part2_samples() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "94");
        assert_eq!(solve::<Solver>(UNFORTUNATE, 2), "71");
    }

    #[test]
    fn test_goal_needs_minimum_run() {
        // a single row of 3 blocks cannot be crossed when 4 straight moves are needed
        let mut shared = <Solver as AocParser>::parse("111\n").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut shared).is_err());
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "2");
    }
}
