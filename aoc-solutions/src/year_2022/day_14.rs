use std::collections::HashSet;

use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Point;
use crate::utils::parsing::non_empty_lines;

/// Regolith Reservoir
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 14, tags = ["simulation", "grid"])]
pub struct Solver;

const SOURCE: Point = Point::new(500, 0);

/// Down, down-left, down-right; `y` grows downwards
const FALLS: [Point; 3] = [Point::new(0, 1), Point::new(-1, 1), Point::new(1, 1)];

#[derive(Debug, Clone)]
pub struct Cave {
    rock: HashSet<Point>,
    deepest: i64,
}

impl Cave {
    /// Units of sand at rest when the simulation stops
    ///
    /// Without a floor, sand stops once a unit falls below the deepest rock.
    /// With a floor two below the deepest rock, it stops once the source is
    /// buried. Each unit resumes from where the previous one was last still
    /// falling, so the path from the source is not walked again.
    fn settle(&self, floor: bool) -> usize {
        let floor_y = self.deepest + 2;
        let mut blocked = self.rock.clone();
        let mut path = vec![SOURCE];
        let mut resting = 0;

        while let Some(&sand) = path.last() {
            let next = FALLS
                .iter()
                .map(|&d| sand + d)
                .find(|p| !blocked.contains(p) && !(floor && p.y == floor_y));
            match next {
                Some(p) if !floor && p.y > self.deepest => break,
                Some(p) => path.push(p),
                None => {
                    blocked.insert(sand);
                    resting += 1;
                    path.pop();
                }
            }
        }
        resting
    }
}

fn parse_point(s: &str) -> anyhow::Result<Point> {
    let (x, y) = s
        .trim()
        .split_once(',')
        .ok_or_else(|| anyhow!("expected 'x,y', got {s:?}"))?;
    let x = x.parse().with_context(|| format!("invalid x {x:?}"))?;
    let y = y.parse().with_context(|| format!("invalid y {y:?}"))?;
    ensure!(y >= 0, "rock above the sand source at {s:?}");
    Ok(Point::new(x, y))
}

/// Every point on a path of horizontal and vertical segments
fn trace_path(line: &str, rock: &mut HashSet<Point>) -> anyhow::Result<()> {
    let corners = line
        .split("->")
        .map(parse_point)
        .collect::<anyhow::Result<Vec<_>>>()?;
    ensure!(!corners.is_empty(), "empty rock path");
    rock.insert(corners[0]);
    for pair in corners.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        ensure!(
            from.x == to.x || from.y == to.y,
            "diagonal segment from {from:?} to {to:?}"
        );
        let step = Point::new((to.x - from.x).signum(), (to.y - from.y).signum());
        let mut p = from;
        while p != to {
            p = p + step;
            rock.insert(p);
        }
    }
    Ok(())
}

impl AocParser for Solver {
    type SharedData<'a> = Cave;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut rock = HashSet::new();
        for (i, line) in non_empty_lines(input).enumerate() {
            trace_path(line, &mut rock)
                .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {:#}", i + 1, e)))?;
        }
        let deepest = rock
            .iter()
            .map(|p| p.y)
            .max()
            .ok_or_else(|| ParseError::MissingData("no rock paths".into()))?;
        if rock.contains(&SOURCE) {
            return Err(ParseError::InvalidFormat("rock covers the sand source".into()));
        }
        Ok(Cave { rock, deepest })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.settle(false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.settle(true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "498,4 -> 498,6 -> 496,6
503,4 -> 502,4 -> 502,9 -> 494,9
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "24");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "93");
    }

    #[test]
    fn test_rock_paths() {
        let cave = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(cave.deepest, 9);
        assert_eq!(cave.rock.len(), 20);
        assert!(cave.rock.contains(&Point::new(497, 6)));
    }

    #[test]
    fn test_floor_only_pile() {
        // a lone rock far below: part 2 fills a triangle down to the floor
        let mut cave = <Solver as AocParser>::parse("0,1 -> 0,1\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut cave).unwrap(), "0");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut cave).unwrap(), "9");
    }

    #[test]
    fn test_bad_paths_rejected() {
        assert!(trace_path("1,1 -> 2,2", &mut HashSet::new()).is_err());
        assert!(trace_path("1,1 -> x,2", &mut HashSet::new()).is_err());
        assert!(<Solver as AocParser>::parse("500,0 -> 501,0\n").is_err());
    }
}
