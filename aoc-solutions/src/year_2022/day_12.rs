use std::collections::{HashMap, VecDeque};

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Point};

/// Hill Climbing Algorithm
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 12, tags = ["grid", "bfs"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Heightmap {
    /// Elevation, `a` = 0 through `z` = 25
    heights: Grid<u8>,
    start: Point,
    end: Point,
}

impl Heightmap {
    /// Fewest steps from every square that can reach the summit
    ///
    /// Searches backwards from the summit: a step down from `here` to `prev`
    /// is allowed when climbing from `prev` to `here` would be.
    fn distances_to_end(&self) -> HashMap<Point, u32> {
        let mut dist = HashMap::from([(self.end, 0)]);
        let mut queue = VecDeque::from([(self.end, 0u32)]);

        while let Some((here, steps)) = queue.pop_front() {
            let Some(&height) = self.heights.get(here) else {
                continue;
            };
            for prev in here.neighbors() {
                let Some(&prev_height) = self.heights.get(prev) else {
                    continue;
                };
                if height > prev_height + 1 || dist.contains_key(&prev) {
                    continue;
                }
                dist.insert(prev, steps + 1);
                queue.push_back((prev, steps + 1));
            }
        }
        dist
    }
}

fn parse_heightmap(input: &str) -> anyhow::Result<Heightmap> {
    let chars = Grid::parse_chars(input)?;
    let find = |marker: char| {
        let mut found = chars.iter().filter(|&(_, &c)| c == marker).map(|(p, _)| p);
        match (found.next(), found.next()) {
            (Some(p), None) => Ok(p),
            (None, _) => Err(anyhow!("no {marker:?} on the map")),
            (Some(_), Some(_)) => Err(anyhow!("more than one {marker:?} on the map")),
        }
    };
    let start = find('S')?;
    let end = find('E')?;
    let heights = Grid::parse(input, |c| match c {
        'S' => Ok(0),
        'E' => Ok(25),
        'a'..='z' => Ok(c as u8 - b'a'),
        other => bail!("unexpected square {other:?}"),
    })?;
    Ok(Heightmap {
        heights,
        start,
        end,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Heightmap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_heightmap(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .distances_to_end()
            .get(&shared.start)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("no path from the start to the summit"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let dist = shared.distances_to_end();
        shared
            .heights
            .iter()
            .filter(|&(_, &h)| h == 0)
            .filter_map(|(p, _)| dist.get(&p))
            .min()
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("no lowest square reaches the summit"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "31");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "29");
    }

    #[test]
    fn test_single_climb() {
        let mut ridge = <Solver as AocParser>::parse("SbcdefghijklmnopqrstuvwxyzE\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut ridge).unwrap(), "26");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut ridge).unwrap(), "26");

        let mut cliff = <Solver as AocParser>::parse("SE\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut cliff).is_err());
        assert!(<Solver as PartSolver<2>>::solve(&mut cliff).is_err());
    }

    #[test]
    fn test_markers_required_once() {
        assert!(parse_heightmap("abc\nabE\n").is_err());
        assert!(parse_heightmap("SbS\nabE\n").is_err());
        assert!(parse_heightmap("Sb1\nabE\n").is_err());
    }
}
