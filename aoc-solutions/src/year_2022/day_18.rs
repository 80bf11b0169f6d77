use std::collections::{HashSet, VecDeque};

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::non_empty_lines;

/// Boiling Boulders
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 18, tags = ["bfs", "geometry"])]
pub struct Solver;

type Cube = [i32; 3];

fn faces(cube: Cube) -> impl Iterator<Item = Cube> {
    (0..3).flat_map(move |axis| {
        [-1, 1].into_iter().map(move |delta| {
            let mut next = cube;
            next[axis] += delta;
            next
        })
    })
}

fn surface_area(droplet: &HashSet<Cube>) -> usize {
    droplet
        .iter()
        .flat_map(|&c| faces(c))
        .filter(|f| !droplet.contains(f))
        .count()
}

/// Faces reachable by steam from outside the droplet
///
/// Flood-fills the air in a box one unit larger than the droplet and counts
/// every droplet face the fill touches.
fn exterior_area(droplet: &HashSet<Cube>) -> usize {
    let mut low = [i32::MAX; 3];
    let mut high = [i32::MIN; 3];
    for cube in droplet {
        for axis in 0..3 {
            low[axis] = low[axis].min(cube[axis] - 1);
            high[axis] = high[axis].max(cube[axis] + 1);
        }
    }
    let inside = |c: &Cube| (0..3).all(|a| low[a] <= c[a] && c[a] <= high[a]);

    let mut steam = HashSet::from([low]);
    let mut queue = VecDeque::from([low]);
    let mut touched = 0;
    while let Some(air) = queue.pop_front() {
        for next in faces(air).filter(inside) {
            if droplet.contains(&next) {
                touched += 1;
            } else if steam.insert(next) {
                queue.push_back(next);
            }
        }
    }
    touched
}

fn parse_cube(line: &str) -> anyhow::Result<Cube> {
    let parts = line
        .split(',')
        .map(|n| n.trim().parse().with_context(|| format!("invalid coordinate {n:?}")))
        .collect::<anyhow::Result<Vec<i32>>>()?;
    match parts.as_slice() {
        &[x, y, z] => Ok([x, y, z]),
        _ => bail!("expected three coordinates"),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = HashSet<Cube>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let droplet = non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_cube(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<HashSet<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        if droplet.is_empty() {
            return Err(ParseError::MissingData("no cubes".into()));
        }
        Ok(droplet)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(surface_area(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(exterior_area(shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "2,2,2
1,2,2
3,2,2
2,1,2
2,3,2
2,2,1
2,2,3
2,2,4
2,2,6
1,2,5
3,2,5
2,1,5
2,3,5
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "64");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "58");
    }

    #[test]
    fn test_two_touching_cubes() {
        assert_eq!(solve::<Solver>("1,1,1\n2,1,1\n", 1), "10");
        assert_eq!(solve::<Solver>("1,1,1\n2,1,1\n", 2), "10");
    }

    #[test]
    fn test_hollow_shell_hides_its_inside() {
        // 3x3x3 block with the centre removed
        let shell: String = (0..27)
            .filter(|&i| i != 13)
            .map(|i| format!("{},{},{}\n", i % 3, i / 3 % 3, i / 9))
            .collect();
        assert_eq!(solve::<Solver>(&shell, 1), "60");
        assert_eq!(solve::<Solver>(&shell, 2), "54");
    }

    #[test]
    fn test_bad_cubes_rejected() {
        assert!(parse_cube("1,2").is_err());
        assert!(parse_cube("1,2,3,4").is_err());
        assert!(parse_cube("1,b,3").is_err());
    }
}
