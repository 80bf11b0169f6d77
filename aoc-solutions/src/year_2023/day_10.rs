use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Point, interior_lattice_points};

/// Pipe Maze
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["grid", "geometry"])]
pub struct Solver;

/// Heading after entering `pipe` while moving along `heading`
fn follow_pipe(pipe: char, heading: Direction) -> Option<Direction> {
    use Direction::*;
    match (pipe, heading) {
        ('|', North | South) | ('-', East | West) => Some(heading),
        ('L', South) | ('F', North) => Some(East),
        ('L', West) | ('J', East) => Some(North),
        ('J', South) | ('7', North) => Some(West),
        ('7', East) | ('F', West) => Some(South),
        _ => None,
    }
}

/// Tiles of the loop through `S`, starting at `S`
fn walk_loop(grid: &Grid<char>, start: Point, mut heading: Direction) -> Option<Vec<Point>> {
    let mut tiles = vec![start];
    let mut pos = start.step(heading);
    loop {
        match *grid.get(pos)? {
            'S' => return Some(tiles),
            pipe => {
                heading = follow_pipe(pipe, heading)?;
                tiles.push(pos);
                pos = pos.step(heading);
            }
        }
    }
}

fn find_loop(grid: &Grid<char>) -> anyhow::Result<Vec<Point>> {
    let start = grid
        .find(|&c| c == 'S')
        .ok_or_else(|| anyhow::anyhow!("no start tile"))?;
    Direction::ALL
        .into_iter()
        .find_map(|heading| walk_loop(grid, start, heading))
        .ok_or_else(|| anyhow::anyhow!("no loop through the start tile"))
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<char>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_chars(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tiles = find_loop(shared).map_err(|e| SolveError::failed(e.to_string()))?;
        Ok((tiles.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tiles = find_loop(shared).map_err(|e| SolveError::failed(e.to_string()))?;
        Ok(interior_lattice_points(&tiles, tiles.len() as u64).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SQUARE: &str = ".....
.S-7.
.|.|.
.L-J.
.....
";

    const WINDING: &str = "..F7.
.FJ|.
SJ.L7
|F--J
LJ...
";

    const ENCLOSED: &str = "...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
";

    const SQUEEZED: &str = "..........
.S------7.
.|F----7|.
.||....||.
.||....||.
.|L-7F-J|.
.|..||..|.
.L--JL--J.
..........
";

    #[test]
    fn test_part1_samples() {
        assert_eq!(solve::<Solver>(SQUARE, 1), "4");
        assert_eq!(solve::<Solver>(WINDING, 1), "8");
    }

    #[test]
    fn test_part2_samples() {
        assert_eq!(solve::<Solver>(SQUARE, 2), "1");
        assert_eq!(solve::<Solver>(ENCLOSED, 2), "4");
        assert_eq!(solve::<Solver>(SQUEEZED, 2), "4");
    }

    #[test]
    fn test_missing_start_fails() {
        let mut shared = <Solver as AocParser>::parse("F7\nLJ\n").unwrap();
        assert!(matches!(
            <Solver as PartSolver<1>>::solve(&mut shared),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_follow_pipe() {
        assert_eq!(follow_pipe('L', Direction::South), Some(Direction::East));
        assert_eq!(follow_pipe('J', Direction::South), Some(Direction::West));
        assert_eq!(follow_pipe('F', Direction::North), Some(Direction::East));
        assert_eq!(follow_pipe('-', Direction::North), None);
        assert_eq!(follow_pipe('.', Direction::East), None);
    }
}
