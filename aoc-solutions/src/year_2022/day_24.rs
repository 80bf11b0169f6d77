use std::collections::HashSet;

use anyhow::{anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Point};

/// Blizzard Basin
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 24, tags = ["grid", "bfs"])]
pub struct Solver;

/// The valley floor inside the walls, with the start and goal openings
#[derive(Debug, Clone)]
pub struct Valley {
    /// Blizzard heading per square at minute 0, walls excluded
    blizzards: Grid<Option<Direction>>,
    /// Opening in the top wall, one row above the floor
    entrance: Point,
    /// Opening in the bottom wall, one row below the floor
    exit: Point,
}

impl Valley {
    fn width(&self) -> i64 {
        self.blizzards.width() as i64
    }

    fn height(&self) -> i64 {
        self.blizzards.height() as i64
    }

    /// Whether a blizzard moving `dir` started at `from`
    fn started(&self, from: Point, dir: Direction) -> bool {
        self.blizzards.get(from) == Some(&Some(dir))
    }

    /// Whether `p` is open ground at `minute`
    ///
    /// Blizzards wrap around, so the one that covers `p` at `minute` must
    /// have started `minute` squares behind it on the same row or column.
    fn is_clear(&self, p: Point, minute: i64) -> bool {
        if p == self.entrance || p == self.exit {
            return true;
        }
        if !self.blizzards.in_bounds(p) {
            return false;
        }
        let (w, h) = (self.width(), self.height());
        let row = |x: i64| Point::new(x.rem_euclid(w), p.y);
        let col = |y: i64| Point::new(p.x, y.rem_euclid(h));
        !(self.started(row(p.x - minute), Direction::East)
            || self.started(row(p.x + minute), Direction::West)
            || self.started(col(p.y - minute), Direction::South)
            || self.started(col(p.y + minute), Direction::North))
    }

    /// Minute of arrival at `to` when leaving `from` at `minute`
    ///
    /// Breadth-first over every square reachable at each minute, waiting
    /// in place included.
    fn crossing(&self, from: Point, to: Point, mut minute: i64) -> Option<i64> {
        let mut frontier = HashSet::from([from]);
        // the blizzard pattern repeats, so give up once every state has been tried
        let limit = minute + (self.width() * self.height() + 2) * (self.width() * self.height());
        while !frontier.is_empty() && minute < limit {
            minute += 1;
            frontier = frontier
                .iter()
                .flat_map(|&p| std::iter::once(p).chain(p.neighbors()))
                .filter(|&p| self.is_clear(p, minute))
                .collect();
            if frontier.contains(&to) {
                return Some(minute);
            }
        }
        None
    }
}

fn parse_valley(input: &str) -> anyhow::Result<Valley> {
    let walls = Grid::parse(input, |c| match c {
        '#' => Ok(None),
        '.' => Ok(Some(None)),
        '^' => Ok(Some(Some(Direction::North))),
        '>' => Ok(Some(Some(Direction::East))),
        'v' => Ok(Some(Some(Direction::South))),
        '<' => Ok(Some(Some(Direction::West))),
        other => bail!("unexpected tile {other:?}"),
    })?;
    let (w, h) = (walls.width(), walls.height());
    ensure!(w >= 3 && h >= 3, "valley too small");

    let opening = |y: usize| -> anyhow::Result<Point> {
        let mut gaps = walls.row(y).iter().enumerate().filter(|(_, t)| t.is_some());
        match (gaps.next(), gaps.next()) {
            (Some((x, Some(None))), None) if x > 0 && x < w - 1 => {
                Ok(Point::new(x as i64 - 1, y as i64 - 1))
            }
            _ => Err(anyhow!("row {} needs exactly one opening", y + 1)),
        }
    };
    let entrance = opening(0)?;
    let exit = opening(h - 1)?;

    let mut floor = Vec::with_capacity((w - 2) * (h - 2));
    for y in 1..h - 1 {
        let row = walls.row(y);
        ensure!(
            row[0].is_none() && row[w - 1].is_none(),
            "row {} is not walled in",
            y + 1
        );
        for tile in &row[1..w - 1] {
            floor.push(tile.ok_or_else(|| anyhow!("wall inside the valley on row {}", y + 1))?);
        }
    }
    let blizzards = Grid::from_cells(w - 2, h - 2, floor)?;

    // a blizzard running along the entrance or exit column would escape the valley
    let escapes = (0..h as i64 - 2).any(|y| {
        [entrance.x, exit.x].iter().any(|&x| {
            matches!(
                blizzards.get(Point::new(x, y)),
                Some(Some(Direction::North | Direction::South))
            )
        })
    });
    ensure!(!escapes, "vertical blizzard in the entrance or exit column");

    Ok(Valley {
        blizzards,
        entrance,
        exit,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Valley;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_valley(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

fn no_route() -> SolveError {
    SolveError::failed("the blizzards never leave a path open")
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .crossing(shared.entrance, shared.exit, 0)
            .map(|m| m.to_string())
            .ok_or_else(no_route)
    }
}

impl PartSolver<2> for Solver {
    /// There, back for the snacks, and there again
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (a, b) = (shared.entrance, shared.exit);
        let there = shared.crossing(a, b, 0).ok_or_else(no_route)?;
        let back = shared.crossing(b, a, there).ok_or_else(no_route)?;
        let again = shared.crossing(a, b, back).ok_or_else(no_route)?;
        Ok(again.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "#.######
#>>.<^<#
#.<..<<#
#>v.><>#
#<^v^^>#
#.######
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "18");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "54");
    }

    #[test]
    fn test_openings() {
        let valley = parse_valley(SAMPLE).unwrap();
        assert_eq!(valley.entrance, Point::new(0, -1));
        assert_eq!(valley.exit, Point::new(5, 4));
        // the `>` at floor (0, 0) is at (2, 0) two minutes later
        assert!(!valley.is_clear(Point::new(2, 0), 2));
        assert!(valley.is_clear(Point::new(0, -1), 7));
    }

    #[test]
    fn test_empty_valley_walks_straight() {
        let valley = "#.###\n#...#\n#...#\n###.#\n";
        assert_eq!(solve::<Solver>(valley, 1), "5");
        assert_eq!(solve::<Solver>(valley, 2), "15");
    }

    #[test]
    fn test_bad_valleys_rejected() {
        assert!(parse_valley("#.##\n#..#\n##.#\n##.#\n").is_err());
        assert!(parse_valley("####\n#..#\n##.#\n").is_err());
        assert!(parse_valley("#.###\n#.x.#\n###.#\n").is_err());
    }
}
