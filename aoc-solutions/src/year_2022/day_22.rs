use std::collections::HashMap;

use anyhow::{anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Point};
use crate::utils::parsing::blocks;

/// Monkey Map
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 22, tags = ["grid", "geometry", "simulation"])]
pub struct Solver;

const VOID: u8 = b' ';
const OPEN: u8 = b'.';
const WALL: u8 = b'#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward(u32),
    Left,
    Right,
}

type Vec3 = [i64; 3];

fn neg(v: Vec3) -> Vec3 {
    v.map(|c| -c)
}

fn dot(a: Vec3, b: Vec3) -> i64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn facing_score(dir: Direction) -> u64 {
    match dir {
        Direction::East => 0,
        Direction::South => 1,
        Direction::West => 2,
        Direction::North => 3,
    }
}

/// Where one face of the folded cube sits: its outward normal and the
/// directions its map `x` and `y` axes point in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    normal: Vec3,
    right: Vec3,
    down: Vec3,
}

impl Frame {
    fn towards(&self, dir: Direction) -> Vec3 {
        match dir {
            Direction::East => self.right,
            Direction::South => self.down,
            Direction::West => neg(self.right),
            Direction::North => neg(self.down),
        }
    }

    /// The face reached by folding across the edge in `dir`
    fn fold(&self, dir: Direction) -> Frame {
        let Frame {
            normal,
            right,
            down,
        } = *self;
        match dir {
            Direction::East => Frame {
                normal: right,
                right: neg(normal),
                down,
            },
            Direction::South => Frame {
                normal: down,
                right,
                down: neg(normal),
            },
            Direction::West => Frame {
                normal: neg(right),
                right: normal,
                down,
            },
            Direction::North => Frame {
                normal: neg(down),
                right,
                down: normal,
            },
        }
    }
}

/// The map folded into a cube with faces `side` tiles wide
#[derive(Debug, Clone)]
pub struct Cube {
    side: i64,
    /// Face frames keyed by the face's block position on the map
    faces: HashMap<Point, Frame>,
}

impl Cube {
    /// Folds the net by walking it from its first face
    fn fold(board: &Board) -> anyhow::Result<Cube> {
        let tiles = board.tiles.iter().filter(|&&t| t != VOID).count() as i64;
        let side = (1..=tiles).find(|s| 6 * s * s >= tiles).unwrap_or(0);
        ensure!(side > 0 && 6 * side * side == tiles, "{tiles} tiles cannot form a cube");

        let block_of = |p: Point| Point::new(p.x.div_euclid(side), p.y.div_euclid(side));
        let mut blocks: Vec<Point> = Vec::new();
        for y in (0..board.height).step_by(side as usize) {
            for x in (0..board.width).step_by(side as usize) {
                if board.tile(Point::new(x, y)) != VOID {
                    blocks.push(block_of(Point::new(x, y)));
                }
            }
        }
        ensure!(blocks.len() == 6, "the map does not split into six faces");
        for &block in &blocks {
            for dy in 0..side {
                for dx in 0..side {
                    let p = Point::new(block.x * side + dx, block.y * side + dy);
                    ensure!(board.tile(p) != VOID, "face at {block:?} has a gap at {p:?}");
                }
            }
        }

        let mut faces = HashMap::from([(
            blocks[0],
            Frame {
                normal: [0, 0, 1],
                right: [1, 0, 0],
                down: [0, 1, 0],
            },
        )]);
        let mut pending = vec![blocks[0]];
        while let Some(block) = pending.pop() {
            let Some(&frame) = faces.get(&block) else {
                continue;
            };
            for dir in Direction::ALL {
                let next = block.step(dir);
                if blocks.contains(&next) && !faces.contains_key(&next) {
                    faces.insert(next, frame.fold(dir));
                    pending.push(next);
                }
            }
        }
        ensure!(faces.len() == 6, "the faces are not connected");
        let mut normals: Vec<Vec3> = faces.values().map(|f| f.normal).collect();
        normals.sort_unstable();
        normals.dedup();
        ensure!(normals.len() == 6, "the net folds two faces onto the same side");

        Ok(Cube { side, faces })
    }

    fn block_of(&self, p: Point) -> Point {
        Point::new(p.x.div_euclid(self.side), p.y.div_euclid(self.side))
    }

    /// Tile and heading after crossing the edge of the face holding `p`
    ///
    /// Tiles are placed on the surface of a cube spanning `-side..=side` on
    /// each axis, two units per tile. Stepping over an edge moves one unit
    /// along the heading and one unit in from the old face, which lands on
    /// the adjacent tile of the new face.
    fn cross(&self, p: Point, dir: Direction) -> Option<(Point, Direction)> {
        let n = self.side;
        let block = self.block_of(p);
        let from = self.faces.get(&block)?;
        let (i, j) = (p.x - block.x * n, p.y - block.y * n);
        let heading = from.towards(dir);

        let on_cube: Vec3 = std::array::from_fn(|k| {
            from.normal[k] * n + from.right[k] * (2 * i - (n - 1)) + from.down[k] * (2 * j - (n - 1))
        });
        let landed: Vec3 = std::array::from_fn(|k| on_cube[k] + heading[k] - from.normal[k]);

        let (&to_block, to) = self.faces.iter().find(|(_, f)| f.normal == heading)?;
        let i = (dot(landed, to.right) + n - 1) / 2;
        let j = (dot(landed, to.down) + n - 1) / 2;
        let entered = neg(from.normal);
        let new_dir = Direction::ALL
            .into_iter()
            .find(|&d| to.towards(d) == entered)?;
        Some((
            Point::new(to_block.x * n + i, to_block.y * n + j),
            new_dir,
        ))
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    width: i64,
    height: i64,
    /// Row-major tiles, short rows padded with void
    tiles: Vec<u8>,
    path: Vec<Step>,
}

impl Board {
    fn tile(&self, p: Point) -> u8 {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return VOID;
        }
        self.tiles[(p.y * self.width + p.x) as usize]
    }

    /// Opposite end of the row or column when stepping off the flat map
    fn wrap_flat(&self, p: Point, dir: Direction) -> Option<(Point, Direction)> {
        let back = dir.opposite();
        let mut q = p;
        while self.tile(q.step(back)) != VOID {
            q = q.step(back);
        }
        Some((q, dir))
    }

    /// Final password after following the path
    ///
    /// `wrap` gives the position and heading after leaving the map edge.
    fn follow<F>(&self, wrap: F) -> Result<u64, SolveError>
    where
        F: Fn(Point, Direction) -> Option<(Point, Direction)>,
    {
        let start_x = (0..self.width)
            .find(|&x| self.tile(Point::new(x, 0)) == OPEN)
            .ok_or_else(|| SolveError::failed("no open tile in the top row"))?;
        let mut pos = Point::new(start_x, 0);
        let mut dir = Direction::East;

        for step in &self.path {
            match *step {
                Step::Left => dir = dir.turn_left(),
                Step::Right => dir = dir.turn_right(),
                Step::Forward(count) => {
                    for _ in 0..count {
                        let ahead = pos.step(dir);
                        let (next, next_dir) = if self.tile(ahead) == VOID {
                            wrap(pos, dir).ok_or_else(|| {
                                SolveError::failed(format!("cannot wrap from {pos:?} heading {dir:?}"))
                            })?
                        } else {
                            (ahead, dir)
                        };
                        if self.tile(next) == WALL {
                            break;
                        }
                        (pos, dir) = (next, next_dir);
                    }
                }
            }
        }
        Ok(1000 * (pos.y as u64 + 1) + 4 * (pos.x as u64 + 1) + facing_score(dir))
    }
}

fn parse_path(s: &str) -> anyhow::Result<Vec<Step>> {
    let mut steps = Vec::new();
    let mut number: Option<u32> = None;
    for c in s.trim().chars() {
        if let Some(d) = c.to_digit(10) {
            let n = number.unwrap_or(0);
            number = Some(
                n.checked_mul(10)
                    .and_then(|n| n.checked_add(d))
                    .ok_or_else(|| anyhow!("step count too large"))?,
            );
            continue;
        }
        steps.extend(number.take().map(Step::Forward));
        steps.push(match c {
            'L' => Step::Left,
            'R' => Step::Right,
            other => bail!("unexpected {other:?} in path"),
        });
    }
    steps.extend(number.map(Step::Forward));
    ensure!(!steps.is_empty(), "empty path");
    Ok(steps)
}

fn parse_board(input: &str) -> anyhow::Result<Board> {
    let parts = blocks(input);
    let [map, path] = parts.as_slice() else {
        bail!("expected a map and a path separated by a blank line");
    };
    let [path] = path.as_slice() else {
        bail!("the path must be a single line");
    };
    let width = map.iter().map(|line| line.len()).max().unwrap_or(0);
    let mut tiles = Vec::with_capacity(width * map.len());
    for (y, line) in map.iter().enumerate() {
        if let Some(bad) = line.bytes().find(|b| ![VOID, OPEN, WALL].contains(b)) {
            bail!("unexpected tile {:?} on row {}", bad as char, y + 1);
        }
        tiles.extend(line.bytes());
        tiles.resize((y + 1) * width, VOID);
    }
    Ok(Board {
        width: width as i64,
        height: map.len() as i64,
        tiles,
        path: parse_path(path)?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Board;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_board(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let board = &*shared;
        board
            .follow(|p, d| board.wrap_flat(p, d))
            .map(|password| password.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cube = Cube::fold(shared).map_err(|e| SolveError::failed(format!("{e:#}")))?;
        shared
            .follow(|p, d| cube.cross(p, d))
            .map(|password| password.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = concat!(
        "        ...#\n",
        "        .#..\n",
        "        #...\n",
        "        ....\n",
        "...#.......#\n",
        "........#...\n",
        "..#....#....\n",
        "..........#.\n",
        "        ...#....\n",
        "        .....#..\n",
        "        .#......\n",
        "        ......#.\n",
        "\n",
        "10R5L5R10L4R5L5\n",
    );

    /// Open cube net of `side`-wide faces laid out as `layout`, `#` marking a face
    fn open_net(layout: &[&str], side: usize) -> Board {
        let mut map = String::new();
        for row in layout {
            for _ in 0..side {
                for c in row.chars() {
                    let fill = if c == '#' { "." } else { " " };
                    map.push_str(&fill.repeat(side));
                }
                map.push('\n');
            }
        }
        map.push_str("\n1\n");
        parse_board(&map).unwrap()
    }

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "6032");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "5031");
    }

    #[test]
    fn test_path_parsing() {
        assert_eq!(
            parse_path("10R5L").unwrap(),
            vec![Step::Forward(10), Step::Right, Step::Forward(5), Step::Left]
        );
        assert!(parse_path("10X5").is_err());
        assert!(parse_path("").is_err());
    }

    #[test]
    fn test_straight_walk_around_the_cube_returns_home() {
        let layouts: [&[&str]; 3] = [
            &[" ##", " # ", "## ", "#  "],
            &["  # ", "### ", "  ##"],
            &["#   ", "####", "#   "],
        ];
        for layout in layouts {
            let side = 3;
            let board = open_net(layout, side);
            let cube = Cube::fold(&board).unwrap();
            for y in 0..board.height {
                for x in 0..board.width {
                    let start = Point::new(x, y);
                    if board.tile(start) == VOID {
                        continue;
                    }
                    for dir in Direction::ALL {
                        let (mut p, mut d) = (start, dir);
                        for _ in 0..4 * side {
                            let ahead = p.step(d);
                            (p, d) = if board.tile(ahead) == VOID {
                                cube.cross(p, d).unwrap()
                            } else {
                                (ahead, d)
                            };
                        }
                        assert_eq!((p, d), (start, dir), "{layout:?} from {start:?} {dir:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_non_cube_maps_rejected() {
        let strip = open_net(&["######"], 2);
        assert!(Cube::fold(&strip).is_err());
        let mut shared = <Solver as AocParser>::parse("...\n\n2R\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "1013");
        assert!(<Solver as PartSolver<2>>::solve(&mut shared).is_err());
    }
}
