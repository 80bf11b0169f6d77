//! 2D grid helpers: compass directions, integer points and a dense grid

use std::ops::{Add, Mul, Sub};

use anyhow::{Result, anyhow, bail};

/// Compass direction; `y` grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// 90 degrees clockwise
    pub fn turn_right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// 90 degrees counter-clockwise
    pub fn turn_left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    pub fn opposite(self) -> Self {
        self.turn_right().turn_right()
    }

    /// Unit step
    pub fn delta(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
        }
    }

    /// Parses `U`/`R`/`D`/`L` as well as `N`/`E`/`S`/`W`.
    pub fn from_letter(c: char) -> Result<Self> {
        match c {
            'U' | 'N' => Ok(Direction::North),
            'R' | 'E' => Ok(Direction::East),
            'D' | 'S' => Ok(Direction::South),
            'L' | 'W' => Ok(Direction::West),
            other => Err(anyhow!("unknown direction {other:?}")),
        }
    }
}

/// Integer point, also used as a displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Point one step away in `dir`
    pub fn step(self, dir: Direction) -> Self {
        self + dir.delta()
    }

    /// The four orthogonal neighbours, in [`Direction::ALL`] order
    pub fn neighbors(self) -> impl Iterator<Item = Point> {
        Direction::ALL.into_iter().map(move |d| self.step(d))
    }

    /// The eight surrounding points
    pub fn surrounding(self) -> impl Iterator<Item = Point> {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| Point::new(dx, dy)))
            .filter(|d| *d != Point::default())
            .map(move |d| self + d)
    }

    pub fn manhattan(self, other: Point) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i64> for Point {
    type Output = Point;

    fn mul(self, rhs: i64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Dense row-major grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Builds a grid from `lines`, converting each character with `cell`.
    ///
    /// Fails on ragged rows or empty input.
    pub fn parse<F>(input: &str, mut cell: F) -> Result<Self>
    where
        F: FnMut(char) -> Result<T>,
    {
        let mut width = None;
        let mut cells = Vec::new();
        let mut height = 0;

        for (row, line) in input.lines().map(str::trim_end).enumerate() {
            if line.is_empty() {
                continue;
            }
            let before = cells.len();
            for c in line.chars() {
                cells.push(cell(c)?);
            }
            let row_width = cells.len() - before;
            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    bail!("row {} has width {row_width}, expected {w}", row + 1)
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.ok_or_else(|| anyhow!("empty grid"))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<T>) -> Result<Self> {
        if width * height != cells.len() {
            bail!(
                "{} cells do not fill a {width}x{height} grid",
                cells.len()
            );
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        self.in_bounds(p)
            .then(|| p.y as usize * self.width + p.x as usize)
    }

    pub fn get(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// Row `y` as a slice
    pub fn row(&self, y: usize) -> &[T] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// All points in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> + use<T> {
        let (width, height) = (self.width as i64, self.height as i64);
        (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    /// `(point, cell)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.points().zip(self.cells.iter())
    }

    /// First point whose cell satisfies `pred`
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Point> {
        self.iter().find(|(_, c)| pred(c)).map(|(p, _)| p)
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

impl Grid<char> {
    pub fn parse_chars(input: &str) -> Result<Self> {
        Self::parse(input, Ok)
    }
}

impl Grid<u8> {
    /// Grid of single decimal digits
    pub fn parse_digits(input: &str) -> Result<Self> {
        Self::parse(input, |c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| anyhow!("expected a digit, found {c:?}"))
        })
    }
}

/// Twice the signed area of a closed polygon
///
/// Positive for counter-clockwise vertices in a y-up frame.
pub fn shoelace_twice_area(vertices: &[Point]) -> i64 {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum()
}

/// Lattice points of a closed polygon, boundary included
///
/// `vertices` are the polygon corners, `boundary` the number of lattice points
/// on its edges. Combines the shoelace formula with Pick's theorem.
pub fn lattice_points_with_boundary(vertices: &[Point], boundary: u64) -> u64 {
    interior_lattice_points(vertices, boundary) + boundary
}

/// Lattice points strictly inside a closed polygon (Pick's theorem)
pub fn interior_lattice_points(vertices: &[Point], boundary: u64) -> u64 {
    let area2 = shoelace_twice_area(vertices).unsigned_abs();
    // A = i + b/2 - 1  =>  i = (2A - b + 2) / 2
    (area2 + 2 - boundary) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_turns() {
        for d in Direction::ALL {
            assert_eq!(d.turn_left().turn_right(), d);
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.delta() + d.opposite().delta(), Point::default());
        }
        assert_eq!(Direction::North.turn_right(), Direction::East);
        assert_eq!(Direction::from_letter('L').unwrap(), Direction::West);
        assert!(Direction::from_letter('X').is_err());
    }

    #[test]
    fn test_point_neighbors() {
        let p = Point::new(2, 3);
        let n: Vec<Point> = p.neighbors().collect();
        assert_eq!(
            n,
            vec![
                Point::new(2, 2),
                Point::new(3, 3),
                Point::new(2, 4),
                Point::new(1, 3)
            ]
        );
        assert_eq!(p.surrounding().count(), 8);
        assert_eq!(p.manhattan(Point::new(-1, 7)), 7);
        assert_eq!(Direction::East.delta() * 5, Point::new(5, 0));
    }

    #[test]
    fn test_grid_parse_and_lookup() {
        let grid = Grid::parse_chars("ab\ncd\n").unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(grid.get(Point::new(1, 1)), Some(&'d'));
        assert_eq!(grid.get(Point::new(2, 0)), None);
        assert_eq!(grid.get(Point::new(-1, 0)), None);
        assert_eq!(grid.row(1), &['c', 'd']);
        assert_eq!(grid.find(|c| *c == 'c'), Some(Point::new(0, 1)));
    }

    #[test]
    fn test_grid_rejects_ragged_rows() {
        assert!(Grid::parse_chars("abc\nde").is_err());
        assert!(Grid::parse_chars("").is_err());
        assert!(Grid::parse_digits("12\n3x").is_err());
    }

    #[test]
    fn test_polygon_helpers() {
        // 3x3 square of lattice points, corners (0,0)..(2,2)
        let square = [
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(2, 2),
            Point::new(0, 2),
        ];
        assert_eq!(shoelace_twice_area(&square).abs(), 8);
        assert_eq!(interior_lattice_points(&square, 8), 1);
        assert_eq!(lattice_points_with_boundary(&square, 8), 9);
    }
}
