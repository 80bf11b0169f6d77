use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// Pyroclastic Flow
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 17, tags = ["simulation", "cycle"])]
pub struct Solver;

const WIDTH: usize = 7;
const RIGHT_WALL: u8 = 1 << (WIDTH - 1);

/// Rock rows from the bottom up; bit `c` is column `c`, already two columns in
const ROCKS: [&[u8]; 5] = [
    &[0b0111100],
    &[0b0001000, 0b0011100, 0b0001000],
    &[0b0011100, 0b0010000, 0b0010000],
    &[0b0000100, 0b0000100, 0b0000100, 0b0000100],
    &[0b0001100, 0b0001100],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jet {
    Left,
    Right,
}

/// What decides the future of the tower: next rock, next jet and the shape of the top
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Snapshot {
    rock: usize,
    jet: usize,
    depths: [usize; WIDTH],
}

#[derive(Debug, Default)]
struct Chamber {
    rows: Vec<u8>,
}

impl Chamber {
    fn collides(&self, shape: &[u8], y: usize) -> bool {
        shape
            .iter()
            .enumerate()
            .any(|(k, &row)| self.rows.get(y + k).is_some_and(|&r| r & row != 0))
    }

    fn rest(&mut self, shape: &[u8], y: usize) {
        for (k, &row) in shape.iter().enumerate() {
            if self.rows.len() <= y + k {
                self.rows.resize(y + k + 1, 0);
            }
            self.rows[y + k] |= row;
        }
    }

    /// Distance from the top of the tower down to the highest rock in each column
    fn depths(&self) -> [usize; WIDTH] {
        std::array::from_fn(|col| {
            self.rows
                .iter()
                .rev()
                .position(|&r| r & (1 << col) != 0)
                .unwrap_or(self.rows.len())
        })
    }

    /// Drop one rock, consuming jets from `next_jet` onward
    fn drop_rock(&mut self, rock: &[u8], jets: &[Jet], next_jet: &mut usize) {
        let mut shape = rock.to_vec();
        let mut y = self.rows.len() + 3;
        loop {
            let jet = jets[*next_jet];
            *next_jet = (*next_jet + 1) % jets.len();
            let pushed: Option<Vec<u8>> = match jet {
                Jet::Left if shape.iter().all(|r| r & 1 == 0) => {
                    Some(shape.iter().map(|r| r >> 1).collect())
                }
                Jet::Right if shape.iter().all(|r| r & RIGHT_WALL == 0) => {
                    Some(shape.iter().map(|r| r << 1).collect())
                }
                _ => None,
            };
            if let Some(pushed) = pushed.filter(|p| !self.collides(p, y)) {
                shape = pushed;
            }
            if y == 0 || self.collides(&shape, y - 1) {
                break;
            }
            y -= 1;
        }
        self.rest(&shape, y);
    }
}

/// Height of the tower after `count` rocks
///
/// Once a snapshot repeats, the rocks in between form a cycle: whole cycles
/// are skipped at once and their height added at the end.
pub fn tower_height(jets: &[Jet], count: u64) -> u64 {
    let mut chamber = Chamber::default();
    let mut seen: HashMap<Snapshot, (u64, usize)> = HashMap::new();
    let mut next_jet = 0;
    let mut skipped_height: Option<u64> = None;
    let mut dropped = 0;

    while dropped < count {
        let rock = (dropped % ROCKS.len() as u64) as usize;
        chamber.drop_rock(ROCKS[rock], jets, &mut next_jet);
        dropped += 1;

        if skipped_height.is_some() {
            continue;
        }
        let snapshot = Snapshot {
            rock: (dropped % ROCKS.len() as u64) as usize,
            jet: next_jet,
            depths: chamber.depths(),
        };
        if let Some(&(then, height)) = seen.get(&snapshot) {
            let period = dropped - then;
            let gain = (chamber.rows.len() - height) as u64;
            let cycles = (count - dropped) / period;
            dropped += cycles * period;
            skipped_height = Some(cycles * gain);
        } else {
            seen.insert(snapshot, (dropped, chamber.rows.len()));
        }
    }
    chamber.rows.len() as u64 + skipped_height.unwrap_or(0)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Jet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let jets = input
            .trim()
            .chars()
            .map(|c| match c {
                '<' => Ok(Jet::Left),
                '>' => Ok(Jet::Right),
                other => Err(ParseError::InvalidFormat(format!("unexpected jet {other:?}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if jets.is_empty() {
            return Err(ParseError::MissingData("no jet pattern".into()));
        }
        Ok(jets)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 2022).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tower_height(shared, 1_000_000_000_000).to_string())
    }
}
