use std::cmp::Ordering;

use anyhow::{Context, anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::non_empty_lines;

/// Distress Signal
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 13, tags = ["parsing", "sorting"])]
pub struct Solver;

/// Equality follows the packet order, so `[[2]]` equals `[2]`
#[derive(Debug, Clone)]
pub enum Packet {
    Integer(u32),
    List(Vec<Packet>),
}

impl Ord for Packet {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Packet::Integer(a), Packet::Integer(b)) => a.cmp(b),
            (Packet::List(a), Packet::List(b)) => a.cmp(b),
            (Packet::Integer(a), Packet::List(b)) => {
                std::slice::from_ref(&Packet::Integer(*a)).cmp(b.as_slice())
            }
            (Packet::List(a), Packet::Integer(b)) => {
                a.as_slice().cmp(std::slice::from_ref(&Packet::Integer(*b)))
            }
        }
    }
}

impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Packet {}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Recursive-descent reader over one packet line
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> anyhow::Result<()> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            found => bail!(
                "expected {:?} at column {}, found {:?}",
                byte as char,
                self.pos + 1,
                found.map(char::from)
            ),
        }
    }

    fn packet(&mut self) -> anyhow::Result<Packet> {
        match self.peek() {
            Some(b'[') => self.list(),
            Some(b'0'..=b'9') => {
                let start = self.pos;
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
                let digits = std::str::from_utf8(&self.bytes[start..self.pos])?;
                Ok(Packet::Integer(
                    digits
                        .parse()
                        .with_context(|| format!("integer {digits} too large"))?,
                ))
            }
            found => bail!(
                "expected a list or an integer at column {}, found {:?}",
                self.pos + 1,
                found.map(char::from)
            ),
        }
    }

    fn list(&mut self) -> anyhow::Result<Packet> {
        self.expect(b'[')?;
        let mut items = Vec::new();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Packet::List(items));
        }
        loop {
            items.push(self.packet()?);
            match self.peek() {
                Some(b',') => self.pos += 1,
                _ => break,
            }
        }
        self.expect(b']')?;
        Ok(Packet::List(items))
    }
}

fn parse_packet(line: &str) -> anyhow::Result<Packet> {
    let mut reader = Reader {
        bytes: line.trim().as_bytes(),
        pos: 0,
    };
    let packet = reader.list()?;
    ensure!(
        reader.pos == reader.bytes.len(),
        "trailing input after column {}",
        reader.pos
    );
    Ok(packet)
}

fn divider(value: u32) -> Packet {
    Packet::List(vec![Packet::List(vec![Packet::Integer(value)])])
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Packet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let packets = non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_packet(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        if packets.len() % 2 != 0 {
            return Err(ParseError::InvalidFormat(
                "packets do not come in pairs".into(),
            ));
        }
        Ok(packets)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .chunks_exact(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] < pair[1])
            .map(|(i, _)| i + 1)
            .sum::<usize>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Positions of the two dividers once sorted, found by counting smaller packets
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (two, six) = (divider(2), divider(6));
        let before = |d: &Packet| shared.iter().filter(|p| *p < d).count();
        let key = (before(&two) + 1) * (before(&six) + 2);
        Ok(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "[1,1,3,1,1]
[1,1,5,1,1]

[[1],[2,3,4]]
[[1],4]

[9]
[[8,7,6]]

[[4,4],4,4]
[[4,4],4,4,4]

[7,7,7,7]
[7,7,7]

[]
[3]

[[[]]]
[[]]

[1,[2,[3,[4,[5,6,7]]]],8,9]
[1,[2,[3,[4,[5,6,0]]]],8,9]
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "13");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "140");
    }

    #[test]
    fn test_mixed_comparison() {
        let p = |s| parse_packet(s).unwrap();
        assert!(p("[[1],[2,3,4]]") < p("[[1],4]"));
        assert!(p("[9]") > p("[[8,7,6]]"));
        assert_eq!(p("[[2]]").cmp(&p("[2]")), Ordering::Equal);
        assert!(matches!(
            p("[10,[]]"),
            Packet::List(items) if matches!(items.as_slice(), [Packet::Integer(10), Packet::List(empty)] if empty.is_empty())
        ));
    }

    #[test]
    fn test_malformed_packets() {
        assert!(parse_packet("[1,2").is_err());
        assert!(parse_packet("[1,,2]").is_err());
        assert!(parse_packet("[1]]").is_err());
        assert!(parse_packet("7").is_err());
        assert!(<Solver as AocParser>::parse("[1]\n").is_err());
    }
}
