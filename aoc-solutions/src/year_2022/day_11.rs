use anyhow::{Context, anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::math::lcm_all;
use crate::utils::parsing::blocks;

/// Monkey in the Middle
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 11, tags = ["simulation", "math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add(u64),
    Multiply(u64),
    Double,
    Square,
}

impl Operation {
    fn apply(self, old: u64) -> u64 {
        match self {
            Operation::Add(v) => old + v,
            Operation::Multiply(v) => old * v,
            Operation::Double => old + old,
            Operation::Square => old * old,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monkey {
    items: Vec<u64>,
    operation: Operation,
    divisor: u64,
    if_true: usize,
    if_false: usize,
}

/// Inspections per monkey after `rounds` rounds
///
/// With `relief` worry levels are divided by three after each inspection.
/// Without it they are kept modulo the lcm of every divisor, which leaves
/// each divisibility test unchanged.
fn inspections(monkeys: &[Monkey], rounds: usize, relief: bool) -> Vec<u64> {
    let modulus = lcm_all(monkeys.iter().map(|m| m.divisor)).unwrap_or(1);
    let mut held: Vec<Vec<u64>> = monkeys.iter().map(|m| m.items.clone()).collect();
    let mut counts = vec![0; monkeys.len()];

    for _ in 0..rounds {
        for (i, monkey) in monkeys.iter().enumerate() {
            let items = std::mem::take(&mut held[i]);
            counts[i] += items.len() as u64;
            for worry in items {
                let worry = monkey.operation.apply(worry);
                let worry = if relief { worry / 3 } else { worry % modulus };
                let target = if worry % monkey.divisor == 0 {
                    monkey.if_true
                } else {
                    monkey.if_false
                };
                held[target].push(worry);
            }
        }
    }
    counts
}

fn monkey_business(monkeys: &[Monkey], rounds: usize, relief: bool) -> u64 {
    let mut counts = inspections(monkeys, rounds, relief);
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts.iter().take(2).product()
}

fn field<'a>(line: Option<&&'a str>, prefix: &str) -> anyhow::Result<&'a str> {
    line.copied()
        .map(str::trim)
        .and_then(|l| l.strip_prefix(prefix))
        .map(str::trim)
        .ok_or_else(|| anyhow!("expected a line starting with {prefix:?}"))
}

fn number<T: std::str::FromStr>(s: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    s.parse().with_context(|| format!("invalid number {s:?}"))
}

fn parse_operation(s: &str) -> anyhow::Result<Operation> {
    match s.split_whitespace().collect::<Vec<_>>().as_slice() {
        ["old", "*", "old"] => Ok(Operation::Square),
        ["old", "+", "old"] => Ok(Operation::Double),
        ["old", "*", v] => Ok(Operation::Multiply(number(v)?)),
        ["old", "+", v] => Ok(Operation::Add(number(v)?)),
        _ => bail!("unsupported operation {s:?}"),
    }
}

fn parse_monkey(lines: &[&str], index: usize) -> anyhow::Result<Monkey> {
    let mut lines = lines.iter();
    let id = field(lines.next(), "Monkey")?.trim_end_matches(':');
    ensure!(number::<usize>(id)? == index, "monkey {id} listed out of order");

    let items = field(lines.next(), "Starting items:")?;
    let items = if items.is_empty() {
        Vec::new()
    } else {
        items
            .split(',')
            .map(|item| number(item.trim()))
            .collect::<anyhow::Result<_>>()?
    };
    let operation = parse_operation(field(lines.next(), "Operation: new =")?)?;
    let divisor = number(field(lines.next(), "Test: divisible by")?)?;
    ensure!(divisor > 0, "divisor must be positive");
    let if_true = number(field(lines.next(), "If true: throw to monkey")?)?;
    let if_false = number(field(lines.next(), "If false: throw to monkey")?)?;
    ensure!(if_true != index && if_false != index, "monkey {index} throws to itself");

    Ok(Monkey {
        items,
        operation,
        divisor,
        if_true,
        if_false,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Monkey>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let monkeys = blocks(input)
            .iter()
            .enumerate()
            .map(|(i, block)| parse_monkey(block, i).map_err(|e| anyhow!("(monkey {i}) {e:#}")))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        if monkeys.is_empty() {
            return Err(ParseError::MissingData("no monkeys".into()));
        }
        if let Some(m) = monkeys
            .iter()
            .find(|m| m.if_true >= monkeys.len() || m.if_false >= monkeys.len())
        {
            return Err(ParseError::InvalidFormat(format!(
                "throw target out of range in {m:?}"
            )));
        }
        Ok(monkeys)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(monkey_business(shared, 20, true).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(monkey_business(shared, 10_000, false).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "\
Monkey 0:
  Starting items: 79, 98
  Operation: new = old * 19
  Test: divisible by 23
    If true: throw to monkey 2
    If false: throw to monkey 3

Monkey 1:
  Starting items: 54, 65, 75, 74
  Operation: new = old + 6
  Test: divisible by 19
    If true: throw to monkey 2
    If false: throw to monkey 0

Monkey 2:
  Starting items: 79, 60, 97
  Operation: new = old * old
  Test: divisible by 13
    If true: throw to monkey 1
    If false: throw to monkey 3

Monkey 3:
  Starting items: 74
  Operation: new = old + 3
  Test: divisible by 17
    If true: throw to monkey 0
    If false: throw to monkey 1
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "10605");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "2713310158");
    }

    #[test]
    fn test_inspection_counts() {
        let monkeys = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(inspections(&monkeys, 20, true), vec![101, 95, 7, 105]);
        assert_eq!(inspections(&monkeys, 1, false), vec![2, 4, 3, 6]);
    }

    #[test]
    fn test_operations() {
        assert_eq!(parse_operation("old * old").unwrap().apply(7), 49);
        assert_eq!(parse_operation("old + old").unwrap().apply(7), 14);
        assert_eq!(parse_operation("old * 19").unwrap().apply(2), 38);
        assert!(parse_operation("old - 3").is_err());
    }

    #[test]
    fn test_bad_targets_rejected() {
        let bad = SAMPLE.replace("throw to monkey 1\n", "throw to monkey 7\n");
        assert!(<Solver as AocParser>::parse(&bad).is_err());
        let selfish = SAMPLE.replace("If true: throw to monkey 2", "If true: throw to monkey 0");
        assert!(<Solver as AocParser>::parse(&selfish).is_err());
    }
}
