use std::collections::HashMap;

use anyhow::{Context, anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::non_empty_lines;

/// Monkey Math
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 21, tags = ["parsing", "tree"])]
pub struct Solver;

const ROOT: &str = "root";
const HUMAN: &str = "humn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job<'a> {
    Number(i64),
    Math(&'a str, Op, &'a str),
}

#[derive(Debug, Clone)]
pub struct Troop<'a> {
    jobs: HashMap<&'a str, Job<'a>>,
}

fn apply(op: Op, a: i64, b: i64) -> Result<i64, SolveError> {
    let value = match op {
        Op::Add => a.checked_add(b),
        Op::Sub => a.checked_sub(b),
        Op::Mul => a.checked_mul(b),
        Op::Div if b != 0 && a % b == 0 => Some(a / b),
        Op::Div => None,
    };
    value.ok_or_else(|| SolveError::failed(format!("{a} {op:?} {b} has no integer result")))
}

impl<'a> Troop<'a> {
    fn job(&self, name: &str) -> Result<Job<'a>, SolveError> {
        self.jobs
            .get(name)
            .copied()
            .ok_or_else(|| SolveError::failed(format!("no monkey named {name}")))
    }

    /// Number yelled by `name`; `None` when it depends on an unknown `humn`
    fn yell(&self, name: &str, human_known: bool) -> Result<Option<i64>, SolveError> {
        if name == HUMAN && !human_known {
            return Ok(None);
        }
        match self.job(name)? {
            Job::Number(n) => Ok(Some(n)),
            Job::Math(a, op, b) => {
                match (self.yell(a, human_known)?, self.yell(b, human_known)?) {
                    (Some(a), Some(b)) => apply(op, a, b).map(Some),
                    _ => Ok(None),
                }
            }
        }
    }

    /// Value `humn` must yell so that `name` yells `target`
    fn solve_for_human(&self, name: &str, target: i64) -> Result<i64, SolveError> {
        if name == HUMAN {
            return Ok(target);
        }
        let Job::Math(a, op, b) = self.job(name)? else {
            return Err(SolveError::failed(format!("{name} does not depend on {HUMAN}")));
        };
        match (self.yell(a, false)?, self.yell(b, false)?) {
            // a op ? = target
            (Some(known), None) => {
                let needed = match op {
                    Op::Add => apply(Op::Sub, target, known)?,
                    Op::Sub => apply(Op::Sub, known, target)?,
                    Op::Mul => apply(Op::Div, target, known)?,
                    Op::Div => apply(Op::Div, known, target)?,
                };
                self.solve_for_human(b, needed)
            }
            // ? op b = target
            (None, Some(known)) => {
                let needed = match op {
                    Op::Add => apply(Op::Sub, target, known)?,
                    Op::Sub => apply(Op::Add, target, known)?,
                    Op::Mul => apply(Op::Div, target, known)?,
                    Op::Div => apply(Op::Mul, target, known)?,
                };
                self.solve_for_human(a, needed)
            }
            _ => Err(SolveError::failed(format!(
                "{HUMAN} must appear on exactly one side of {name}"
            ))),
        }
    }
}

fn parse_job(rest: &str) -> anyhow::Result<Job<'_>> {
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [n] => Ok(Job::Number(
            n.parse().with_context(|| format!("invalid number {n:?}"))?,
        )),
        [a, op, b] => {
            let op = match *op {
                "+" => Op::Add,
                "-" => Op::Sub,
                "*" => Op::Mul,
                "/" => Op::Div,
                other => bail!("unknown operator {other:?}"),
            };
            Ok(Job::Math(*a, op, *b))
        }
        _ => bail!("expected a number or '<a> <op> <b>'"),
    }
}

fn parse_troop(input: &str) -> anyhow::Result<Troop<'_>> {
    let mut jobs = HashMap::new();
    for (i, line) in non_empty_lines(input).enumerate() {
        let (name, rest) = line
            .split_once(':')
            .ok_or_else(|| anyhow!("(line {}) expected '<name>: <job>'", i + 1))?;
        let job = parse_job(rest).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e))?;
        ensure!(
            jobs.insert(name.trim(), job).is_none(),
            "(line {}) monkey {name} listed twice",
            i + 1
        );
    }
    ensure!(jobs.contains_key(ROOT), "no {ROOT} monkey");
    Ok(Troop { jobs })
}

impl AocParser for Solver {
    type SharedData<'a> = Troop<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_troop(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .yell(ROOT, true)?
            .map(|n| n.to_string())
            .ok_or_else(|| SolveError::failed("root yells nothing"))
    }
}

impl PartSolver<2> for Solver {
    /// `root` compares its operands, so both sides must be equal
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let Job::Math(a, _, b) = shared.job(ROOT)? else {
            return Err(SolveError::failed("root must compare two monkeys"));
        };
        let human = match (shared.yell(a, false)?, shared.yell(b, false)?) {
            (Some(known), None) => shared.solve_for_human(b, known)?,
            (None, Some(known)) => shared.solve_for_human(a, known)?,
            _ => {
                return Err(SolveError::failed(format!(
                    "{HUMAN} must appear on exactly one side of root"
                )));
            }
        };
        Ok(human.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "root: pppw + sjmn
dbpl: 5
cczh: sllz + lgvd
zczc: 2
ptdq: humn - dvpt
dvpt: 3
lfqf: 4
humn: 5
ljgn: 2
sjmn: drzm * dbpl
sllz: 4
pppw: cczh / lfqf
lgvd: ljgn * ptdq
drzm: hmdt - zczc
hmdt: 32
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "152");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "301");
    }

    #[test]
    fn test_human_on_the_right() {
        let troop = "root: left + right\nleft: 12\nright: x / humn\nx: 36\nhumn: 1\n";
        assert_eq!(solve::<Solver>(troop, 1), "48");
        assert_eq!(solve::<Solver>(troop, 2), "3");
    }

    #[test]
    fn test_unsolvable_troops() {
        let troop = "root: a + b\na: 7\nb: 2\nc: humn / 2\nhumn: 1\n";
        let mut shared = <Solver as AocParser>::parse(troop).unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut shared).is_err());
        let mut odd = <Solver as AocParser>::parse("root: a / b\na: 7\nb: 2\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut odd).is_err());
    }

    #[test]
    fn test_bad_troops_rejected() {
        assert!(parse_troop("a: 1\n").is_err());
        assert!(parse_troop("root: 1\nroot: 2\n").is_err());
        assert!(parse_troop("root: a % b\n").is_err());
    }
}
