use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// Lens Library
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 15, tags = ["hashing"])]
pub struct Solver;

/// The HASH algorithm
pub fn hash(s: &str) -> u8 {
    s.bytes()
        .fold(0u8, |acc, b| acc.wrapping_add(b).wrapping_mul(17))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation<'a> {
    Remove(&'a str),
    Insert(&'a str, u64),
}

fn parse_operation(step: &str) -> anyhow::Result<Operation<'_>> {
    if let Some(label) = step.strip_suffix('-') {
        return Ok(Operation::Remove(label));
    }
    let Some((label, focal)) = step.split_once('=') else {
        bail!("step {step:?} is neither 'label-' nor 'label=N'");
    };
    let focal = focal
        .parse()
        .map_err(|_| anyhow!("invalid focal length in {step:?}"))?;
    Ok(Operation::Insert(label, focal))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let steps: Vec<&str> = input
            .trim()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if steps.is_empty() {
            return Err(ParseError::MissingData("empty initialization sequence".into()));
        }
        Ok(steps)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|s| u64::from(hash(s)))
            .sum::<u64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut boxes: Vec<Vec<(&str, u64)>> = vec![Vec::new(); 256];
        for step in shared.iter() {
            let op = parse_operation(step).map_err(|e| SolveError::failed(e.to_string()))?;
            match op {
                Operation::Remove(label) => {
                    boxes[hash(label) as usize].retain(|(l, _)| *l != label);
                }
                Operation::Insert(label, focal) => {
                    let lenses = &mut boxes[hash(label) as usize];
                    match lenses.iter_mut().find(|(l, _)| *l == label) {
                        Some(lens) => lens.1 = focal,
                        None => lenses.push((label, focal)),
                    }
                }
            }
        }

        let power: u64 = boxes
            .iter()
            .zip(1u64..)
            .flat_map(|(lenses, box_no)| {
                lenses
                    .iter()
                    .zip(1u64..)
                    .map(move |((_, focal), slot)| box_no * slot * focal)
            })
            .sum();
        Ok(power.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SAMPLE: &str = "rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7\n";

    #[test]
    fn test_hash() {
        assert_eq!(hash("HASH"), 52);
        assert_eq!(hash("rn"), 0);
        assert_eq!(hash("qp"), 1);
    }

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "1320");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "145");
    }

    #[test]
    fn test_bad_step_fails_part2_only() {
        let mut shared = <Solver as AocParser>::parse("ab=x").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_ok());
        assert!(<Solver as PartSolver<2>>::solve(&mut shared).is_err());
    }
}
