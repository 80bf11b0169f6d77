use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parsing::non_empty_lines;

/// Cathode-Ray Tube
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 10, tags = ["simulation"])]
pub struct Solver;

const SCREEN_WIDTH: usize = 40;
const SCREEN_HEIGHT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Noop,
    AddX(i64),
}

/// Value of `X` during each cycle, cycle 1 first
fn register_trace(program: &[Instruction]) -> Vec<i64> {
    let mut x = 1;
    let mut trace = Vec::with_capacity(program.len() * 2);
    for instruction in program {
        match instruction {
            Instruction::Noop => trace.push(x),
            Instruction::AddX(v) => {
                trace.extend([x, x]);
                x += v;
            }
        }
    }
    trace
}

fn parse_instruction(line: &str) -> anyhow::Result<Instruction> {
    match line.split_whitespace().collect::<Vec<_>>().as_slice() {
        ["noop"] => Ok(Instruction::Noop),
        ["addx", v] => Ok(Instruction::AddX(
            v.parse().with_context(|| format!("invalid addx operand {v:?}"))?,
        )),
        _ => bail!("unknown instruction {line:?}"),
    }
}

impl AocParser for Solver {
    /// Register value per cycle
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let program = non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| {
                parse_instruction(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(register_trace(&program))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((20..=shared.len())
            .step_by(SCREEN_WIDTH)
            .map(|cycle| cycle as i64 * shared[cycle - 1])
            .sum::<i64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    /// The screen drawn as rows of `#` and `.`
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() < SCREEN_WIDTH * SCREEN_HEIGHT {
            return Err(SolveError::failed(format!(
                "program stops after {} cycles, the screen needs {}",
                shared.len(),
                SCREEN_WIDTH * SCREEN_HEIGHT
            )));
        }
        let rows: Vec<String> = shared[..SCREEN_WIDTH * SCREEN_HEIGHT]
            .chunks(SCREEN_WIDTH)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(col, &sprite)| if (sprite - col as i64).abs() <= 1 { '#' } else { '.' })
                    .collect()
            })
            .collect();
        Ok(rows.join("\n"))
    }
}
