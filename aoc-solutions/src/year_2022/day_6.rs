use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// Tuning Trouble
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 6, tags = ["strings", "sliding-window"])]
pub struct Solver;

/// Characters read once the first run of `width` distinct letters ends
///
/// Keeps a per-letter count for the current window and the number of
/// letters that occur more than once, so each step is constant time.
pub fn marker_end(signal: &[u8], width: usize) -> Option<usize> {
    let mut counts = [0u32; 26];
    let mut repeated = 0;
    for (i, &c) in signal.iter().enumerate() {
        let slot = &mut counts[usize::from(c - b'a')];
        *slot += 1;
        if *slot == 2 {
            repeated += 1;
        }
        if i >= width {
            let slot = &mut counts[usize::from(signal[i - width] - b'a')];
            *slot -= 1;
            if *slot == 1 {
                repeated -= 1;
            }
        }
        if i + 1 >= width && repeated == 0 {
            return Some(i + 1);
        }
    }
    None
}

fn find_marker(signal: &[u8], width: usize) -> Result<String, SolveError> {
    marker_end(signal, width)
        .map(|end| end.to_string())
        .ok_or_else(|| SolveError::failed(format!("no run of {width} distinct characters")))
}

impl AocParser for Solver {
    type SharedData<'a> = &'a [u8];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let signal = input.trim();
        if signal.is_empty() {
            return Err(ParseError::MissingData("empty datastream".into()));
        }
        if let Some(bad) = signal.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(ParseError::InvalidFormat(format!(
                "unexpected character {bad:?} in datastream"
            )));
        }
        Ok(signal.as_bytes())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_marker(shared, 4)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_marker(shared, 14)
    }
}
