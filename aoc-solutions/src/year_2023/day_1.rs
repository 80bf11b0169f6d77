use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// Trebuchet calibration values
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["strings"])]
pub struct Solver;

const DIGIT_NAMES: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(ParseError::MissingData("no calibration lines".into()));
        }
        Ok(lines)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, false)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, true)
    }
}

/// Digit starting at byte `i`, optionally matching spelled-out names
fn digit_at(line: &str, i: usize, spelled: bool) -> Option<u32> {
    let rest = &line[i..];
    let c = rest.chars().next()?;
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !spelled {
        return None;
    }
    DIGIT_NAMES
        .iter()
        .position(|name| rest.starts_with(name))
        .map(|p| p as u32 + 1)
}

fn calibration_sum(lines: &[&str], spelled: bool) -> Result<String, SolveError> {
    let mut total = 0u32;
    for line in lines {
        // names may overlap ("eightwo"), so scan every starting offset
        let mut digits = line
            .char_indices()
            .filter_map(|(i, _)| digit_at(line, i, spelled));
        let first = digits
            .next()
            .ok_or_else(|| SolveError::failed(format!("no digit in line {line:?}")))?;
        let last = digits.last().unwrap_or(first);
        total += first * 10 + last;
    }
    Ok(total.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SAMPLE_1: &str = "1abc2
pqr3stu8vwx
a1b2c3d4e5f
treb7uchet
";

    const SAMPLE_2: &str = "two1nine
eightwothree
abcone2threexyz
xtwone3four
4nineeightseven2
zoneight234
7pqrstsixteen
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE_1, 1), "142");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE_2, 2), "281");
    }

    #[test]
    fn test_overlapping_names() {
        assert_eq!(digit_at("eightwo", 4, true), Some(2));
        assert_eq!(solve::<Solver>("eightwo\n", 2), "82");
    }

    #[test]
    fn test_line_without_digit_fails() {
        let mut shared = <Solver as AocParser>::parse("abc\n").unwrap();
        assert!(matches!(
            <Solver as PartSolver<1>>::solve(&mut shared),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
