//! Property tests for `#[derive(AocSolver)]` part dispatch

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use proptest::prelude::*;

/// Calibration-style solver: part 1 sums first/last digits, part 2 caches and doubles
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Calibration;

struct Readings {
    values: Vec<u32>,
    total: Option<u32>,
}

impl AocParser for Calibration {
    type SharedData<'a> = Readings;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let values = input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                let mut digits = l.chars().filter_map(|c| c.to_digit(10));
                let first = digits
                    .next()
                    .ok_or_else(|| ParseError::InvalidFormat(format!("no digit in {l:?}")))?;
                let last = digits.last().unwrap_or(first);
                Ok(first * 10 + last)
            })
            .collect::<Result<_, _>>()?;
        Ok(Readings {
            values,
            total: None,
        })
    }
}

impl PartSolver<1> for Calibration {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared.values.iter().sum();
        shared.total = Some(total);
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Calibration {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = match shared.total {
            Some(total) => total,
            None => shared.values.iter().sum(),
        };
        Ok((total * 2).to_string())
    }
}

fn render(values: &[u32]) -> String {
    values
        .iter()
        .map(|v| format!("x{}y{}z", v / 10, v % 10))
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn solve_part_matches_direct_part_solver(
        values in prop::collection::vec(10u32..100, 1..8),
        part in 1u8..=2
    ) {
        let input = render(&values);
        let mut via_trait = <Calibration as AocParser>::parse(&input).unwrap();
        let mut direct = <Calibration as AocParser>::parse(&input).unwrap();

        let dispatched = <Calibration as Solver>::solve_part(&mut via_trait, part).unwrap();
        let expected = match part {
            1 => <Calibration as PartSolver<1>>::solve(&mut direct).unwrap(),
            2 => <Calibration as PartSolver<2>>::solve(&mut direct).unwrap(),
            _ => unreachable!(),
        };
        prop_assert_eq!(dispatched, expected);
    }

    #[test]
    fn invalid_part_is_rejected(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = <Calibration as AocParser>::parse("a1b2").unwrap();
        match <Calibration as Solver>::solve_part(&mut shared, part) {
            Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "expected PartNotImplemented, got {:?}", other),
        }
    }

    #[test]
    fn part_one_state_is_visible_to_part_two(values in prop::collection::vec(10u32..100, 1..8)) {
        let input = render(&values);
        let expected: u32 = values.iter().sum();
        let mut shared = <Calibration as AocParser>::parse(&input).unwrap();

        let first = <Calibration as Solver>::solve_part(&mut shared, 1).unwrap();
        prop_assert_eq!(first, expected.to_string());
        prop_assert_eq!(shared.total, Some(expected));

        let second = <Calibration as Solver>::solve_part(&mut shared, 2).unwrap();
        prop_assert_eq!(second, (expected * 2).to_string());
    }
}

#[test]
fn parse_error_names_the_line() {
    let err = <Calibration as AocParser>::parse("abc").err().unwrap();
    assert_eq!(err, ParseError::InvalidFormat("no digit in \"abc\"".into()));
}
