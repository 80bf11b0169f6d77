use std::collections::HashSet;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Point;
use crate::utils::interval::{ClosedInterval, union};
use crate::utils::parsing::non_empty_lines;

/// Beacon Exclusion Zone
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 15, tags = ["interval", "geometry"])]
pub struct Solver;

const ROW: i64 = 2_000_000;
const SEARCH_LIMIT: i64 = 4_000_000;
const FREQUENCY_FACTOR: i64 = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    at: Point,
    beacon: Point,
    radius: i64,
}

impl Sensor {
    fn new(at: Point, beacon: Point) -> Self {
        Self {
            at,
            beacon,
            radius: at.manhattan(beacon) as i64,
        }
    }

    /// Columns of row `y` within reach of this sensor
    fn coverage(&self, y: i64) -> Option<ClosedInterval> {
        let spare = self.radius - (self.at.y - y).abs();
        ClosedInterval::new(self.at.x - spare, self.at.x + spare)
    }
}

/// Merged sensor coverage along row `y`
fn row_coverage(sensors: &[Sensor], y: i64) -> Vec<ClosedInterval> {
    union(sensors.iter().filter_map(|s| s.coverage(y)))
}

/// Positions in row `y` that cannot hold a beacon
pub fn ruled_out(sensors: &[Sensor], y: i64) -> u64 {
    let covered = row_coverage(sensors, y);
    let beacons: HashSet<i64> = sensors
        .iter()
        .filter(|s| s.beacon.y == y)
        .map(|s| s.beacon.x)
        .collect();
    let known = beacons
        .iter()
        .filter(|&&x| covered.iter().any(|iv| iv.contains(x)))
        .count() as u64;
    covered.iter().map(ClosedInterval::len).sum::<u64>() - known
}

/// The one position in `[0, limit]²` no sensor reaches
pub fn distress_beacon(sensors: &[Sensor], limit: i64) -> Option<Point> {
    let bounds = ClosedInterval::new(0, limit)?;
    (0..=limit).find_map(|y| {
        let covered = union(
            sensors
                .iter()
                .filter_map(|s| s.coverage(y)?.intersection(&bounds)),
        );
        let x = match covered.first() {
            Some(first) if first.low() > 0 => 0,
            Some(first) => first.high() + 1,
            None => 0,
        };
        (x <= limit).then_some(Point::new(x, y))
    })
}

fn coordinate(s: &str, axis: &str) -> anyhow::Result<i64> {
    let value = s
        .trim()
        .strip_prefix(axis)
        .and_then(|v| v.strip_prefix('='))
        .ok_or_else(|| anyhow!("expected '{axis}=<n>', got {s:?}"))?;
    value
        .parse()
        .with_context(|| format!("invalid coordinate {value:?}"))
}

fn parse_point(s: &str) -> anyhow::Result<Point> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("expected 'x=<n>, y=<n>', got {s:?}"))?;
    Ok(Point::new(coordinate(x, "x")?, coordinate(y, "y")?))
}

fn parse_sensor(line: &str) -> anyhow::Result<Sensor> {
    let (sensor, beacon) = line
        .strip_prefix("Sensor at ")
        .and_then(|rest| rest.split_once(": closest beacon is at "))
        .ok_or_else(|| anyhow!("expected 'Sensor at ...: closest beacon is at ...'"))?;
    Ok(Sensor::new(parse_point(sensor)?, parse_point(beacon)?))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Sensor>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_sensor(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(ruled_out(shared, ROW).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        distress_beacon(shared, SEARCH_LIMIT)
            .map(|p| (p.x * FREQUENCY_FACTOR + p.y).to_string())
            .ok_or_else(|| SolveError::failed("every position in the search area is covered"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Sensor at x=2, y=18: closest beacon is at x=-2, y=15
Sensor at x=9, y=16: closest beacon is at x=10, y=16
Sensor at x=13, y=2: closest beacon is at x=15, y=3
Sensor at x=12, y=14: closest beacon is at x=10, y=16
Sensor at x=10, y=20: closest beacon is at x=10, y=16
Sensor at x=14, y=17: closest beacon is at x=10, y=16
Sensor at x=8, y=7: closest beacon is at x=2, y=10
Sensor at x=2, y=0: closest beacon is at x=2, y=10
Sensor at x=0, y=11: closest beacon is at x=2, y=10
Sensor at x=20, y=14: closest beacon is at x=25, y=17
Sensor at x=17, y=20: closest beacon is at x=21, y=22
Sensor at x=16, y=7: closest beacon is at x=15, y=3
Sensor at x=14, y=3: closest beacon is at x=15, y=3
Sensor at x=20, y=1: closest beacon is at x=15, y=3
";

    // the sample is scored on row 10 and a 0..=20 search area

    #[test]
    fn test_part1_sample_row() {
        let sensors = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(ruled_out(&sensors, 10), 26);
    }

    #[test]
    fn test_part2_sample_area() {
        let sensors = <Solver as AocParser>::parse(SAMPLE).unwrap();
        let beacon = distress_beacon(&sensors, 20).unwrap();
        assert_eq!(beacon, Point::new(14, 11));
        assert_eq!(beacon.x * FREQUENCY_FACTOR + beacon.y, 56000011);
    }

    #[test]
    fn test_sensor_coverage() {
        let sensor = parse_sensor("Sensor at x=8, y=7: closest beacon is at x=2, y=10").unwrap();
        assert_eq!(sensor.radius, 9);
        assert_eq!(sensor.coverage(7), ClosedInterval::new(-1, 17));
        assert_eq!(sensor.coverage(16), ClosedInterval::new(8, 8));
        assert_eq!(sensor.coverage(17), None);
    }

    #[test]
    fn test_fully_covered_area() {
        let sensors = vec![Sensor::new(Point::new(1, 1), Point::new(3, 1))];
        assert_eq!(distress_beacon(&sensors, 2), None);
        assert_eq!(distress_beacon(&sensors, 3), Some(Point::new(3, 0)));
    }

    #[test]
    fn test_bad_lines_rejected() {
        assert!(parse_sensor("Sensor at x=1, y=2").is_err());
        assert!(parse_sensor("Sensor at x=1, z=2: closest beacon is at x=0, y=0").is_err());
    }
}
