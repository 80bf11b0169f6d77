use anyhow::{Context, anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::interval::{ClosedInterval, OffsetRule, min_low, propagate};
use crate::utils::parsing::{blocks, numbers};

/// If You Give A Seed A Fertilizer
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["interval"])]
pub struct Solver;

/// Seed numbers followed by one rule stage per map section
#[derive(Debug)]
pub struct Almanac {
    seeds: Vec<i64>,
    stages: Vec<Vec<OffsetRule>>,
}

fn parse_rule(line: &str) -> anyhow::Result<OffsetRule> {
    let values: Vec<i64> = numbers(line)?;
    let [destination, source, len] = values[..] else {
        bail!("expected '<destination> <source> <length>', got {line:?}");
    };
    OffsetRule::from_mapping(destination, source, len)
        .ok_or_else(|| anyhow!("empty or overflowing range in {line:?}"))
}

fn parse_almanac(input: &str) -> anyhow::Result<Almanac> {
    let blocks = blocks(input);
    let (seed_block, map_blocks) = blocks
        .split_first()
        .ok_or_else(|| anyhow!("empty almanac"))?;
    ensure!(
        seed_block.len() == 1,
        "expected a blank line after the seed list"
    );

    let seeds = seed_block[0]
        .strip_prefix("seeds:")
        .ok_or_else(|| anyhow!("first line must start with 'seeds:'"))?;
    let seeds: Vec<i64> = numbers(seeds).context("seed list")?;

    let stages = map_blocks
        .iter()
        .map(|block| {
            let (header, rules) = block
                .split_first()
                .ok_or_else(|| anyhow!("empty map section"))?;
            if !header.ends_with("map:") {
                bail!("expected a '... map:' header, got {header:?}");
            }
            rules
                .iter()
                .map(|line| parse_rule(line))
                .collect::<anyhow::Result<Vec<_>>>()
                .with_context(|| header.trim_end_matches(':').to_string())
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Almanac { seeds, stages })
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_almanac(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

fn lowest_location(
    almanac: &Almanac,
    seeds: impl IntoIterator<Item = ClosedInterval>,
) -> Result<String, SolveError> {
    let locations = propagate(seeds, &almanac.stages);
    min_low(&locations)
        .map(|low| low.to_string())
        .ok_or_else(|| SolveError::failed("no seeds to plant"))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let seeds = shared.seeds.iter().map(|&s| ClosedInterval::point(s));
        lowest_location(shared, seeds)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.seeds.len() % 2 != 0 {
            return Err(SolveError::failed("seed ranges need an even number of values"));
        }
        let seeds: Vec<ClosedInterval> = shared
            .seeds
            .iter()
            .tuples()
            .filter_map(|(&start, &len)| ClosedInterval::from_start_len(start, len))
            .collect();
        lowest_location(shared, seeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SAMPLE: &str = "seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "35");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "46");
    }

    #[test]
    fn test_parse_stages() {
        let almanac = parse_almanac(SAMPLE).unwrap();
        assert_eq!(almanac.seeds, vec![79, 14, 55, 13]);
        assert_eq!(almanac.stages.len(), 7);
        assert_eq!(almanac.stages[2].len(), 4);
    }

    #[test]
    fn test_range_end_is_exclusive_of_length() {
        // 10 values starting at 0 are remapped, 10 itself is not
        let input = "seeds: 9 10\n\nx-to-y map:\n100 0 10\n";
        assert_eq!(solve::<Solver>(input, 1), "10");
    }

    #[test]
    fn test_malformed_rule_is_rejected() {
        let err = <Solver as AocParser>::parse("seeds: 1\n\na-to-b map:\n1 2\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.contains("a-to-b map")));
    }

    #[test]
    fn test_map_glued_to_seed_list_is_rejected() {
        let input = "seeds: 79 14 55 13\nseed-to-soil map:\n50 98 2\n52 50 48\n";
        let err = <Solver as AocParser>::parse(input).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.contains("blank line")));
    }
}
