use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parsing::non_empty_lines;

/// Camel Cards
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["sorting"])]
pub struct Solver;

const CARD_ORDER: &str = "23456789TJQKA";
const JOKER: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    /// Card strengths, `2` is 0 and `A` is 12
    cards: [u8; 5],
    bid: u64,
}

/// Hand type, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

impl Hand {
    fn hand_type(&self, jokers_wild: bool) -> HandType {
        let mut counts = [0u8; 13];
        let mut jokers = 0;
        for &card in &self.cards {
            if jokers_wild && card == JOKER {
                jokers += 1;
            } else {
                counts[card as usize] += 1;
            }
        }
        counts.sort_unstable_by(|a, b| b.cmp(a));
        // jokers always join the largest group
        counts[0] += jokers;

        match (counts[0], counts[1]) {
            (5, _) => HandType::FiveOfAKind,
            (4, _) => HandType::FourOfAKind,
            (3, 2) => HandType::FullHouse,
            (3, _) => HandType::ThreeOfAKind,
            (2, 2) => HandType::TwoPair,
            (2, _) => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }

    /// Sort key: type first, then cards left to right
    fn strength(&self, jokers_wild: bool) -> (HandType, [u8; 5]) {
        let cards = self.cards.map(|card| match card {
            JOKER if jokers_wild => 0,
            c if jokers_wild && c < JOKER => c + 1,
            c => c,
        });
        (self.hand_type(jokers_wild), cards)
    }
}

fn parse_hand(line: &str) -> anyhow::Result<Hand> {
    let (cards, bid) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected '<cards> <bid>'"))?;
    let cards: Vec<u8> = cards
        .chars()
        .map(|c| {
            CARD_ORDER
                .find(c)
                .map(|i| i as u8)
                .ok_or_else(|| anyhow!("unknown card {c:?}"))
        })
        .collect::<anyhow::Result<_>>()?;
    ensure!(cards.len() == 5, "a hand has five cards, got {}", cards.len());
    let cards: [u8; 5] = cards
        .try_into()
        .map_err(|_| anyhow!("a hand has five cards"))?;
    let bid: u64 = bid.trim().parse().context("invalid bid")?;
    Ok(Hand { cards, bid })
}

fn total_winnings(hands: &[Hand], jokers_wild: bool) -> u64 {
    hands
        .iter()
        .sorted_by_cached_key(|hand| hand.strength(jokers_wild))
        .zip(1u64..)
        .map(|(hand, rank)| hand.bid * rank)
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .enumerate()
            .map(|(i, line)| parse_hand(line).map_err(|e| anyhow!("(line {}) {:#}", i + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::test_support::solve;

    const SAMPLE: &str = "32T3K 765
T55J5 684
KK677 28
KTJJT 220
QQQJA 483
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "6440");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "5905");
    }

    #[test]
    fn test_hand_types() {
        let hand = |s: &str| parse_hand(&format!("{s} 1")).unwrap();
        assert_eq!(hand("AAAAA").hand_type(false), HandType::FiveOfAKind);
        assert_eq!(hand("23332").hand_type(false), HandType::FullHouse);
        assert_eq!(hand("KTJJT").hand_type(false), HandType::TwoPair);
        assert_eq!(hand("KTJJT").hand_type(true), HandType::FourOfAKind);
        assert_eq!(hand("JJJJJ").hand_type(true), HandType::FiveOfAKind);
    }

    #[test]
    fn test_joker_is_weakest_when_wild() {
        let joker = parse_hand("JKKK2 1").unwrap();
        let queen = parse_hand("QQQQ2 1").unwrap();
        assert!(joker.strength(true) < queen.strength(true));
    }

    #[test]
    fn test_bad_hand_rejected() {
        assert!(parse_hand("AAAA 1").is_err());
        assert!(parse_hand("AAAAX 1").is_err());
        assert!(parse_hand("AAAAA x").is_err());
    }
}
