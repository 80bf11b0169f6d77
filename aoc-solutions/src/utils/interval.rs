//! Closed integer interval arithmetic
//!
//! A [`ClosedInterval`] is a contiguous run of integers `[low, high]`,
//! inclusive on both ends. Operations that would produce an empty interval
//! return `None`, so a live interval always has `low <= high`.
//!
//! [`propagate`] pushes a set of intervals through ordered stages of
//! [`OffsetRule`]s, splitting them wherever a rule only partially covers them.

use std::fmt;

/// Inclusive integer range `[low, high]` with `low <= high`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClosedInterval {
    low: i64,
    high: i64,
}

impl ClosedInterval {
    /// Returns `None` when `low > high`.
    pub fn new(low: i64, high: i64) -> Option<Self> {
        (low <= high).then_some(Self { low, high })
    }

    /// Interval holding a single value
    pub fn point(value: i64) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    /// Interval of `len` values starting at `start`; `None` for zero length
    pub fn from_start_len(start: i64, len: i64) -> Option<Self> {
        Self::new(start, start.checked_add(len)?.checked_sub(1)?)
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    /// Number of integers in the interval
    pub fn len(&self) -> u64 {
        self.high.abs_diff(self.low) + 1
    }

    /// Always false; present for symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, value: i64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Whether every value of `other` is also in `self`
    pub fn covers(&self, other: &Self) -> bool {
        self.low <= other.low && other.high <= self.high
    }

    /// Overlapping part of two intervals, if any
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        Self::new(self.low.max(other.low), self.high.min(other.high))
    }

    /// Parts of `self` strictly below and strictly above `cut`
    ///
    /// Together with [`intersection`](Self::intersection) the two pieces
    /// partition `self` without overlap.
    pub fn difference(&self, cut: &Self) -> (Option<Self>, Option<Self>) {
        let under = if self.low < cut.low {
            Self::new(self.low, self.high.min(cut.low - 1))
        } else {
            None
        };
        let over = if self.high > cut.high {
            Self::new((cut.high + 1).max(self.low), self.high)
        } else {
            None
        };
        (under, over)
    }

    /// Interval moved by `offset`
    pub fn shift(&self, offset: i64) -> Self {
        Self {
            low: self.low + offset,
            high: self.high + offset,
        }
    }
}

impl fmt::Display for ClosedInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// Values inside `range` are moved by `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRule {
    pub range: ClosedInterval,
    pub offset: i64,
}

impl OffsetRule {
    pub fn new(range: ClosedInterval, offset: i64) -> Self {
        Self { range, offset }
    }

    /// Rule mapping `[source, source + len - 1]` onto `[destination, ...]`
    ///
    /// `None` for an empty range or when the offset does not fit in an `i64`.
    pub fn from_mapping(destination: i64, source: i64, len: i64) -> Option<Self> {
        let range = ClosedInterval::from_start_len(source, len)?;
        Some(Self::new(range, destination.checked_sub(source)?))
    }
}

/// Push `initial` through every stage and return the surviving intervals
///
/// Within a stage, an interval is checked against the rules in order. The
/// first rule that overlaps it shifts the overlap into the next stage, and
/// the uncovered remainders go back into the current stage's work list so
/// later rules can still claim them. Intervals no rule touches pass through
/// unchanged.
pub fn propagate<I>(initial: I, stages: &[Vec<OffsetRule>]) -> Vec<ClosedInterval>
where
    I: IntoIterator<Item = ClosedInterval>,
{
    let mut current: Vec<ClosedInterval> = initial.into_iter().collect();

    for stage in stages {
        let mut next = Vec::with_capacity(current.len());

        while let Some(interval) = current.pop() {
            let hit = stage.iter().find_map(|rule| {
                interval
                    .intersection(&rule.range)
                    .map(|overlap| (rule, overlap))
            });

            match hit {
                Some((rule, overlap)) => {
                    next.push(overlap.shift(rule.offset));
                    let (under, over) = interval.difference(&rule.range);
                    current.extend(under);
                    current.extend(over);
                }
                None => next.push(interval),
            }
        }

        current = next;
    }

    current
}

/// Union of `intervals` as sorted, disjoint, non-adjacent intervals
///
/// Touching intervals such as `[1, 2]` and `[3, 4]` are joined into one.
pub fn union<I>(intervals: I) -> Vec<ClosedInterval>
where
    I: IntoIterator<Item = ClosedInterval>,
{
    let mut sorted: Vec<ClosedInterval> = intervals.into_iter().collect();
    sorted.sort_unstable();

    let mut merged: Vec<ClosedInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(last) if interval.low <= last.high.saturating_add(1) => {
                last.high = last.high.max(interval.high);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Smallest `low` across `intervals`
pub fn min_low<'a, I>(intervals: I) -> Option<i64>
where
    I: IntoIterator<Item = &'a ClosedInterval>,
{
    intervals.into_iter().map(ClosedInterval::low).min()
}
