//! Integer helpers

/// Greatest common divisor
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple; `lcm(0, n) == 0`
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// Least common multiple of every value, `None` for an empty input
pub fn lcm_all<I: IntoIterator<Item = u64>>(values: I) -> Option<u64> {
    values.into_iter().reduce(lcm)
}
