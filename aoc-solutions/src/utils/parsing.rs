//! Small input-splitting helpers

use std::str::FromStr;

use anyhow::{Context, Result};

/// Split `input` into blocks separated by blank lines
///
/// Trailing whitespace on each line is ignored, so `"\r\n"` endings and
/// lines holding only spaces still count as separators. Empty blocks are
/// skipped.
pub fn blocks(input: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in input.lines().map(str::trim_end) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Non-empty lines of `input`, trailing whitespace removed
pub fn non_empty_lines(input: &str) -> impl Iterator<Item = &str> {
    input
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
}

/// Parse every whitespace-separated token of `s`
pub fn numbers<T>(s: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    s.split_whitespace()
        .map(|tok| tok.parse::<T>().with_context(|| format!("invalid number {tok:?}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_split_on_blank_lines() {
        let input = "a\nb\n\n\nc\r\n  \nd\n";
        assert_eq!(blocks(input), vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
        assert!(blocks("\n\n").is_empty());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(numbers::<i64>(" 1 -2  3").unwrap(), vec![1, -2, 3]);
        let err = numbers::<u32>("1 x").unwrap_err();
        assert!(err.to_string().contains("\"x\""));
    }

    #[test]
    fn test_non_empty_lines() {
        let lines: Vec<&str> = non_empty_lines("x \n\ny\n").collect();
        assert_eq!(lines, vec!["x", "y"]);
    }
}
