use std::collections::HashMap;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};
use crate::utils::parsing::non_empty_lines;

/// No Space Left On Device
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 7, tags = ["tree", "dp"])]
pub struct Solver;

const DISK_SIZE: u64 = 70_000_000;
const UPDATE_SIZE: u64 = 30_000_000;
const SMALL_DIR_LIMIT: u64 = 100_000;

#[derive(Debug, Default)]
struct Directory<'a> {
    parent: Option<usize>,
    children: HashMap<&'a str, usize>,
    files: HashMap<&'a str, u64>,
}

/// Directories discovered by a terminal session; index 0 is `/`
#[derive(Debug)]
struct Tree<'a> {
    dirs: Vec<Directory<'a>>,
}

impl<'a> Tree<'a> {
    fn child(&mut self, parent: usize, name: &'a str) -> usize {
        if let Some(&child) = self.dirs[parent].children.get(name) {
            return child;
        }
        let child = self.dirs.len();
        self.dirs.push(Directory {
            parent: Some(parent),
            ..Directory::default()
        });
        self.dirs[parent].children.insert(name, child);
        child
    }

    /// Replays `cd` and `ls` output
    ///
    /// Listing a directory twice does not count its files twice.
    fn from_session(input: &'a str) -> anyhow::Result<Self> {
        let mut tree = Tree {
            dirs: vec![Directory::default()],
        };
        let mut cwd = 0;
        for (i, line) in non_empty_lines(input).enumerate() {
            let line_err = |e: anyhow::Error| anyhow!("(line {}) {:#}", i + 1, e);
            match line.split_whitespace().collect::<Vec<_>>().as_slice() {
                ["$", "cd", "/"] => cwd = 0,
                ["$", "cd", ".."] => {
                    cwd = tree.dirs[cwd]
                        .parent
                        .ok_or_else(|| line_err(anyhow!("cd .. from the root")))?;
                }
                ["$", "cd", name] => cwd = tree.child(cwd, *name),
                ["$", "ls"] => {}
                ["dir", name] => {
                    tree.child(cwd, *name);
                }
                [size, name] => {
                    let size = size
                        .parse()
                        .with_context(|| format!("invalid file size {size:?}"))
                        .map_err(line_err)?;
                    tree.dirs[cwd].files.insert(*name, size);
                }
                _ => bail!("(line {}) unrecognised output {line:?}", i + 1),
            }
        }
        Ok(tree)
    }

    /// Total size of every directory, nested content included
    fn sizes(&self) -> Vec<u64> {
        let cache = DpCache::with_problem(VecBackend::with_capacity(self.dirs.len()), self);
        (0..self.dirs.len()).map(|i| cache.get(&i)).collect()
    }
}

impl DpProblem<usize, u64> for &Tree<'_> {
    fn deps(&self, dir: &usize) -> Vec<usize> {
        self.dirs[*dir].children.values().copied().collect()
    }

    fn compute(&self, dir: &usize, deps: Vec<u64>) -> u64 {
        self.dirs[*dir].files.values().sum::<u64>() + deps.iter().sum::<u64>()
    }
}

impl AocParser for Solver {
    /// Directory sizes, `/` first
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let tree = Tree::from_session(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(tree.sizes())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|&&size| size <= SMALL_DIR_LIMIT)
            .sum::<u64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let used = shared[0];
        let free = DISK_SIZE
            .checked_sub(used)
            .ok_or_else(|| SolveError::failed(format!("{used} bytes used on a {DISK_SIZE} byte disk")))?;
        let needed = UPDATE_SIZE.saturating_sub(free);
        shared
            .iter()
            .filter(|&&size| size >= needed)
            .min()
            .map(u64::to_string)
            .ok_or_else(|| SolveError::failed("no directory frees enough space"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2022::test_support::solve;

    const SAMPLE: &str = "$ cd /
$ ls
dir a
14848514 b.txt
8504156 c.dat
dir d
$ cd a
$ ls
dir e
29116 f
2557 g
62596 h.lst
$ cd e
$ ls
584 i
$ cd ..
$ cd ..
$ cd d
$ ls
4060174 j
8033020 d.log
5626152 d.ext
7214296 k
";

    #[test]
    fn test_part1_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "95437");
    }

    #[test]
    fn test_part2_sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 2), "24933642");
    }

    #[test]
    fn test_directory_sizes() {
        let mut sizes = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(sizes[0], 48381165);
        sizes.sort_unstable();
        assert_eq!(sizes, vec![584, 94853, 24933642, 48381165]);
    }

    #[test]
    fn test_relisting_does_not_double_count() {
        let twice = "$ cd /\n$ ls\n10 a\n$ ls\n10 a\n";
        assert_eq!(<Solver as AocParser>::parse(twice).unwrap(), vec![10]);
    }

    #[test]
    fn test_bad_sessions() {
        assert!(<Solver as AocParser>::parse("$ cd /\n$ cd ..\n").is_err());
        assert!(<Solver as AocParser>::parse("$ ls\nbig a\n").is_err());
        assert!(<Solver as AocParser>::parse("$ rm -rf /\n").is_err());
    }
}
