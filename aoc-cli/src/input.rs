//! Local puzzle input lookup
//!
//! Layout under the input root:
//!
//! ```text
//! {year}/input/day{DD}.txt               real input
//! {year}/sample/day{DD}.txt              sample shared by both parts
//! {year}/sample/day{DD}_part{P}.txt      sample for one part
//! {year}/sample/day{DD}_part{P}_alt{N}.txt
//! {year}/sample/day{DD}_alt{N}.txt       alternate sample N
//! ```
//!
//! Part-specific files win over day-wide ones.

use crate::error::InputError;
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};

/// Which family of input files to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Real,
    Sample,
    Alternate(u8),
}

impl InputKind {
    /// Short label for output, `None` for real inputs
    pub fn label(self) -> Option<String> {
        match self {
            InputKind::Real => None,
            InputKind::Sample => Some("sample".to_string()),
            InputKind::Alternate(n) => Some(format!("alt {n}")),
        }
    }
}

/// Parts of one day that read the same file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBatch {
    pub path: PathBuf,
    pub parts: Vec<u8>,
}

/// Resolves and reads input files under a root directory
#[derive(Debug, Clone)]
pub struct InputStore {
    root: PathBuf,
    kind: InputKind,
}

impl InputStore {
    pub fn new(root: PathBuf, kind: InputKind) -> Self {
        Self { root, kind }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Paths tried for `part`, most specific first
    pub fn candidates(&self, year: u16, day: u8, part: u8) -> Vec<PathBuf> {
        let names = match self.kind {
            InputKind::Real => {
                return vec![self.year_dir(year, "input").join(format!("day{day:02}.txt"))];
            }
            InputKind::Sample => [
                format!("day{day:02}_part{part}.txt"),
                format!("day{day:02}.txt"),
            ],
            InputKind::Alternate(n) => [
                format!("day{day:02}_part{part}_alt{n}.txt"),
                format!("day{day:02}_alt{n}.txt"),
            ],
        };
        let dir = self.year_dir(year, "sample");
        names.into_iter().map(|name| dir.join(name)).collect()
    }

    /// First existing candidate for `part`
    pub fn resolve(&self, year: u16, day: u8, part: u8) -> Result<PathBuf, InputError> {
        let candidates = self.candidates(year, day, part);
        if let Some(found) = candidates.iter().find(|p| p.is_file()) {
            log::debug!("{year}/{day:02} part {part}: using {}", found.display());
            return Ok(found.clone());
        }
        Err(InputError::Missing {
            year,
            day,
            part,
            expected: candidates.last().cloned().unwrap_or_default(),
        })
    }

    /// Resolve every part, grouping consecutive parts that share a file
    ///
    /// Parts whose file is missing come back in the error list.
    pub fn plan(
        &self,
        year: u16,
        day: u8,
        parts: impl IntoIterator<Item = u8>,
    ) -> (Vec<InputBatch>, Vec<(u8, InputError)>) {
        let mut missing = Vec::new();
        let resolved: Vec<(u8, PathBuf)> = parts
            .into_iter()
            .filter_map(|part| match self.resolve(year, day, part) {
                Ok(path) => Some((part, path)),
                Err(e) => {
                    missing.push((part, e));
                    None
                }
            })
            .collect();

        let batches = resolved
            .into_iter()
            .chunk_by(|(_, path)| path.clone())
            .into_iter()
            .map(|(path, group)| InputBatch {
                path,
                parts: group.map(|(part, _)| part).collect(),
            })
            .collect();

        (batches, missing)
    }

    pub fn read(&self, path: &Path) -> Result<String, InputError> {
        fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn year_dir(&self, year: u16, family: &str) -> PathBuf {
        self.root.join(year.to_string()).join(family)
    }
}
