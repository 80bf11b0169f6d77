//! Memoised recursion over a dependency DAG
//!
//! A [`DpProblem`] names, for every index, the indices it depends on and how
//! to combine their values. [`DpCache`] resolves dependencies lazily and
//! computes each index at most once.
//!
//! The dependency graph must be acyclic. A cycle recurses until the stack
//! overflows.
//!
//! # Backends
//!
//! - [`VecBackend`]: dense `usize` indices, grows on demand
//! - [`HashMapBackend`]: any `Hash + Eq` index, e.g. tuples
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
//!
//! struct Fibonacci;
//!
//! impl DpProblem<usize, u64> for Fibonacci {
//!     fn deps(&self, n: &usize) -> Vec<usize> {
//!         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
//!     }
//!     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
//!         if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
//!     }
//! }
//!
//! let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
//! assert_eq!(cache.get(&10), 55);
//! ```
//!
//! Closures work too:
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, HashMapBackend};
//!
//! // lattice paths to (r, c) moving only down or right
//! let paths = DpCache::new(
//!     HashMapBackend::new(),
//!     |&(r, c): &(usize, usize)| {
//!         let mut deps = Vec::new();
//!         if r > 0 { deps.push((r - 1, c)); }
//!         if c > 0 { deps.push((r, c - 1)); }
//!         deps
//!     },
//!     |_: &(usize, usize), deps: Vec<u64>| if deps.is_empty() { 1 } else { deps.iter().sum() },
//! );
//! assert_eq!(paths.get(&(4, 4)), 70);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};

#[cfg(test)]
mod tests;
