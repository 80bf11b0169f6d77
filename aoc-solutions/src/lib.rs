//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions are organized by year. Each one derives `AutoRegisterSolver`,
//! so linking this crate is enough for
//! [`SolverRegistryBuilder::register_all_plugins`](aoc_solver::SolverRegistryBuilder::register_all_plugins)
//! to find it. [`register_year_2022`] and [`register_year_2023`] register the
//! same solvers explicitly. Each year sits behind its own cargo feature.

pub mod utils;

#[cfg(feature = "year-2023")]
pub mod year_2023;

#[cfg(feature = "year-2023")]
pub use year_2023::register_year_2023;

#[cfg(feature = "year-2022")]
pub mod year_2022;

#[cfg(feature = "year-2022")]
pub use year_2022::register_year_2022;
