//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError, InputError};
use crate::input::{InputBatch, InputStore};
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input_dir.clone(), config.input_kind),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.sync_executor_config.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Parts of `work_items` with no input file on disk
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<InputError> {
        let inputs = &self.sync_executor_config.inputs;
        work_items
            .iter()
            .flat_map(|w| inputs.plan(w.year, w.day, w.parts.clone()).1)
            .map(|(_, err)| err)
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let cfg = &self.sync_executor_config;

        match cfg.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, cfg) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel(by_year, &tx)
            }
            // Part additionally fans out inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singles = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_parallel(singles, &tx)
            }
        }
    }

    /// Run groups in parallel; items within a group run in order
    fn execute_parallel(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let cfg = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map_with(tx.clone(), |tx, items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, cfg) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce(
                    || None,
                    |a, b| match (a, b) {
                        (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
                        (a, b) => a.or(b),
                    },
                )
                .map_or(Ok(()), Err)
        })
    }
}

/// Restrict `1..=max_parts` to the part filter
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

/// Resolve inputs for one day and solve every requested part
///
/// Missing or unreadable inputs become error results rather than aborting
/// the run; only a closed result channel is reported as an executor error.
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    log::info!("Running {year}/{day:02} parts {:?}", work.parts);

    let (batches, missing) = cfg.inputs.plan(year, day, work.parts.clone());
    for (part, err) in missing {
        send(tx, SolverResult::failed(year, day, part, ExecutorError::from(err).into()))?;
    }

    for batch in batches {
        let input = match cfg.inputs.read(&batch.path) {
            Ok(input) => input,
            Err(e) => {
                let err: ArcExecutorError = ExecutorError::from(e).into();
                for &part in &batch.parts {
                    send(tx, SolverResult::failed(year, day, part, err.clone()))?;
                }
                continue;
            }
        };

        if matches!(cfg.parallelize_by, ParallelizeBy::Part) {
            run_batch_parts_parallel(year, day, &batch, &input, tx, cfg)?;
        } else {
            run_batch(year, day, &batch.parts, &input, tx, cfg)?;
        }
    }
    Ok(())
}

/// Solve parts in order on one solver instance, so later parts see earlier state
fn run_batch(
    year: u16,
    day: u8,
    parts: &[u8],
    input: &str,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let mut solver = match cfg.registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            let err: ArcExecutorError = ExecutorError::from(e).into();
            for &part in parts {
                send(tx, SolverResult::failed(year, day, part, err.clone()))?;
            }
            return Ok(());
        }
    };

    for &part in parts {
        send(tx, solve_part(year, day, part, &mut *solver))?;
    }
    Ok(())
}

/// One fresh solver instance per part, solved concurrently
fn run_batch_parts_parallel(
    year: u16,
    day: u8,
    batch: &InputBatch,
    input: &str,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    batch
        .parts
        .par_iter()
        .map_with(tx.clone(), |tx, &part| {
            run_batch(year, day, &[part], input, tx, cfg).err()
        })
        .reduce(
            || None,
            |a, b| match (a, b) {
                (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
                (a, b) => a.or(b),
            },
        )
        .map_or(Ok(()), Err)
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    match solver.solve(part) {
        Ok(result) => SolverResult {
            year,
            day,
            part,
            solve_duration: result.duration(),
            answer: Ok(result.answer),
            parse_duration,
        },
        Err(e) => {
            let err = ExecutorError::from(aoc_solver::SolverError::from(e));
            SolverResult {
                parse_duration,
                ..SolverResult::failed(year, day, part, err.into())
            }
        }
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputKind;
    use aoc_solutions::register_year_2023;
    use aoc_solver::SolverRegistryBuilder;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const DAY_9_SAMPLE: &str = "0 3 6 9 12 15\n1 3 6 10 15 21\n10 13 16 21 30 45\n";

    fn config(root: &Path, parallelize_by: ParallelizeBy, day: Option<u8>) -> Config {
        Config {
            year_filter: Some(2023),
            day_filter: day,
            part_filter: None,
            tags: Vec::new(),
            input_dir: root.to_path_buf(),
            input_kind: InputKind::Sample,
            thread_count: 2,
            parallelize_by,
            quiet: true,
        }
    }

    fn executor(root: &Path, parallelize_by: ParallelizeBy, day: Option<u8>) -> Executor {
        let registry = register_year_2023(SolverRegistryBuilder::new())
            .unwrap()
            .build();
        Executor::new(registry, &config(root, parallelize_by, day)).unwrap()
    }

    fn write_sample(root: &Path, name: &str, content: &str) {
        let dir = root.join("2023").join("sample");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn run(exec: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        exec.execute(tx).unwrap();
        let mut results: Vec<SolverResult> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), 1..=2);
        assert_eq!(filter_parts(Some(2), 2), 2..=2);
        assert!(filter_parts(Some(3), 2).is_empty());
    }

    #[test]
    fn test_collect_work_items_honours_filters() {
        let temp = TempDir::new().unwrap();
        let all = executor(temp.path(), ParallelizeBy::Day, None);
        assert_eq!(all.collect_work_items().len(), 20);

        let one = executor(temp.path(), ParallelizeBy::Day, Some(9));
        assert_eq!(
            one.collect_work_items(),
            vec![WorkItem {
                year: 2023,
                day: 9,
                parts: 1..=2
            }]
        );
    }

    #[test]
    fn test_solves_sample_in_every_mode() {
        let temp = TempDir::new().unwrap();
        write_sample(temp.path(), "day09.txt", DAY_9_SAMPLE);

        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let results = run(&executor(temp.path(), mode, Some(9)));
            let answers: Vec<String> = results
                .iter()
                .map(|r| r.answer.as_ref().unwrap().clone())
                .collect();
            assert_eq!(answers, vec!["114", "2"], "mode {mode:?}");
            assert!(results.iter().all(|r| r.parse_duration.is_some()));
        }
    }

    #[test]
    fn test_missing_input_yields_error_results() {
        let temp = TempDir::new().unwrap();
        let exec = executor(temp.path(), ParallelizeBy::Day, Some(9));

        let items = exec.collect_work_items();
        assert_eq!(exec.missing_inputs(&items).len(), 2);

        let results = run(&exec);
        assert_eq!(results.len(), 2);
        for r in &results {
            let err = r.answer.as_ref().unwrap_err();
            assert!(matches!(err.inner(), ExecutorError::Input(InputError::Missing { .. })));
        }
    }

    #[test]
    fn test_part_specific_samples_use_separate_instances() {
        let temp = TempDir::new().unwrap();
        write_sample(temp.path(), "day09.txt", DAY_9_SAMPLE);
        write_sample(temp.path(), "day09_part2.txt", "1 2 3\n");

        let results = run(&executor(temp.path(), ParallelizeBy::Day, Some(9)));
        assert_eq!(results[0].answer.as_ref().unwrap(), "114");
        assert_eq!(results[1].answer.as_ref().unwrap(), "0");
    }

    #[test]
    fn test_parse_error_is_reported_for_each_part() {
        let temp = TempDir::new().unwrap();
        write_sample(temp.path(), "day09.txt", "1 2 x\n");

        let results = run(&executor(temp.path(), ParallelizeBy::Sequential, Some(9)));
        assert_eq!(results.len(), 2);
        for r in &results {
            let err = r.answer.as_ref().unwrap_err();
            assert!(matches!(
                err.inner(),
                ExecutorError::Solver(aoc_solver::SolverError::ParseError(_))
            ));
        }
    }
}
