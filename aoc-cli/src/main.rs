//! `aoc` - runs the Advent of Code solvers against local input files

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, WorkItem};
use output::OutputFormatter;
use std::io::Write;

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config::log_level(args.verbose).as_str()),
    )
    .init();

    if let Err(e) = run(args) {
        log::error!("{e}");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    log::debug!("{config:?}");

    let registry = build_registry(&config.tags)?;
    log::info!("{} solver(s) registered", registry.storage().len());

    let executor = Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    report_missing_inputs(&executor, &work_items, config.quiet);

    let label = executor.inputs().kind().label();
    run_executor(executor, work_items, OutputFormatter::new(config.quiet, label))?;
    std::io::stdout().flush()?;
    Ok(())
}

/// Warn about parts whose input file is absent; they still run and report an error
fn report_missing_inputs(executor: &Executor, work_items: &[WorkItem], quiet: bool) {
    let missing = executor.missing_inputs(work_items);
    if missing.is_empty() {
        return;
    }
    for err in &missing {
        log::warn!("{err}");
    }
    if !quiet {
        println!(
            "Missing {} input file(s) under {}",
            missing.len(),
            executor.inputs().root().display()
        );
    }
}

/// Run the executor on a background thread and print results in order
fn run_executor(
    executor: Executor,
    work_items: Vec<WorkItem>,
    formatter: OutputFormatter,
) -> Result<(), CliError> {
    log::info!("Running {} solver(s)", work_items.len());

    let expected_keys = work_items.iter().flat_map(|w| {
        w.parts.clone().map(move |part| ResultKey {
            year: w.year,
            day: w.day,
            part,
        })
    });
    let mut aggregator = ResultAggregator::new(expected_keys);

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let mut results = Vec::new();
    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    for key in aggregator.outstanding() {
        log::warn!("No result received for {}/{:02} part {}", key.year, key.day, key.part);
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
        .inspect_err(|e| log::error!("executor failed: {e}"))?;

    formatter.print_summary(&results);
    Ok(())
}

/// Build registry from the linked plugins, keeping solvers that carry every tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
