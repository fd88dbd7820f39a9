/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use randtasks::config::ExperimentConfig;
use randtasks::experiment::Experiment;
use randtasks::harness::SimHarness;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Random task-set generator for schedulability experiments.
///
/// Example:
///   randtasks -n 100 -s 42 --config demos/experiment.yaml
#[derive(Debug, Parser)]
#[command(
    name = "randtasks",
    about = "Generate random real-time task sets and measure their schedulability",
    long_about = None,
)]
struct Cli {
    /// Number of task sets to generate and execute (overrides the config file).
    #[arg(short = 'n', long = "sets")]
    sets: Option<usize>,

    /// Seed for the random source (overrides the config file; omit both for OS entropy).
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Path to the YAML experiment configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialise structured logging.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("randtasks starting up...");

    // ── Parse CLI arguments, overlay onto the configuration ───────────────────
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match ExperimentConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load experiment configuration: {:#}", e);
                process::exit(1);
            }
        },
        None => ExperimentConfig::default(),
    };
    if let Some(sets) = cli.sets {
        config.task_sets = sets;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    info!(
        task_sets = config.task_sets,
        seed = ?config.seed,
        tasks_min = config.tasks_min,
        tasks_max = config.tasks_max,
        total_utilization = config.total_utilization,
        period_min = config.period_min,
        period_max = config.period_max,
        period_distribution = ?config.period_distribution,
        deadline_floor = config.deadline_floor,
        job_iterations = config.job_iterations,
        "Configuration"
    );

    // ── Build the validated pipeline ──────────────────────────────────────────
    let generator = match config.build_generator() {
        Ok(generator) => generator,
        Err(e) => {
            error!("Invalid generation parameters: {}", e);
            process::exit(1);
        }
    };

    // One random source per run; a fixed seed reproduces every draw.
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut harness = SimHarness::new(config.job_iterations);

    // ── Run ───────────────────────────────────────────────────────────────────
    let experiment = Experiment::new(generator, config.task_sets);
    match experiment.run(&mut rng, &mut harness) {
        Ok(stats) => {
            println!("Schedulability: {:.6}", stats.schedulable_fraction);
            println!("Execution Ratio: {:.6}", stats.mean_execution_ratio);
        }
        Err(e) => {
            error!("Experiment failed: {}", e);
            process::exit(1);
        }
    }
}
