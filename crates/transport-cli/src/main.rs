//! Runs ensembles of particle transport trials described by a JSON file
//! and prints the outcome fractions for each requested scale.

mod args;


use std::process::ExitCode;

use ensemble::{run_ensemble, write_trajectories, EnsembleError, EnsembleSummary};
use log::info;
use thiserror::Error;
use transport_config::{load_config, ConfigError, SimulationConfig};

use crate::args::{Args, Command, USAGE};

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ensemble(#[from] EnsembleError),
}

/// Trajectory directory name for one scale of a run
fn scale_run_name(config: &SimulationConfig, scale: f64, sweep: bool) -> String {
    if sweep {
        format!("{}_{}", config.run.run_name, scale)
    } else {
        config.run.run_name.clone()
    }
}

fn run_scale(
    config: &SimulationConfig,
    args: &Args,
    seed: u64,
    scale: f64,
) -> Result<EnsembleSummary, RunError> {
    let material = config.build_material(scale)?;
    let particle = config.build_particle()?;

    let mut settings = config.run.ensemble_settings(seed);
    if let Some(batches) = args.batches {
        settings = settings.with_batches(batches);
    }
    settings = settings.with_history(settings.save_history || args.save_hist);

    let report = run_ensemble(&material, &particle, &settings)?;

    if settings.save_history {
        let output_dir = args.output_dir.as_ref().unwrap_or(&config.run.output_dir);
        let run_name = scale_run_name(config, scale, args.scales.len() > 1);
        write_trajectories(output_dir, &run_name, &report.histories)?;
    }
    Ok(report.summary)
}

fn run(args: &Args) -> Result<(), RunError> {
    let config = load_config(&args.config)?;

    let seed = match args.seed.or(config.run.seed) {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            info!("no seed configured, using {seed}");
            seed
        }
    };

    for &scale in &args.scales {
        let summary = run_scale(&config, args, seed, scale)?;
        if args.scales.len() > 1 {
            println!("{scale} {summary}");
        } else {
            println!("{summary}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match args::parse(std::env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::Config(ConfigError::Invalid(errors))) => {
            for message in errors.messages() {
                eprintln!("Error: {message}");
            }
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(1)
        }
    }
}
