//! Ensembles of independent transport trials.
//!
//! [`run_ensemble`] runs batches of trials in parallel, tallies outcome
//! fractions per batch and summarises them as a mean and population
//! standard deviation across batches. Optionally the first trajectory of
//! each outcome is kept and can be written out with [`write_trajectories`].

pub mod driver;
pub mod error;
pub mod output;
pub mod statistics;

#[cfg(test)]
mod output_test;
#[cfg(test)]
mod statistics_test;

pub use driver::{
    run_ensemble, trial_rng, CapturedHistories, EnsembleReport, EnsembleSettings, DEFAULT_BATCHES,
};
pub use error::{EnsembleError, Result};
pub use output::{history_dir, write_history, write_trajectories};
pub use statistics::{BatchFractions, EnsembleSummary, OutcomeCounts, Statistic};
