//! Batched execution of independent trials.
//!
//! Every trial owns a ChaCha stream derived from the run seed and its
//! global trial index, so results do not depend on how rayon schedules the
//! work or on the number of threads.

use log::{debug, info};
use nalgebra::Point3;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use rayon::prelude::*;
use transport::{reachable_outcomes, run_trial, Material, Outcome, Particle, TransportError};

use crate::error::{EnsembleError, Result};
use crate::statistics::{BatchFractions, EnsembleSummary, OutcomeCounts};

/// Number of batches used when none is configured
pub const DEFAULT_BATCHES: usize = 10;

/// How many trials to run and how to seed them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnsembleSettings {
    /// Trials per batch
    pub simulations: usize,
    pub batches: usize,
    pub seed: u64,
    /// Keep the first trajectory seen for each outcome
    pub save_history: bool,
}

impl EnsembleSettings {
    pub fn new(simulations: usize, seed: u64) -> Self {
        Self {
            simulations,
            batches: DEFAULT_BATCHES,
            seed,
            save_history: false,
        }
    }

    pub fn with_batches(mut self, batches: usize) -> Self {
        self.batches = batches;
        self
    }

    pub fn with_history(mut self, save_history: bool) -> Self {
        self.save_history = save_history;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.simulations == 0 {
            return Err(EnsembleError::Empty("simulation per batch"));
        }
        if self.batches == 0 {
            return Err(EnsembleError::Empty("batch"));
        }
        Ok(())
    }
}

/// First trajectory recorded for each outcome, in trial-index order
///
/// Only outcomes the material can produce are tracked, so capture is
/// complete once each of those has been seen.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedHistories {
    reachable: &'static [Outcome],
    entries: Vec<(Outcome, Vec<Point3<f64>>)>,
}

impl CapturedHistories {
    pub fn for_material(material: &Material) -> Self {
        Self {
            reachable: reachable_outcomes(material),
            entries: Vec::new(),
        }
    }

    /// Whether a trajectory ending in `outcome` would still be kept
    pub fn wants(&self, outcome: Outcome) -> bool {
        self.reachable.contains(&outcome) && self.get(outcome).is_none()
    }

    /// Keep `history` unless `outcome` already has one
    pub fn offer(&mut self, outcome: Outcome, history: Vec<Point3<f64>>) {
        if self.wants(outcome) {
            self.entries.push((outcome, history));
        }
    }

    pub fn is_complete(&self) -> bool {
        self.reachable.iter().all(|outcome| self.get(*outcome).is_some())
    }

    pub fn get(&self, outcome: Outcome) -> Option<&[Point3<f64>]> {
        self.entries
            .iter()
            .find(|(o, _)| *o == outcome)
            .map(|(_, h)| h.as_slice())
    }

    /// Captured trajectories ordered as [`Outcome::ALL`]
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, &[Point3<f64>])> {
        Outcome::ALL
            .into_iter()
            .filter_map(|outcome| self.get(outcome).map(|h| (outcome, h)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything an ensemble run produces
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleReport {
    pub summary: EnsembleSummary,
    pub batches: Vec<BatchFractions>,
    /// Outcome counts over all batches
    pub counts: OutcomeCounts,
    pub total_steps: usize,
    pub histories: CapturedHistories,
}

/// The random stream for one trial
///
/// Streams are indexed by the trial's position across all batches, so two
/// runs with the same seed and settings replay identical trials.
pub fn trial_rng(seed: u64, trial_index: u64) -> ChaChaRng {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    rng.set_stream(trial_index);
    rng
}

/// Run `settings.batches` batches of `settings.simulations` trials, each
/// starting from a fresh copy of `particle`.
///
/// The starting position is checked once before any trial runs; a particle
/// outside the material is a fatal [`TransportError::OutsideBounds`].
pub fn run_ensemble(
    material: &Material,
    particle: &Particle,
    settings: &EnsembleSettings,
) -> Result<EnsembleReport> {
    settings.validate()?;
    if !material.is_within_bounds(particle) {
        return Err(TransportError::OutsideBounds {
            position: *particle.position(),
        }
        .into());
    }

    info!(
        "running {} batches of {} trials in a {} (seed {})",
        settings.batches,
        settings.simulations,
        material.shape_name(),
        settings.seed
    );

    let mut batches = Vec::with_capacity(settings.batches);
    let mut counts = OutcomeCounts::default();
    let mut total_steps = 0;
    let mut histories = CapturedHistories::for_material(material);

    for batch in 0..settings.batches {
        let keep_history = settings.save_history && !histories.is_complete();
        let first_index = (batch * settings.simulations) as u64;

        let results = (0..settings.simulations)
            .into_par_iter()
            .map(|trial| -> std::result::Result<_, TransportError> {
                let mut rng = trial_rng(settings.seed, first_index + trial as u64);
                let record = run_trial(material, particle.clone(), &mut rng)?;
                let history = (keep_history && histories.wants(record.outcome))
                    .then_some(record.history);
                Ok((record.outcome, record.steps, history))
            })
            .collect::<std::result::Result<Vec<_>, TransportError>>()?;

        let batch_counts: OutcomeCounts =
            results.iter().map(|(outcome, _, _)| *outcome).collect();
        for (outcome, steps, history) in results {
            total_steps += steps;
            if let Some(history) = history {
                histories.offer(outcome, history);
            }
        }

        let fractions = batch_counts.fractions();
        debug!(
            "batch {}: absorbed {:.4} reflected {:.4} transmitted {:.4}",
            batch, fractions.absorbed, fractions.reflected, fractions.transmitted
        );

        counts.absorbed += batch_counts.absorbed;
        counts.reflected += batch_counts.reflected;
        counts.transmitted += batch_counts.transmitted;
        counts.escaped += batch_counts.escaped;
        batches.push(fractions);
    }

    let summary = EnsembleSummary::from_batches(&batches);
    info!(
        "{} trials finished after {} steps: {}",
        counts.total(),
        total_steps,
        summary
    );

    Ok(EnsembleReport {
        summary,
        batches,
        counts,
        total_steps,
        histories,
    })
}
