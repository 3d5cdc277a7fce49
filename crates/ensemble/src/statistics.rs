//! Outcome tallies and batch statistics.

use std::fmt;

use transport::Outcome;

/// Mean and (population) standard deviation of a set of samples
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistic {
    pub mean: f64,
    pub std_dev: f64,
}

impl Statistic {
    /// Summarise `samples`, dividing the variance by the number of samples
    ///
    /// An empty slice yields zero mean and zero spread.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Number of trials ending in each outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeCounts {
    pub absorbed: usize,
    pub reflected: usize,
    pub transmitted: usize,
    pub escaped: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Absorbed => self.absorbed += 1,
            Outcome::Reflected => self.reflected += 1,
            Outcome::Transmitted => self.transmitted += 1,
            Outcome::Escaped => self.escaped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.absorbed + self.reflected + self.transmitted + self.escaped
    }

    /// Fractions of the total. Escapes from enclosing geometries are
    /// reported in the transmitted column.
    pub fn fractions(&self) -> BatchFractions {
        let total = self.total();
        if total == 0 {
            return BatchFractions::default();
        }
        let n = total as f64;
        BatchFractions {
            absorbed: self.absorbed as f64 / n,
            reflected: self.reflected as f64 / n,
            transmitted: (self.transmitted + self.escaped) as f64 / n,
        }
    }
}

impl FromIterator<Outcome> for OutcomeCounts {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut counts = Self::default();
        for outcome in iter {
            counts.record(outcome);
        }
        counts
    }
}

/// Outcome fractions of a single batch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchFractions {
    pub absorbed: f64,
    pub reflected: f64,
    pub transmitted: f64,
}

/// Mean and spread of each outcome fraction across batches
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnsembleSummary {
    pub absorbed: Statistic,
    pub reflected: Statistic,
    pub transmitted: Statistic,
}

impl EnsembleSummary {
    pub fn from_batches(batches: &[BatchFractions]) -> Self {
        let column =
            |f: fn(&BatchFractions) -> f64| -> Vec<f64> { batches.iter().map(f).collect() };
        Self {
            absorbed: Statistic::from_samples(&column(|b| b.absorbed)),
            reflected: Statistic::from_samples(&column(|b| b.reflected)),
            transmitted: Statistic::from_samples(&column(|b| b.transmitted)),
        }
    }
}

/// Six space-separated numbers: mean and standard deviation of the
/// absorbed, reflected and transmitted fractions.
impl fmt::Display for EnsembleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.absorbed.mean,
            self.absorbed.std_dev,
            self.reflected.mean,
            self.reflected.std_dev,
            self.transmitted.mean,
            self.transmitted.std_dev
        )
    }
}
