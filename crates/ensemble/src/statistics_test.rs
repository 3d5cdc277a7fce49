use approx::assert_relative_eq;
use transport::Outcome;

use crate::statistics::{BatchFractions, EnsembleSummary, OutcomeCounts, Statistic};

#[test]
fn population_standard_deviation() {
    let stat = Statistic::from_samples(&[0.2, 0.4]);
    assert_relative_eq!(stat.mean, 0.3, epsilon = 1e-12);
    assert_relative_eq!(stat.std_dev, 0.1, epsilon = 1e-12);

    let stat = Statistic::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert_relative_eq!(stat.mean, 5.0, epsilon = 1e-12);
    assert_relative_eq!(stat.std_dev, 2.0, epsilon = 1e-12);
}

#[test]
fn single_batch_has_no_spread() {
    let stat = Statistic::from_samples(&[0.42]);
    assert_relative_eq!(stat.mean, 0.42);
    assert_eq!(stat.std_dev, 0.0);
    assert_eq!(Statistic::from_samples(&[]), Statistic::default());
}

#[test]
fn counts_collect_from_outcomes() {
    let counts: OutcomeCounts = [
        Outcome::Absorbed,
        Outcome::Reflected,
        Outcome::Absorbed,
        Outcome::Transmitted,
    ]
    .into_iter()
    .collect();

    assert_eq!(counts.absorbed, 2);
    assert_eq!(counts.reflected, 1);
    assert_eq!(counts.transmitted, 1);
    assert_eq!(counts.escaped, 0);
    assert_eq!(counts.total(), 4);
}

#[test]
fn escapes_are_reported_as_transmitted() {
    let counts = OutcomeCounts {
        absorbed: 6,
        reflected: 0,
        transmitted: 1,
        escaped: 3,
    };
    let fractions = counts.fractions();
    assert_relative_eq!(fractions.absorbed, 0.6);
    assert_eq!(fractions.reflected, 0.0);
    assert_relative_eq!(fractions.transmitted, 0.4);
}

#[test]
fn empty_counts_give_zero_fractions() {
    assert_eq!(OutcomeCounts::default().fractions(), BatchFractions::default());
}

#[test]
fn summary_prints_six_columns() {
    let batches = [
        BatchFractions {
            absorbed: 0.5,
            reflected: 0.25,
            transmitted: 0.25,
        },
        BatchFractions {
            absorbed: 0.5,
            reflected: 0.5,
            transmitted: 0.0,
        },
    ];
    let summary = EnsembleSummary::from_batches(&batches);

    assert_relative_eq!(summary.reflected.mean, 0.375);
    assert_relative_eq!(summary.reflected.std_dev, 0.125);
    assert_eq!(summary.to_string(), "0.5 0 0.375 0.125 0.125 0.125");
}
