use nalgebra::{Point3, Vector3};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::composite::CompositeSlab;
use crate::error::TransportError;
use crate::material::{FiniteSlab, Material, MaterialParams, Slab, Sphere};
use crate::particle::Particle;
use crate::trial::{classify_exit, reachable_outcomes, run_trial, Outcome};

fn count(outcomes: &[Outcome], outcome: Outcome) -> f64 {
    outcomes.iter().filter(|o| **o == outcome).count() as f64 / outcomes.len() as f64
}

#[test]
fn particle_outside_material_is_fatal() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let slab = Material::from(Slab::new(MaterialParams::new(1.0, 0.1, 0.0), 0.0, 10.0).unwrap());
    let particle = Particle::neutral(Point3::new(-1.0, 0.0, 0.0), Vector3::zeros()).unwrap();

    let err = run_trial(&slab, particle, &mut rng).unwrap_err();
    assert_eq!(
        err,
        TransportError::OutsideBounds {
            position: Point3::new(-1.0, 0.0, 0.0)
        }
    );
}

#[test]
fn slab_exits_are_classified_by_side() {
    let slab = Material::from(Slab::new(MaterialParams::new(1.0, 0.0, 0.0), 2.0, 10.0).unwrap());

    assert_eq!(classify_exit(&slab, &Point3::new(1.9, 0.0, 0.0)), Outcome::Reflected);
    assert_eq!(classify_exit(&slab, &Point3::new(12.1, 5.0, 0.0)), Outcome::Transmitted);

    let params = MaterialParams::new(1.0, 0.0, 0.0);
    let sphere = Material::from(Sphere::new(params, Point3::origin(), 1.0).unwrap());
    assert_eq!(classify_exit(&sphere, &Point3::new(-2.0, 0.0, 0.0)), Outcome::Escaped);
}

#[test]
fn certain_absorption_ends_on_first_check() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let params = MaterialParams::new(1.0, 1.0, 0.0);
    let sphere = Material::from(Sphere::new(params, Point3::origin(), 5.0).unwrap());

    let n = 2000;
    let mut absorbed = 0;
    for _ in 0..n {
        let particle = Particle::neutral(Point3::origin(), Vector3::zeros()).unwrap();
        let record = run_trial(&sphere, particle, &mut rng).unwrap();
        match record.outcome {
            Outcome::Absorbed => {
                absorbed += 1;
                assert_eq!(record.steps, 1);
                assert_eq!(record.history.len(), 2);
            }
            // A first step longer than the radius has probability e^-5
            Outcome::Escaped => assert_eq!(record.steps, 1),
            other => panic!("sphere produced {}", other),
        }
    }

    let fraction = absorbed as f64 / n as f64;
    assert!(fraction > 0.98, "Absorbed fraction {} should be ~1", fraction);
}

#[test]
fn long_transparent_slab_transmits() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let params = MaterialParams::new(1.0, 0.0, 0.0);
    let slab = Material::from(Slab::new(params, 0.0, 1000.0).unwrap());

    let outcomes: Vec<Outcome> = (0..500)
        .map(|_| {
            let particle =
                Particle::neutral(Point3::origin(), Vector3::new(0.5, 0.0, 0.0)).unwrap();
            run_trial(&slab, particle, &mut rng).unwrap().outcome
        })
        .collect();

    assert_eq!(count(&outcomes, Outcome::Absorbed), 0.0);
    assert_eq!(count(&outcomes, Outcome::Escaped), 0.0);
    let transmitted = count(&outcomes, Outcome::Transmitted);
    assert!(transmitted > 0.5, "Transmitted fraction {}", transmitted);
    assert!(transmitted > count(&outcomes, Outcome::Reflected));
}

#[test]
fn slab_outcomes_agree_with_exit_position() {
    let mut rng = ChaChaRng::seed_from_u64(3);
    let slab = Material::from(Slab::new(MaterialParams::new(1.0, 0.05, 0.1), 0.0, 10.0).unwrap());

    for _ in 0..500 {
        let particle = Particle::neutral(Point3::new(5.0, 0.0, 0.0), Vector3::zeros()).unwrap();
        let record = run_trial(&slab, particle, &mut rng).unwrap();
        let last = record.history.last().unwrap();
        match record.outcome {
            Outcome::Reflected => assert!(last.x < 0.0),
            Outcome::Transmitted => assert!(last.x > 10.0),
            Outcome::Absorbed => assert!((0.0..=10.0).contains(&last.x)),
            Outcome::Escaped => panic!("a slab never reports escaped"),
        }
        assert_eq!(record.history.len(), record.steps + 1);
    }
}

#[test]
fn enclosing_geometries_report_escape() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let params = MaterialParams::new(1.0, 0.0, 0.0);
    let finite = Material::from(FiniteSlab::new(params, 4.0, 4.0, 4.0).unwrap());

    for _ in 0..200 {
        let particle = Particle::neutral(Point3::new(0.0, 0.0, 2.0), Vector3::zeros()).unwrap();
        assert_eq!(run_trial(&finite, particle, &mut rng).unwrap().outcome, Outcome::Escaped);
    }
}

#[test]
fn stopped_charged_particle_counts_as_absorbed() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let params = MaterialParams::new(1.0, 0.0, 0.0).with_stopping_power(1.0e6);
    let slab = Material::from(Slab::new(params, 0.0, 0.01).unwrap());

    for _ in 0..100 {
        let particle =
            Particle::charged(Point3::origin(), Vector3::new(1.0, 0.0, 0.0), 1.0, 1.0).unwrap();
        let record = run_trial(&slab, particle, &mut rng).unwrap();
        assert_eq!(record.outcome, Outcome::Absorbed);
    }
}

#[test]
fn identical_composite_matches_regular_slab() {
    let params = MaterialParams::new(2.0, 0.1, 0.05);
    let regular = Material::from(Slab::new(params, 0.0, 50.0).unwrap());
    let composite = Material::from(CompositeSlab::new(params, params, 0.0, 50.0, 0.5).unwrap());

    let run = |material: &Material, seed: u64| -> Vec<Outcome> {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        (0..4000)
            .map(|_| {
                let particle =
                    Particle::neutral(Point3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0))
                        .unwrap();
                run_trial(material, particle, &mut rng).unwrap().outcome
            })
            .collect()
    };

    let a = run(&regular, 1);
    let b = run(&composite, 2);

    // Standard error of a difference of two fractions near 0.5 with n = 4000 is ~0.011
    for outcome in [Outcome::Absorbed, Outcome::Reflected, Outcome::Transmitted] {
        let diff = (count(&a, outcome) - count(&b, outcome)).abs();
        assert!(diff < 0.045, "{} differs by {}", outcome, diff);
    }
}

#[test]
fn reachable_outcomes_follow_geometry() {
    let params = MaterialParams::new(1.0, 0.1, 0.0);
    let slab = Material::from(Slab::new(params, 0.0, 10.0).unwrap());
    let composite = Material::from(CompositeSlab::new(params, params, 0.0, 10.0, 0.5).unwrap());
    let sphere = Material::from(Sphere::new(params, Point3::origin(), 1.0).unwrap());
    let finite = Material::from(FiniteSlab::new(params, 1.0, 1.0, 1.0).unwrap());

    let slab_like = [Outcome::Absorbed, Outcome::Reflected, Outcome::Transmitted];
    assert_eq!(reachable_outcomes(&slab), slab_like);
    assert_eq!(reachable_outcomes(&composite), slab_like);
    assert_eq!(reachable_outcomes(&sphere), [Outcome::Absorbed, Outcome::Escaped]);
    assert_eq!(reachable_outcomes(&finite), [Outcome::Absorbed, Outcome::Escaped]);
}
