//! One trial: a single particle from creation to its terminal outcome.

use std::fmt;

use nalgebra::Point3;
use rand_chacha::ChaChaRng;

use crate::error::{Result, TransportError};
use crate::material::Material;
use crate::particle::Particle;

/// Terminal state of a trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Captured by the medium
    Absorbed,
    /// Left a slab back through its entry face (x below the entry boundary)
    Reflected,
    /// Left a slab through its far face
    Transmitted,
    /// Left an enclosing geometry (sphere, finite box), which has no entry side
    Escaped,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [
        Outcome::Absorbed,
        Outcome::Reflected,
        Outcome::Transmitted,
        Outcome::Escaped,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Absorbed => "absorbed",
            Outcome::Reflected => "reflected",
            Outcome::Transmitted => "transmitted",
            Outcome::Escaped => "escaped",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Result of one trial
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord {
    pub outcome: Outcome,
    /// Number of propagation steps taken
    pub steps: usize,
    /// Positions visited, starting with the initial one
    pub history: Vec<Point3<f64>>,
}

/// Classify an unabsorbed particle that has left `material` at `position`
///
/// Slab-like geometries compare against the entry boundary; enclosing
/// geometries report a single escaped class.
pub fn classify_exit(material: &Material, position: &Point3<f64>) -> Outcome {
    match material.x_bounds() {
        Some((x_init, _)) if position.x < x_init => Outcome::Reflected,
        Some(_) => Outcome::Transmitted,
        None => Outcome::Escaped,
    }
}

/// Outcomes a trial in `material` can end in
///
/// Slab-like geometries never report [`Outcome::Escaped`]; enclosing ones
/// never report [`Outcome::Reflected`] or [`Outcome::Transmitted`].
pub fn reachable_outcomes(material: &Material) -> &'static [Outcome] {
    match material.x_bounds() {
        Some(_) => &[Outcome::Absorbed, Outcome::Reflected, Outcome::Transmitted],
        None => &[Outcome::Absorbed, Outcome::Escaped],
    }
}

/// Run one particle through `material` until it is absorbed or leaves
///
/// The particle must start inside the material; otherwise the trial cannot
/// be classified and [`TransportError::OutsideBounds`] is returned.
///
/// The loop is: propagate, then while still inside test for absorption and
/// either stop (absorbed) or propagate again. A charged particle that ran
/// out of energy is reported as absorbed even if its last step carried it
/// across the boundary.
///
/// # Example
/// ```
/// use nalgebra::{Point3, Vector3};
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
/// use transport::{run_trial, Material, MaterialParams, Outcome, Particle, Sphere};
///
/// let params = MaterialParams::new(1.0, 1.0, 0.0);
/// let sphere = Material::from(Sphere::new(params, Point3::origin(), 5.0).unwrap());
/// let particle = Particle::neutral(Point3::origin(), Vector3::zeros()).unwrap();
/// let mut rng = ChaChaRng::seed_from_u64(42);
///
/// let record = run_trial(&sphere, particle, &mut rng).unwrap();
/// assert!(matches!(record.outcome, Outcome::Absorbed | Outcome::Escaped));
/// ```
pub fn run_trial(
    material: &Material,
    mut particle: Particle,
    rng: &mut ChaChaRng,
) -> Result<TrialRecord> {
    if !material.is_within_bounds(&particle) {
        return Err(TransportError::OutsideBounds {
            position: *particle.position(),
        });
    }

    let mut steps = 0;
    particle.propagate(material, rng);
    steps += 1;

    let outcome = loop {
        if !material.is_within_bounds(&particle) {
            if particle.is_absorbed() {
                break Outcome::Absorbed;
            }
            break classify_exit(material, particle.position());
        }
        if particle.absorption_test(material, rng) {
            break Outcome::Absorbed;
        }
        particle.propagate(material, rng);
        steps += 1;
    };

    Ok(TrialRecord {
        outcome,
        steps,
        history: particle.into_history(),
    })
}
