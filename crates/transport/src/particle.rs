//! Particles: kinematic state, trajectory history and per-step behaviour.
//!
//! A particle is either neutral or charged. Both share the displacement,
//! scattering and drag rules; a charged particle additionally loses energy
//! continuously and latches into an absorbed state once it has none left.

use nalgebra::{Point3, Vector3};
use rand_chacha::ChaChaRng;

use crate::error::ParticleError;
use crate::kinematics::{apply_drag, elastic_scatter, slow_down};
use crate::material::{Material, MaterialParams};
use crate::sampling::{sample_bernoulli, sample_direction, sample_displacement};

/// Charge, mass and the absorption latch of a charged particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargedState {
    pub charge: f64,
    pub mass: f64,
    absorbed: bool,
}

impl ChargedState {
    pub fn is_absorbed(&self) -> bool {
        self.absorbed
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    Neutral,
    Charged(ChargedState),
}

/// A particle random-walking through a material
///
/// `history` starts with the initial position and gains exactly one entry
/// per completed step. It is never shortened.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    kind: ParticleKind,
    position: Point3<f64>,
    velocity: Vector3<f64>,
    history: Vec<Point3<f64>>,
}

fn check_state(position: &Point3<f64>, velocity: &Vector3<f64>) -> Result<(), ParticleError> {
    if position.iter().any(|c| !c.is_finite()) {
        return Err(ParticleError::NonFinite { name: "position" });
    }
    if velocity.iter().any(|c| !c.is_finite()) {
        return Err(ParticleError::NonFinite { name: "velocity" });
    }
    Ok(())
}

impl Particle {
    /// Creates a neutral particle (e.g. a neutron)
    ///
    /// # Example
    /// ```
    /// use nalgebra::{Point3, Vector3};
    /// use transport::Particle;
    ///
    /// let neutron = Particle::neutral(Point3::origin(), Vector3::new(0.5, 0.0, 0.0)).unwrap();
    /// assert_eq!(neutron.history().len(), 1);
    /// assert!(!neutron.is_absorbed());
    /// ```
    pub fn neutral(position: Point3<f64>, velocity: Vector3<f64>) -> Result<Self, ParticleError> {
        check_state(&position, &velocity)?;
        Ok(Self::with_kind(ParticleKind::Neutral, position, velocity))
    }

    /// Creates a charged particle with the given charge and (positive) mass
    pub fn charged(
        position: Point3<f64>,
        velocity: Vector3<f64>,
        charge: f64,
        mass: f64,
    ) -> Result<Self, ParticleError> {
        check_state(&position, &velocity)?;
        if !charge.is_finite() {
            return Err(ParticleError::NonFinite { name: "charge" });
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(ParticleError::Mass(mass));
        }
        let state = ChargedState {
            charge,
            mass,
            absorbed: false,
        };
        Ok(Self::with_kind(ParticleKind::Charged(state), position, velocity))
    }

    fn with_kind(kind: ParticleKind, position: Point3<f64>, velocity: Vector3<f64>) -> Self {
        Self {
            kind,
            position,
            velocity,
            history: vec![position],
        }
    }

    pub fn kind(&self) -> &ParticleKind {
        &self.kind
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    pub fn velocity(&self) -> &Vector3<f64> {
        &self.velocity
    }

    pub fn history(&self) -> &[Point3<f64>] {
        &self.history
    }

    /// Consume the particle, keeping only its trajectory
    pub fn into_history(self) -> Vec<Point3<f64>> {
        self.history
    }

    pub fn is_charged(&self) -> bool {
        matches!(self.kind, ParticleKind::Charged(_))
    }

    /// Whether a charged particle has run out of kinetic energy
    ///
    /// Always false for neutral particles.
    pub fn is_absorbed(&self) -> bool {
        match &self.kind {
            ParticleKind::Charged(state) => state.absorbed,
            ParticleKind::Neutral => false,
        }
    }

    /// Kinetic energy ½ m |v|², with unit mass for neutral particles
    pub fn kinetic_energy(&self) -> f64 {
        let mass = match &self.kind {
            ParticleKind::Charged(state) => state.mass,
            ParticleKind::Neutral => 1.0,
        };
        0.5 * mass * self.velocity.magnitude_squared()
    }

    /// Advance the particle by one step through `material`
    ///
    /// Homogeneous materials take a single collision step. A composite slab
    /// routes the step through delta tracking. An absorbed charged particle
    /// is inert and does not move.
    pub fn propagate(&mut self, material: &Material, rng: &mut ChaChaRng) {
        if self.is_absorbed() {
            return;
        }
        match material {
            Material::Composite(composite) => composite.propagate(self, rng),
            Material::Slab(_) | Material::FiniteSlab(_) | Material::Sphere(_) => {
                let params = *material.params_at(&self.position);
                self.collide(&params, rng);
            }
        }
    }

    /// One real collision step in a homogeneous medium
    ///
    /// Displaces the particle by a thermal step plus its velocity, then
    /// updates the velocity: energy loss for charged particles, followed by
    /// elastic scattering when the medium has an atomic mass, drag otherwise.
    pub(crate) fn collide(&mut self, params: &MaterialParams, rng: &mut ChaChaRng) {
        if self.is_absorbed() {
            return;
        }
        let displacement = sample_displacement(rng, params.mean_free_path);
        self.position += displacement + self.velocity;

        self.apply_energy_loss(params.stopping_power_or_zero(), displacement.magnitude());

        if !self.is_absorbed() {
            self.velocity = match params.atomic_mass {
                Some(a) if params.has_elastic_scattering() => {
                    elastic_scatter(&self.velocity, a, rng)
                }
                _ => apply_drag(&self.velocity, params.drag_coefficient),
            };
        }
        self.history.push(self.position);
    }

    /// Move `distance` along the current direction of flight without any
    /// interaction.
    ///
    /// A particle at rest has no direction, so one is drawn isotropically.
    pub(crate) fn free_flight(&mut self, distance: f64, rng: &mut ChaChaRng) {
        let direction = match self.velocity.try_normalize(0.0) {
            Some(direction) => direction,
            None => sample_direction(rng),
        };
        self.position += direction * distance;
        self.history.push(self.position);
    }

    /// Continuous energy loss over a path of `step_length`
    ///
    /// Loses `stopping_power * step_length` of kinetic energy. When nothing is
    /// left the particle latches as absorbed and stops; later calls are
    /// no-ops. Neutral particles are unaffected.
    pub fn apply_energy_loss(&mut self, stopping_power: f64, step_length: f64) {
        let ParticleKind::Charged(state) = &mut self.kind else {
            return;
        };
        if state.absorbed {
            return;
        }
        match slow_down(&self.velocity, state.mass, stopping_power * step_length) {
            Some(velocity) => self.velocity = velocity,
            None => {
                state.absorbed = true;
                self.velocity = Vector3::zeros();
            }
        }
    }

    /// Absorption test after a step
    ///
    /// A latched charged particle is always absorbed; otherwise this is a
    /// fresh Bernoulli draw against the local absorption probability.
    pub fn absorption_test(&self, material: &Material, rng: &mut ChaChaRng) -> bool {
        if self.is_absorbed() {
            return true;
        }
        sample_bernoulli(rng, material.absorption_probability(self))
    }
}
