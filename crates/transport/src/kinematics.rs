//! Per-step velocity updates: elastic scattering, drag and energy loss.
//!
//! These act on plain vectors so they can be checked in isolation; the
//! particle decides which of them apply in a given step.

use nalgebra::Vector3;
use rand_chacha::ChaChaRng;

use crate::sampling::sample_direction;

/// Velocity of the centre of mass for a unit-mass projectile hitting a
/// stationary nucleus of mass `atomic_mass`.
pub fn centre_of_mass_velocity(velocity: &Vector3<f64>, atomic_mass: f64) -> Vector3<f64> {
    velocity / (1.0 + atomic_mass)
}

/// Elastic two-body scattering off a stationary nucleus
///
/// In the centre-of-mass frame the projectile keeps its speed and leaves
/// in an isotropic direction. Transforming back gives the lab velocity,
/// which is in general slower than the incoming one.
///
/// # Arguments
/// * `velocity` - Incoming lab-frame velocity of the projectile (mass 1)
/// * `atomic_mass` - Target mass A > 0 in projectile masses
/// * `rng` - Random number generator
///
/// # Returns
/// Outgoing lab-frame velocity
pub fn elastic_scatter(
    velocity: &Vector3<f64>,
    atomic_mass: f64,
    rng: &mut ChaChaRng,
) -> Vector3<f64> {
    let v_cm = centre_of_mass_velocity(velocity, atomic_mass);
    let relative_speed = (velocity - v_cm).magnitude();
    sample_direction(rng) * relative_speed + v_cm
}

/// Linear drag: every component is damped by the factor (1 - k)
pub fn apply_drag(velocity: &Vector3<f64>, drag_coefficient: f64) -> Vector3<f64> {
    velocity * (1.0 - drag_coefficient)
}

/// Remove `energy_loss` from the kinetic energy ½ m |v|²
///
/// Returns the rescaled velocity (same direction), or `None` when the
/// remaining kinetic energy is zero or negative and the particle stops.
pub fn slow_down(velocity: &Vector3<f64>, mass: f64, energy_loss: f64) -> Option<Vector3<f64>> {
    let speed = velocity.magnitude();
    let kinetic_energy = 0.5 * mass * speed * speed - energy_loss;
    if kinetic_energy <= 0.0 {
        return None;
    }
    let new_speed = (2.0 * kinetic_energy / mass).sqrt();
    Some(velocity * (new_speed / speed))
}
