//! Random step-length and direction sampling.
//!
//! Every routine draws from the caller's generator. A trial owns one
//! `ChaChaRng` for its whole trajectory and threads it through here.

use std::f64::consts::PI;

use nalgebra::Vector3;
use rand::Rng;
use rand_chacha::ChaChaRng;

/// Draw a uniform sample from the half-open interval (0, 1]
///
/// `Rng::random` yields [0, 1); flipping it keeps `ln(u)` finite.
pub fn sample_open_unit(rng: &mut ChaChaRng) -> f64 {
    1.0 - rng.random::<f64>()
}

/// Sample a step length from an exponential distribution with mean `lambda`
///
/// Inverse-transform sampling: s = -λ ln(U), U ~ Uniform(0, 1].
///
/// # Arguments
/// * `rng` - Random number generator
/// * `lambda` - Mean free path (scale of the distribution)
///
/// # Returns
/// A non-negative step length
pub fn sample_step_length(rng: &mut ChaChaRng, lambda: f64) -> f64 {
    -lambda * sample_open_unit(rng).ln()
}

/// Sample isotropic spherical angles
///
/// Returns `(phi, theta)` with φ = 2πU₁ uniform on [0, 2π) and
/// θ = acos(2U₂ - 1), so that cos θ is uniform on [-1, 1].
pub fn sample_spherical_angles(rng: &mut ChaChaRng) -> (f64, f64) {
    let u1: f64 = rng.random();
    let u2: f64 = rng.random();
    let phi = 2.0 * PI * u1;
    let theta = (2.0 * u2 - 1.0).clamp(-1.0, 1.0).acos();
    (phi, theta)
}

/// Unit vector for the spherical angles `(phi, theta)`
pub fn unit_vector(phi: f64, theta: f64) -> Vector3<f64> {
    let sin_theta = theta.sin();
    Vector3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), theta.cos())
}

/// Sample an isotropic direction on the unit sphere
pub fn sample_direction(rng: &mut ChaChaRng) -> Vector3<f64> {
    let (phi, theta) = sample_spherical_angles(rng);
    unit_vector(phi, theta)
}

/// Sample the thermal (diffusive) displacement for one step
///
/// Combines an exponential step length with an isotropic direction.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
/// use transport::sampling::sample_displacement;
///
/// let mut rng = ChaChaRng::seed_from_u64(42);
/// let step = sample_displacement(&mut rng, 2.0);
/// assert!(step.magnitude().is_finite());
/// ```
pub fn sample_displacement(rng: &mut ChaChaRng, lambda: f64) -> Vector3<f64> {
    let length = sample_step_length(rng, lambda);
    sample_direction(rng) * length
}

/// Bernoulli trial with success probability `p`
pub fn sample_bernoulli(rng: &mut ChaChaRng, p: f64) -> bool {
    rng.random::<f64>() < p
}
