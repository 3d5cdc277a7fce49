//! Monte Carlo transport of single particles through bounded materials.
//!
//! A particle performs a biased random walk: every step it is displaced by
//! an exponentially distributed, isotropic thermal step plus its velocity,
//! then its velocity is updated by elastic scattering or drag (and, for
//! charged particles, continuous energy loss). After each step inside the
//! material an absorption test decides whether the walk ends there.
//!
//! Composite slabs of two materials are crossed with Woodcock delta
//! tracking (see [`composite`]).
//!
//! All randomness comes from a caller-owned [`rand_chacha::ChaChaRng`].

pub mod composite;
pub mod error;
pub mod kinematics;
pub mod material;
pub mod particle;
pub mod sampling;
pub mod trial;

#[cfg(test)]
mod composite_test;
#[cfg(test)]
mod trial_test;

pub use composite::{CollisionRegion, CompositeSlab, RegionMembership};
pub use error::{MaterialError, ParticleError, Result, TransportError};
pub use material::{FiniteSlab, Material, MaterialParams, Slab, Sphere};
pub use particle::{ChargedState, Particle, ParticleKind};
pub use trial::{classify_exit, reachable_outcomes, run_trial, Outcome, TrialRecord};
