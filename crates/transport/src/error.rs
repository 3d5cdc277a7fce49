//! Error types for the transport engine.

use nalgebra::Point3;
use thiserror::Error;

/// A material parameter violated its construction invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaterialError {
    #[error("mean free path must be positive and finite, got {0}")]
    MeanFreePath(f64),

    #[error("absorption probability must lie in [0, 1], got {0}")]
    AbsorptionProbability(f64),

    #[error("drag coefficient must lie in [0, 1), got {0}")]
    DragCoefficient(f64),

    #[error("stopping power must be non-negative and finite, got {0}")]
    StoppingPower(f64),

    #[error("{name} must be positive and finite, got {value}")]
    Extent { name: &'static str, value: f64 },

    #[error("composite split ratio must lie in (0, 1), got {0}")]
    Ratio(f64),

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

/// A particle could not be created from the given state
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParticleError {
    #[error("charged particle mass must be positive and finite, got {0}")]
    Mass(f64),

    #[error("particle {name} must be finite")]
    NonFinite { name: &'static str },
}

/// Fatal conditions raised while running a trial
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error(
        "particle starts outside the material at ({}, {}, {})",
        position.x, position.y, position.z
    )]
    OutsideBounds { position: Point3<f64> },

    #[error("invalid material: {0}")]
    Material(#[from] MaterialError),

    #[error("invalid particle: {0}")]
    Particle(#[from] ParticleError),
}

pub type Result<T> = std::result::Result<T, TransportError>;
