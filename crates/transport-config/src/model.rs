//! Typed configuration document.

use std::path::PathBuf;

use ensemble::{EnsembleSettings, DEFAULT_BATCHES};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    pub run: RunConfig,
    pub geometry: GeometryConfig,
    pub material: MaterialConfig,
    pub particle: ParticleConfig,
}

fn default_batches() -> usize {
    DEFAULT_BATCHES
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    /// Trials per batch
    pub simulations: usize,
    pub run_name: String,
    #[serde(default)]
    pub save_hist: bool,
    #[serde(default = "default_batches")]
    pub batches: usize,
    /// Drawn at random when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl RunConfig {
    pub fn ensemble_settings(&self, seed: u64) -> EnsembleSettings {
        EnsembleSettings::new(self.simulations, seed)
            .with_batches(self.batches)
            .with_history(self.save_hist)
    }
}

/// Geometry section, tagged by `shape`
///
/// The characteristic dimension (slab length, sphere radius, finite slab
/// depth, composite split ratio) is not part of the document; it is the
/// scale given on the command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum GeometryConfig {
    RegularSlab {
        x_init: f64,
    },
    Sphere {
        #[serde(default)]
        center: Option<[f64; 3]>,
    },
    FiniteSlab {
        x_length: f64,
        y_length: f64,
    },
    DoubleSlab {
        total_length: f64,
        x_init: f64,
    },
}

impl GeometryConfig {
    pub fn shape(&self) -> &'static str {
        match self {
            GeometryConfig::RegularSlab { .. } => "regular_slab",
            GeometryConfig::Sphere { .. } => "sphere",
            GeometryConfig::FiniteSlab { .. } => "finite_slab",
            GeometryConfig::DoubleSlab { .. } => "double_slab",
        }
    }
}

/// Material section. Which fields are required depends on the shape and
/// the particle type; the structural check enforces that.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MaterialConfig {
    pub mean_free_path: Option<f64>,
    pub pabs: Option<f64>,
    pub k: Option<f64>,
    #[serde(rename = "A")]
    pub atomic_mass: Option<f64>,
    pub absorption_power: Option<f64>,

    #[serde(alias = "mean_free_path1")]
    pub mean_free_path_1: Option<f64>,
    #[serde(alias = "pabs1")]
    pub pabs_1: Option<f64>,
    pub k1: Option<f64>,
    #[serde(rename = "A1")]
    pub atomic_mass_1: Option<f64>,
    pub absorption_power1: Option<f64>,

    #[serde(alias = "mean_free_path2")]
    pub mean_free_path_2: Option<f64>,
    #[serde(alias = "pabs2")]
    pub pabs_2: Option<f64>,
    pub k2: Option<f64>,
    #[serde(rename = "A2")]
    pub atomic_mass_2: Option<f64>,
    pub absorption_power2: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleType {
    Neutral,
    Charged,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParticleConfig {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    #[serde(rename = "type")]
    pub kind: ParticleType,
    #[serde(default)]
    pub charge: Option<f64>,
    #[serde(default)]
    pub mass: Option<f64>,
}
