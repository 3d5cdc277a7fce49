//! JSON configuration for particle transport runs.
//!
//! A document has four sections: `run` (trial counts and output), `geometry`
//! (shape and placement), `material` (per-region physics) and `particle`
//! (initial state). Loading checks the raw document first and reports every
//! missing or unsupported value together, then deserializes it into
//! [`SimulationConfig`].
//!
//! ```
//! let config = transport_config::parse_config(r#"{
//!     "run": { "simulations": 100, "run_name": "demo" },
//!     "geometry": { "shape": "regular_slab", "x_init": 0.0 },
//!     "material": { "mean_free_path": 2.0, "pabs": 0.1, "k": 0.05 },
//!     "particle": { "x": 0.0, "y": 0.0, "z": 0.0,
//!                   "vx": 0.5, "vy": 0.0, "vz": 0.0, "type": "neutral" }
//! }"#).unwrap();
//!
//! let slab = config.build_material(50.0).unwrap();
//! assert_eq!(slab.x_bounds(), Some((0.0, 50.0)));
//! ```

mod build;
pub mod error;
pub mod model;
pub mod validate;


use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value;

pub use error::{ConfigError, ValidationErrors};
pub use model::{
    GeometryConfig, MaterialConfig, ParticleConfig, ParticleType, RunConfig, SimulationConfig,
};
pub use validate::validate;

/// Check and deserialize an already parsed document
pub fn from_value(doc: Value) -> Result<SimulationConfig, ConfigError> {
    validate(&doc).into_result()?;
    Ok(serde_json::from_value(doc)?)
}

pub fn parse_config(text: &str) -> Result<SimulationConfig, ConfigError> {
    from_value(serde_json::from_str(text)?)
}

/// Read, check and deserialize the configuration file at `path`
pub fn load_config(path: impl AsRef<Path>) -> Result<SimulationConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text)?;
    debug!(
        "loaded {} configuration '{}' from {}",
        config.geometry.shape(),
        config.run.run_name,
        path.display()
    );
    Ok(config)
}
