//! Turning a checked configuration into engine values.

use log::warn;
use nalgebra::{Point3, Vector3};
use transport::{CompositeSlab, FiniteSlab, Material, MaterialParams, Particle, Slab, Sphere};

use crate::error::ConfigError;
use crate::model::{GeometryConfig, MaterialConfig, ParticleConfig, ParticleType, SimulationConfig};

fn required(value: Option<f64>, path: &str) -> Result<f64, ConfigError> {
    value.ok_or_else(|| ConfigError::missing(path))
}

/// Values of one homogeneous region, each paired with its document path
struct RegionFields {
    label: &'static str,
    mean_free_path: (Option<f64>, &'static str),
    pabs: (Option<f64>, &'static str),
    k: (Option<f64>, &'static str),
    atomic_mass: Option<f64>,
    stopping_power: (Option<f64>, &'static str),
}

impl RegionFields {
    fn params(&self, charged: bool) -> Result<MaterialParams, ConfigError> {
        let mut params = MaterialParams::new(
            required(self.mean_free_path.0, self.mean_free_path.1)?,
            required(self.pabs.0, self.pabs.1)?,
            required(self.k.0, self.k.1)?,
        );
        if let Some(a) = self.atomic_mass {
            params = params.with_atomic_mass(a);
        }
        if charged {
            let (stopping_power, path) = self.stopping_power;
            params = params.with_stopping_power(required(stopping_power, path)?);
        }
        if params.absorption_probability == 0.0
            && params.drag_coefficient == 0.0
            && !(charged && params.stopping_power_or_zero() > 0.0)
        {
            warn!(
                "{} has neither absorption nor drag; trials end only when particles leave",
                self.label
            );
        }
        Ok(params)
    }
}

impl MaterialConfig {
    fn single(&self) -> RegionFields {
        RegionFields {
            label: "material",
            mean_free_path: (self.mean_free_path, "material.mean_free_path"),
            pabs: (self.pabs, "material.pabs"),
            k: (self.k, "material.k"),
            atomic_mass: self.atomic_mass,
            stopping_power: (self.absorption_power, "material.absorption_power"),
        }
    }

    fn first(&self) -> RegionFields {
        RegionFields {
            label: "material region 1",
            mean_free_path: (self.mean_free_path_1, "material.mean_free_path_1"),
            pabs: (self.pabs_1, "material.pabs_1"),
            k: (self.k1, "material.k1"),
            atomic_mass: self.atomic_mass_1,
            stopping_power: (self.absorption_power1, "material.absorption_power1"),
        }
    }

    fn second(&self) -> RegionFields {
        RegionFields {
            label: "material region 2",
            mean_free_path: (self.mean_free_path_2, "material.mean_free_path_2"),
            pabs: (self.pabs_2, "material.pabs_2"),
            k: (self.k2, "material.k2"),
            atomic_mass: self.atomic_mass_2,
            stopping_power: (self.absorption_power2, "material.absorption_power2"),
        }
    }
}

impl ParticleConfig {
    pub fn is_charged(&self) -> bool {
        self.kind == ParticleType::Charged
    }

    /// Build the particle every trial starts from
    pub fn build(&self) -> Result<Particle, ConfigError> {
        let position = Point3::new(self.x, self.y, self.z);
        let velocity = Vector3::new(self.vx, self.vy, self.vz);
        let particle = match self.kind {
            ParticleType::Neutral => Particle::neutral(position, velocity)?,
            ParticleType::Charged => Particle::charged(
                position,
                velocity,
                required(self.charge, "particle.charge")?,
                required(self.mass, "particle.mass")?,
            )?,
        };
        Ok(particle)
    }
}

impl SimulationConfig {
    /// Build the material with its characteristic dimension set to `scale`:
    /// slab length, sphere radius, finite slab depth along z, or the split
    /// ratio of a composite slab.
    pub fn build_material(&self, scale: f64) -> Result<Material, ConfigError> {
        let charged = self.particle.is_charged();
        let material: Material = match &self.geometry {
            GeometryConfig::RegularSlab { x_init } => {
                let params = self.material.single().params(charged)?;
                Slab::new(params, *x_init, scale)?.into()
            }
            GeometryConfig::Sphere { center } => {
                let params = self.material.single().params(charged)?;
                let center = center.map_or_else(Point3::origin, |[x, y, z]| Point3::new(x, y, z));
                Sphere::new(params, center, scale)?.into()
            }
            GeometryConfig::FiniteSlab { x_length, y_length } => {
                let params = self.material.single().params(charged)?;
                FiniteSlab::new(params, *x_length, *y_length, scale)?.into()
            }
            GeometryConfig::DoubleSlab {
                total_length,
                x_init,
            } => {
                let first = self.material.first().params(charged)?;
                let second = self.material.second().params(charged)?;
                CompositeSlab::new(first, second, *x_init, *total_length, scale)?.into()
            }
        };
        Ok(material)
    }

    pub fn build_particle(&self) -> Result<Particle, ConfigError> {
        self.particle.build()
    }
}
