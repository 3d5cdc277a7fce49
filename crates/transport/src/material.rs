//! Materials: physical parameters plus the region of space they fill.
//!
//! A [`Material`] is immutable once built. Every variant validates its
//! parameters in its constructor, so a value of this type always satisfies
//! λ > 0, p_abs ∈ [0, 1], k ∈ [0, 1) and positive geometric extents.
//!
//! Queries take the particle asking, because the answer can depend on where
//! it is (a composite slab answers with the parameters of the region the
//! particle is in).

use nalgebra::Point3;

use crate::composite::CompositeSlab;
use crate::error::MaterialError;
use crate::particle::Particle;

/// Physical parameters of a homogeneous medium
///
/// Optional physics is named rather than encoded with sentinel values:
/// elastic scattering is enabled by `atomic_mass: Some(A)` with A > 0, and
/// `stopping_power` only matters to charged particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    /// Mean free path λ, the scale of the exponential step distribution
    pub mean_free_path: f64,
    /// Per-step absorption probability
    pub absorption_probability: f64,
    /// Fractional velocity damping per step when no elastic scattering occurs
    pub drag_coefficient: f64,
    /// Target nucleus mass in units of the projectile mass
    pub atomic_mass: Option<f64>,
    /// Energy lost per unit path length by a charged particle
    pub stopping_power: Option<f64>,
}

impl MaterialParams {
    /// Parameters for a medium without elastic scattering or stopping power
    pub fn new(mean_free_path: f64, absorption_probability: f64, drag_coefficient: f64) -> Self {
        Self {
            mean_free_path,
            absorption_probability,
            drag_coefficient,
            atomic_mass: None,
            stopping_power: None,
        }
    }

    /// Enable elastic two-body scattering against nuclei of mass `atomic_mass`
    ///
    /// Non-positive values keep scattering disabled.
    pub fn with_atomic_mass(mut self, atomic_mass: f64) -> Self {
        self.atomic_mass = (atomic_mass > 0.0).then_some(atomic_mass);
        self
    }

    pub fn with_stopping_power(mut self, stopping_power: f64) -> Self {
        self.stopping_power = Some(stopping_power);
        self
    }

    /// Whether collisions in this medium scatter elastically instead of dragging
    pub fn has_elastic_scattering(&self) -> bool {
        self.atomic_mass.is_some_and(|a| a > 0.0)
    }

    /// Stopping power, zero when none was configured
    pub fn stopping_power_or_zero(&self) -> f64 {
        self.stopping_power.unwrap_or(0.0)
    }

    /// Check the construction invariants
    pub fn validate(&self) -> Result<(), MaterialError> {
        let lambda = self.mean_free_path;
        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(MaterialError::MeanFreePath(lambda));
        }
        let p_abs = self.absorption_probability;
        if !(0.0..=1.0).contains(&p_abs) {
            return Err(MaterialError::AbsorptionProbability(p_abs));
        }
        let k = self.drag_coefficient;
        if !(0.0..1.0).contains(&k) {
            return Err(MaterialError::DragCoefficient(k));
        }
        if let Some(a) = self.atomic_mass {
            if !a.is_finite() {
                return Err(MaterialError::NonFinite { name: "atomic mass", value: a });
            }
        }
        if let Some(sp) = self.stopping_power {
            if !(sp.is_finite() && sp >= 0.0) {
                return Err(MaterialError::StoppingPower(sp));
            }
        }
        Ok(())
    }
}

pub(crate) fn check_extent(name: &'static str, value: f64) -> Result<f64, MaterialError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MaterialError::Extent { name, value })
    }
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<f64, MaterialError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MaterialError::NonFinite { name, value })
    }
}

/// Semi-infinite slab bounded along x: `x_init ≤ x ≤ x_init + length`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slab {
    params: MaterialParams,
    x_init: f64,
    length: f64,
}

impl Slab {
    pub fn new(params: MaterialParams, x_init: f64, length: f64) -> Result<Self, MaterialError> {
        params.validate()?;
        Ok(Self {
            params,
            x_init: check_finite("slab x_init", x_init)?,
            length: check_extent("slab length", length)?,
        })
    }

    pub fn params(&self) -> &MaterialParams {
        &self.params
    }

    pub fn x_init(&self) -> f64 {
        self.x_init
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Far boundary along x
    pub fn x_end(&self) -> f64 {
        self.x_init + self.length
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.x_init && point.x <= self.x_end()
    }
}

/// Rectangular box centred on the z axis: |x| ≤ x_len/2, |y| ≤ y_len/2, 0 ≤ z ≤ z_len
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteSlab {
    params: MaterialParams,
    x_length: f64,
    y_length: f64,
    z_length: f64,
}

impl FiniteSlab {
    pub fn new(
        params: MaterialParams,
        x_length: f64,
        y_length: f64,
        z_length: f64,
    ) -> Result<Self, MaterialError> {
        params.validate()?;
        Ok(Self {
            params,
            x_length: check_extent("finite slab x_length", x_length)?,
            y_length: check_extent("finite slab y_length", y_length)?,
            z_length: check_extent("finite slab z_length", z_length)?,
        })
    }

    pub fn params(&self) -> &MaterialParams {
        &self.params
    }

    pub fn extents(&self) -> (f64, f64, f64) {
        (self.x_length, self.y_length, self.z_length)
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x.abs() <= self.x_length / 2.0
            && point.y.abs() <= self.y_length / 2.0
            && point.z >= 0.0
            && point.z <= self.z_length
    }
}

/// Ball of material around `center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    params: MaterialParams,
    center: Point3<f64>,
    radius: f64,
}

impl Sphere {
    pub fn new(
        params: MaterialParams,
        center: Point3<f64>,
        radius: f64,
    ) -> Result<Self, MaterialError> {
        params.validate()?;
        for value in center.iter() {
            check_finite("sphere center", *value)?;
        }
        Ok(Self {
            params,
            center,
            radius: check_extent("sphere radius", radius)?,
        })
    }

    pub fn params(&self) -> &MaterialParams {
        &self.params
    }

    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (point - self.center).magnitude() <= self.radius
    }
}

/// A bounded region of material
///
/// The set of geometries is closed; every operation that depends on the
/// geometry matches on this tag exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Slab(Slab),
    FiniteSlab(FiniteSlab),
    Sphere(Sphere),
    Composite(CompositeSlab),
}

impl Material {
    /// Parameters governing a particle at `point`
    ///
    /// Homogeneous variants ignore the position. A composite slab answers
    /// with the region owning the point (see [`CompositeSlab::region_at`]).
    pub fn params_at(&self, point: &Point3<f64>) -> &MaterialParams {
        match self {
            Material::Slab(slab) => slab.params(),
            Material::FiniteSlab(slab) => slab.params(),
            Material::Sphere(sphere) => sphere.params(),
            Material::Composite(composite) => composite.region_at(point).params(),
        }
    }

    pub fn mean_free_path(&self, particle: &Particle) -> f64 {
        self.params_at(particle.position()).mean_free_path
    }

    pub fn absorption_probability(&self, particle: &Particle) -> f64 {
        self.params_at(particle.position()).absorption_probability
    }

    pub fn drag_coefficient(&self, particle: &Particle) -> f64 {
        self.params_at(particle.position()).drag_coefficient
    }

    /// Target nucleus mass, `None` when elastic scattering is disabled
    pub fn atomic_mass(&self, particle: &Particle) -> Option<f64> {
        self.params_at(particle.position()).atomic_mass
    }

    pub fn stopping_power(&self, particle: &Particle) -> f64 {
        self.params_at(particle.position()).stopping_power_or_zero()
    }

    pub fn has_elastic_scattering(&self, particle: &Particle) -> bool {
        self.params_at(particle.position()).has_elastic_scattering()
    }

    /// Geometry test for the particle's current position
    pub fn is_within_bounds(&self, particle: &Particle) -> bool {
        self.contains(particle.position())
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        match self {
            Material::Slab(slab) => slab.contains(point),
            Material::FiniteSlab(slab) => slab.contains(point),
            Material::Sphere(sphere) => sphere.contains(point),
            Material::Composite(composite) => composite.contains(point),
        }
    }

    /// Entry and far boundaries along x for slab-like geometries
    ///
    /// `None` for enclosing geometries, which have no entry side.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        match self {
            Material::Slab(slab) => Some((slab.x_init(), slab.x_end())),
            Material::Composite(composite) => Some((composite.x_init(), composite.x_end())),
            Material::FiniteSlab(_) | Material::Sphere(_) => None,
        }
    }

    /// Short human-readable name of the geometry
    pub fn shape_name(&self) -> &'static str {
        match self {
            Material::Slab(_) => "regular_slab",
            Material::FiniteSlab(_) => "finite_slab",
            Material::Sphere(_) => "sphere",
            Material::Composite(_) => "double_slab",
        }
    }
}

impl From<Slab> for Material {
    fn from(slab: Slab) -> Self {
        Material::Slab(slab)
    }
}

impl From<FiniteSlab> for Material {
    fn from(slab: FiniteSlab) -> Self {
        Material::FiniteSlab(slab)
    }
}

impl From<Sphere> for Material {
    fn from(sphere: Sphere) -> Self {
        Material::Sphere(sphere)
    }
}

impl From<CompositeSlab> for Material {
    fn from(composite: CompositeSlab) -> Self {
        Material::Composite(composite)
    }
}
