//! Two adjacent slabs crossed with Woodcock (delta) tracking.
//!
//! The mean free path jumps at the interface between the two regions.
//! Rather than locating the crossing point, every step samples a candidate
//! flight with the smallest mean free path as a majorant and then accepts a
//! real collision with probability λ_min/λ of the local region. Rejected
//! (phantom) collisions are free flights that leave the velocity untouched.
//!
//! # Boundary convention
//!
//! Each region's containment test is closed, so a point exactly on the
//! interface belongs to both and is handled by the mixture branch of
//! [`CompositeSlab::collision_probability`]. Parameter lookups use a
//! half-open rule instead: the first region owns `[x_init, x_split)` and the
//! second owns `[x_split, x_end]`.

use nalgebra::Point3;
use rand_chacha::ChaChaRng;

use crate::error::MaterialError;
use crate::material::{check_extent, check_finite, MaterialParams, Slab};
use crate::particle::Particle;
use crate::sampling::{sample_bernoulli, sample_step_length};

/// Which regions of a composite slab report containing a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMembership {
    First,
    Second,
    Both,
    Outside,
}

impl RegionMembership {
    fn from_flags(in_first: bool, in_second: bool) -> Self {
        match (in_first, in_second) {
            (true, true) => RegionMembership::Both,
            (true, false) => RegionMembership::First,
            (false, true) => RegionMembership::Second,
            (false, false) => RegionMembership::Outside,
        }
    }
}

/// Which region a real collision takes place in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionRegion {
    First,
    Second,
    /// On the interface: the region is drawn from the mixture weights
    Mixture,
}

/// Two slabs of different material sharing an interface along x
///
/// The first region spans `total_length * ratio` from `x_init`, the second
/// fills the rest, so together they cover `[x_init, x_init + total_length]`
/// with no gap or overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSlab {
    x_init: f64,
    total_length: f64,
    ratio: f64,
    first: Slab,
    second: Slab,
}

impl CompositeSlab {
    /// Creates a composite slab from the parameters of both regions
    ///
    /// # Arguments
    /// * `first` - Parameters of the region starting at `x_init`
    /// * `second` - Parameters of the region ending at `x_init + total_length`
    /// * `x_init` - Entry boundary
    /// * `total_length` - Combined thickness of both regions
    /// * `ratio` - Fraction of the thickness taken by the first region, in (0, 1)
    ///
    /// # Example
    /// ```
    /// use transport::{CompositeSlab, MaterialParams};
    ///
    /// let water = MaterialParams::new(2.0, 0.1, 0.05);
    /// let lead = MaterialParams::new(0.5, 0.3, 0.05);
    /// let slab = CompositeSlab::new(water, lead, 0.0, 50.0, 0.5).unwrap();
    /// assert_eq!(slab.split_x(), 25.0);
    /// ```
    pub fn new(
        first: MaterialParams,
        second: MaterialParams,
        x_init: f64,
        total_length: f64,
        ratio: f64,
    ) -> Result<Self, MaterialError> {
        let x_init = check_finite("composite x_init", x_init)?;
        let total_length = check_extent("composite total_length", total_length)?;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(MaterialError::Ratio(ratio));
        }
        let first_length = total_length * ratio;
        let first = Slab::new(first, x_init, first_length)?;
        let second = Slab::new(second, x_init + first_length, total_length - first_length)?;
        Ok(Self {
            x_init,
            total_length,
            ratio,
            first,
            second,
        })
    }

    pub fn first(&self) -> &Slab {
        &self.first
    }

    pub fn second(&self) -> &Slab {
        &self.second
    }

    pub fn x_init(&self) -> f64 {
        self.x_init
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Position of the interface between the two regions
    pub fn split_x(&self) -> f64 {
        self.second.x_init()
    }

    pub fn x_end(&self) -> f64 {
        self.second.x_end()
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.x_init && point.x <= self.x_end()
    }

    /// Region owning `point` under the half-open rule
    ///
    /// Points outside the composite are answered by the nearer region.
    pub fn region_at(&self, point: &Point3<f64>) -> &Slab {
        if point.x < self.split_x() {
            &self.first
        } else {
            &self.second
        }
    }

    pub fn membership(&self, point: &Point3<f64>) -> RegionMembership {
        RegionMembership::from_flags(self.first.contains(point), self.second.contains(point))
    }

    /// Probability that a candidate collision is real, and where it happens
    ///
    /// With λ_min the majorant mean free path:
    /// - first region only: λ_min/λ₁
    /// - second region only: λ_min/λ₂
    /// - on the interface: the average of both ratios
    ///
    /// Returns `None` outside the composite.
    pub fn collision_probability(
        &self,
        membership: RegionMembership,
    ) -> Option<(f64, CollisionRegion)> {
        let lambda_first = self.first.params().mean_free_path;
        let lambda_second = self.second.params().mean_free_path;
        let lambda_min = lambda_first.min(lambda_second);

        match membership {
            RegionMembership::Both => Some((
                (lambda_min / lambda_first + lambda_min / lambda_second) / 2.0,
                CollisionRegion::Mixture,
            )),
            RegionMembership::First => Some((lambda_min / lambda_first, CollisionRegion::First)),
            RegionMembership::Second => Some((lambda_min / lambda_second, CollisionRegion::Second)),
            RegionMembership::Outside => None,
        }
    }

    /// Probability of picking the first region for a collision on the interface
    ///
    /// Weighted toward the region with the longer mean free path:
    /// λ₂/(λ₁+λ₂) for the first region.
    pub fn mixture_weight_first(&self) -> f64 {
        let lambda_first = self.first.params().mean_free_path;
        let lambda_second = self.second.params().mean_free_path;
        lambda_second / (lambda_first + lambda_second)
    }

    /// One delta-tracking step
    ///
    /// 1. Sample a candidate flight with the majorant λ_min.
    /// 2. Accept it as a real collision with the local probability; a real
    ///    collision is an ordinary step in the chosen region.
    /// 3. Otherwise fly the candidate distance along the current direction
    ///    with no change to the velocity.
    ///
    /// A particle already outside the composite is left alone.
    pub fn propagate(&self, particle: &mut Particle, rng: &mut ChaChaRng) {
        let lambda_min = self
            .first
            .params()
            .mean_free_path
            .min(self.second.params().mean_free_path);
        let candidate = sample_step_length(rng, lambda_min);

        let membership = self.membership(particle.position());
        let Some((probability, region)) = self.collision_probability(membership) else {
            return;
        };

        if sample_bernoulli(rng, probability) {
            let slab = match region {
                CollisionRegion::First => &self.first,
                CollisionRegion::Second => &self.second,
                CollisionRegion::Mixture => {
                    if sample_bernoulli(rng, self.mixture_weight_first()) {
                        &self.first
                    } else {
                        &self.second
                    }
                }
            };
            particle.collide(slab.params(), rng);
        } else {
            particle.free_flight(candidate, rng);
        }
    }
}
