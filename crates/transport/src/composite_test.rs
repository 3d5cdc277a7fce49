use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::composite::{CollisionRegion, CompositeSlab, RegionMembership};
use crate::error::MaterialError;
use crate::material::{Material, MaterialParams};
use crate::particle::Particle;

fn two_media() -> CompositeSlab {
    let first = MaterialParams::new(2.0, 0.1, 0.05);
    let second = MaterialParams::new(0.5, 0.3, 0.05);
    CompositeSlab::new(first, second, 0.0, 10.0, 0.5).unwrap()
}

#[test]
fn regions_partition_the_slab() {
    let slab = CompositeSlab::new(
        MaterialParams::new(1.0, 0.0, 0.0),
        MaterialParams::new(1.0, 0.0, 0.0),
        -3.0,
        8.0,
        0.25,
    )
    .unwrap();

    assert_eq!(slab.x_init(), -3.0);
    assert_eq!(slab.total_length(), 8.0);
    assert_eq!(slab.ratio(), 0.25);
    assert_eq!(slab.first().x_init(), -3.0);
    assert_eq!(slab.first().x_end(), slab.second().x_init());
    assert_eq!(slab.split_x(), -1.0);
    assert_relative_eq!(slab.x_end(), 5.0);
    assert_relative_eq!(slab.first().length() + slab.second().length(), 8.0);
}

#[test]
fn ratio_must_be_strictly_inside_unit_interval() {
    let p = MaterialParams::new(1.0, 0.0, 0.0);
    for ratio in [0.0, 1.0, -0.5, 1.5] {
        assert_eq!(
            CompositeSlab::new(p, p, 0.0, 10.0, ratio).unwrap_err(),
            MaterialError::Ratio(ratio)
        );
    }
    assert!(CompositeSlab::new(p, p, 0.0, 10.0, f64::NAN).is_err());
    assert!(CompositeSlab::new(MaterialParams::new(0.0, 0.0, 0.0), p, 0.0, 10.0, 0.5).is_err());
}

#[test]
fn membership_on_interface_is_shared() {
    let slab = two_media();

    assert_eq!(slab.membership(&Point3::new(1.0, 0.0, 0.0)), RegionMembership::First);
    assert_eq!(slab.membership(&Point3::new(5.0, 0.0, 0.0)), RegionMembership::Both);
    assert_eq!(slab.membership(&Point3::new(7.5, 0.0, 0.0)), RegionMembership::Second);
    assert_eq!(slab.membership(&Point3::new(-0.1, 0.0, 0.0)), RegionMembership::Outside);
    assert_eq!(slab.membership(&Point3::new(10.1, 0.0, 0.0)), RegionMembership::Outside);
}

#[test]
fn region_lookup_is_half_open() {
    let slab = two_media();

    assert_eq!(slab.region_at(&Point3::new(4.999, 0.0, 0.0)), slab.first());
    assert_eq!(slab.region_at(&Point3::new(5.0, 0.0, 0.0)), slab.second());
    assert_eq!(slab.region_at(&Point3::new(10.0, 0.0, 0.0)), slab.second());
    assert_eq!(slab.region_at(&Point3::new(-4.0, 0.0, 0.0)), slab.first());
}

#[test]
fn collision_probabilities_use_the_majorant() {
    let slab = two_media();

    // λ₁ = 2, λ₂ = 0.5, λ_min = 0.5
    assert_eq!(
        slab.collision_probability(RegionMembership::First),
        Some((0.25, CollisionRegion::First))
    );
    assert_eq!(
        slab.collision_probability(RegionMembership::Second),
        Some((1.0, CollisionRegion::Second))
    );
    assert_eq!(
        slab.collision_probability(RegionMembership::Both),
        Some((0.625, CollisionRegion::Mixture))
    );
    assert_eq!(slab.collision_probability(RegionMembership::Outside), None);
    assert_relative_eq!(slab.mixture_weight_first(), 0.2);
}

#[test]
fn particle_outside_is_left_alone() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let slab = two_media();
    let mut particle =
        Particle::neutral(Point3::new(-1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();

    slab.propagate(&mut particle, &mut rng);

    assert_eq!(particle.position(), &Point3::new(-1.0, 0.0, 0.0));
    assert_eq!(particle.history().len(), 1);
}

#[test]
fn equal_media_always_collide() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let params = MaterialParams::new(1.0, 0.0, 0.1);
    let material = Material::from(CompositeSlab::new(params, params, -1.0e6, 2.0e6, 0.5).unwrap());
    let mut particle =
        Particle::neutral(Point3::origin(), Vector3::new(1.0, 0.0, 0.0)).unwrap();

    let mut speed = 1.0;
    for _ in 0..20 {
        particle.propagate(&material, &mut rng);
        let new_speed = particle.velocity().magnitude();
        assert_relative_eq!(new_speed, speed * 0.9, epsilon = 1e-12);
        speed = new_speed;
    }
    assert_eq!(particle.history().len(), 21);
}

#[test]
fn rejected_collisions_fly_straight() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    // A short majorant path makes almost every candidate in the second region a phantom
    let first = MaterialParams::new(0.01, 0.0, 0.5);
    let second = MaterialParams::new(1.0e4, 0.0, 0.5);
    let slab = CompositeSlab::new(first, second, -1.0, 1.0e9, 1.0e-9).unwrap();
    let v0 = Vector3::new(0.0, 3.0, 4.0);
    let mut particle = Particle::neutral(Point3::new(10.0, 0.0, 0.0), v0).unwrap();

    let mut real_collisions = 0;
    for _ in 0..500 {
        let before = *particle.position();
        let velocity = *particle.velocity();
        slab.propagate(&mut particle, &mut rng);

        if particle.velocity() == &velocity {
            let moved = particle.position() - before;
            assert!(moved.cross(&velocity).magnitude() < 1e-9 * velocity.magnitude());
            assert!(moved.dot(&velocity) >= 0.0);
        } else {
            real_collisions += 1;
        }
    }

    // Acceptance probability is λ_min/λ₂ = 1e-6
    assert!(real_collisions <= 3, "{} real collisions", real_collisions);
    assert_eq!(particle.history().len(), 501);
}

#[test]
fn phantom_flight_at_rest_picks_a_direction() {
    let mut rng = ChaChaRng::seed_from_u64(8);
    let first = MaterialParams::new(0.01, 0.0, 0.0);
    let second = MaterialParams::new(1.0e6, 0.0, 0.0);
    let slab = CompositeSlab::new(first, second, -1.0, 1.0e9, 1.0e-9).unwrap();
    let mut particle = Particle::neutral(Point3::new(10.0, 0.0, 0.0), Vector3::zeros()).unwrap();

    slab.propagate(&mut particle, &mut rng);

    assert_ne!(particle.position(), &Point3::new(10.0, 0.0, 0.0));
    assert_eq!(particle.velocity(), &Vector3::zeros());
}

#[test]
fn interface_collisions_follow_mixture_weights() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    // λ₁ = 1, λ₂ = 3: P = (1 + 1/3)/2 = 2/3, first region chosen with 3/4
    let first = MaterialParams::new(1.0, 0.0, 0.1);
    let second = MaterialParams::new(3.0, 0.0, 0.5);
    let slab = CompositeSlab::new(first, second, 0.0, 10.0, 0.5).unwrap();

    let n = 20_000;
    let (mut phantom, mut in_first, mut in_second) = (0, 0, 0);
    for _ in 0..n {
        let mut particle =
            Particle::neutral(Point3::new(5.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)).unwrap();
        slab.propagate(&mut particle, &mut rng);

        let speed = particle.velocity().magnitude();
        if (speed - 1.0).abs() < 1e-12 {
            phantom += 1;
        } else if (speed - 0.9).abs() < 1e-12 {
            in_first += 1;
        } else if (speed - 0.5).abs() < 1e-12 {
            in_second += 1;
        } else {
            panic!("unexpected speed {}", speed);
        }
    }

    let frac = |count: usize| count as f64 / n as f64;
    assert!((frac(phantom) - 1.0 / 3.0).abs() < 0.02, "phantom {}", frac(phantom));
    assert!((frac(in_first) - 0.5).abs() < 0.02, "first {}", frac(in_first));
    assert!((frac(in_second) - 1.0 / 6.0).abs() < 0.02, "second {}", frac(in_second));
}
