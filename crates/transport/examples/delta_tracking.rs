//! Delta tracking through a two-material slab
//!
//! Follows single neutrons through a slab whose first half is a thin
//! moderator and second half a dense absorber, printing where each one
//! ended up and how many steps it took.
//!
//! Run with: cargo run --package transport --example delta_tracking

use nalgebra::{Point3, Vector3};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use transport::{run_trial, CompositeSlab, Material, MaterialParams, Outcome, Particle};

fn main() {
    println!("Delta tracking: moderator / absorber slab\n");
    println!("{}", "=".repeat(60));

    let moderator = MaterialParams::new(2.0, 0.05, 0.05).with_atomic_mass(1.0);
    let absorber = MaterialParams::new(0.5, 0.4, 0.1);
    let composite = match CompositeSlab::new(moderator, absorber, 0.0, 40.0, 0.5) {
        Ok(composite) => composite,
        Err(err) => {
            eprintln!("invalid slab: {err}");
            return;
        }
    };

    println!(
        "  Region 1: λ = {:.2}, p_abs = {:.2}, A = 1",
        moderator.mean_free_path, moderator.absorption_probability
    );
    println!(
        "  Region 2: λ = {:.2}, p_abs = {:.2}",
        absorber.mean_free_path, absorber.absorption_probability
    );
    println!("  Interface at x = {:.1}", composite.split_x());
    println!(
        "  Majorant step scale: {:.2}\n",
        moderator.mean_free_path.min(absorber.mean_free_path)
    );

    let material = Material::from(composite);
    let mut rng = ChaChaRng::seed_from_u64(2024);
    let mut tally = [0usize; 4];

    for trial in 0..10 {
        let neutron = match Particle::neutral(Point3::origin(), Vector3::new(0.5, 0.0, 0.0)) {
            Ok(neutron) => neutron,
            Err(err) => {
                eprintln!("invalid particle: {err}");
                return;
            }
        };
        let record = match run_trial(&material, neutron, &mut rng) {
            Ok(record) => record,
            Err(err) => {
                eprintln!("trial {trial} failed: {err}");
                return;
            }
        };

        let end = record.history.last().copied().unwrap_or_else(Point3::origin);
        println!(
            "  Trial {:2}: {:<11} after {:4} steps, final x = {:8.3}",
            trial, record.outcome, record.steps, end.x
        );
        if let Some(i) = Outcome::ALL.iter().position(|o| *o == record.outcome) {
            tally[i] += 1;
        }
    }

    println!("\n{}", "=".repeat(60));
    for (outcome, count) in Outcome::ALL.iter().zip(tally) {
        println!("  {outcome}: {count}");
    }
}
