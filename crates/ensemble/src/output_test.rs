use std::fs;

use nalgebra::Point3;

use crate::driver::{run_ensemble, EnsembleSettings};
use crate::output::{history_dir, write_history, write_trajectories};

#[test]
fn history_lines_are_space_separated() {
    let history = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.5, -2.0, 0.25)];
    let mut buf = Vec::new();
    write_history(&mut buf, &history).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "0 0 0\n1.5 -2 0.25\n");
}

#[test]
fn trajectories_land_under_run_name() {
    use nalgebra::Vector3;
    use transport::{Material, MaterialParams, Particle, Slab};

    let slab = Material::from(Slab::new(MaterialParams::new(2.0, 0.1, 0.05), 0.0, 20.0).unwrap());
    let particle =
        Particle::neutral(Point3::new(1.0, 0.0, 0.0), Vector3::new(0.5, 0.0, 0.0)).unwrap();
    let settings = EnsembleSettings::new(400, 5).with_batches(1).with_history(true);
    let report = run_ensemble(&slab, &particle, &settings).unwrap();

    let out = std::env::temp_dir().join("ensemble_output_test");
    let _ = fs::remove_dir_all(&out);
    let written = write_trajectories(&out, "slab_run", &report.histories).unwrap();

    assert!(!written.is_empty());
    for path in &written {
        assert_eq!(path.parent().unwrap(), history_dir(&out, "slab_run"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("hist_") && name.ends_with(".txt"), "{name}");

        let contents = fs::read_to_string(path).unwrap();
        let first = contents.lines().next().unwrap();
        assert_eq!(first, "1 0 0");
        for line in contents.lines() {
            assert_eq!(line.split_whitespace().count(), 3);
        }
    }
    let absorbed = history_dir(&out, "slab_run").join("hist_absorbed.txt");
    assert!(absorbed.exists());

    let _ = fs::remove_dir_all(&out);
}
