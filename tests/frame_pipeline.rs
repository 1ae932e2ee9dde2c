//! Drives discovery and loading over a synthetic two-frame results tree,
//! the same shape a real filter run writes.

use std::fs;
use std::path::{Path, PathBuf};

use pf_animator::config::VizConfig;
use pf_animator::frames::{load_frame, max_frame_index};
use pf_animator::render::particle_opacities;

fn put(path: PathBuf, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn synthetic_results(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "pf_animator_pipeline_{name}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&root);

    put(root.join("true_state_results/true_state_0.csv"), "x,y\n10,10\n");
    put(root.join("true_state_results/true_state_1.csv"), "x,y\n20,20\n");
    put(
        root.join("estimated_results/estimated_state_0.csv"),
        "x,y\n11,9\n",
    );
    put(
        root.join("estimated_results/estimated_state_1.csv"),
        "x,y\n19,21\n",
    );
    put(
        root.join("pf_estimates/pf_estimates_0.csv"),
        "x,y,w\n10,11,0.1\n12,9,0.5\n11,10,1.0\n",
    );
    put(
        root.join("pf_estimates/pf_estimates_1.csv"),
        "x,y,w\n21,19,0.1\n19,22,0.5\n20,21,1.0\n",
    );
    put(
        root.join("sensor_readings/actual_sensor_reading_0.csv"),
        "reading\n50.0\n",
    );
    put(
        root.join("sensor_readings/noisy_sensor_reading_0.csv"),
        "reading\n52.3\n",
    );
    put(
        root.join("sensor_readings/actual_sensor_reading_1.csv"),
        "reading\n60.0\n",
    );
    put(
        root.join("sensor_readings/noisy_sensor_reading_1.csv"),
        "reading\n58.1\n",
    );
    root
}

fn cleanup(root: &Path) {
    fs::remove_dir_all(root).ok();
}

#[test]
fn every_discovered_frame_loads_completely() {
    let root = synthetic_results("complete");
    let config = VizConfig::default();

    let last = max_frame_index(&root).unwrap();
    assert_eq!(last, 1);

    for index in 0..=last {
        let frame = load_frame(&root, index).unwrap();
        assert_eq!(frame.particles.len(), 3);

        // Estimate sits one meter off on each axis in both frames.
        let error = frame.truth.distance_to(&frame.estimate);
        assert!((error - 2.0_f64.sqrt()).abs() < 1e-9);

        let weights: Vec<f64> = frame.particles.iter().map(|p| p.w).collect();
        let alphas = particle_opacities(&weights, config.particle_max_opacity);
        assert!((alphas[0] - 0.005).abs() < 1e-12);
        assert!((alphas[1] - 0.025).abs() < 1e-12);
        assert!((alphas[2] - 0.05).abs() < 1e-12);
    }

    let frame = load_frame(&root, 0).unwrap();
    assert_eq!(frame.actual_reading, 50.0);
    assert_eq!(frame.noisy_reading, 52.3);
    let frame = load_frame(&root, 1).unwrap();
    assert_eq!(frame.actual_reading, 60.0);
    assert_eq!(frame.noisy_reading, 58.1);

    cleanup(&root);
}

#[test]
fn missing_resource_aborts_instead_of_skipping() {
    let root = synthetic_results("hole");
    fs::remove_file(root.join("sensor_readings/noisy_sensor_reading_1.csv")).unwrap();

    // Discovery still succeeds; the hole only surfaces when the frame loads.
    assert_eq!(max_frame_index(&root).unwrap(), 1);
    assert!(load_frame(&root, 0).is_ok());
    assert!(load_frame(&root, 1).is_err());

    cleanup(&root);
}
