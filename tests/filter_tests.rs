// Host-side tests for the gravity smoothing filter.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod filter {
    include!("../src/core/filter.rs");
}

use filter::*;
use glam::Vec3;

#[test]
fn unavailable_until_first_ingest_then_sticky() {
    let mut f = GravityFilter::new();
    assert!(!f.available());
    f.ingest(Vec3::new(0.0, -9.8, 0.0), 0.0);
    assert!(f.available());
    f.ingest(Vec3::ZERO, 0.0);
    assert!(f.available());
}

#[test]
fn constant_input_converges_to_itself() {
    let mut f = GravityFilter::new();
    for _ in 0..50 {
        f.push(Vec3::ONE);
    }
    assert!((f.smoothed() - Vec3::ONE).length() < 1e-4);
}

#[test]
fn cascade_tracks_steps_faster_than_equal_noise_single_pole() {
    // Measure the cascade's impulse response to derive its white-noise
    // variance gain v = sum(h^2), then build the single-pole EWMA with the
    // same gain: k = 2v / (1 + v). Equal noise attenuation, so the fair
    // comparison is step-response settling time.
    let mut probe = GravityFilter::new();
    probe.push(Vec3::X);
    let mut v = 0.0f64;
    for _ in 0..200 {
        let h = probe.smoothed().x as f64;
        v += h * h;
        probe.push(Vec3::ZERO);
    }
    let k = (2.0 * v / (1.0 + v)) as f32;

    let settle = |s: &mut dyn FnMut() -> f32| -> usize {
        for i in 1..=200 {
            if (s() - 1.0).abs() < 0.05 {
                return i;
            }
        }
        panic!("did not settle");
    };

    let mut cascade = GravityFilter::new();
    let cascade_iters = settle(&mut || {
        cascade.push(Vec3::X);
        cascade.smoothed().x
    });

    let mut ewma = 0.0f32;
    let ewma_iters = settle(&mut || {
        ewma += k * (1.0 - ewma);
        ewma
    });

    assert!(
        cascade_iters < ewma_iters,
        "cascade {cascade_iters} vs ewma {ewma_iters}"
    );
}

#[test]
fn oversized_samples_are_clamped_to_working_magnitude() {
    let mut f = GravityFilter::new();
    f.ingest(Vec3::new(30.0, 0.0, 0.0), 0.0);
    // 30 clamps to magnitude 10, then scales by 0.01.
    assert!((f.gravity().length() - 0.1).abs() < 1e-6);
}

#[test]
fn in_range_samples_are_only_rescaled() {
    let mut f = GravityFilter::new();
    f.ingest(Vec3::new(0.0, -9.8, 0.0), 0.0);
    assert!((f.gravity() - Vec3::new(0.0, -0.098, 0.0)).length() < 1e-6);
}

#[test]
fn orientation_rotates_the_sample_plane() {
    let mut f = GravityFilter::new();
    f.ingest(Vec3::new(1.0, 0.0, 0.0), 90.0);
    let g = f.gravity();
    assert!(g.x.abs() < 1e-6);
    assert!((g.y - 0.01).abs() < 1e-6);
    assert_eq!(g.z, 0.0);
}

#[test]
fn calibrate_zeroes_tilt_under_steady_gravity() {
    let mut f = GravityFilter::new();
    for _ in 0..60 {
        f.ingest(Vec3::new(0.3, -9.8, -1.0), 0.0);
    }
    f.calibrate();
    assert!(f.tilt().length() < 1e-3);
}

#[test]
fn default_reference_matches_handheld_pose() {
    let f = GravityFilter::new();
    assert_eq!(f.reference(), Vec3::new(0.0, -1.0, -1.0));
}
