// Host-side tests for curves, the pool manager, and shape splicing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod tube {
    pub mod geometry {
        include!("../src/core/geometry.rs");
    }
    pub mod shape {
        include!("../src/core/shape.rs");
    }
    pub mod curve {
        include!("../src/core/curve.rs");
    }
    pub mod manager {
        include!("../src/core/manager.rs");
    }
}

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use tube::curve::{brightness_at, brightness_coefficients, sphere_random};
use tube::geometry::GeometryCache;
use tube::manager::{CurveId, CurveManager, CurveScene, DrawList};
use tube::shape::ShapeFunction;

#[test]
fn sphere_random_stays_inside_unit_ball() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut sum = Vec3::ZERO;
    for _ in 0..10_000 {
        let v = sphere_random(&mut rng);
        assert!(v.length_squared() < 1.0);
        sum += v;
    }
    let mean = sum / 10_000.0;
    assert!(mean.x.abs() < 0.05);
    assert!(mean.y.abs() < 0.05);
    assert!(mean.z.abs() < 0.05);
}

#[test]
fn brightness_coefficients_fold_radius_taper() {
    let c = brightness_coefficients(0.0, 8.0, -4.0, 0.02, 0.01);
    assert_eq!(c[0], 0.0);
    assert!((c[1] - 10_000.0).abs() < 0.5);
    assert!((c[2] - 16_666.666).abs() < 0.5);
    assert!((c[3] - (-7_500.0)).abs() < 0.5);
}

#[test]
fn brightness_is_zero_at_base_and_continuous() {
    let c = brightness_coefficients(0.0, 8.0, -4.0, 0.02, 0.01);
    assert_eq!(brightness_at(c, 0.0), 0.0);
    let mut prev = 0.0f32;
    let mut max_step = 0.0f32;
    for i in 1..=1000 {
        let b = brightness_at(c, i as f32 / 1000.0);
        max_step = max_step.max((b - prev).abs());
        prev = b;
    }
    // Smooth cubic: the slope peaks at the tip, b'(1) = c0 + 2c1 + 3c2 + 4c3,
    // so adjacent samples at step 1e-3 can differ by at most that times the
    // step.
    let slope_max = c[0] + 2.0 * c[1] + 3.0 * c[2] + 4.0 * c[3];
    assert!(
        max_step <= slope_max * 1e-3 * 1.05,
        "max_step = {max_step}, slope_max = {slope_max}"
    );
}

#[test]
fn curve_update_stages_uniforms_and_shares_geometry() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut cache = GeometryCache::new();
    let mut a = tube::curve::Curve::new();
    let mut b = tube::curve::Curve::new();
    a.randomize(&mut rng);
    a.color = Vec3::new(0.5, 1.0, 0.5);
    a.ra = 0.02;
    a.rb = 0.01;
    a.update(3.0, 8, 5, &mut cache);
    b.update(3.0, 8, 5, &mut cache);

    let u = a.uniforms();
    assert_eq!(u.params1_ra[3], 0.02);
    assert_eq!(u.params2_rb[3], 0.01);
    assert_eq!(u.color_time, [0.5, 1.0, 0.5, 3.0]);

    let (ga, gb) = (a.geometry().unwrap(), b.geometry().unwrap());
    assert!(Rc::ptr_eq(ga, gb));
    assert_eq!(cache.len(), 1);
}

#[derive(Default)]
struct MockScene {
    attached: Vec<CurveId>,
    detached: Vec<CurveId>,
}

impl CurveScene for MockScene {
    fn attach(&mut self, id: CurveId) {
        self.attached.push(id);
    }

    fn detach(&mut self, id: CurveId) {
        self.detached.push(id);
    }
}

fn new_manager() -> CurveManager {
    CurveManager::new(
        ShapeFunction::Helix,
        8,
        5,
        Rc::new(RefCell::new(GeometryCache::new())),
    )
}

#[test]
fn acquire_attaches_in_pool_order() {
    let mut mgr = new_manager();
    let mut scene = MockScene::default();
    for i in 0..5 {
        let c = mgr.acquire(&mut scene);
        c.ra = i as f32;
    }
    assert_eq!(mgr.active_count(), 5);
    assert_eq!(scene.attached, (0..5).map(CurveId).collect::<Vec<_>>());
    assert!(scene.detached.is_empty());
}

#[test]
fn reset_detaches_everything_but_keeps_the_pool() {
    let mut mgr = new_manager();
    let mut scene = MockScene::default();
    for i in 0..5 {
        mgr.acquire(&mut scene).ra = 10.0 + i as f32;
    }
    mgr.reset(&mut scene);
    assert_eq!(mgr.active_count(), 0);
    assert_eq!(mgr.pooled_count(), 5);
    assert_eq!(scene.detached.len(), 5);

    // Reacquisition revives pooled instances instead of allocating.
    for _ in 0..3 {
        let c = mgr.acquire(&mut scene);
        // Stale parameters from the previous activation are still visible
        // until the caller overwrites them.
        assert!(c.ra >= 10.0);
    }
    assert_eq!(mgr.active_count(), 3);
    assert_eq!(mgr.pooled_count(), 5);
}

#[test]
fn update_primes_only_active_curves() {
    let mut mgr = new_manager();
    let mut scene = MockScene::default();
    for _ in 0..4 {
        mgr.acquire(&mut scene);
    }
    mgr.reset(&mut scene);
    for _ in 0..2 {
        mgr.acquire(&mut scene);
    }
    mgr.update(1.5);
    assert_eq!(mgr.active().len(), 2);
    for c in mgr.active() {
        assert!(c.geometry().is_some());
        assert_eq!(c.uniforms().color_time[3], 1.5);
    }
    // Pooled-but-inactive curves are untouched this frame.
    assert!(mgr.curve(CurveId(3)).geometry().is_none());
}

#[test]
fn draw_list_tracks_attach_and_detach_order() {
    let mut list = DrawList::new();
    list.attach(CurveId(0));
    list.attach(CurveId(1));
    list.attach(CurveId(2));
    list.detach(CurveId(1));
    let order: Vec<_> = list.iter().collect();
    assert_eq!(order, vec![CurveId(0), CurveId(2)]);
    assert_eq!(list.len(), 2);
}
