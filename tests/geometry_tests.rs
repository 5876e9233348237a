// Host-side tests for the tube geometry cache.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod geometry {
    include!("../src/core/geometry.rs");
}

use geometry::*;
use std::rc::Rc;

#[test]
fn vertex_and_triangle_counts_match_tessellation() {
    for (lon, rad) in [(64u32, 6u32), (3, 4), (1, 3), (10, 12)] {
        let geo = TubeGeometry::build(lon, rad);
        assert_eq!(geo.vertex_count(), (rad * (lon + 1) + 2) as usize);
        assert_eq!(geo.triangle_count(), (2 * lon * rad + 2 * rad) as usize);
        assert_eq!(geo.indices.len() % 3, 0);
    }
}

#[test]
fn all_indices_are_in_bounds() {
    let geo = TubeGeometry::build(8, 5);
    let n = geo.vertex_count() as u32;
    assert!(geo.indices.iter().all(|&i| i < n));
}

#[test]
fn wide_tessellations_exceed_the_u16_vertex_range() {
    // 1100 * 65 + 2 vertices; the index type must carry past u16::MAX.
    let geo = TubeGeometry::build(64, 1100);
    assert_eq!(geo.vertex_count(), 71_502);
    let n = geo.vertex_count() as u32;
    assert!(geo.indices.iter().all(|&i| i < n));
    assert!(geo.indices.iter().any(|&i| i > u16::MAX as u32));
}

#[test]
fn rings_span_unit_axis_with_apex_caps() {
    let geo = TubeGeometry::build(4, 6);
    // First ring sits at z = 0, last ring at z = 1
    for v in &geo.positions[..6] {
        assert_eq!(v[2], 0.0);
        let r2 = v[0] * v[0] + v[1] * v[1];
        assert!((r2 - 1.0).abs() < 1e-5);
    }
    let last_ring_start = 4 * 6;
    for v in &geo.positions[last_ring_start..last_ring_start + 6] {
        assert_eq!(v[2], 1.0);
    }
    // Two apex vertices close the tube
    let n = geo.positions.len();
    assert_eq!(geo.positions[n - 2], [0.0, 0.0, 0.0]);
    assert_eq!(geo.positions[n - 1], [0.0, 0.0, 1.0]);
}

#[test]
fn cache_returns_shared_geometry() {
    let mut cache = GeometryCache::new();
    let a = cache.get(64, 6);
    let b = cache.get(64, 6);
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);
}

#[test]
fn cache_key_does_not_alias_wide_tessellations() {
    // Under the original packed key (lon * 128 + rad) these two collide:
    // 1 * 128 + 200 == 2 * 128 + 72. The tuple key keeps them distinct.
    let mut cache = GeometryCache::new();
    let a = cache.get(1, 200);
    let b = cache.get(2, 72);
    assert!(!Rc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 2);
    assert_eq!(a.vertex_count(), 402);
    assert_eq!(b.vertex_count(), 218);
}
