// Host-side tests for shape bodies and shader splicing.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod shape {
    include!("../src/core/shape.rs");
}

use shape::*;

const TUBE_TEMPLATE: &str = include_str!("../shaders/tube.wgsl");

#[test]
fn every_shape_body_declares_the_generated_position() {
    for s in [ShapeFunction::Helix, ShapeFunction::Trunk] {
        assert!(s.wgsl_body().contains("var gpos"), "{}", s.label());
    }
}

#[test]
fn shape_bodies_use_their_parameter_vectors() {
    assert!(ShapeFunction::Helix.wgsl_body().contains("params1"));
    assert!(ShapeFunction::Helix.wgsl_body().contains("params2"));
    assert!(ShapeFunction::Trunk.wgsl_body().contains("params2"));
}

#[test]
fn template_carries_the_marker_exactly_once() {
    assert_eq!(TUBE_TEMPLATE.matches(SHAPE_MARKER).count(), 1);
}

#[test]
fn assembled_shader_contains_the_body_and_no_marker() {
    for s in [ShapeFunction::Helix, ShapeFunction::Trunk] {
        let src = assemble_tube_shader(TUBE_TEMPLATE, s);
        assert!(src.contains(s.wgsl_body()), "{}", s.label());
        assert!(!src.contains(SHAPE_MARKER), "{}", s.label());
    }
}

#[test]
fn shape_labels_are_distinct() {
    assert_ne!(
        ShapeFunction::Helix.label(),
        ShapeFunction::Trunk.label()
    );
}
