pub mod constants;
pub mod curve;
pub mod filter;
pub mod geometry;
pub mod manager;
pub mod shape;

pub use constants::*;
pub use curve::{brightness_at, brightness_coefficients, sphere_random, Curve, CurveUniforms};
pub use filter::GravityFilter;
pub use geometry::{GeometryCache, TubeGeometry};
pub use manager::{CurveId, CurveManager, CurveScene, DrawList};
pub use shape::{assemble_tube_shader, ShapeFunction};

// Shaders bundled as string constants
pub static TUBE_WGSL: &str = include_str!("../../shaders/tube.wgsl");
pub static SNOW_WGSL: &str = include_str!("../../shaders/snow.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
