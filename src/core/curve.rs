use super::geometry::{GeometryCache, TubeGeometry};
use glam::Vec3;
use rand::Rng;
use std::rc::Rc;

/// Uniform block consumed by the tube vertex/fragment shaders.
///
/// Packed into four vec4 rows to satisfy WGSL uniform alignment:
/// `params1.w = ra`, `params2.w = rb`, `color.w = time`,
/// `brightness = (b0, b1, b2, 0)`.
#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CurveUniforms {
    pub params1_ra: [f32; 4],
    pub params2_rb: [f32; 4],
    pub color_time: [f32; 4],
    pub brightness: [f32; 4],
}

/// Uniform point in the open unit ball, by rejection sampling.
pub fn sphere_random<R: Rng>(rng: &mut R) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if v.length_squared() < 1.0 {
            return v;
        }
    }
}

/// Coefficients of the analytic brightness cubic baked into the tube shader.
///
/// The tube radius tapers in squared-inverse-radius space, so the brightness
/// control values are folded together with `1/ra²` and `1/rb²`. These exact
/// formulas are mirrored in `shaders/tube.wgsl`; visual fidelity depends on
/// both sides agreeing.
pub fn brightness_coefficients(b0: f32, b1: f32, b2: f32, ra: f32, rb: f32) -> [f32; 4] {
    let rainv2 = 1.0 / (ra * ra);
    let rbinv2 = 1.0 / (rb * rb);
    let rdinv2 = rbinv2 - rainv2;
    [
        b0 * rainv2,
        (rainv2 * b1 + rdinv2 * b0) * 0.5,
        (rainv2 * b2 + rdinv2 * b1) / 3.0,
        (rdinv2 * b2) * 0.25,
    ]
}

/// Evaluate the brightness cubic at parameter `t` (Horner form, as the
/// fragment shader does).
pub fn brightness_at(coeffs: [f32; 4], t: f32) -> f32 {
    t * (coeffs[0] + t * (coeffs[1] + t * (coeffs[2] + t * coeffs[3])))
}

/// One renderable light tube. Pooled by `CurveManager`: instances are reused
/// indefinitely and every field is caller-overwritten on each acquisition.
pub struct Curve {
    pub params1: Vec3,
    pub params2: Vec3,
    pub color: Vec3,
    pub brightness0: f32,
    pub brightness1: f32,
    pub brightness2: f32,
    pub ra: f32,
    pub rb: f32,
    pub time: f32,
    uniforms: CurveUniforms,
    geometry: Option<Rc<TubeGeometry>>,
}

impl Default for Curve {
    fn default() -> Self {
        Self::new()
    }
}

impl Curve {
    pub fn new() -> Self {
        Self {
            params1: Vec3::ZERO,
            params2: Vec3::ZERO,
            color: Vec3::ZERO,
            brightness0: 0.0,
            brightness1: 0.0,
            brightness2: 0.0,
            ra: 0.0,
            rb: 0.0,
            time: 0.0,
            uniforms: CurveUniforms::default(),
            geometry: None,
        }
    }

    /// Seed both shape-parameter vectors with bounded-magnitude randomness.
    /// What the parameters mean is up to the bound shape function.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.params1 = sphere_random(rng);
        self.params2 = sphere_random(rng);
    }

    /// Per-frame refresh: stage the current values into the uniform block and
    /// assign the cached tube mesh for the requested tessellation.
    pub fn update(&mut self, time: f32, lon_segments: u32, rad_segments: u32, cache: &mut GeometryCache) {
        self.time = time;
        self.uniforms = CurveUniforms {
            params1_ra: [self.params1.x, self.params1.y, self.params1.z, self.ra],
            params2_rb: [self.params2.x, self.params2.y, self.params2.z, self.rb],
            color_time: [self.color.x, self.color.y, self.color.z, self.time],
            brightness: [self.brightness0, self.brightness1, self.brightness2, 0.0],
        };
        self.geometry = Some(cache.get(lon_segments, rad_segments));
    }

    pub fn uniforms(&self) -> &CurveUniforms {
        &self.uniforms
    }

    pub fn geometry(&self) -> Option<&Rc<TubeGeometry>> {
        self.geometry.as_ref()
    }
}
