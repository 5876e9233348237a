/// Built-in tube path families.
///
/// Each variant carries a trusted WGSL statement block that must declare
/// `var gpos: vec3f` in terms of `t` (parametric position along the tube,
/// 0 at the base, 1 at the tip), `time`, `params1` and `params2`. The block is
/// spliced into the tube shader template at `SHAPE_MARKER`; shape selection is
/// a typed binding, never caller-supplied source text.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ShapeFunction {
    /// Winding ornament strand: a wobbling helix pinched toward the top.
    Helix,
    /// Near-vertical trunk with slow low-frequency sway.
    Trunk,
}

pub const SHAPE_MARKER: &str = "//__SHAPE_BODY__";

const HELIX_BODY: &str = "\
    let th = 8.0 * (2.0 + params1.x) * t + 0.3 * params1.y * time;
    var gpos = 0.2 * vec3f(
        vec2f(cos(th), sin(th)) * (1.0 + 0.2 * sin((12.0 + 7.0 * params1.y) * t + 0.3 * params1.z * time)),
        dot(sin(8.0 * params1 * t + 0.1 * params2 * time), vec3f(1.0)),
    ) + 0.04 * (sin(37.0 * params2 * t + 0.5 * params1 * time) - sin(59.0 * params1.yzx * t + 0.3 * params2.zxy * time));
    gpos.z += 0.7;
    gpos = vec3f(gpos.xy * (1.2 - gpos.z), gpos.z);";

const TRUNK_BODY: &str = "\
    var gpos = vec3f(
        0.02 * (1.2 - t) * (sin(10.0 * params2.xy * (t + 0.1 * time)) + sin(5.0 * params2.yz * (4.0 * t - 0.1 * time))),
        t,
    );";

impl ShapeFunction {
    pub fn wgsl_body(self) -> &'static str {
        match self {
            ShapeFunction::Helix => HELIX_BODY,
            ShapeFunction::Trunk => TRUNK_BODY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeFunction::Helix => "helix",
            ShapeFunction::Trunk => "trunk",
        }
    }
}

/// Splice a shape body into the tube shader template. The marker appears
/// exactly once in the shipped template; splicing is the only source-level
/// variability in the pipeline.
pub fn assemble_tube_shader(template: &str, shape: ShapeFunction) -> String {
    template.replacen(SHAPE_MARKER, shape.wgsl_body(), 1)
}
