// Shared tube tessellation defaults.

// Default tessellation used by the demo scene; exposed as parameters on
// `CurveManager` rather than hard-coded into the mesh builder.
pub const TUBE_LON_SEGMENTS: u32 = 64;
pub const TUBE_RAD_SEGMENTS: u32 = 6;
