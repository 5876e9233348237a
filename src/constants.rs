/// Scene driver tuning constants.
///
/// These express intended behavior (camera path, seeding counts, debounce
/// timing) and keep magic numbers out of the driver code.
// Canvas backing-store resync is deferred until resize events settle.
pub const RESIZE_DEBOUNCE_MS: i32 = 200;

// Scene seeding
pub const STRAND_COUNT: usize = 20;
pub const TRUNK_COUNT: usize = 10;
pub const SNOW_COUNT: usize = 1000;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const ORBIT_DISTANCE: f32 = 1.0;
pub const ORBIT_RATE: f32 = 0.4; // radians per second of azimuth
pub const ORBIT_HEIGHT: f32 = 0.7;
pub const LOOK_TARGET_Z: f32 = 0.7;

// Tilt-to-camera mapping (gravity working units are small; see core::filter)
pub const TILT_YAW_GAIN: f32 = 12.0;
pub const TILT_PITCH_GAIN: f32 = 12.0;
pub const TILT_PITCH_CLAMP: f32 = 1.0; // radians
