use crate::constants::*;
use glam::{Mat4, Vec3};

/// Perspective projection for the current drawable size. Depth range 0..1,
/// up is +Z (the scene grows upward along Z, like the tubes).
pub fn projection(width: u32, height: u32) -> Mat4 {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    Mat4::perspective_rh(CAMERA_FOV_DEG.to_radians(), aspect, CAMERA_NEAR, CAMERA_FAR)
}

/// Scripted fallback path: a level orbit around the scene axis. Used whenever
/// no motion sensor data is available.
pub fn orbit_view(t: f32) -> Mat4 {
    let th = t * ORBIT_RATE;
    let eye = Vec3::new(
        ORBIT_DISTANCE * th.cos(),
        ORBIT_DISTANCE * th.sin(),
        ORBIT_HEIGHT,
    );
    Mat4::look_at_rh(eye, Vec3::new(0.0, 0.0, LOOK_TARGET_Z), Vec3::Z)
}

/// Tilt-driven bird camera: the calibration-relative smoothed gravity steers
/// azimuth and elevation on top of the base orbit.
pub fn tilt_view(t: f32, tilt: Vec3) -> Mat4 {
    let th = t * ORBIT_RATE + tilt.x * TILT_YAW_GAIN;
    let zth = (tilt.y * TILT_PITCH_GAIN).clamp(-TILT_PITCH_CLAMP, TILT_PITCH_CLAMP);
    let eye = Vec3::new(
        ORBIT_DISTANCE * th.cos() * zth.cos(),
        ORBIT_DISTANCE * th.sin() * zth.cos(),
        ORBIT_DISTANCE * zth.sin() * 0.25 + ORBIT_HEIGHT,
    );
    Mat4::look_at_rh(eye, Vec3::new(0.0, 0.0, LOOK_TARGET_Z), Vec3::Z)
}
