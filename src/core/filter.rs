use glam::Vec3;

/// Base decay of the smoothing cascade. The other two poles are its square
/// and cube.
pub const SMOOTH_DECAY: f32 = 0.7;

/// Raw samples longer than this are treated as sensor noise and rescaled.
pub const RAW_MAGNITUDE_CLAMP: f32 = 10.0;

/// Working-unit scale applied to every raw sample.
pub const RAW_SCALE: f32 = 0.01;

/// Three-pole smoothing and calibration filter over device-motion samples.
///
/// Each axis runs three exponentially-weighted accumulators with decays
/// `a`, `a²`, `a³`; the smoothed estimate is the combination
/// `(A - 2B + C) / norm` with `norm = 1/(1-a) - 2/(1-a²) + 1/(1-a³)`, chosen
/// so a constant input converges to itself (unit DC gain). Compared with a
/// single pole of equal noise attenuation, the combination tracks slow tilt
/// changes with less lag.
///
/// Single-writer: the motion-event path mutates, the frame path reads. No
/// events ever arriving is a normal outcome; `available` simply stays false
/// and the caller keeps its scripted camera.
pub struct GravityFilter {
    available: bool,
    gravity: Vec3,
    reference: Vec3,
    acc_a: Vec3,
    acc_b: Vec3,
    acc_c: Vec3,
    smoothed: Vec3,
}

impl Default for GravityFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl GravityFilter {
    pub fn new() -> Self {
        Self {
            available: false,
            gravity: Vec3::ZERO,
            reference: Vec3::new(0.0, -1.0, -1.0),
            acc_a: Vec3::ZERO,
            acc_b: Vec3::ZERO,
            acc_c: Vec3::ZERO,
            smoothed: Vec3::ZERO,
        }
    }

    /// Feed one raw acceleration-including-gravity sample (device frame),
    /// together with the current screen-orientation angle in degrees.
    ///
    /// The sample is magnitude-clamped, scaled into working units, and its
    /// X/Y plane rotated so the output is relative to on-screen "up"
    /// regardless of physical device rotation.
    pub fn ingest(&mut self, raw: Vec3, orientation_deg: f32) {
        self.available = true;
        let len = raw.length();
        let scale = RAW_SCALE
            * if len > RAW_MAGNITUDE_CLAMP {
                RAW_MAGNITUDE_CLAMP / len
            } else {
                1.0
            };
        let th = orientation_deg.to_radians();
        let (sin, cos) = th.sin_cos();
        self.push(Vec3::new(
            scale * (raw.x * cos - raw.y * sin),
            scale * (raw.x * sin + raw.y * cos),
            scale * raw.z,
        ));
    }

    /// Smoothing stage: advance the three accumulators with an
    /// already-normalized gravity sample.
    pub fn push(&mut self, gravity: Vec3) {
        self.gravity = gravity;
        let a = SMOOTH_DECAY;
        let b = a * a;
        let c = a * a * a;
        self.acc_a = (self.acc_a + gravity) * a;
        self.acc_b = (self.acc_b + gravity) * b;
        self.acc_c = (self.acc_c + gravity) * c;
        let norm = 1.0 / (1.0 - a) - 2.0 / (1.0 - b) + 1.0 / (1.0 - c);
        self.smoothed = (self.acc_a - 2.0 * self.acc_b + self.acc_c) / norm;
    }

    /// Capture the current gravity as the new "neutral" reference. Triggered
    /// by explicit user action; re-enterable any number of times.
    pub fn calibrate(&mut self) {
        self.reference = self.gravity;
    }

    /// True once the first real sensor event has arrived, and forever after.
    pub fn available(&self) -> bool {
        self.available
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn smoothed(&self) -> Vec3 {
        self.smoothed
    }

    pub fn reference(&self) -> Vec3 {
        self.reference
    }

    /// Calibration-relative tilt estimate driving the camera.
    pub fn tilt(&self) -> Vec3 {
        self.smoothed - self.reference
    }
}
