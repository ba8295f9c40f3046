use glam::Vec3;

// Shared simulation/visual tuning constants used by the engine and frontends.

// Particle capacity
pub const MAX_PARTICLES: usize = 50_000; // hard upper bound for any particle buffer

// Shape geometry
pub const NEBULA_RADIUS: f32 = 25.0; // solid sphere radius for the nebula shape
pub const HEART_SCALE: f32 = 1.5; // uniform scale applied to the heart parametric surface

// Animation
pub const DIFFUSION_SCALE: f32 = 50.0; // world units of jitter at diffusion = 1
pub const LERP_FACTOR: f32 = 0.04; // fraction of remaining distance covered per frame
pub const GROUP_ROTATION_PER_FRAME: f32 = 0.0005; // radians around Y
pub const BACKGROUND_ROTATION_PER_FRAME: f32 = 0.0001; // radians around Y

// Background star field
pub const STAR_COUNT: usize = 5_000;
pub const STAR_FIELD_EXTENT: f32 = 1000.0; // edge length of the cube stars are scattered in
pub const STAR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.5];

// Gesture input
pub const GESTURE_SMOOTHING_RETAIN: f32 = 0.8; // weight kept from the previous smoothed value
pub const GESTURE_NEUTRAL_OPENNESS: f32 = 0.5; // emitted when no hand is found
pub const GESTURE_SAMPLE_INTERVAL_MS: u64 = 100; // ~10 Hz
pub const OPENNESS_MIN_DISTANCE: f32 = 50.0; // fingertip spread (px) mapped to openness 0
pub const OPENNESS_MAX_DISTANCE: f32 = 250.0; // fingertip spread (px) mapped to openness 1

// Defaults for the UI-facing configuration
pub const DEFAULT_PARTICLE_DENSITY: f32 = 0.6;
pub const DEFAULT_DIFFUSION: f32 = 0.5;
pub const DEFAULT_PARTICLE_COLOR: &str = "#00ffff";

// Camera and point rendering hints for render adapters
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_EYE: [f32; 3] = [0.0, 0.0, 50.0];
pub const POINT_SIZE: f32 = 0.2; // particle sprite edge, world units
pub const STAR_POINT_SIZE: f32 = 0.3;

/// Largest absolute value each heart coordinate can reach.
///
/// The Y term is bounded by the sum of its cosine coefficients (13 + 5 + 2 + 1).
#[inline]
pub fn heart_envelope() -> Vec3 {
    Vec3::new(16.0, 21.0, 10.0) * HEART_SCALE
}

#[inline]
pub fn camera_eye_vec3() -> Vec3 {
    Vec3::from(CAMERA_EYE)
}
