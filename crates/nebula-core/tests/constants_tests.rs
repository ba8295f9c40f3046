// Tests for tuning constants and their relationships.

use nebula_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(MAX_PARTICLES > 0);
    assert!(NEBULA_RADIUS > 0.0);
    assert!(HEART_SCALE > 0.0);
    assert!(DIFFUSION_SCALE > 0.0);

    // Lerp must make progress without overshooting.
    assert!(LERP_FACTOR > 0.0 && LERP_FACTOR < 1.0);

    // Smoothing weight must keep the filter a contraction.
    assert!(GESTURE_SMOOTHING_RETAIN > 0.0 && GESTURE_SMOOTHING_RETAIN < 1.0);
    assert!((0.0..=1.0).contains(&GESTURE_NEUTRAL_OPENNESS));

    assert!((0.0..=1.0).contains(&DEFAULT_PARTICLE_DENSITY));
    assert!((0.0..=1.0).contains(&DEFAULT_DIFFUSION));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_have_logical_relationships() {
    // Background drifts slower than the cloud for the parallax cue.
    assert!(BACKGROUND_ROTATION_PER_FRAME < GROUP_ROTATION_PER_FRAME);

    // Openness range must be non-empty.
    assert!(OPENNESS_MAX_DISTANCE > OPENNESS_MIN_DISTANCE);

    // Stars surround the cloud and stay inside the far plane.
    assert!(STAR_FIELD_EXTENT * 0.5 > NEBULA_RADIUS);
    assert!(CAMERA_ZFAR > CAMERA_EYE[2]);
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZNEAR < CAMERA_ZFAR);
}

#[test]
fn lerp_time_constant_is_about_25_frames() {
    let frames = -1.0 / (1.0 - LERP_FACTOR).ln();
    assert!((frames - 24.5).abs() < 1.0, "time constant {frames} frames");
}

#[test]
fn heart_envelope_matches_parametric_bounds() {
    let e = heart_envelope();
    assert!((e.x - 24.0).abs() < 1e-5);
    assert!((e.y - 31.5).abs() < 1e-5);
    assert!((e.z - 15.0).abs() < 1e-5);
}

#[test]
fn camera_looks_at_cloud_center() {
    let camera = Camera::for_aspect(16.0 / 9.0);
    let clip = camera.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!((0.0..=1.0).contains(&ndc.z));
    // Degenerate aspect falls back to square.
    assert_eq!(Camera::for_aspect(0.0).aspect, 1.0);
}

#[test]
fn bundled_shader_has_entry_points() {
    assert!(POINTS_WGSL.contains("fn vs_main"));
    assert!(POINTS_WGSL.contains("fn fs_main"));
}

#[test]
fn sprite_quad_is_centered_square_of_point_size() {
    let quad = sprite_quad(POINT_SIZE);
    let (min, max) = quad.iter().fold(
        ([f32::MAX; 2], [f32::MIN; 2]),
        |(lo, hi), c| ([lo[0].min(c[0]), lo[1].min(c[1])], [hi[0].max(c[0]), hi[1].max(c[1])]),
    );
    assert!((max[0] - min[0] - POINT_SIZE).abs() < 1e-6);
    assert!((max[1] - min[1] - POINT_SIZE).abs() < 1e-6);
    assert_eq!(min[0], -max[0]);
    assert_eq!(min[1], -max[1]);

    // Two triangles with the same winding cover the square exactly once.
    let area = |t: &[[f32; 2]]| {
        0.5 * ((t[1][0] - t[0][0]) * (t[2][1] - t[0][1]) - (t[2][0] - t[0][0]) * (t[1][1] - t[0][1]))
    };
    let (a, b) = (area(&quad[0..3]), area(&quad[3..6]));
    assert!(a > 0.0 && b > 0.0);
    assert!((a + b - POINT_SIZE * POINT_SIZE).abs() < 1e-6);
    assert!(STAR_POINT_SIZE > 0.0);
}

#[test]
fn shader_offsets_sprites_in_view_space() {
    assert!(POINTS_WGSL.contains("corner: vec2<f32>"));
    assert!(POINTS_WGSL.contains("uniforms.proj * view_pos"));
}
