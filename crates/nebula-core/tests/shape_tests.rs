// Tests for target geometry generation.

use nebula_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const TOLERANCE: f32 = 1e-3;

#[test]
fn generate_returns_exact_count_of_finite_points() {
    let mut rng = StdRng::seed_from_u64(7);
    for shape in Shape::ALL {
        for count in [0, 1, 17, 1_000, MAX_PARTICLES] {
            let points = generate_with(shape, count, &mut rng).expect("within capacity");
            assert_eq!(points.len(), count, "{shape} with count {count}");
            assert!(
                points.iter().all(|p| p.is_finite()),
                "{shape} produced a non-finite point"
            );
        }
    }
}

#[test]
fn generate_over_capacity_fails_fast() {
    for shape in Shape::ALL {
        let err = generate(shape, MAX_PARTICLES + 1).unwrap_err();
        assert_eq!(
            err,
            ParticleError::Capacity {
                requested: MAX_PARTICLES + 1,
                capacity: MAX_PARTICLES,
            }
        );
    }
}

#[test]
fn nebula_points_stay_inside_sphere() {
    let points = generate(Shape::Nebula, 20_000).unwrap();
    for p in &points {
        assert!(
            p.length() <= NEBULA_RADIUS + TOLERANCE,
            "point {p:?} outside radius"
        );
    }
}

#[test]
fn nebula_radius_cubed_is_roughly_uniform() {
    // r = R * cbrt(w) makes r^3 / R^3 uniform on [0, 1]; check decile counts.
    let mut rng = StdRng::seed_from_u64(1234);
    let n = 50_000;
    let points = generate_with(Shape::Nebula, n, &mut rng).unwrap();
    let r3 = NEBULA_RADIUS.powi(3);
    let mut bins = [0usize; 10];
    for p in &points {
        let u = (p.length().powi(3) / r3).clamp(0.0, 0.999_999);
        bins[(u * 10.0) as usize] += 1;
    }
    let expected = n as f32 / 10.0;
    for (i, count) in bins.iter().enumerate() {
        let deviation = (*count as f32 - expected).abs() / expected;
        assert!(
            deviation < 0.08,
            "bin {i} holds {count}, expected about {expected}"
        );
    }
}

#[test]
fn nebula_is_not_clustered_at_core() {
    // Half of a uniform ball's volume lies beyond R / cbrt(2).
    let mut rng = StdRng::seed_from_u64(99);
    let points = generate_with(Shape::Nebula, 20_000, &mut rng).unwrap();
    let split = NEBULA_RADIUS / 2.0_f32.cbrt();
    let outer = points.iter().filter(|p| p.length() > split).count();
    let fraction = outer as f32 / points.len() as f32;
    assert!((fraction - 0.5).abs() < 0.03, "outer fraction {fraction}");
}

#[test]
fn heart_points_within_envelope() {
    let envelope = heart_envelope();
    let points = generate(Shape::Heart, 20_000).unwrap();
    for p in &points {
        let a = p.abs();
        assert!(a.x <= envelope.x + TOLERANCE, "x out of envelope: {p:?}");
        assert!(a.y <= envelope.y + TOLERANCE, "y out of envelope: {p:?}");
        assert!(a.z <= envelope.z + TOLERANCE, "z out of envelope: {p:?}");
    }
}

#[test]
fn heart_has_volume() {
    let points = generate(Shape::Heart, 5_000).unwrap();
    let max_z = points.iter().map(|p| p.z.abs()).fold(0.0_f32, f32::max);
    assert!(max_z > 1.0, "heart looks flat, max |z| = {max_z}");
}

#[test]
fn generation_is_not_repeatable_across_calls() {
    let a = generate(Shape::Nebula, 64).unwrap();
    let b = generate(Shape::Nebula, 64).unwrap();
    assert_ne!(a, b);
}

#[test]
fn seeded_generation_is_repeatable() {
    let a = generate_with(Shape::Heart, 64, &mut StdRng::seed_from_u64(5)).unwrap();
    let b = generate_with(Shape::Heart, 64, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn shape_names_parse_and_display() {
    for shape in Shape::ALL {
        assert_eq!(shape.to_string().parse::<Shape>().unwrap(), shape);
    }
    assert_eq!(" Heart ".parse::<Shape>().unwrap(), Shape::Heart);
    assert!(matches!(
        "cube".parse::<Shape>(),
        Err(ParticleError::UnknownShape(_))
    ));
}
