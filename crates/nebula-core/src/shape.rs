//! Target geometry for the particle cloud.
//!
//! Every generator is a pure function of its random source: two calls with
//! the same count produce different point sets. Index `i` of one shape has
//! no relation to index `i` of another, so switching shapes dissolves the
//! cloud and reforms it rather than morphing feature to feature.

use crate::constants::{HEART_SCALE, MAX_PARTICLES, NEBULA_RADIUS};
use crate::error::{ParticleError, Result};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// The fixed set of shapes the cloud can take.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    #[default]
    Nebula,
    Heart,
}

impl Shape {
    pub const ALL: [Shape; 2] = [Shape::Nebula, Shape::Heart];

    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Nebula => "nebula",
            Shape::Heart => "heart",
        }
    }

    /// Sample a single point of this shape.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Vec3 {
        match self {
            Shape::Nebula => nebula_point(rng),
            Shape::Heart => heart_point(rng),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = ParticleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nebula" => Ok(Shape::Nebula),
            "heart" => Ok(Shape::Heart),
            _ => Err(ParticleError::UnknownShape(s.to_string())),
        }
    }
}

/// Generate `count` points for `shape` using the thread-local random source.
pub fn generate(shape: Shape, count: usize) -> Result<Vec<Vec3>> {
    generate_with(shape, count, &mut thread_rng())
}

/// Generate `count` points for `shape` from an explicit random source.
///
/// Fails with [`ParticleError::Capacity`] when `count` exceeds
/// [`MAX_PARTICLES`]; a partial set is never returned.
pub fn generate_with<R: Rng + ?Sized>(shape: Shape, count: usize, rng: &mut R) -> Result<Vec<Vec3>> {
    check_capacity(count)?;
    let mut points = Vec::with_capacity(count);
    points.extend((0..count).map(|_| shape.sample(rng)));
    Ok(points)
}

pub(crate) fn check_capacity(count: usize) -> Result<()> {
    if count > MAX_PARTICLES {
        return Err(ParticleError::Capacity {
            requested: count,
            capacity: MAX_PARTICLES,
        });
    }
    Ok(())
}

/// Uniform sample inside a solid sphere of radius [`NEBULA_RADIUS`].
///
/// Uses the inverse cube root for the radius so density stays uniform
/// instead of clustering toward the core.
#[inline]
pub fn nebula_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = TAU * rng.gen::<f32>();
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let r = NEBULA_RADIUS * rng.gen::<f32>().cbrt();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        r * sin_phi * cos_theta,
        r * sin_phi * sin_theta,
        r * cos_phi,
    )
}

/// Sample on a thick heart surface.
///
/// `t` walks the classic heart curve while `u` sweeps it around, giving the
/// shape volume rather than a thin outline.
#[inline]
pub fn heart_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let t = TAU * rng.gen::<f32>();
    let u = TAU * rng.gen::<f32>();
    let (sin_t, cos_t) = t.sin_cos();
    let (sin_u, cos_u) = u.sin_cos();
    let curve_y = 13.0 * cos_t - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec3::new(
        HEART_SCALE * 16.0 * sin_t.powi(3) * cos_u,
        HEART_SCALE * curve_y * cos_u,
        HEART_SCALE * 5.0 * sin_u * (1.0 + sin_t),
    )
}
