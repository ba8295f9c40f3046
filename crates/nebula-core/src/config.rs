//! UI-facing configuration snapshots.
//!
//! A [`VisualConfig`] is never edited in place: each `with_*` call returns a
//! fresh snapshot so whoever holds the previous one keeps a consistent view.

use crate::color::Color;
use crate::constants::{DEFAULT_DIFFUSION, DEFAULT_PARTICLE_DENSITY};
use crate::shape::Shape;

/// Parameters collected from the UI controls.
///
/// - `particle_density`: fraction of the particle buffer that is drawn (0..1)
/// - `diffusion`: jitter intensity applied to targets every frame (0..1)
/// - `particle_color`: material color of the cloud
/// - `shape`: target geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualConfig {
    pub particle_density: f32,
    pub diffusion: f32,
    pub particle_color: Color,
    pub shape: Shape,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            particle_density: DEFAULT_PARTICLE_DENSITY,
            diffusion: DEFAULT_DIFFUSION,
            particle_color: Color::CYAN,
            shape: Shape::Nebula,
        }
    }
}

impl VisualConfig {
    pub fn with_density(self, particle_density: f32) -> Self {
        Self {
            particle_density,
            ..self
        }
    }

    pub fn with_diffusion(self, diffusion: f32) -> Self {
        Self { diffusion, ..self }
    }

    pub fn with_color(self, particle_color: Color) -> Self {
        Self {
            particle_color,
            ..self
        }
    }

    pub fn with_shape(self, shape: Shape) -> Self {
        Self { shape, ..self }
    }

    /// Same snapshot with both numeric fields clamped into \[0, 1\].
    pub fn clamped(self) -> Self {
        Self {
            particle_density: clamp_unit(self.particle_density),
            diffusion: clamp_unit(self.diffusion),
            ..self
        }
    }
}

/// The parameter set the animation step actually consumes.
///
/// Identical to the UI snapshot except that `diffusion` may have been
/// replaced by the smoothed gesture openness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveConfig {
    pub particle_density: f32,
    pub diffusion: f32,
    pub particle_color: Color,
    pub shape: Shape,
}

impl EffectiveConfig {
    pub fn from_visual(config: VisualConfig, diffusion: f32) -> Self {
        Self {
            particle_density: config.particle_density,
            diffusion,
            particle_color: config.particle_color,
            shape: config.shape,
        }
    }
}

/// Clamp into \[0, 1\]; NaN maps to 0.
#[inline]
pub fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
