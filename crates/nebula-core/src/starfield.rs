use crate::constants::{BACKGROUND_ROTATION_PER_FRAME, STAR_FIELD_EXTENT};
use crate::state::wrap_angle;
use glam::Vec3;
use rand::prelude::*;

/// Static, non-interactive background stars that only rotate slowly for a
/// parallax cue behind the cloud.
#[derive(Clone, Debug, Default)]
pub struct StarField {
    stars: Vec<Vec3>,
    // Kept in f64 and wrapped so the per-frame increment never rounds away.
    rotation: f64,
}

impl StarField {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let half = STAR_FIELD_EXTENT * 0.5;
        let stars = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                )
            })
            .collect();
        Self {
            stars,
            rotation: 0.0,
        }
    }

    pub fn stars(&self) -> &[Vec3] {
        &self.stars
    }

    /// Current rotation in \[0, 2π).
    pub fn rotation(&self) -> f32 {
        self.rotation as f32
    }

    pub(crate) fn advance(&mut self) -> f32 {
        self.rotation = wrap_angle(self.rotation + BACKGROUND_ROTATION_PER_FRAME as f64);
        BACKGROUND_ROTATION_PER_FRAME
    }

    pub(crate) fn clear(&mut self) {
        self.stars = Vec::new();
    }
}
