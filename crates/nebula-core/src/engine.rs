//! Per-particle animation state.
//!
//! The engine owns two parallel buffers of `capacity` points. `target` is
//! replaced wholesale whenever the shape changes; `current` is only touched
//! by [`ParticleEngine::step`], which pulls every particle a fixed fraction
//! of the way toward a jittered copy of its target. Density only limits how
//! many particles are drawn; hidden particles keep animating so raising the
//! density never reveals a frozen tail.

use crate::color::Color;
use crate::config::clamp_unit;
use crate::constants::{
    DIFFUSION_SCALE, GROUP_ROTATION_PER_FRAME, LERP_FACTOR, STAR_COUNT, STAR_COLOR,
};
use crate::error::{ParticleError, Result};
use crate::shape::{self, Shape};
use crate::starfield::StarField;
use crate::state::wrap_angle;
use glam::Vec3;
use rand::prelude::*;

/// Lifecycle of a [`ParticleEngine`]. There is no way back from `Disposed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
    Animating,
    Disposed,
}

/// Y-axis rotation of the particle group and of the background stars,
/// each wrapped into \[0, 2π).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub group: f32,
    pub background: f32,
}

/// Read-only per-frame view handed to the render adapter.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub positions: &'a [Vec3],
    pub background: &'a [Vec3],
    pub visible_count: usize,
    pub color: Color,
    pub background_color: [f32; 4],
    /// Rotation accumulated since the engine started, modulo a full turn.
    pub rotation: Rotation,
    /// Rotation added by the most recent step.
    pub rotation_delta: Rotation,
}

impl<'a> FrameView<'a> {
    /// Positions as a flat `x, y, z` slice ready for a vertex buffer upload.
    pub fn positions_flat(&self) -> &'a [f32] {
        bytemuck::cast_slice(self.positions)
    }

    pub fn background_flat(&self) -> &'a [f32] {
        bytemuck::cast_slice(self.background)
    }

    pub fn visible_positions(&self) -> &'a [Vec3] {
        &self.positions[..self.visible_count.min(self.positions.len())]
    }
}

pub struct ParticleEngine {
    capacity: usize,
    current: Vec<Vec3>,
    target: Vec<Vec3>,
    shape: Option<Shape>,
    density: f32,
    visible_count: usize,
    color: Color,
    group_angle: f64,
    rotation_delta: Rotation,
    stars: StarField,
    state: EngineState,
    rng: StdRng,
}

impl ParticleEngine {
    /// Create an engine for `capacity` particles seeded from OS entropy.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::from_rng(capacity, StdRng::from_entropy())
    }

    /// Create an engine whose jitter and generated shapes are reproducible.
    pub fn with_seed(capacity: usize, seed: u64) -> Result<Self> {
        Self::from_rng(capacity, StdRng::seed_from_u64(seed))
    }

    fn from_rng(capacity: usize, rng: StdRng) -> Result<Self> {
        shape::check_capacity(capacity)?;
        Ok(Self {
            capacity,
            current: Vec::new(),
            target: Vec::new(),
            shape: None,
            density: 1.0,
            visible_count: capacity,
            color: Color::default(),
            group_angle: 0.0,
            rotation_delta: Rotation::default(),
            stars: StarField::default(),
            state: EngineState::Uninitialized,
            rng,
        })
    }

    /// Fill both buffers with `shape` and move to `Ready`.
    ///
    /// Calling this again on a live engine behaves like [`Self::set_shape`].
    pub fn initialize(&mut self, shape: Shape) -> Result<()> {
        match self.state {
            EngineState::Uninitialized => {}
            EngineState::Disposed => return Err(ParticleError::Disposed),
            EngineState::Ready | EngineState::Animating => return self.set_shape(shape),
        }
        let points = shape::generate_with(shape, self.capacity, &mut self.rng)?;
        self.current = points.clone();
        self.target = points;
        self.stars = StarField::new(STAR_COUNT, &mut self.rng);
        self.shape = Some(shape);
        self.state = EngineState::Ready;
        log::debug!(
            "[engine] initialized {} particles as {shape}",
            self.capacity
        );
        Ok(())
    }

    /// Replace every target point with a fresh sample of `shape`.
    ///
    /// `current` is left alone and drifts toward the new targets over the
    /// following frames. Ignored before initialization.
    pub fn set_shape(&mut self, shape: Shape) -> Result<()> {
        match self.state {
            EngineState::Uninitialized => {
                log::debug!("[engine] shape {shape} requested before init; ignoring");
                return Ok(());
            }
            EngineState::Disposed => return Err(ParticleError::Disposed),
            EngineState::Ready | EngineState::Animating => {}
        }
        let points = shape::generate_with(shape, self.capacity, &mut self.rng)?;
        self.target.copy_from_slice(&points);
        self.shape = Some(shape);
        log::debug!("[engine] retargeted to {shape}");
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Draw only the first `floor(capacity * density)` particles.
    pub fn set_density(&mut self, density: f32) {
        self.density = clamp_unit(density);
        let visible = (self.capacity as f64 * self.density as f64).floor() as usize;
        self.visible_count = visible.min(self.capacity);
    }

    /// Advance one animation frame.
    ///
    /// `diffusion` is clamped into \[0, 1\]. Does nothing unless the engine
    /// is `Ready` or `Animating`.
    pub fn step(&mut self, diffusion: f32) {
        match self.state {
            EngineState::Animating => {}
            EngineState::Ready => {
                self.state = EngineState::Animating;
                log::debug!("[engine] animating");
            }
            EngineState::Uninitialized | EngineState::Disposed => return,
        }

        let spread = clamp_unit(diffusion) * DIFFUSION_SCALE;
        if spread > 0.0 {
            let rng = &mut self.rng;
            for (current, target) in self.current.iter_mut().zip(&self.target) {
                let jitter = Vec3::new(
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                ) * spread;
                *current = current.lerp(*target + jitter, LERP_FACTOR);
            }
        } else {
            for (current, target) in self.current.iter_mut().zip(&self.target) {
                *current = current.lerp(*target, LERP_FACTOR);
            }
        }

        self.group_angle = wrap_angle(self.group_angle + GROUP_ROTATION_PER_FRAME as f64);
        let background = self.stars.advance();
        self.rotation_delta = Rotation {
            group: GROUP_ROTATION_PER_FRAME,
            background,
        };
    }

    /// Release the buffers. Every later call is a no-op or returns
    /// [`ParticleError::Disposed`].
    pub fn dispose(&mut self) {
        if self.state == EngineState::Disposed {
            return;
        }
        self.current = Vec::new();
        self.target = Vec::new();
        self.stars.clear();
        self.visible_count = 0;
        self.state = EngineState::Disposed;
        log::debug!("[engine] disposed");
    }

    pub fn frame(&self) -> FrameView<'_> {
        FrameView {
            positions: &self.current,
            background: self.stars.stars(),
            visible_count: self.visible_count.min(self.current.len()),
            color: self.color,
            background_color: STAR_COLOR,
            rotation: Rotation {
                group: self.group_angle as f32,
                background: self.stars.rotation(),
            },
            rotation_delta: self.rotation_delta,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn current(&self) -> &[Vec3] {
        &self.current
    }

    pub fn target(&self) -> &[Vec3] {
        &self.target
    }
}
