//! One visualization session: engine, input merging and scheduling.
//!
//! All inputs go through [`Visualizer`]. After every change the merged
//! [`EffectiveConfig`] is compared with the last one applied and only the
//! effects whose field changed are run: `apply_shape`, `apply_color` and
//! `apply_density`. Diffusion is consumed directly by each step.

use crate::config::{EffectiveConfig, VisualConfig};
use crate::constants::MAX_PARTICLES;
use crate::engine::{FrameView, ParticleEngine};
use crate::error::{ParticleError, Result};
use crate::gesture::{BoxedDetector, GestureSampler, HandDetector};
use crate::scheduler::Scheduler;
use crate::signal::{GestureState, SignalCombiner};
use crate::{Color, Shape};
use std::time::Duration;

pub struct Visualizer {
    engine: ParticleEngine,
    combiner: SignalCombiner,
    scheduler: Scheduler,
    sampler: Option<GestureSampler<BoxedDetector>>,
    applied: Option<EffectiveConfig>,
}

impl Visualizer {
    /// Full-size session seeded from OS entropy.
    pub fn new(ui: VisualConfig) -> Result<Self> {
        Self::with_engine(ParticleEngine::new(MAX_PARTICLES)?, ui)
    }

    /// Build a session around `engine`, initializing it with `ui.shape`.
    pub fn with_engine(mut engine: ParticleEngine, ui: VisualConfig) -> Result<Self> {
        engine.initialize(ui.shape)?;
        let mut visualizer = Self {
            engine,
            combiner: SignalCombiner::new(ui),
            scheduler: Scheduler::default(),
            sampler: None,
            applied: None,
        };
        let effective = visualizer.combiner.effective();
        visualizer.apply_color(effective.particle_color);
        visualizer.apply_density(effective.particle_density);
        visualizer.applied = Some(effective);
        log::info!(
            "[visualizer] started: {} particles, shape={}, color={}, density={:.2}",
            visualizer.engine.capacity(),
            ui.shape,
            ui.particle_color,
            ui.particle_density
        );
        Ok(visualizer)
    }

    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn set_ui_config(&mut self, ui: VisualConfig) -> Result<()> {
        self.ensure_live()?;
        self.combiner.set_ui_config(ui);
        self.dispatch()
    }

    pub fn set_camera_enabled(&mut self, enabled: bool) -> Result<()> {
        self.ensure_live()?;
        if enabled != self.combiner.camera_enabled() {
            log::info!("[visualizer] camera {}", if enabled { "on" } else { "off" });
        }
        self.combiner.set_camera_enabled(enabled);
        self.dispatch()
    }

    /// Feed one raw openness sample from an external gesture source.
    pub fn push_gesture_sample(&mut self, raw_openness: f32) -> Result<()> {
        self.ensure_live()?;
        self.combiner.push_gesture_sample(raw_openness);
        self.dispatch()
    }

    /// Hand a detector to the session; it is sampled on the gesture timer
    /// while the camera is enabled. Replaces (and releases) any previous one.
    pub fn attach_gesture_source<D: HandDetector + 'static>(&mut self, detector: D) {
        let detector: BoxedDetector = Box::new(detector);
        self.attach_sampler(GestureSampler::new(detector));
    }

    pub fn attach_sampler(&mut self, sampler: GestureSampler<BoxedDetector>) {
        if let Some(mut previous) = self.sampler.replace(sampler) {
            previous.shutdown();
        }
    }

    pub fn detach_gesture_source(&mut self) {
        if let Some(mut sampler) = self.sampler.take() {
            sampler.shutdown();
        }
    }

    pub fn has_gesture_source(&self) -> bool {
        self.sampler.as_ref().is_some_and(|s| s.is_active())
    }

    /// Run everything due for one display frame and return the frame view.
    pub fn tick(&mut self, dt: Duration) -> FrameView<'_> {
        let tick = self.scheduler.poll(dt);
        if self.combiner.camera_enabled() {
            if let Some(sampler) = self.sampler.as_mut() {
                for _ in 0..tick.gesture_samples {
                    let openness = sampler.sample();
                    self.combiner.push_gesture_sample(openness);
                }
            }
        }
        if tick.step {
            let diffusion = self.combiner.effective().diffusion;
            self.engine.step(diffusion);
        }
        self.engine.frame()
    }

    /// Stop the scheduler, release the detector and the particle buffers.
    pub fn dispose(&mut self) {
        self.scheduler.cancel();
        self.detach_gesture_source();
        self.engine.dispose();
        log::info!("[visualizer] disposed");
    }

    pub fn frame(&self) -> FrameView<'_> {
        self.engine.frame()
    }

    pub fn effective_config(&self) -> EffectiveConfig {
        self.combiner.effective()
    }

    pub fn ui_config(&self) -> &VisualConfig {
        self.combiner.ui_config()
    }

    pub fn gesture(&self) -> &GestureState {
        self.combiner.gesture()
    }

    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    // Inputs are rejected, not absorbed, once the session is disposed.
    fn ensure_live(&self) -> Result<()> {
        if self.scheduler.is_cancelled() {
            return Err(ParticleError::Disposed);
        }
        Ok(())
    }

    fn dispatch(&mut self) -> Result<()> {
        self.ensure_live()?;
        let next = self.combiner.effective();
        let previous = self.applied;
        if previous.map(|p| p.shape) != Some(next.shape) {
            self.apply_shape(next.shape)?;
        }
        if previous.map(|p| p.particle_color) != Some(next.particle_color) {
            self.apply_color(next.particle_color);
        }
        if previous.map(|p| p.particle_density) != Some(next.particle_density) {
            self.apply_density(next.particle_density);
        }
        self.applied = Some(next);
        Ok(())
    }

    fn apply_shape(&mut self, shape: Shape) -> Result<()> {
        self.engine.set_shape(shape).inspect_err(|e| {
            log::warn!("[visualizer] shape change to {shape} failed: {e}");
        })
    }

    fn apply_color(&mut self, color: Color) {
        self.engine.set_color(color);
    }

    fn apply_density(&mut self, density: f32) {
        self.engine.set_density(density);
    }
}
